//! End-to-end scan flows through the public surface: coordinator in,
//! classified state out.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use scamguard_core::{
    DetectionMode, GatewayError, RiskTier, ScanCoordinator, ScanEnvelope, ScanGateway,
    ScanState,
};
use scamguard_model::{PhoneRiskPayload, TextRiskPayload, UrlRiskPayload};
use tokio_stream::StreamExt;

type Scripted<T> = HashMap<String, Result<ScanEnvelope<T>, GatewayError>>;

/// Gateway with a fixed response table per mode. Lookups not in the table
/// panic, which keeps accidental cross-mode traffic loud.
#[derive(Default)]
struct TableGateway {
    phone: Scripted<PhoneRiskPayload>,
    url: Scripted<UrlRiskPayload>,
    text: Scripted<TextRiskPayload>,
}

fn ok<T>(payload: Option<T>) -> Result<ScanEnvelope<T>, GatewayError> {
    Ok(ScanEnvelope {
        succeeded: true,
        version: "v1".to_string(),
        payload,
    })
}

#[async_trait]
impl ScanGateway for TableGateway {
    async fn scan_phone(
        &self,
        phone_number: &str,
    ) -> Result<ScanEnvelope<PhoneRiskPayload>, GatewayError> {
        self.phone
            .get(phone_number)
            .cloned()
            .unwrap_or_else(|| panic!("unscripted phone lookup: {phone_number:?}"))
    }

    async fn scan_url(&self, url: &str) -> Result<ScanEnvelope<UrlRiskPayload>, GatewayError> {
        self.url
            .get(url)
            .cloned()
            .unwrap_or_else(|| panic!("unscripted url lookup: {url:?}"))
    }

    async fn scan_text(&self, text: &str) -> Result<ScanEnvelope<TextRiskPayload>, GatewayError> {
        self.text
            .get(text)
            .cloned()
            .unwrap_or_else(|| panic!("unscripted text lookup: {text:?}"))
    }
}

async fn scan_to_terminal(
    coordinator: &ScanCoordinator,
    mode: DetectionMode,
    input: &str,
) -> ScanState {
    let mut updates = coordinator.observe(mode);
    coordinator.scan(mode, input);
    loop {
        match updates.next().await {
            Some(state) if state.is_pending() => continue,
            Some(state) => return state,
            None => panic!("state stream closed"),
        }
    }
}

#[tokio::test]
async fn phone_high_risk_flow_produces_the_documented_verdict() {
    let mut gateway = TableGateway::default();
    gateway.phone.insert(
        "0900000000".to_string(),
        ok(Some(PhoneRiskPayload {
            risk_level: Some("HIGH".to_string()),
            description: Some("known scam number".to_string()),
        })),
    );
    let coordinator = ScanCoordinator::new(Arc::new(gateway));

    let state = scan_to_terminal(&coordinator, DetectionMode::Phone, "0900000000").await;
    let verdict = state.verdict().expect("phone scan should succeed");

    assert_eq!(verdict.tier, RiskTier::High);
    assert_eq!(verdict.score, 85);
    assert_eq!(verdict.title, "high risk");
    assert_eq!(
        verdict.reasons,
        vec![
            "risk level: HIGH".to_string(),
            "known scam number".to_string()
        ]
    );
    assert!(!verdict.is_safe());
}

#[tokio::test]
async fn url_without_a_database_record_reports_no_data() {
    let mut gateway = TableGateway::default();
    gateway
        .url
        .insert("unknown-site.example".to_string(), ok(None));
    let coordinator = ScanCoordinator::new(Arc::new(gateway));

    let state = scan_to_terminal(&coordinator, DetectionMode::Url, "unknown-site.example").await;
    let verdict = state.verdict().expect("url scan should succeed");

    assert_eq!(verdict.tier, RiskTier::NoData);
    assert_eq!(verdict.score, 0);
    assert_eq!(verdict.title, "no data found");
    assert_eq!(verdict.reasons, vec!["no record found in database".to_string()]);
    assert!(verdict.is_safe());
}

#[tokio::test]
async fn text_analysis_carries_description_and_suggestion_into_reasons() {
    let mut gateway = TableGateway::default();
    gateway.text.insert(
        "You won a prize, click here".to_string(),
        ok(Some(TextRiskPayload {
            risk_level: Some("HIGH".to_string()),
            description: Some("matches known reward scam phrasing".to_string()),
            suggestion: Some("do not follow the link".to_string()),
        })),
    );
    let coordinator = ScanCoordinator::new(Arc::new(gateway));

    let state =
        scan_to_terminal(&coordinator, DetectionMode::Text, "You won a prize, click here").await;
    let verdict = state.verdict().expect("text scan should succeed");

    assert_eq!(verdict.tier, RiskTier::High);
    assert_eq!(
        verdict.reasons,
        vec![
            "risk level: HIGH".to_string(),
            "matches known reward scam phrasing".to_string(),
            "suggestion: do not follow the link".to_string(),
        ]
    );
}

#[tokio::test]
async fn safe_text_analysis_reports_the_canonical_reasons() {
    let mut gateway = TableGateway::default();
    gateway.text.insert(
        "see you at lunch tomorrow".to_string(),
        ok(Some(TextRiskPayload {
            risk_level: Some("SAFE".to_string()),
            description: None,
            suggestion: None,
        })),
    );
    let coordinator = ScanCoordinator::new(Arc::new(gateway));

    let state =
        scan_to_terminal(&coordinator, DetectionMode::Text, "see you at lunch tomorrow").await;
    let verdict = state.verdict().expect("text scan should succeed");

    assert_eq!(verdict.tier, RiskTier::Safe);
    assert_eq!(verdict.score, 10);
    assert_eq!(
        verdict.reasons,
        vec![
            "no fraud indicators".to_string(),
            "appears legitimate".to_string()
        ]
    );
    assert!(verdict.is_safe());
}

#[tokio::test]
async fn failed_envelope_surfaces_as_a_service_error() {
    let mut gateway = TableGateway::default();
    gateway.phone.insert(
        "0911222333".to_string(),
        Ok(ScanEnvelope {
            succeeded: false,
            version: "v2".to_string(),
            payload: None,
        }),
    );
    let coordinator = ScanCoordinator::new(Arc::new(gateway));

    let state = scan_to_terminal(&coordinator, DetectionMode::Phone, "0911222333").await;

    assert!(state.verdict().is_none());
    let ScanState::Error { title, message, .. } = state else {
        panic!("expected an error state")
    };
    assert_eq!(title, "service reported failure");
    assert_eq!(
        message,
        "the service could not process the request (version v2)"
    );
}

#[tokio::test]
async fn each_mode_keeps_its_own_terminal_state() {
    let mut gateway = TableGateway::default();
    gateway.phone.insert(
        "0900000000".to_string(),
        ok(Some(PhoneRiskPayload {
            risk_level: Some("HIGH".to_string()),
            description: None,
        })),
    );
    gateway.url.insert(
        "shop.example".to_string(),
        ok(Some(UrlRiskPayload {
            risk_level: Some("SAFE".to_string()),
            ..UrlRiskPayload::default()
        })),
    );
    gateway.text.insert("hello".to_string(), ok(None));
    let coordinator = ScanCoordinator::new(Arc::new(gateway));

    let phone = scan_to_terminal(&coordinator, DetectionMode::Phone, "0900000000").await;
    let url = scan_to_terminal(&coordinator, DetectionMode::Url, "shop.example").await;
    let text = scan_to_terminal(&coordinator, DetectionMode::Text, "hello").await;

    assert_eq!(phone.verdict().expect("phone verdict").tier, RiskTier::High);
    assert_eq!(url.verdict().expect("url verdict").tier, RiskTier::Safe);
    assert_eq!(text.verdict().expect("text verdict").tier, RiskTier::NoData);

    // Re-reading each session shows the states did not bleed across modes.
    assert_eq!(
        coordinator
            .state(DetectionMode::Phone)
            .verdict()
            .expect("phone verdict persists")
            .tier,
        RiskTier::High
    );
    assert_eq!(
        coordinator
            .state(DetectionMode::Url)
            .verdict()
            .expect("url verdict persists")
            .tier,
        RiskTier::Safe
    );
    assert_eq!(
        coordinator
            .state(DetectionMode::Text)
            .verdict()
            .expect("text verdict persists")
            .tier,
        RiskTier::NoData
    );
}
