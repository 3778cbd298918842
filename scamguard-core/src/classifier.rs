//! Deterministic risk classification over gateway envelopes.
//!
//! [`classify`] is a pure function: the same envelope always yields the
//! same verdict. Transport and business failures never reach it; sessions
//! fold those into error states before classification.

use scamguard_model::{DetectionMode, RiskTier, RiskVerdict, ScanEnvelope, ScanPayload};
use tracing::trace;

/// Reasons attached to a conclusive-safe verdict.
const SAFE_REASONS: [&str; 2] = ["no fraud indicators", "appears legitimate"];
/// Reason attached when the database has no record for the input.
const NO_RECORD_REASON: &str = "no record found in database";
/// Fallback reason when a risk verdict has no detail to show.
const NO_DETAILS_REASON: &str = "no details available";
/// Level shown when the payload is present but the level field is not.
const UNKNOWN_LEVEL: &str = "unknown";

/// Derive a [`RiskVerdict`] from a succeeded envelope.
///
/// A missing payload means the service had no record and classifies as
/// [`RiskTier::NoData`]. A present payload classifies by its risk level:
/// the four documented levels map to their tiers, anything else (including
/// a missing level field) folds to [`RiskTier::Unknown`] and is surfaced
/// as a signal rather than trusted as clean.
///
/// Reasons are assembled in a fixed order: risk level, description, threat
/// type, suggestion, skipping absent and empty fields. Every verdict
/// carries at least one reason.
pub fn classify(mode: DetectionMode, envelope: &ScanEnvelope<ScanPayload>) -> RiskVerdict {
    debug_assert!(
        envelope
            .payload
            .as_ref()
            .is_none_or(|payload| payload.mode() == mode),
        "payload variant does not match the scanned mode"
    );

    let verdict = match envelope.payload.as_ref() {
        None => verdict_for(RiskTier::NoData, None),
        Some(payload) => {
            let tier = payload
                .risk_level()
                .and_then(RiskTier::from_level)
                .unwrap_or(RiskTier::Unknown);
            verdict_for(tier, Some(payload))
        }
    };

    trace!(
        mode = %mode,
        tier = %verdict.tier,
        score = verdict.score,
        "classified scan envelope"
    );
    verdict
}

fn verdict_for(tier: RiskTier, payload: Option<&ScanPayload>) -> RiskVerdict {
    let mut reasons: Vec<String> = Vec::new();

    match tier {
        RiskTier::Safe => {
            reasons.extend(SAFE_REASONS.iter().map(ToString::to_string));
        }
        RiskTier::NoData => {
            reasons.push(NO_RECORD_REASON.to_string());
        }
        RiskTier::High | RiskTier::Medium | RiskTier::Low | RiskTier::Unknown => {
            if let Some(payload) = payload {
                let level = non_empty(payload.risk_level()).unwrap_or(UNKNOWN_LEVEL);
                reasons.push(format!("risk level: {level}"));
                if let Some(description) = non_empty(payload.description()) {
                    reasons.push(description.to_string());
                }
                if let Some(threat) = non_empty(payload.threat_type()) {
                    reasons.push(format!("threat type: {threat}"));
                }
                if let Some(suggestion) = non_empty(payload.suggestion()) {
                    reasons.push(format!("suggestion: {suggestion}"));
                }
            }
        }
    }

    if reasons.is_empty() {
        reasons.push(NO_DETAILS_REASON.to_string());
    }

    RiskVerdict {
        tier,
        score: tier.score(),
        title: tier.title().to_string(),
        reasons,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use scamguard_model::{PhoneRiskPayload, TextRiskPayload, UrlRiskPayload};

    use super::*;

    fn envelope(payload: Option<ScanPayload>) -> ScanEnvelope<ScanPayload> {
        ScanEnvelope {
            succeeded: true,
            version: "v1".to_string(),
            payload,
        }
    }

    fn phone(level: Option<&str>, description: Option<&str>) -> ScanPayload {
        ScanPayload::Phone(PhoneRiskPayload {
            risk_level: level.map(str::to_string),
            description: description.map(str::to_string),
        })
    }

    #[test]
    fn high_risk_phone_report_yields_the_full_verdict() {
        let envelope = envelope(Some(phone(Some("HIGH"), Some("known scam number"))));
        let verdict = classify(DetectionMode::Phone, &envelope);

        assert_eq!(verdict.tier, RiskTier::High);
        assert_eq!(verdict.score, 85);
        assert_eq!(verdict.title, "high risk");
        assert_eq!(
            verdict.reasons,
            vec!["risk level: HIGH".to_string(), "known scam number".to_string()]
        );
        assert!(!verdict.is_safe());
    }

    #[test]
    fn missing_payload_classifies_as_no_data() {
        let verdict = classify(DetectionMode::Url, &envelope(None));

        assert_eq!(verdict.tier, RiskTier::NoData);
        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.title, "no data found");
        assert_eq!(verdict.reasons, vec!["no record found in database".to_string()]);
        assert!(verdict.is_safe());
    }

    #[test]
    fn safe_text_analysis_gets_the_canonical_reasons() {
        let payload = ScanPayload::Text(TextRiskPayload {
            risk_level: Some("SAFE".to_string()),
            ..TextRiskPayload::default()
        });
        let verdict = classify(DetectionMode::Text, &envelope(Some(payload)));

        assert_eq!(verdict.tier, RiskTier::Safe);
        assert_eq!(verdict.score, 10);
        assert_eq!(verdict.title, "safe content");
        assert_eq!(
            verdict.reasons,
            vec!["no fraud indicators".to_string(), "appears legitimate".to_string()]
        );
        assert!(verdict.is_safe());
    }

    #[test]
    fn safe_verdicts_ignore_service_detail_fields() {
        let payload = ScanPayload::Text(TextRiskPayload {
            risk_level: Some("safe".to_string()),
            description: Some("looks fine".to_string()),
            suggestion: Some("none needed".to_string()),
        });
        let verdict = classify(DetectionMode::Text, &envelope(Some(payload)));

        assert_eq!(
            verdict.reasons,
            vec!["no fraud indicators".to_string(), "appears legitimate".to_string()]
        );
    }

    #[test]
    fn unrecognized_level_is_surfaced_as_a_signal() {
        let envelope = envelope(Some(phone(Some("CRITICAL"), None)));
        let verdict = classify(DetectionMode::Phone, &envelope);

        assert_eq!(verdict.tier, RiskTier::Unknown);
        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.title, "unrecognized risk");
        assert_eq!(verdict.reasons, vec!["risk level: CRITICAL".to_string()]);
        assert!(!verdict.is_safe());
    }

    #[test]
    fn payload_without_a_level_reports_an_unknown_level() {
        let envelope = envelope(Some(phone(None, Some("number seen in reports"))));
        let verdict = classify(DetectionMode::Phone, &envelope);

        assert_eq!(verdict.tier, RiskTier::Unknown);
        assert_eq!(
            verdict.reasons,
            vec![
                "risk level: unknown".to_string(),
                "number seen in reports".to_string()
            ]
        );
    }

    #[test]
    fn url_verdicts_order_description_before_threat_type() {
        let payload = ScanPayload::Url(UrlRiskPayload {
            risk_level: Some("MEDIUM".to_string()),
            description: Some("recently registered domain".to_string()),
            threat_type: Some("phishing".to_string()),
        });
        let verdict = classify(DetectionMode::Url, &envelope(Some(payload)));

        assert_eq!(verdict.tier, RiskTier::Medium);
        assert_eq!(verdict.score, 60);
        assert_eq!(
            verdict.reasons,
            vec![
                "risk level: MEDIUM".to_string(),
                "recently registered domain".to_string(),
                "threat type: phishing".to_string(),
            ]
        );
    }

    #[test]
    fn text_verdicts_append_the_suggestion_last() {
        let payload = ScanPayload::Text(TextRiskPayload {
            risk_level: Some("LOW".to_string()),
            description: Some("urgency cues detected".to_string()),
            suggestion: Some("verify the sender through another channel".to_string()),
        });
        let verdict = classify(DetectionMode::Text, &envelope(Some(payload)));

        assert_eq!(verdict.tier, RiskTier::Low);
        assert_eq!(verdict.score, 20);
        assert_eq!(
            verdict.reasons,
            vec![
                "risk level: LOW".to_string(),
                "urgency cues detected".to_string(),
                "suggestion: verify the sender through another channel".to_string(),
            ]
        );
    }

    #[test]
    fn empty_strings_are_skipped_but_the_verdict_keeps_a_reason() {
        let envelope = envelope(Some(phone(Some(""), Some(""))));
        let verdict = classify(DetectionMode::Phone, &envelope);

        assert_eq!(verdict.tier, RiskTier::Unknown);
        assert_eq!(verdict.reasons, vec!["risk level: unknown".to_string()]);
    }

    #[test]
    fn the_literal_nodata_level_is_not_a_documented_level() {
        let envelope = envelope(Some(phone(Some("NODATA"), None)));
        let verdict = classify(DetectionMode::Phone, &envelope);

        // A present payload claiming NODATA is an out-of-vocabulary answer,
        // not the same as an absent payload.
        assert_eq!(verdict.tier, RiskTier::Unknown);
        assert_eq!(verdict.reasons, vec!["risk level: NODATA".to_string()]);
    }

    #[test]
    fn classification_is_deterministic() {
        let envelope = envelope(Some(phone(Some("HIGH"), Some("known scam number"))));
        let first = classify(DetectionMode::Phone, &envelope);
        let second = classify(DetectionMode::Phone, &envelope);
        assert_eq!(first, second);
    }
}
