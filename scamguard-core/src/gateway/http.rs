//! reqwest-backed gateway implementation for the hosted anti-fraud service.

use reqwest::{Client, RequestBuilder};
use scamguard_model::{
    PhoneRiskPayload, ScanEnvelope, TextRiskPayload, TextScanRequest, UrlRiskPayload,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::GatewayConfig;

use super::{GatewayError, ScanGateway};

/// Header carrying the optional API key.
const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the anti-fraud gateway.
///
/// Thin wrapper over a shared [`reqwest::Client`]: one instance serves all
/// sessions. The request deadline from [`GatewayConfig`] applies to the
/// whole round-trip, body included.
pub struct HttpScanGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for HttpScanGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpScanGateway")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl HttpScanGateway {
    /// Build a gateway from configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        debug!(base_url = %config.base_url, "creating anti-fraud gateway client");

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// The configured service root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn apply_headers(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ScanEnvelope<T>, GatewayError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .ok()
                .filter(|body| !body.is_empty());
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ScanEnvelope<T>>()
            .await
            .map_err(GatewayError::from)
    }
}

/// The database stores absolute URLs; bare domains get an https scheme.
fn normalize_target_url(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    }
}

#[async_trait::async_trait]
impl ScanGateway for HttpScanGateway {
    async fn scan_phone(
        &self,
        phone_number: &str,
    ) -> Result<ScanEnvelope<PhoneRiskPayload>, GatewayError> {
        let request = self.apply_headers(
            self.client
                .get(self.endpoint("api/cellphone"))
                .query(&[("phoneNumber", phone_number)]),
        );
        self.execute(request).await
    }

    async fn scan_url(&self, url: &str) -> Result<ScanEnvelope<UrlRiskPayload>, GatewayError> {
        let target = normalize_target_url(url);
        let request = self.apply_headers(
            self.client
                .get(self.endpoint("api/url-check"))
                .query(&[("url", target.as_str())]),
        );
        self.execute(request).await
    }

    async fn scan_text(&self, text: &str) -> Result<ScanEnvelope<TextRiskPayload>, GatewayError> {
        let body = TextScanRequest {
            text: text.to_string(),
        };
        let request = self
            .apply_headers(self.client.post(self.endpoint("api/ai-check")).json(&body));
        self.execute(request).await
    }
}
