//! Remote anti-fraud gateway: the contract sessions consume plus the
//! transport failure taxonomy.

mod http;

pub use http::HttpScanGateway;

use async_trait::async_trait;
use scamguard_model::{
    ErrorKind, PhoneRiskPayload, ScanEnvelope, TextRiskPayload, UrlRiskPayload,
};

/// Transport-level failure talking to the anti-fraud service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The service answered with a non-success HTTP status.
    #[error("HTTP status {status}")]
    HttpStatus {
        /// Status code of the response
        status: u16,
        /// Response body, when one could be read
        body: Option<String>,
    },

    /// The response body did not decode as the expected envelope shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// No response before the configured deadline.
    #[error("request timed out")]
    Timeout,

    /// Network-level failure: DNS, connection refused, TLS.
    #[error("service unreachable: {0}")]
    Unreachable(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::MalformedResponse(err.to_string())
        } else {
            GatewayError::Unreachable(err.to_string())
        }
    }
}

impl From<GatewayError> for ErrorKind {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::HttpStatus { status, body } => ErrorKind::Server {
                status,
                body: body.unwrap_or_default(),
            },
            GatewayError::MalformedResponse(detail) => ErrorKind::Malformed { detail },
            GatewayError::Timeout => ErrorKind::Timeout,
            GatewayError::Unreachable(detail) => ErrorKind::Unreachable { detail },
        }
    }
}

/// Asynchronous contract for the three anti-fraud lookups.
///
/// One method per [`DetectionMode`](scamguard_model::DetectionMode).
/// Implementations are shared across sessions behind an `Arc`, so they must
/// be `Send + Sync` and cheap to call concurrently.
#[async_trait]
pub trait ScanGateway: Send + Sync {
    /// Look up a phone number in the scam-number database.
    async fn scan_phone(
        &self,
        phone_number: &str,
    ) -> Result<ScanEnvelope<PhoneRiskPayload>, GatewayError>;

    /// Look up a URL in the malicious-site database.
    async fn scan_url(&self, url: &str) -> Result<ScanEnvelope<UrlRiskPayload>, GatewayError>;

    /// Submit message text for AI fraud analysis.
    async fn scan_text(&self, text: &str) -> Result<ScanEnvelope<TextRiskPayload>, GatewayError>;
}
