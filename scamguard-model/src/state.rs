use std::fmt::Display;
use std::fmt::Formatter;

use crate::verdict::RiskVerdict;

/// Failure taxonomy carried inside [`ScanState::Error`].
///
/// This is state data, not a propagated error type: sessions fold gateway
/// failures into it and consumers render it. The variants distinguish the
/// failures a user can act on differently (retry later, fix input, report).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ErrorKind {
    /// The service answered with a failure status, or flagged a delivered
    /// envelope as unprocessed
    Server {
        /// HTTP status code of the response
        status: u16,
        /// Response body, possibly empty
        body: String,
    },
    /// The response did not decode as the expected envelope shape
    Malformed {
        /// Decoder detail
        detail: String,
    },
    /// No response before the configured deadline
    Timeout,
    /// Network-level failure: DNS, connection refused, TLS
    Unreachable {
        /// Transport detail
        detail: String,
    },
    /// Anything outside the taxonomy above
    Unclassified {
        /// Best-effort detail
        detail: String,
    },
}

impl ErrorKind {
    /// Catch-all constructor for failures outside the transport taxonomy.
    pub fn unclassified(detail: impl Into<String>) -> Self {
        ErrorKind::Unclassified {
            detail: detail.into(),
        }
    }

    /// Short headline for this failure class.
    pub fn title(&self) -> String {
        match self {
            ErrorKind::Server { status, .. } => format!("server error ({status})"),
            ErrorKind::Malformed { .. } => "malformed response".to_string(),
            ErrorKind::Timeout => "request timed out".to_string(),
            ErrorKind::Unreachable { .. } => "service unreachable".to_string(),
            ErrorKind::Unclassified { .. } => "scan failed".to_string(),
        }
    }

    /// Longer detail line for this failure, always non-empty.
    pub fn message(&self) -> String {
        match self {
            ErrorKind::Server { body, .. } if body.is_empty() => {
                "no further detail from server".to_string()
            }
            ErrorKind::Server { body, .. } => body.clone(),
            ErrorKind::Malformed { detail }
            | ErrorKind::Unreachable { detail }
            | ErrorKind::Unclassified { detail } => detail.clone(),
            ErrorKind::Timeout => "the service did not answer before the deadline".to_string(),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

/// Lifecycle of one detection mode's scan.
///
/// Exactly one variant is active per mode at any instant. Only the owning
/// session writes transitions; terminal states persist until the next scan
/// or a reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "lowercase"))]
pub enum ScanState {
    /// No scan issued since construction or the last reset
    #[default]
    Idle,
    /// A scan is in flight
    Loading,
    /// The latest scan classified successfully
    Success(RiskVerdict),
    /// The latest scan failed
    Error {
        /// Failure classification
        kind: ErrorKind,
        /// Short headline for display
        title: String,
        /// Longer detail line for display
        message: String,
    },
}

impl ScanState {
    /// Build an error state with the default title and message for `kind`.
    pub fn failure(kind: ErrorKind) -> ScanState {
        let title = kind.title();
        let message = kind.message();
        ScanState::Error {
            kind,
            title,
            message,
        }
    }

    /// Whether a scan outcome is still pending (`Idle` or `Loading`).
    pub fn is_pending(&self) -> bool {
        matches!(self, ScanState::Idle | ScanState::Loading)
    }

    /// Whether no scan has been issued since construction or the last reset.
    pub fn is_idle(&self) -> bool {
        matches!(self, ScanState::Idle)
    }

    /// Whether a scan is currently in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, ScanState::Loading)
    }

    /// The verdict, when this is a success state.
    pub fn verdict(&self) -> Option<&RiskVerdict> {
        match self {
            ScanState::Success(verdict) => Some(verdict),
            _ => None,
        }
    }
}
