//! Core data model definitions shared across Scamguard crates.
#![allow(missing_docs)]

pub mod envelope;
pub mod mode;
pub mod state;
pub mod tier;
pub mod verdict;

// Intentionally curated re-exports for downstream consumers.
pub use envelope::{
    PhoneRiskPayload, ScanEnvelope, ScanPayload, TextRiskPayload,
    TextScanRequest, UrlRiskPayload,
};
pub use mode::DetectionMode;
pub use state::{ErrorKind, ScanState};
pub use tier::RiskTier;
pub use verdict::RiskVerdict;
