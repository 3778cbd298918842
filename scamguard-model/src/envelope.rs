use crate::mode::DetectionMode;

/// Top-level wrapper every anti-fraud endpoint answers with.
///
/// `succeeded` reports whether the service processed the request; when it
/// is false the payload is not trustworthy and consumers surface an error
/// instead of classifying. A missing payload on a succeeded envelope is
/// legal and means the service had no record for the input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanEnvelope<T> {
    /// Whether the service processed the request
    #[cfg_attr(feature = "serde", serde(rename = "success"))]
    pub succeeded: bool,
    /// Service version string, e.g. `"v1"`
    pub version: String,
    /// Mode-specific result, absent when the service found nothing
    #[cfg_attr(feature = "serde", serde(rename = "data"))]
    pub payload: Option<T>,
}

impl<T> ScanEnvelope<T> {
    /// Re-wrap the payload, keeping the envelope metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ScanEnvelope<U> {
        ScanEnvelope {
            succeeded: self.succeeded,
            version: self.version,
            payload: self.payload.map(f),
        }
    }
}

/// Result payload of a phone number lookup.
///
/// Every field is optional on the wire; absent fields are distinct from
/// empty strings and both occur in practice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PhoneRiskPayload {
    /// Free-form risk level string, `HIGH`/`MEDIUM`/`LOW`/`SAFE` documented
    pub risk_level: Option<String>,
    /// Human-readable explanation
    pub description: Option<String>,
}

/// Result payload of a URL lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct UrlRiskPayload {
    /// Free-form risk level string
    pub risk_level: Option<String>,
    /// Human-readable explanation
    pub description: Option<String>,
    /// Threat category, e.g. phishing or malware
    pub threat_type: Option<String>,
}

/// Result payload of a text analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct TextRiskPayload {
    /// Free-form risk level string
    pub risk_level: Option<String>,
    /// Human-readable explanation
    pub description: Option<String>,
    /// Recommended action for the user
    pub suggestion: Option<String>,
}

/// Request body for the text analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextScanRequest {
    /// The message text to analyze, sent verbatim
    pub text: String,
}

/// Mode-tagged union over the three payload shapes.
///
/// Field access is uniform: accessors return `None` both when the service
/// omitted the field and when the variant does not carry it, so the
/// classifier never inspects payload shape at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "mode", content = "payload", rename_all = "lowercase")
)]
pub enum ScanPayload {
    /// Phone lookup result
    Phone(PhoneRiskPayload),
    /// URL lookup result
    Url(UrlRiskPayload),
    /// Text analysis result
    Text(TextRiskPayload),
}

impl ScanPayload {
    /// The mode this payload belongs to.
    pub fn mode(&self) -> DetectionMode {
        match self {
            ScanPayload::Phone(_) => DetectionMode::Phone,
            ScanPayload::Url(_) => DetectionMode::Url,
            ScanPayload::Text(_) => DetectionMode::Text,
        }
    }

    /// Raw risk level string, if the service sent one.
    pub fn risk_level(&self) -> Option<&str> {
        match self {
            ScanPayload::Phone(payload) => payload.risk_level.as_deref(),
            ScanPayload::Url(payload) => payload.risk_level.as_deref(),
            ScanPayload::Text(payload) => payload.risk_level.as_deref(),
        }
    }

    /// Service-provided explanation, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            ScanPayload::Phone(payload) => payload.description.as_deref(),
            ScanPayload::Url(payload) => payload.description.as_deref(),
            ScanPayload::Text(payload) => payload.description.as_deref(),
        }
    }

    /// Threat category; only URL lookups carry one.
    pub fn threat_type(&self) -> Option<&str> {
        match self {
            ScanPayload::Url(payload) => payload.threat_type.as_deref(),
            _ => None,
        }
    }

    /// Recommended action; only text analyses carry one.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ScanPayload::Text(payload) => payload.suggestion.as_deref(),
            _ => None,
        }
    }
}
