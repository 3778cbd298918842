use std::fmt::Display;
use std::fmt::Formatter;

/// The kind of evidence a scan examines.
///
/// Each mode maps to its own gateway endpoint and payload shape, and each
/// mode owns an independent scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DetectionMode {
    /// Phone number lookup
    Phone,
    /// Website URL lookup
    Url,
    /// Free-form message text analysis
    Text,
}

impl DetectionMode {
    /// Every mode, in a fixed presentation order.
    pub const ALL: [DetectionMode; 3] =
        [DetectionMode::Phone, DetectionMode::Url, DetectionMode::Text];

    /// Stable lowercase name, suitable for logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMode::Phone => "phone",
            DetectionMode::Url => "url",
            DetectionMode::Text => "text",
        }
    }
}

impl Display for DetectionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
