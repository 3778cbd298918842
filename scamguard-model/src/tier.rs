use std::fmt::Display;
use std::fmt::Formatter;

/// Normalized risk classification of a scan verdict.
///
/// The gateway reports risk as a free-form string; classification folds it
/// into this closed set. `NoData` means the service had no record for the
/// input, `Unknown` means it answered with a level outside the documented
/// vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum RiskTier {
    /// Confirmed fraud signal
    High,
    /// Strong indicators, not confirmed
    Medium,
    /// Weak indicators
    Low,
    /// Checked and found clean
    Safe,
    /// No database record for the input
    NoData,
    /// Service answered with an unrecognized level
    Unknown,
}

impl RiskTier {
    /// Parse a wire-level risk string, ASCII case-insensitively.
    ///
    /// Only the four levels the service documents are recognized; callers
    /// decide what an unmatched value means (the classifier folds it to
    /// [`RiskTier::Unknown`]).
    pub fn from_level(level: &str) -> Option<RiskTier> {
        match level.to_ascii_uppercase().as_str() {
            "HIGH" => Some(RiskTier::High),
            "MEDIUM" => Some(RiskTier::Medium),
            "LOW" => Some(RiskTier::Low),
            "SAFE" => Some(RiskTier::Safe),
            _ => None,
        }
    }

    /// Fixed 0-100 score for this tier.
    pub fn score(&self) -> u8 {
        match self {
            RiskTier::High => 85,
            RiskTier::Medium => 60,
            RiskTier::Low => 20,
            RiskTier::Safe => 10,
            RiskTier::NoData | RiskTier::Unknown => 0,
        }
    }

    /// Headline shown for verdicts of this tier.
    pub fn title(&self) -> &'static str {
        match self {
            RiskTier::High => "high risk",
            RiskTier::Medium => "medium risk",
            RiskTier::Low => "low risk",
            RiskTier::Safe => "safe content",
            RiskTier::NoData => "no data found",
            RiskTier::Unknown => "unrecognized risk",
        }
    }

    /// Whether this tier counts as a fraud signal.
    ///
    /// `Unknown` does: a level the service invented is surfaced for review
    /// rather than trusted as clean.
    pub fn is_risk_signal(&self) -> bool {
        matches!(
            self,
            RiskTier::High | RiskTier::Medium | RiskTier::Low | RiskTier::Unknown
        )
    }

    /// Canonical uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::High => "HIGH",
            RiskTier::Medium => "MEDIUM",
            RiskTier::Low => "LOW",
            RiskTier::Safe => "SAFE",
            RiskTier::NoData => "NODATA",
            RiskTier::Unknown => "UNKNOWN",
        }
    }
}

impl Display for RiskTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
