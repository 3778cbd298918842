use crate::tier::RiskTier;

/// Final classification of one successful scan.
///
/// Produced by the classifier from a gateway envelope and carried inside
/// the success state. The score and title are pure functions of the tier;
/// the reasons collect whatever detail the service provided, and are never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskVerdict {
    /// Normalized risk tier
    pub tier: RiskTier,
    /// 0-100 severity score derived from the tier
    pub score: u8,
    /// Short headline for display
    pub title: String,
    /// Human-readable justifications, at least one
    pub reasons: Vec<String>,
}

impl RiskVerdict {
    /// Whether the content can be presented as clean.
    ///
    /// True exactly for the `Safe` and `NoData` tiers; unrecognized levels
    /// are treated as signals, never as clean.
    pub fn is_safe(&self) -> bool {
        !self.tier.is_risk_signal()
    }
}
