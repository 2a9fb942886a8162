// Canonical risk tier enumeration
//
// Every label coming in from a provider or a config file is normalized
// through `RiskTier::parse` before it is compared to anything.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered crisis risk tier. Comparison is by ordinal position:
/// `Low < Moderate < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskTier {
    /// Normalize a provider label into a tier.
    ///
    /// Case-insensitive. "severe" is a provider alias for `Critical`.
    /// Any unrecognized label maps to `Low`. Fail-safe-low is only
    /// acceptable here, at input normalization; the combiner is the one
    /// place that decides final severity and it always resolves upward.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => RiskTier::Low,
            "moderate" => RiskTier::Moderate,
            "high" => RiskTier::High,
            "critical" | "severe" => RiskTier::Critical,
            _ => RiskTier::Low,
        }
    }

    /// True when a raw label belongs to the highest-severity synonym set.
    /// Used by the combiner's escalation override, which must fire even
    /// for synonyms the alias table already folds into `Critical`.
    pub fn is_critical_synonym(label: &str) -> bool {
        matches!(
            label.trim().to_ascii_lowercase().as_str(),
            "critical" | "severe"
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Moderate => "MODERATE",
            RiskTier::High => "HIGH",
            RiskTier::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
