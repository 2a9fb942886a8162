// Risk assessment combiner
//
// Merges the keyword and semantic assessments into the final verdict.
// Pure, deterministic, and fail-safe-high: disagreement between sources
// always resolves toward greater assessed risk.

use serde::Serialize;

use super::keyword::KeywordAssessment;
use super::semantic::SemanticAssessment;
use super::tier::RiskTier;

/// Final per-message risk verdict. Both source assessments are retained
/// for audit logging; the booleans are derived from the final tier and
/// never set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedVerdict {
    pub final_tier: RiskTier,
    pub keyword: KeywordAssessment,
    pub semantic: SemanticAssessment,
    pub requires_intervention: bool,
    pub immediate_crisis: bool,
}

/// Merge the two assessments. The higher tier wins; a raw
/// `critical`/`severe` label from either source forces `Critical`.
///
/// The override is redundant with the max for labels the alias table
/// already normalizes. It is kept anyway so a new provider synonym still
/// escalates before the alias table learns about it.
pub fn combine(keyword: KeywordAssessment, semantic: SemanticAssessment) -> CombinedVerdict {
    let base = keyword.tier.max(semantic.tier);

    let escalated = keyword.tier == RiskTier::Critical
        || RiskTier::is_critical_synonym(&semantic.raw_label);

    let final_tier = if escalated { RiskTier::Critical } else { base };

    CombinedVerdict {
        final_tier,
        requires_intervention: final_tier >= RiskTier::High,
        immediate_crisis: final_tier == RiskTier::Critical,
        keyword,
        semantic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::keyword::KEYWORD_METHOD;

    fn keyword_with_tier(tier: RiskTier, score: u32) -> KeywordAssessment {
        KeywordAssessment {
            tier,
            score,
            hits: Vec::new(),
            method: KEYWORD_METHOD,
        }
    }

    fn semantic_with_label(label: &str) -> SemanticAssessment {
        SemanticAssessment {
            tier: RiskTier::parse(label),
            raw_label: label.to_string(),
            keywords: Vec::new(),
            rationale: "test".to_string(),
        }
    }

    const ALL_TIERS: [RiskTier; 4] = [
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
        RiskTier::Critical,
    ];

    #[test]
    fn test_higher_tier_always_wins() {
        for k_tier in ALL_TIERS {
            for s_tier in ALL_TIERS {
                let verdict = combine(
                    keyword_with_tier(k_tier, 0),
                    semantic_with_label(s_tier.as_str()),
                );
                assert!(
                    verdict.final_tier >= k_tier.max(s_tier),
                    "combine({:?}, {:?}) produced {:?}",
                    k_tier,
                    s_tier,
                    verdict.final_tier
                );
                // Equality holds unless the escalation override fired,
                // which for normalized labels means Critical inputs.
                if k_tier != RiskTier::Critical && s_tier != RiskTier::Critical {
                    assert_eq!(verdict.final_tier, k_tier.max(s_tier));
                }
            }
        }
    }

    #[test]
    fn test_argument_order_does_not_matter_for_tier() {
        for k_tier in ALL_TIERS {
            for s_tier in ALL_TIERS {
                let a = combine(
                    keyword_with_tier(k_tier, 0),
                    semantic_with_label(s_tier.as_str()),
                );
                let b = combine(
                    keyword_with_tier(s_tier, 0),
                    semantic_with_label(k_tier.as_str()),
                );
                assert_eq!(a.final_tier, b.final_tier);
            }
        }
    }

    #[test]
    fn test_severe_raw_label_escalates_over_low_keywords() {
        let verdict = combine(
            keyword_with_tier(RiskTier::Low, 0),
            semantic_with_label("severe"),
        );
        assert_eq!(verdict.final_tier, RiskTier::Critical);
        assert!(verdict.immediate_crisis);
    }

    #[test]
    fn test_critical_keywords_escalate_over_low_semantic() {
        let verdict = combine(
            keyword_with_tier(RiskTier::Critical, 12),
            semantic_with_label("LOW"),
        );
        assert_eq!(verdict.final_tier, RiskTier::Critical);
    }

    #[test]
    fn test_fallback_moderate_does_not_escalate() {
        let verdict = combine(
            keyword_with_tier(RiskTier::Low, 0),
            SemanticAssessment::call_failed(),
        );
        assert_eq!(verdict.final_tier, RiskTier::Moderate);
        assert!(!verdict.requires_intervention);
        assert!(!verdict.immediate_crisis);
    }

    #[test]
    fn test_intervention_booleans_derive_from_final_tier() {
        for tier in ALL_TIERS {
            let verdict = combine(
                keyword_with_tier(tier, 0),
                semantic_with_label(tier.as_str()),
            );
            assert_eq!(
                verdict.requires_intervention,
                matches!(verdict.final_tier, RiskTier::High | RiskTier::Critical)
            );
            assert_eq!(
                verdict.immediate_crisis,
                verdict.final_tier == RiskTier::Critical
            );
        }
    }

    #[test]
    fn test_combine_is_deterministic() {
        let a = combine(
            keyword_with_tier(RiskTier::High, 7),
            semantic_with_label("moderate"),
        );
        let b = combine(
            keyword_with_tier(RiskTier::High, 7),
            semantic_with_label("moderate"),
        );
        assert_eq!(a, b);
    }
}
