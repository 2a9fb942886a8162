// Crisis risk assessment engine
// Public interface for the keyword + semantic screening pipeline

mod combiner;
mod intervention;
mod keyword;
mod lexicon;
mod prompts;
mod semantic;
mod tier;

pub use combiner::{combine, CombinedVerdict};
pub use intervention::{CrisisAction, InterventionPolicy};
pub use keyword::{KeywordAssessment, KeywordHit, KeywordScorer, TierThresholds, KEYWORD_METHOD};
pub use lexicon::{Lexicon, LexiconCategory};
pub use semantic::{
    parse_classification, ClassificationParseError, SemanticAssessment, SemanticClassifier,
};
pub use tier::RiskTier;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::events::{hash_query, CrisisEventLog};
use crate::providers::TextGenerator;

/// The full screening pipeline for one message: keyword scan plus
/// semantic classification, merged fail-safe-high, with intervention
/// policy driven by the merged verdict.
///
/// All collaborators are injected at construction; the engine holds no
/// ambient global state and each `analyze` call is independent.
pub struct RiskEngine {
    scorer: KeywordScorer,
    classifier: SemanticClassifier,
    policy: InterventionPolicy,
}

impl RiskEngine {
    pub fn new(
        lexicon: &Lexicon,
        thresholds: TierThresholds,
        generator: Option<Arc<dyn TextGenerator>>,
        classifier_timeout: Duration,
        event_log: Arc<dyn CrisisEventLog>,
    ) -> Result<Self> {
        Ok(Self {
            scorer: KeywordScorer::new(lexicon, thresholds)?,
            classifier: SemanticClassifier::new(generator, classifier_timeout),
            policy: InterventionPolicy::new(event_log),
        })
    }

    /// Screen one message. The keyword scan always runs; the semantic
    /// classifier may fail internally, in which case its documented
    /// fallback enters the merge. Never returns an error.
    pub async fn analyze(&self, text: &str) -> CombinedVerdict {
        let keyword = self.scorer.assess(text);
        let semantic = self.classifier.assess(text).await;

        let verdict = combine(keyword, semantic);

        tracing::debug!(
            final_tier = %verdict.final_tier,
            keyword_score = verdict.keyword.score,
            semantic_label = %verdict.semantic.raw_label,
            requires_intervention = verdict.requires_intervention,
            "Risk assessment complete"
        );

        verdict
    }

    /// Act on a verdict: emit the crisis event for the chosen action.
    /// Returns whether intervention is required.
    pub fn trigger_intervention(&self, verdict: &CombinedVerdict, text: &str) -> bool {
        let hash = hash_query(text);
        let (action, requires_intervention) = self.policy.decide(verdict, Some(&hash));

        if action != CrisisAction::None {
            tracing::info!(action = action.as_str(), tier = %verdict.final_tier, "Crisis intervention triggered");
        }

        requires_intervention
    }

    /// Tier-specific follow-up copy for the conversation layer.
    pub fn follow_up_message(&self, tier: RiskTier) -> &'static str {
        self.policy.follow_up_message(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullEventLog;

    fn engine_without_classifier() -> RiskEngine {
        RiskEngine::new(
            &Lexicon::default(),
            TierThresholds::default(),
            None,
            Duration::from_secs(5),
            Arc::new(NullEventLog),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_keyword_only_mode_still_escalates() {
        let engine = engine_without_classifier();
        let verdict = engine.analyze("I want to end it all").await;
        assert!(verdict.final_tier >= RiskTier::High);
        assert_eq!(verdict.semantic.rationale, "classifier unavailable");
    }

    #[tokio::test]
    async fn test_benign_message_scores_low() {
        let engine = engine_without_classifier();
        let verdict = engine.analyze("The garden is full of harmony today").await;
        assert_eq!(verdict.final_tier, RiskTier::Low);
        assert!(!verdict.requires_intervention);
        assert!(!engine.trigger_intervention(&verdict, "The garden is full of harmony today"));
    }
}
