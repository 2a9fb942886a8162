// Keyword-based crisis scoring
//
// The always-available half of the risk pipeline: a pure, deterministic
// scan of the message against the lexicon. No failure path.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::lexicon::Lexicon;
use super::tier::RiskTier;

/// Method tag carried on every keyword assessment.
pub const KEYWORD_METHOD: &str = "keyword_analysis";

/// Inclusive lower bounds mapping a keyword score to a tier. These are
/// configuration, not constants: tune them in config.toml without
/// touching code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierThresholds {
    pub critical: u32,
    pub high: u32,
    pub moderate: u32,
}

impl TierThresholds {
    pub fn tier_for(&self, score: u32) -> RiskTier {
        if score >= self.critical {
            RiskTier::Critical
        } else if score >= self.high {
            RiskTier::High
        } else if score >= self.moderate {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            critical: 10,
            high: 6,
            moderate: 3,
        }
    }
}

/// One lexicon phrase matched in the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHit {
    pub phrase: String,
    pub category: String,
}

/// Immutable result of a keyword scan. Created per message, consumed by
/// the combiner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordAssessment {
    pub tier: RiskTier,
    pub score: u32,
    pub hits: Vec<KeywordHit>,
    pub method: &'static str,
}

struct CompiledPhrase {
    pattern: Regex,
    phrase: String,
    category: String,
    weight: u32,
}

/// Scans free text against the lexicon. Regexes are compiled once at
/// construction; `assess` itself is pure and total.
pub struct KeywordScorer {
    phrases: Vec<CompiledPhrase>,
    thresholds: TierThresholds,
}

impl KeywordScorer {
    pub fn new(lexicon: &Lexicon, thresholds: TierThresholds) -> Result<Self> {
        let mut phrases = Vec::new();

        for (category, entry) in lexicon.categories() {
            for phrase in &entry.phrases {
                let lowered = phrase.to_lowercase();
                // Whole-word match: "harm" must not fire inside "harmony".
                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&lowered)))
                    .with_context(|| format!("Failed to compile lexicon phrase '{}'", phrase))?;
                phrases.push(CompiledPhrase {
                    pattern,
                    phrase: lowered,
                    category: category.to_string(),
                    weight: entry.weight,
                });
            }
        }

        Ok(Self {
            phrases,
            thresholds,
        })
    }

    /// Score a message. Every match occurrence counts: the same phrase
    /// appearing twice adds its weight twice and records two hits.
    pub fn assess(&self, text: &str) -> KeywordAssessment {
        let text_lower = text.to_lowercase();
        let mut hits = Vec::new();
        let mut score: u32 = 0;

        for compiled in &self.phrases {
            let occurrences = compiled.pattern.find_iter(&text_lower).count() as u32;
            if occurrences == 0 {
                continue;
            }
            score += compiled.weight * occurrences;
            for _ in 0..occurrences {
                hits.push(KeywordHit {
                    phrase: compiled.phrase.clone(),
                    category: compiled.category.clone(),
                });
            }
        }

        KeywordAssessment {
            tier: self.thresholds.tier_for(score),
            score,
            hits,
            method: KEYWORD_METHOD,
        }
    }
}
