// Semantic crisis classification via an external text generator
//
// The unreliable half of the risk pipeline. Every failure mode of the
// external call is folded into a defined assessment here; nothing
// fallible escapes this module's boundary.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::prompts::build_crisis_prompt;
use super::tier::RiskTier;
use crate::providers::{GenerationRequest, TextGenerator};

/// Result from the external classifier, or one of the defined fallbacks.
///
/// `raw_label` is the provider's pre-normalization label; the combiner
/// needs it for the escalation override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemanticAssessment {
    pub tier: RiskTier,
    pub raw_label: String,
    pub keywords: Vec<String>,
    pub rationale: String,
}

impl SemanticAssessment {
    /// Degraded mode: no classifier configured at all. The keyword path
    /// is the sole, known-present signal, so defaulting low is safe here
    /// and only here.
    pub fn unavailable() -> Self {
        Self {
            tier: RiskTier::Low,
            raw_label: "LOW".to_string(),
            keywords: Vec::new(),
            rationale: "classifier unavailable".to_string(),
        }
    }

    /// The call errored or timed out. An opaque failure must never read
    /// as "no risk", so the fallback tier is Moderate.
    pub fn call_failed() -> Self {
        Self {
            tier: RiskTier::Moderate,
            raw_label: "MODERATE".to_string(),
            keywords: Vec::new(),
            rationale: "classifier call failed".to_string(),
        }
    }

    /// The call succeeded but the payload was not the expected structure.
    pub fn unparseable() -> Self {
        Self {
            tier: RiskTier::Moderate,
            raw_label: "MODERATE".to_string(),
            keywords: Vec::new(),
            rationale: "unparseable classifier response".to_string(),
        }
    }

    fn from_payload(payload: ClassifierPayload) -> Self {
        Self {
            tier: RiskTier::parse(&payload.risk_level),
            raw_label: payload.risk_level,
            keywords: payload.keywords_detected,
            rationale: payload.analysis,
        }
    }
}

/// Expected classifier payload shape. One parse function, one typed
/// failure; no attribute probing at call sites.
#[derive(Debug, Deserialize)]
pub struct ClassifierPayload {
    pub risk_level: String,
    #[serde(default)]
    pub keywords_detected: Vec<String>,
    #[serde(default)]
    pub analysis: String,
}

#[derive(Debug, Error)]
pub enum ClassificationParseError {
    #[error("empty classifier response")]
    Empty,
    #[error("invalid classifier JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse the raw classifier response. Tolerates a Markdown code fence
/// around the JSON object, which providers emit even in JSON mode.
pub fn parse_classification(raw: &str) -> Result<ClassifierPayload, ClassificationParseError> {
    let trimmed = strip_code_fence(raw.trim());
    if trimmed.is_empty() {
        return Err(ClassificationParseError::Empty);
    }
    Ok(serde_json::from_str(trimmed)?)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") up to the first newline.
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Adapter around the external classifier. `assess` never fails; each
/// failure mode resolves to its documented fallback.
pub struct SemanticClassifier {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl SemanticClassifier {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        if generator.is_none() {
            // Logged once here, not per message.
            tracing::warn!("Semantic classifier unavailable; running keyword-only risk screening");
        }
        Self { generator, timeout }
    }

    pub async fn assess(&self, text: &str) -> SemanticAssessment {
        let Some(generator) = &self.generator else {
            return SemanticAssessment::unavailable();
        };

        let request = GenerationRequest::new(build_crisis_prompt(text))
            .with_json_output(true)
            .with_max_output_tokens(512);

        let raw = match tokio::time::timeout(self.timeout, generator.generate(&request)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Semantic classifier call failed");
                return SemanticAssessment::call_failed();
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Semantic classifier call timed out"
                );
                return SemanticAssessment::call_failed();
            }
        };

        match parse_classification(&raw) {
            Ok(payload) => SemanticAssessment::from_payload(payload),
            Err(e) => {
                tracing::warn!(error = %e, "Semantic classifier returned unparseable payload");
                SemanticAssessment::unparseable()
            }
        }
    }
}
