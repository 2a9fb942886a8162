// Wellness companion
//
// Generates empathetic replies, CBT insights, and journal prompts over
// the text generation seam. The chat reply path never fails: any provider
// error resolves to a fixed supportive fallback.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::history::ConversationHistory;
use super::prompts::{build_cbt_prompt, build_chat_prompt, build_journal_prompt};
use crate::providers::{GenerationRequest, TextGenerator};

/// Reply used whenever generation is unavailable or fails.
pub const FALLBACK_REPLY: &str =
    "I'm here with you — could you share more about how you're feeling?";

/// A CBT thought record supplied by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThoughtRecord {
    pub situation: String,
    pub automatic_thought: String,
    pub emotion: String,
    /// Emotion intensity, 0-100
    pub intensity: u8,
}

/// Structured CBT reflection generated for a thought record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CbtInsight {
    #[serde(default)]
    pub cognitive_distortions: Vec<String>,
    #[serde(default)]
    pub balanced_thoughts: Vec<String>,
    #[serde(default)]
    pub encouragement: String,
}

/// Personalized journal prompt with follow-up questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalPrompt {
    pub prompt: String,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

pub struct WellnessCompanion {
    generator: Option<Arc<dyn TextGenerator>>,
    persona: String,
    history_window: usize,
}

impl WellnessCompanion {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        persona: impl Into<String>,
        history_window: usize,
    ) -> Self {
        Self {
            generator,
            persona: persona.into(),
            history_window,
        }
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Generate an empathetic reply. Infallible: provider absence or
    /// failure yields the fixed fallback copy instead of an error.
    pub async fn empathetic_response(
        &self,
        user_input: &str,
        history: &ConversationHistory,
    ) -> String {
        let Some(generator) = &self.generator else {
            return FALLBACK_REPLY.to_string();
        };

        let prompt = build_chat_prompt(
            user_input,
            &self.persona,
            history.recent(self.history_window),
        );
        let request = GenerationRequest::new(prompt).with_max_output_tokens(1024);

        match generator.generate(&request).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => {
                tracing::warn!("Empty chat reply from provider; using fallback");
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat generation failed; using fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Generate a structured CBT insight for a thought record.
    pub async fn cbt_insight(&self, record: &ThoughtRecord) -> Result<CbtInsight> {
        let generator = self
            .generator
            .as_ref()
            .context("No text generator configured")?;

        let record_json =
            serde_json::to_string_pretty(record).context("Failed to serialize thought record")?;
        let request = GenerationRequest::new(build_cbt_prompt(&record_json))
            .with_json_output(true)
            .with_max_output_tokens(768);

        let raw = generator
            .generate(&request)
            .await
            .context("CBT insight generation failed")?;

        serde_json::from_str(raw.trim()).context("Failed to parse CBT insight JSON")
    }

    /// Generate a personalized journal prompt from mood context and
    /// recent themes.
    pub async fn journal_prompt(
        &self,
        mood_context: &serde_json::Value,
        recent_themes: &[String],
    ) -> Result<JournalPrompt> {
        let generator = self
            .generator
            .as_ref()
            .context("No text generator configured")?;

        let mood_json = serde_json::to_string_pretty(mood_context)
            .context("Failed to serialize mood context")?;
        let request = GenerationRequest::new(build_journal_prompt(&mood_json, recent_themes))
            .with_json_output(true)
            .with_max_output_tokens(512);

        let raw = generator
            .generate(&request)
            .await
            .context("Journal prompt generation failed")?;

        serde_json::from_str(raw.trim()).context("Failed to parse journal prompt JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockGenerator {
        response: Option<String>,
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            match &self.response {
                Some(response) => Ok(response.clone()),
                None => anyhow::bail!("mock failure"),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    fn companion_with(response: Option<&str>) -> WellnessCompanion {
        WellnessCompanion::new(
            Some(Arc::new(MockGenerator {
                response: response.map(|s| s.to_string()),
            })),
            "therapist",
            10,
        )
    }

    #[tokio::test]
    async fn test_reply_from_provider() {
        let companion = companion_with(Some("That sounds really hard. I'm listening."));
        let reply = companion
            .empathetic_response("Rough day", &ConversationHistory::new())
            .await;
        assert_eq!(reply, "That sounds really hard. I'm listening.");
    }

    #[tokio::test]
    async fn test_provider_failure_yields_fallback() {
        let companion = companion_with(None);
        let reply = companion
            .empathetic_response("Rough day", &ConversationHistory::new())
            .await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_no_generator_yields_fallback() {
        let companion = WellnessCompanion::new(None, "peer", 10);
        let reply = companion
            .empathetic_response("Rough day", &ConversationHistory::new())
            .await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_empty_reply_yields_fallback() {
        let companion = companion_with(Some("   "));
        let reply = companion
            .empathetic_response("Rough day", &ConversationHistory::new())
            .await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_cbt_insight_parses_payload() {
        let companion = companion_with(Some(
            r#"{"cognitive_distortions": ["catastrophizing"], "balanced_thoughts": ["One exam does not define me"], "encouragement": "You prepared well."}"#,
        ));
        let record = ThoughtRecord {
            situation: "exam tomorrow".to_string(),
            automatic_thought: "I will fail".to_string(),
            emotion: "anxiety".to_string(),
            intensity: 80,
        };

        let insight = companion.cbt_insight(&record).await.unwrap();
        assert_eq!(insight.cognitive_distortions, vec!["catastrophizing"]);
        assert_eq!(insight.encouragement, "You prepared well.");
    }

    #[tokio::test]
    async fn test_cbt_insight_malformed_payload_is_error() {
        let companion = companion_with(Some("not json"));
        let record = ThoughtRecord {
            situation: "x".to_string(),
            automatic_thought: "y".to_string(),
            emotion: "z".to_string(),
            intensity: 10,
        };
        assert!(companion.cbt_insight(&record).await.is_err());
    }

    #[tokio::test]
    async fn test_journal_prompt_parses_payload() {
        let companion = companion_with(Some(
            r#"{"prompt": "What helped you get through today?", "follow_up_questions": ["What would you tell a friend?"]}"#,
        ));
        let prompt = companion
            .journal_prompt(
                &serde_json::json!({"mood": "tired"}),
                &["sleep".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(prompt.prompt, "What helped you get through today?");
        assert_eq!(prompt.follow_up_questions.len(), 1);
    }
}
