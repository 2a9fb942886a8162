// Chat session orchestration
//
// One place wires a conversation turn together: screen the message, act
// on the verdict, generate the reply, append the follow-up when the
// verdict requires intervention.

use crate::risk::{CombinedVerdict, RiskEngine};

use super::companion::WellnessCompanion;
use super::history::ConversationHistory;

/// Everything the presentation layer needs about one completed turn.
#[derive(Debug)]
pub struct TurnOutcome {
    pub reply: String,
    pub verdict: CombinedVerdict,
    pub crisis_detected: bool,
}

/// A running conversation: risk engine, companion, and history with
/// owned lifetimes, injected at construction.
pub struct ChatSession {
    engine: RiskEngine,
    companion: WellnessCompanion,
    history: ConversationHistory,
}

impl ChatSession {
    pub fn new(engine: RiskEngine, companion: WellnessCompanion) -> Self {
        Self {
            engine,
            companion,
            history: ConversationHistory::new(),
        }
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Run one full conversation turn. Infallible: every failure inside
    /// the pipeline resolves to a defined fallback, so the user always
    /// gets a reply.
    pub async fn respond(&mut self, text: &str) -> TurnOutcome {
        let verdict = self.engine.analyze(text).await;
        let crisis_detected = self.engine.trigger_intervention(&verdict, text);

        let mut reply = self.companion.empathetic_response(text, &self.history).await;
        if crisis_detected {
            reply.push_str("\n\n");
            reply.push_str(self.engine.follow_up_message(verdict.final_tier));
        }

        self.history.add_user_message(text);
        self.history.add_assistant_message(reply.clone());

        TurnOutcome {
            reply,
            verdict,
            crisis_detected,
        }
    }
}
