// Wellness chat module
// Public interface for the companion and conversation state

mod companion;
mod history;
pub mod prompts;
mod session;

pub use companion::{
    CbtInsight, JournalPrompt, ThoughtRecord, WellnessCompanion, FALLBACK_REPLY,
};
pub use history::{ChatMessage, ConversationHistory};
pub use session::{ChatSession, TurnOutcome};
