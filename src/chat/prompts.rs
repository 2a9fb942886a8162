// Prompt construction for the wellness companion

use super::history::ChatMessage;

pub const BASE_SYSTEM_INSTRUCTION: &str = "\
You are a compassionate, non-judgmental, and supportive mental wellness companion.
Your role is to listen empathetically, validate feelings, and offer grounding,
journaling, CBT reflections and emotional support.

You must NEVER give medical advice, diagnose, or pretend to be a human professional.
Always prioritize safety, be warm, concise, and emotionally validating.";

/// Persona style line for the chat prompt. Unknown personas fall back to
/// the therapist style.
pub fn persona_style(persona: &str) -> &'static str {
    match persona {
        "peer" => "Respond like a warm, supportive peer listener.",
        "mentor" => "Respond like a kind, encouraging mentor.",
        _ => "Respond like a gentle therapeutic companion (no diagnosis).",
    }
}

/// Build the empathetic chat prompt: system instruction, persona style,
/// recent transcript, then the new message.
pub fn build_chat_prompt(user_input: &str, persona: &str, recent_history: &[ChatMessage]) -> String {
    let mut transcript = String::new();
    for message in recent_history {
        transcript.push_str(&format!(
            "{}: {}\n",
            message.role.to_uppercase(),
            message.content
        ));
    }
    transcript.push_str(&format!("USER: {}", user_input));

    format!(
        "{}\n\nPersona style: {}\n\nConversation history:\n{}\n\nRespond empathically, briefly, and safely.",
        BASE_SYSTEM_INSTRUCTION,
        persona_style(persona),
        transcript
    )
}

/// Build the CBT insight prompt for a serialized thought record.
pub fn build_cbt_prompt(thought_record_json: &str) -> String {
    format!(
        "Return a JSON object with ONLY:\n\
         - cognitive_distortions\n\
         - balanced_thoughts\n\
         - encouragement\n\n\
         Here is the user's CBT thought record:\n{}",
        thought_record_json
    )
}

/// Build the personalized journal prompt request.
pub fn build_journal_prompt(mood_context_json: &str, recent_themes: &[String]) -> String {
    format!(
        "Return a JSON object with:\n\
         - prompt\n\
         - follow_up_questions\n\n\
         Mood context:\n{}\n\n\
         Themes: {}",
        mood_context_json,
        recent_themes.join(", ")
    )
}
