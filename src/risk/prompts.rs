// Prompt construction for the semantic risk classifier

/// System instruction for the classification call. The payload contract
/// is parsed by `semantic::parse_classification`; keep the two in sync.
pub const CRISIS_SYSTEM_INSTRUCTION: &str = "\
You are a crisis risk analysis AI.

Return ONLY a JSON object:
{
 \"risk_level\": \"LOW | MODERATE | HIGH | SEVERE\",
 \"keywords_detected\": [],
 \"analysis\": \"short reasoning\"
}";

/// Build the full classification prompt for one user message.
pub fn build_crisis_prompt(text: &str) -> String {
    format!("{}\n\nUser message: {}", CRISIS_SYSTEM_INSTRUCTION, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_message_and_contract() {
        let prompt = build_crisis_prompt("I feel low today");
        assert!(prompt.contains("I feel low today"));
        assert!(prompt.contains("risk_level"));
        assert!(prompt.contains("keywords_detected"));
    }
}
