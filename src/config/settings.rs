// Configuration structs

use std::path::PathBuf;

use crate::risk::TierThresholds;

#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key. Absent means keyword-only degraded mode.
    pub api_key: Option<String>,

    /// Generation model
    pub model: String,

    /// Default companion persona ("peer", "mentor", "therapist")
    pub persona: String,

    /// Most-recent messages included in chat context
    pub history_window: usize,

    /// Upper bound on one semantic classification call
    pub classifier_timeout_secs: u64,

    /// Optional lexicon override file; the built-in lexicon otherwise
    pub lexicon_path: Option<PathBuf>,

    /// Keyword score -> tier thresholds
    pub thresholds: TierThresholds,

    /// Crisis event log destination
    pub events_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            persona: "therapist".to_string(),
            history_window: 10,
            classifier_timeout_secs: 10,
            lexicon_path: None,
            thresholds: TierThresholds::default(),
            events_path: home.join(".solace/crisis_events.jsonl"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.history_window, 10);
        assert_eq!(config.thresholds.critical, 10);
        assert!(config.events_path.ends_with(".solace/crisis_events.jsonl"));
    }
}
