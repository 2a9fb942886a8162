// Configuration loader
// Loads settings from ~/.solace/config.toml with a GEMINI_API_KEY
// environment fallback. A missing API key is not an error: the assistant
// still runs, with semantic classification and generation disabled.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::settings::Config;
use crate::risk::TierThresholds;

/// Load configuration from the Solace config file or environment.
pub fn load_config() -> Result<Config> {
    let mut config = match config_file_path() {
        Some(path) if path.exists() => load_from_file(&path)?,
        _ => Config::default(),
    };

    if config.api_key.is_none() {
        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            if !api_key.is_empty() {
                config.api_key = Some(api_key);
            }
        }
    }

    if config.api_key.is_none() {
        tracing::warn!(
            "No Gemini API key found (config.toml or GEMINI_API_KEY); \
             running with keyword-only crisis screening"
        );
    }

    Ok(config)
}

fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".solace/config.toml"))
}

fn load_from_file(path: &PathBuf) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_config(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_config(contents: &str) -> Result<Config> {
    #[derive(serde::Deserialize)]
    struct TomlThresholds {
        critical: u32,
        high: u32,
        moderate: u32,
    }

    #[derive(serde::Deserialize)]
    struct TomlConfig {
        api_key: Option<String>,
        model: Option<String>,
        persona: Option<String>,
        history_window: Option<usize>,
        classifier_timeout_secs: Option<u64>,
        lexicon_path: Option<PathBuf>,
        events_path: Option<PathBuf>,
        thresholds: Option<TomlThresholds>,
    }

    let toml_config: TomlConfig = toml::from_str(contents).context("Invalid config TOML")?;

    let mut config = Config::default();
    config.api_key = toml_config.api_key;
    if let Some(model) = toml_config.model {
        config.model = model;
    }
    if let Some(persona) = toml_config.persona {
        config.persona = persona;
    }
    if let Some(history_window) = toml_config.history_window {
        config.history_window = history_window;
    }
    if let Some(timeout) = toml_config.classifier_timeout_secs {
        config.classifier_timeout_secs = timeout;
    }
    config.lexicon_path = toml_config.lexicon_path;
    if let Some(events_path) = toml_config.events_path {
        config.events_path = events_path;
    }
    if let Some(t) = toml_config.thresholds {
        config.thresholds = TierThresholds {
            critical: t.critical,
            high: t.high,
            moderate: t.moderate,
        };
    }

    Ok(config)
}
