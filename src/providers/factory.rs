// Provider factory
//
// Creates the text generator from configuration. A missing credential is
// not an error: the caller gets `None` and runs in keyword-only degraded
// mode.

use anyhow::Result;
use std::sync::Arc;

use super::gemini::GeminiProvider;
use super::TextGenerator;
use crate::config::Config;

/// Build the configured text generator, or `None` when no API key is set.
pub fn create_generator(config: &Config) -> Result<Option<Arc<dyn TextGenerator>>> {
    let Some(api_key) = &config.api_key else {
        tracing::warn!(
            "No Gemini API key configured; semantic classification and chat generation disabled"
        );
        return Ok(None);
    };

    let provider = GeminiProvider::new(api_key.clone())?.with_model(config.model.clone());

    tracing::info!(model = %config.model, "Gemini provider initialized");

    Ok(Some(Arc::new(provider)))
}
