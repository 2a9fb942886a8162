// Unified request type for text generation providers
//
// Abstracts over provider-specific wire formats so the companion and the
// risk classifier work against one interface.

use serde::Serialize;

/// Provider-agnostic generation request. Each provider implementation
/// transforms this into its own API format.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Full prompt text, system instruction included.
    pub prompt: String,

    /// Ask the provider for a JSON payload instead of prose.
    pub json_output: bool,

    /// Sampling temperature (provider default when absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate.
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            json_output: false,
            temperature: None,
            max_output_tokens: 1024,
        }
    }

    /// Request structured JSON output.
    pub fn with_json_output(mut self, json_output: bool) -> Self {
        self.json_output = json_output;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}
