// Text generation provider support
//
// This module provides an abstraction layer over external text-generation
// services, allowing the companion and the crisis classifier to share one
// interface and one failure contract.

use anyhow::Result;
use async_trait::async_trait;

pub mod types;

// Provider implementations
pub mod gemini;

// Provider factory
pub mod factory;

// Re-export commonly used types
pub use factory::create_generator;
pub use gemini::GeminiProvider;
pub use types::GenerationRequest;

/// Trait for text generation providers
///
/// Implementations wrap a single external service. Callers own the
/// failure policy: everything fallible surfaces as a `Result` here and is
/// mapped to a defined fallback at the call site.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt and return the raw response text.
    ///
    /// When `request.json_output` is set the provider is instructed to
    /// return a JSON payload; parsing that payload is the caller's job.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;

    /// Get the model this provider generates with
    fn model(&self) -> &str;
}
