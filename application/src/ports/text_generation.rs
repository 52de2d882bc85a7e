//! Text generation port
//!
//! The sole boundary to the LLM provider. The contract is degrade-not-fail:
//! `generate` always returns usable text. Provider outages, quota exhaustion
//! and a missing credential are absorbed by the adapter, which substitutes
//! deterministic fallback text and marks the result `ai_generated = false`.
//! The orchestration loop therefore never stalls on a flaky provider.

use async_trait::async_trait;

/// A request for one generated statement.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The director's persona prompt (system channel).
    pub system_prompt: String,
    /// The composed instruction (user channel).
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(system_prompt: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
        }
    }
}

/// The outcome of a generation call.
#[derive(Debug, Clone)]
pub struct GeneratedText {
    pub content: String,
    /// Zero when the content came from the fallback path.
    pub tokens_used: u64,
    pub generation_time_ms: u64,
    /// Model identifier, or a fallback marker.
    pub model: String,
    /// False when the provider was skipped or failed and fallback text was
    /// substituted.
    pub ai_generated: bool,
}

/// Gateway to the text generation provider.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// True iff a provider credential is present and non-placeholder.
    fn is_configured(&self) -> bool;

    /// Generate text for the request. Infallible by contract; failures
    /// surface only as `ai_generated = false` on the result.
    async fn generate(&self, request: &GenerationRequest) -> GeneratedText;
}
