//! Provider-neutral text generation interface.
//!
//! Every LLM call in the pipeline goes through [`TextGenerator`], so
//! prompt construction and response parsing never touch HTTP directly
//! and tests can substitute scripted fakes for the real endpoint.

use async_trait::async_trait;

/// Parameters for a single text-generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Optional system prompt. `None` means the role framing lives inside
    /// `prompt` itself.
    pub system: Option<String>,
    /// User-turn prompt carrying the task and all campaign context.
    pub prompt: String,
    /// Upper bound on tokens the model may produce.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Errors from the text-generation provider layer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("generation API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered 2xx but the message carried no text blocks.
    #[error("generation response contained no text content")]
    EmptyResponse,
}

/// Abstraction over an LLM completion endpoint.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one generation call and return the model's text output.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}
