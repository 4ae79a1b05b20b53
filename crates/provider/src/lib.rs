//! LLM provider clients for campaign generation.
//!
//! Exposes the [`TextGenerator`] trait the pipeline drives its calls
//! through, plus the production [`AnthropicClient`] implementation.
//! Keeping the trait here (rather than in the pipeline) lets tests and
//! future providers depend on it without pulling in orchestration code.

pub mod anthropic;
pub mod generator;

pub use anthropic::AnthropicClient;
pub use generator::{GenerationRequest, ProviderError, TextGenerator};
