//! Error taxonomy for generation runs.

use postforge_core::error::CoreError;
use postforge_provider::ProviderError;

/// Failure modes of the pipeline.
///
/// `Provider`, `Parse`, and `Timeout` carry a stage label ("strategy",
/// "shot_list", "post", "regeneration") so logs and per-post failure
/// reports say which call went wrong.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("{stage} generation failed: {source}")]
    Provider {
        stage: &'static str,
        source: ProviderError,
    },

    #[error("failed to parse {stage} response: {detail}")]
    Parse {
        stage: &'static str,
        detail: String,
    },

    #[error("{stage} call timed out after {timeout_secs}s")]
    Timeout {
        stage: &'static str,
        timeout_secs: u64,
    },
}
