//! Tunable parameters for generation runs.

use std::time::Duration;

/// Knobs for batching, timeouts, and token budgets.
///
/// The defaults match production behaviour; tests shrink the delays so a
/// multi-batch run completes in milliseconds.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of posts generated concurrently per batch.
    pub batch_size: usize,
    /// Pause between batches, to stay under provider rate limits.
    pub batch_delay: Duration,
    /// Upper bound on any single provider call. A post call that exceeds
    /// it becomes a failed unit instead of stalling its whole batch.
    pub call_timeout: Duration,
    /// Output-token budget for the strategy call.
    pub strategy_max_tokens: u32,
    /// Output-token budget for the shot-list call.
    pub shot_list_max_tokens: u32,
    /// Output-token budget for each post call, also used for single-post
    /// regeneration.
    pub post_max_tokens: u32,
    /// Sampling temperature applied to every call.
    pub temperature: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 4,
            batch_delay: Duration::from_secs(2),
            call_timeout: Duration::from_secs(120),
            strategy_max_tokens: 8192,
            shot_list_max_tokens: 8192,
            post_max_tokens: 4096,
            temperature: 1.0,
        }
    }
}
