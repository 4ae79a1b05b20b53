//! Campaign generation pipeline.
//!
//! Turns a brand profile plus a campaign brief into persisted posts by
//! running the staged flow: context assembly, a strategy call, a shot-list
//! call, batched per-post calls, then one bulk insert with usage
//! accounting. [`Orchestrator`] drives full runs; [`regenerate_post`]
//! handles single-post rewrites. The stage modules are public so tests can
//! exercise one call at a time.

pub mod config;
pub mod error;
mod exchange;
pub mod orchestrator;
pub mod post;
pub mod regenerate;
pub mod shot_list;
pub mod strategy;
#[cfg(test)]
mod test_support;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use orchestrator::{OrchestrationOutcome, Orchestrator, PostFailure, StrategySummary};
pub use regenerate::{regenerate_post, RegenerationKind, RegenerationOutcome};
