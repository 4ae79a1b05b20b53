use std::sync::Arc;

use postforge_pipeline::PipelineConfig;
use postforge_provider::TextGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: postforge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Text generator used by orchestration and regeneration. Trait-object
    /// so tests swap in scripted generators.
    pub generator: Arc<dyn TextGenerator>,
    /// Pipeline tuning shared by every generation endpoint.
    pub pipeline: PipelineConfig,
}
