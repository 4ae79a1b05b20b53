//! Route definitions for orchestration runs.
//!
//! Mounted at `/orchestrations` by `api_routes()`. The campaign-scoped
//! regeneration variant lives under `/campaigns/{id}/regenerate`.

use axum::routing::post;
use axum::Router;

use crate::handlers::orchestrations;
use crate::state::AppState;

/// Orchestration routes.
///
/// ```text
/// POST   /                  -> trigger (full pipeline run or dry run)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(orchestrations::trigger))
}
