//! Route definitions for usage reporting and limit checks.
//!
//! Mounted at `/usage` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::usage;
use crate::state::AppState;

/// Usage routes.
///
/// ```text
/// GET    /                  -> get_usage (tier, counters, limits)
/// POST   /check             -> check_usage (advisory limit decision)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(usage::get_usage))
        .route("/check", post(usage::check_usage))
}
