use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// Readiness response payload.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    /// Whether the database answered a ping.
    pub db_healthy: bool,
}

/// GET /healthz -- liveness only; never touches the database.
async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /readyz -- readiness including a database ping.
async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = postforge_db::health_check(&state.pool).await.is_ok();

    if db_healthy {
        (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready",
                db_healthy,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "unavailable",
                db_healthy,
            }),
        )
    }
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
