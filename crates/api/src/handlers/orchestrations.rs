//! Handlers that launch full campaign generation runs.
//!
//! The request holds its connection open for the whole pipeline; the
//! server-wide request timeout is sized for that. Per-post failures do not
//! fail the run, so a 200 here can still carry `failed_posts` entries.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use postforge_core::types::DbId;
use postforge_pipeline::Orchestrator;

use crate::error::AppResult;
use crate::extract::CurrentAccount;
use crate::state::AppState;

fn orchestrator(state: &AppState) -> Orchestrator {
    Orchestrator::new(
        state.pool.clone(),
        Arc::clone(&state.generator),
        state.pipeline.clone(),
    )
}

// ---------------------------------------------------------------------------
// POST /orchestrations
// ---------------------------------------------------------------------------

/// Request body for triggering a run. `content_plan_id` is the campaign id
/// under its wire name.
#[derive(Debug, Deserialize)]
pub struct TriggerOrchestration {
    pub content_plan_id: DbId,
    #[serde(default)]
    pub dry_run: bool,
}

/// Run the full pipeline for a campaign and persist the results, or
/// preview them on a dry run.
pub async fn trigger(
    account: CurrentAccount,
    State(state): State<AppState>,
    Json(input): Json<TriggerOrchestration>,
) -> AppResult<impl IntoResponse> {
    let outcome = orchestrator(&state)
        .run(account.id, input.content_plan_id, input.dry_run)
        .await?;
    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// POST /campaigns/:id/regenerate
// ---------------------------------------------------------------------------

/// Optional request body for a campaign regeneration.
#[derive(Debug, Default, Deserialize)]
pub struct RegenerateCampaign {
    #[serde(default)]
    pub dry_run: bool,
}

/// Wipe a campaign's posts and run the pipeline again from scratch.
///
/// The body is optional; a bare POST regenerates for real.
pub async fn regenerate_campaign(
    account: CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<RegenerateCampaign>>,
) -> AppResult<impl IntoResponse> {
    let dry_run = body.map(|Json(b)| b.dry_run).unwrap_or(false);
    let outcome = orchestrator(&state)
        .regenerate(account.id, id, dry_run)
        .await?;
    Ok(Json(outcome))
}
