//! Handlers for the `/posts` resource and per-campaign post listings.
//!
//! DELETE is a soft delete; the row stays behind the `deleted` flag and
//! drops out of every list. Regeneration rewrites one post's content via
//! the provider and enforces the tier's monthly regeneration allowance.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use postforge_core::content::PostStatus;
use postforge_core::error::CoreError;
use postforge_core::types::DbId;
use postforge_db::models::post::{Post, UpdatePost};
use postforge_db::repositories::{CampaignRepo, PostRepo};
use postforge_pipeline::{regenerate_post, RegenerationKind};

use crate::error::AppResult;
use crate::extract::CurrentAccount;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /campaigns/:id/posts
// ---------------------------------------------------------------------------

/// List a campaign's live posts in schedule order.
pub async fn list_campaign_posts(
    account: CurrentAccount,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // 404 for a campaign the account does not own, rather than an empty list.
    CampaignRepo::find_for_account(&state.pool, campaign_id, account.id)
        .await?
        .ok_or_else(|| CoreError::not_found("campaign", campaign_id))?;

    let posts = PostRepo::list_for_campaign(&state.pool, campaign_id, account.id).await?;
    Ok(Json(DataResponse { data: posts }))
}

// ---------------------------------------------------------------------------
// GET /posts/:id
// ---------------------------------------------------------------------------

/// Get a single live post the account owns.
pub async fn get_post(
    account: CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_for_account(&state.pool, id, account.id)
        .await?
        .ok_or_else(|| CoreError::not_found("post", id))?;
    Ok(Json(DataResponse { data: post }))
}

// ---------------------------------------------------------------------------
// PATCH /posts/:id
// ---------------------------------------------------------------------------

/// Edit a post. Covers content tweaks and the draft/approved transition.
pub async fn update_post(
    account: CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = input.status {
        PostStatus::parse(status).map_err(CoreError::Validation)?;
    }

    let updated = PostRepo::update(&state.pool, id, account.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("post", id))?;

    tracing::info!(post_id = id, account_id = account.id, "Post updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /posts/:id
// ---------------------------------------------------------------------------

/// Soft-delete a post.
pub async fn delete_post(
    account: CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PostRepo::soft_delete(&state.pool, id, account.id).await?;
    if deleted {
        tracing::info!(post_id = id, account_id = account.id, "Post soft-deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("post", id).into())
    }
}

// ---------------------------------------------------------------------------
// POST /posts/:id/regenerate
// ---------------------------------------------------------------------------

/// Request body for a single-post regeneration.
#[derive(Debug, Deserialize)]
pub struct RegeneratePostRequest {
    pub regeneration_type: RegenerationKind,
    #[serde(default)]
    pub user_feedback: Option<String>,
}

/// Response for a successful regeneration. `regenerations_remaining` is
/// `null` on unlimited tiers.
#[derive(Debug, Serialize)]
pub struct RegeneratePostResponse {
    pub success: bool,
    pub post: Post,
    pub regenerations_remaining: Option<u32>,
}

/// Regenerate one post's caption, hook, visual concept, or all three.
///
/// Returns 403 `LIMIT_EXCEEDED` once the tier's monthly allowance is used
/// up; a blocked request reaches no provider call.
pub async fn regenerate(
    account: CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RegeneratePostRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = regenerate_post(
        &state.pool,
        state.generator.as_ref(),
        &state.pipeline,
        account.id,
        id,
        input.regeneration_type,
        input.user_feedback.as_deref(),
    )
    .await?;

    Ok(Json(RegeneratePostResponse {
        success: true,
        post: outcome.post,
        regenerations_remaining: outcome.regenerations_remaining,
    }))
}
