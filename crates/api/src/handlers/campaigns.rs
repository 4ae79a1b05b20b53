//! Handlers for the `/campaigns` resource.
//!
//! Creation enforces the tier's active-campaign cap server-side. Edits are
//! restricted to descriptive fields; the window, platforms, and sales
//! channel are fixed once a campaign exists because any generated plan
//! depends on them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use postforge_core::error::CoreError;
use postforge_core::limits::{check_action, LimitAction, SubscriptionTier};
use postforge_core::types::DbId;
use postforge_db::models::campaign::{CreateCampaign, UpdateCampaign};
use postforge_db::repositories::{AccountRepo, CampaignRepo};

use crate::error::AppResult;
use crate::extract::CurrentAccount;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /campaigns
// ---------------------------------------------------------------------------

/// Create a campaign if the tier's active-campaign cap allows another.
pub async fn create_campaign(
    account: CurrentAccount,
    State(state): State<AppState>,
    Json(input): Json<CreateCampaign>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let row = AccountRepo::find_by_id(&state.pool, account.id)
        .await?
        .ok_or_else(|| CoreError::not_found("account", account.id))?;
    let tier = SubscriptionTier::from_account(&row.subscription_tier);

    let active = CampaignRepo::count_for_account(&state.pool, account.id).await?;
    let decision = check_action(
        tier,
        LimitAction::CreateCampaign,
        active.max(0) as u32,
        row.billing_period_end,
    );
    if !decision.allowed {
        return Err(CoreError::LimitExceeded {
            message: decision.message,
        }
        .into());
    }

    let campaign = CampaignRepo::create(&state.pool, account.id, &input).await?;

    tracing::info!(
        campaign_id = campaign.id,
        account_id = account.id,
        "Campaign created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: campaign })))
}

// ---------------------------------------------------------------------------
// GET /campaigns
// ---------------------------------------------------------------------------

/// List the account's campaigns, newest first.
pub async fn list_campaigns(
    account: CurrentAccount,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let campaigns = CampaignRepo::list_for_account(&state.pool, account.id).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

// ---------------------------------------------------------------------------
// GET /campaigns/:id
// ---------------------------------------------------------------------------

/// Get a single campaign the account owns.
pub async fn get_campaign(
    account: CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = CampaignRepo::find_for_account(&state.pool, id, account.id)
        .await?
        .ok_or_else(|| CoreError::not_found("campaign", id))?;
    Ok(Json(DataResponse { data: campaign }))
}

// ---------------------------------------------------------------------------
// PATCH /campaigns/:id
// ---------------------------------------------------------------------------

/// Edit a campaign's descriptive fields.
///
/// A new `important_date` must fall inside the stored campaign window,
/// mirroring the creation-time rule.
pub async fn update_campaign(
    account: CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let current = CampaignRepo::find_for_account(&state.pool, id, account.id)
        .await?
        .ok_or_else(|| CoreError::not_found("campaign", id))?;

    if let Some(important) = input.important_date {
        if important < current.start_date || important > current.end_date {
            return Err(CoreError::Validation(
                "Important date must fall within the campaign dates".to_string(),
            )
            .into());
        }
    }

    let updated = CampaignRepo::update(&state.pool, id, account.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("campaign", id))?;

    tracing::info!(campaign_id = id, account_id = account.id, "Campaign updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /campaigns/:id
// ---------------------------------------------------------------------------

/// Delete a campaign and, via cascade, its posts.
///
/// Period counters are left alone: they count creations per billing
/// period, not live rows.
pub async fn delete_campaign(
    account: CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CampaignRepo::delete(&state.pool, id, account.id).await?;
    if deleted {
        tracing::info!(campaign_id = id, account_id = account.id, "Campaign deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("campaign", id).into())
    }
}
