//! Handlers for usage counters and advisory limit checks.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use postforge_core::error::CoreError;
use postforge_core::limits::{check_action, LimitAction, SubscriptionTier, TierLimits};
use postforge_core::types::Date;
use postforge_db::repositories::{AccountRepo, BrandProfileRepo, CampaignRepo};

use crate::error::AppResult;
use crate::extract::CurrentAccount;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /usage
// ---------------------------------------------------------------------------

/// The account's tier, period counters, and the caps that apply to it.
#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub tier: SubscriptionTier,
    pub posts_created_this_period: i32,
    pub ai_regenerations_used_this_period: i32,
    pub billing_period_end: Option<Date>,
    pub limits: TierLimits,
}

/// Report the account's current usage and tier limits.
pub async fn get_usage(
    account: CurrentAccount,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let row = AccountRepo::find_by_id(&state.pool, account.id)
        .await?
        .ok_or_else(|| CoreError::not_found("account", account.id))?;
    let tier = SubscriptionTier::from_account(&row.subscription_tier);

    Ok(Json(DataResponse {
        data: UsageResponse {
            tier,
            posts_created_this_period: row.posts_created_this_period,
            ai_regenerations_used_this_period: row.ai_regenerations_used_this_period,
            billing_period_end: row.billing_period_end,
            limits: tier.limits(),
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /usage/check
// ---------------------------------------------------------------------------

/// Request body naming the action to check.
#[derive(Debug, Deserialize)]
pub struct CheckUsageRequest {
    pub action: LimitAction,
}

/// Answer whether the tier allows `action` right now.
///
/// Advisory only: nothing is reserved, and the enforcing endpoints re-check
/// at execution time. Returns the bare decision, not the `data` envelope,
/// since clients branch on it directly.
pub async fn check_usage(
    account: CurrentAccount,
    State(state): State<AppState>,
    Json(input): Json<CheckUsageRequest>,
) -> AppResult<impl IntoResponse> {
    let row = AccountRepo::find_by_id(&state.pool, account.id)
        .await?
        .ok_or_else(|| CoreError::not_found("account", account.id))?;
    let tier = SubscriptionTier::from_account(&row.subscription_tier);

    let current_usage = match input.action {
        LimitAction::CreatePosts => row.posts_created_this_period.max(0) as u32,
        LimitAction::Regenerate => row.ai_regenerations_used_this_period.max(0) as u32,
        LimitAction::CreateCampaign => {
            CampaignRepo::count_for_account(&state.pool, account.id).await?.max(0) as u32
        }
        LimitAction::CreateBrandProfile => {
            BrandProfileRepo::count_for_account(&state.pool, account.id).await?.max(0) as u32
        }
    };

    let decision = check_action(tier, input.action, current_usage, row.billing_period_end);
    Ok(Json(decision))
}
