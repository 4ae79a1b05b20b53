//! Handlers for the account's brand profile.
//!
//! The profile is a singleton per account: GET returns `data: null` until
//! one is saved, PUT creates or replaces it in place.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use postforge_core::error::CoreError;
use postforge_core::limits::{check_action, LimitAction, SubscriptionTier};
use postforge_db::models::brand_profile::UpsertBrandProfile;
use postforge_db::repositories::{AccountRepo, BrandProfileRepo};

use crate::error::AppResult;
use crate::extract::CurrentAccount;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /brand-profile
// ---------------------------------------------------------------------------

/// Fetch the account's brand profile, or `data: null` if none is set up.
pub async fn get_brand_profile(
    account: CurrentAccount,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = BrandProfileRepo::find_by_account(&state.pool, account.id).await?;
    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// PUT /brand-profile
// ---------------------------------------------------------------------------

/// Create or replace the account's brand profile.
///
/// Creation counts against the tier's brand-profile cap; replacing an
/// existing profile is always allowed.
pub async fn put_brand_profile(
    account: CurrentAccount,
    State(state): State<AppState>,
    Json(input): Json<UpsertBrandProfile>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let row = AccountRepo::find_by_id(&state.pool, account.id)
        .await?
        .ok_or_else(|| CoreError::not_found("account", account.id))?;

    let existing = BrandProfileRepo::find_by_account(&state.pool, account.id).await?;
    if existing.is_none() {
        let tier = SubscriptionTier::from_account(&row.subscription_tier);
        let count = BrandProfileRepo::count_for_account(&state.pool, account.id).await?;
        let decision = check_action(
            tier,
            LimitAction::CreateBrandProfile,
            count.max(0) as u32,
            row.billing_period_end,
        );
        if !decision.allowed {
            return Err(CoreError::LimitExceeded {
                message: decision.message,
            }
            .into());
        }
    }

    let profile = BrandProfileRepo::upsert(&state.pool, account.id, &input).await?;

    tracing::info!(
        account_id = account.id,
        brand_profile_id = profile.id,
        created = existing.is_none(),
        "Brand profile saved",
    );

    Ok(Json(DataResponse { data: profile }))
}
