//! Account entity model.
//!
//! Accounts are provisioned by the external auth provider; this side only
//! reads the tier and maintains the two rolling usage counters.

use postforge_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `accounts` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Account {
    pub id: DbId,
    pub email: String,
    pub subscription_tier: String,
    /// Posts persisted by orchestration runs in the current billing period.
    pub posts_created_this_period: i32,
    /// AI regenerations consumed in the current billing period.
    pub ai_regenerations_used_this_period: i32,
    pub billing_period_end: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
