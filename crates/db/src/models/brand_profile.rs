//! Brand profile entity model and DTOs.

use postforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

/// A row from the `brand_profiles` table. At most one exists per account.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct BrandProfile {
    pub id: DbId,
    pub account_id: DbId,
    pub business_name: String,
    pub what_you_sell: String,
    pub what_makes_unique: String,
    pub target_customer: String,
    /// Ordered brand-vibe words, 3 to 5 of them.
    pub brand_vibe_words: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing the account's brand profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertBrandProfile {
    #[validate(length(min = 1, max = 200))]
    pub business_name: String,
    #[validate(length(min = 1, max = 1000))]
    pub what_you_sell: String,
    #[validate(length(min = 1, max = 1000))]
    pub what_makes_unique: String,
    #[validate(length(min = 1, max = 1000))]
    pub target_customer: String,
    #[validate(length(min = 3, max = 5, message = "Pick 3 to 5 brand vibe words"))]
    pub brand_vibe_words: Vec<String>,
}
