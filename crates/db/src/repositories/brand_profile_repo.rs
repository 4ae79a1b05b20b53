//! Repository for the `brand_profiles` table.

use postforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::brand_profile::{BrandProfile, UpsertBrandProfile};

/// Column list for `brand_profiles` queries.
const BRAND_PROFILE_COLUMNS: &str = "\
    id, account_id, business_name, what_you_sell, what_makes_unique, \
    target_customer, brand_vibe_words, created_at, updated_at";

/// Provides the single-row-per-account brand profile operations.
pub struct BrandProfileRepo;

impl BrandProfileRepo {
    /// Find the account's brand profile, if one has been created.
    pub async fn find_by_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Option<BrandProfile>, sqlx::Error> {
        let query =
            format!("SELECT {BRAND_PROFILE_COLUMNS} FROM brand_profiles WHERE account_id = $1");
        sqlx::query_as::<_, BrandProfile>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or fully replace the account's brand profile.
    ///
    /// Uses `ON CONFLICT` on the per-account unique constraint so the PUT
    /// endpoint is idempotent.
    pub async fn upsert(
        pool: &PgPool,
        account_id: DbId,
        input: &UpsertBrandProfile,
    ) -> Result<BrandProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO brand_profiles \
                 (account_id, business_name, what_you_sell, what_makes_unique, \
                  target_customer, brand_vibe_words) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (account_id) DO UPDATE SET \
                 business_name = EXCLUDED.business_name, \
                 what_you_sell = EXCLUDED.what_you_sell, \
                 what_makes_unique = EXCLUDED.what_makes_unique, \
                 target_customer = EXCLUDED.target_customer, \
                 brand_vibe_words = EXCLUDED.brand_vibe_words \
             RETURNING {BRAND_PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, BrandProfile>(&query)
            .bind(account_id)
            .bind(&input.business_name)
            .bind(&input.what_you_sell)
            .bind(&input.what_makes_unique)
            .bind(&input.target_customer)
            .bind(&input.brand_vibe_words)
            .fetch_one(pool)
            .await
    }

    /// Number of brand profiles the account holds (0 or 1 under the
    /// current schema). Feeds the usage check.
    pub async fn count_for_account(pool: &PgPool, account_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM brand_profiles WHERE account_id = $1")
                .bind(account_id)
                .fetch_one(pool)
                .await?;
        Ok(count.0)
    }
}
