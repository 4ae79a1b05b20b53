//! Repository for the `accounts` table.
//!
//! Counter updates are single-statement atomic increments so concurrent
//! orchestration runs and retries never read-modify-write a stale value.

use postforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::account::Account;

/// Column list for `accounts` queries.
const ACCOUNT_COLUMNS: &str = "\
    id, email, subscription_tier, posts_created_this_period, \
    ai_regenerations_used_this_period, billing_period_end, created_at, updated_at";

/// Provides lookups and usage-counter updates for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Create an account. Provisioning normally happens on the auth side;
    /// this exists for tests and local bootstrap.
    pub async fn create(pool: &PgPool, email: &str) -> Result<Account, sqlx::Error> {
        let query = format!("INSERT INTO accounts (email) VALUES ($1) RETURNING {ACCOUNT_COLUMNS}");
        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Find an account by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Add `by` to the posts-created counter.
    ///
    /// Returns `None` if no account with the given ID exists.
    pub async fn increment_posts_created(
        pool: &PgPool,
        id: DbId,
        by: i32,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts \
             SET posts_created_this_period = posts_created_this_period + $2 \
             WHERE id = $1 \
             RETURNING {ACCOUNT_COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(by)
            .fetch_optional(pool)
            .await
    }

    /// Subtract `by` from the posts-created counter, flooring at zero.
    pub async fn decrement_posts_created(
        pool: &PgPool,
        id: DbId,
        by: i32,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts \
             SET posts_created_this_period = GREATEST(posts_created_this_period - $2, 0) \
             WHERE id = $1 \
             RETURNING {ACCOUNT_COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(by)
            .fetch_optional(pool)
            .await
    }

    /// Consume one AI regeneration.
    pub async fn increment_regenerations_used(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts \
             SET ai_regenerations_used_this_period = ai_regenerations_used_this_period + 1 \
             WHERE id = $1 \
             RETURNING {ACCOUNT_COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
