//! Repository for the `campaigns` table.
//!
//! Every read and write is scoped by `account_id`; a campaign is only
//! visible to the account that owns it.

use postforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{Campaign, CreateCampaign, UpdateCampaign};

/// Column list for `campaigns` queries.
const CAMPAIGN_COLUMNS: &str = "\
    id, account_id, name, what_promoting, goal, start_date, end_date, \
    important_date, important_date_label, platforms, sales_channel, \
    offers_promos, num_posts, strategy_framework, shot_list, \
    created_at, updated_at";

/// Provides CRUD and artifact persistence for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Create a campaign for the account.
    pub async fn create(
        pool: &PgPool,
        account_id: DbId,
        input: &CreateCampaign,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns \
                 (account_id, name, what_promoting, goal, start_date, end_date, \
                  important_date, important_date_label, platforms, sales_channel, \
                  offers_promos, num_posts) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {CAMPAIGN_COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(account_id)
            .bind(&input.name)
            .bind(&input.what_promoting)
            .bind(input.goal.as_deref())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.important_date)
            .bind(input.important_date_label.as_deref())
            .bind(&input.platforms)
            .bind(&input.sales_channel)
            .bind(input.offers_promos.as_deref())
            .bind(input.num_posts)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign owned by the account.
    pub async fn find_for_account(
        pool: &PgPool,
        id: DbId,
        account_id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query =
            format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1 AND account_id = $2");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// List the account's campaigns, newest first.
    pub async fn list_for_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns \
             WHERE account_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// Number of campaigns the account holds. Feeds the usage check.
    pub async fn count_for_account(pool: &PgPool, account_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM campaigns WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Apply a user edit to the descriptive fields. Absent fields keep
    /// their current values.
    ///
    /// Returns `None` if no campaign matches.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        account_id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET \
                 name = COALESCE($3, name), \
                 goal = COALESCE($4, goal), \
                 important_date = COALESCE($5, important_date), \
                 important_date_label = COALESCE($6, important_date_label), \
                 offers_promos = COALESCE($7, offers_promos), \
                 num_posts = COALESCE($8, num_posts) \
             WHERE id = $1 AND account_id = $2 \
             RETURNING {CAMPAIGN_COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(account_id)
            .bind(input.name.as_deref())
            .bind(input.goal.as_deref())
            .bind(input.important_date)
            .bind(input.important_date_label.as_deref())
            .bind(input.offers_promos.as_deref())
            .bind(input.num_posts)
            .fetch_optional(pool)
            .await
    }

    /// Write the strategy and shot-list artifacts produced by a successful
    /// orchestration run back onto the campaign.
    ///
    /// Returns `false` if the campaign no longer exists.
    pub async fn set_plan_artifacts(
        pool: &PgPool,
        id: DbId,
        strategy_framework: &serde_json::Value,
        shot_list: &serde_json::Value,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE campaigns SET strategy_framework = $2, shot_list = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(strategy_framework)
        .bind(shot_list)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a campaign owned by the account. Cascade deletes all child
    /// posts; period counters are left alone.
    ///
    /// Returns `true` if a campaign was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, account_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
