//! Repository for the `posts` table.
//!
//! Generated posts arrive as one bulk insert per orchestration run. List
//! and single-row reads hide soft-deleted rows; campaign regeneration is
//! the only hard delete and counts every removed row, soft-deleted or not.

use postforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{NewPost, Post, UpdatePost};

/// Column list for `posts` queries.
const POST_COLUMNS: &str = "\
    id, campaign_id, account_id, post_number, post_name, scheduled_date, \
    post_type, platforms, hook, caption, visual_concept, purpose, \
    core_message, behavioral_trigger, strategy_type, tracking_focus, cta, \
    status, deleted, created_at, updated_at";

/// Provides bulk insert, edits, and soft delete for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert all generated posts in one statement, returning the created
    /// rows. An empty input inserts nothing.
    pub async fn insert_many(pool: &PgPool, posts: &[NewPost]) -> Result<Vec<Post>, sqlx::Error> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = sqlx::QueryBuilder::<sqlx::Postgres>::new(
            "INSERT INTO posts \
                 (campaign_id, account_id, post_number, post_name, scheduled_date, \
                  post_type, platforms, hook, caption, visual_concept, purpose, \
                  core_message, behavioral_trigger, strategy_type, tracking_focus, \
                  cta, status) ",
        );
        qb.push_values(posts, |mut b, post| {
            b.push_bind(post.campaign_id)
                .push_bind(post.account_id)
                .push_bind(post.post_number)
                .push_bind(&post.post_name)
                .push_bind(post.scheduled_date)
                .push_bind(&post.post_type)
                .push_bind(&post.platforms)
                .push_bind(post.hook.as_deref())
                .push_bind(&post.caption)
                .push_bind(&post.visual_concept)
                .push_bind(&post.purpose)
                .push_bind(&post.core_message)
                .push_bind(&post.behavioral_trigger)
                .push_bind(&post.strategy_type)
                .push_bind(&post.tracking_focus)
                .push_bind(&post.cta)
                .push_bind(&post.status);
        });
        qb.push(" RETURNING ");
        qb.push(POST_COLUMNS);

        qb.build_query_as::<Post>().fetch_all(pool).await
    }

    /// Find a live post owned by the account.
    pub async fn find_for_account(
        pool: &PgPool,
        id: DbId,
        account_id: DbId,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE id = $1 AND account_id = $2 AND deleted = FALSE"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// List a campaign's live posts in schedule order.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        account_id: DbId,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE campaign_id = $1 AND account_id = $2 AND deleted = FALSE \
             ORDER BY post_number"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(campaign_id)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a user edit. Absent fields keep their current values.
    ///
    /// Returns `None` if no live post matches.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        account_id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET \
                 post_name = COALESCE($3, post_name), \
                 scheduled_date = COALESCE($4, scheduled_date), \
                 hook = COALESCE($5, hook), \
                 caption = COALESCE($6, caption), \
                 visual_concept = COALESCE($7, visual_concept), \
                 status = COALESCE($8, status) \
             WHERE id = $1 AND account_id = $2 AND deleted = FALSE \
             RETURNING {POST_COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(account_id)
            .bind(input.post_name.as_deref())
            .bind(input.scheduled_date)
            .bind(input.hook.as_deref())
            .bind(input.caption.as_deref())
            .bind(input.visual_concept.as_ref())
            .bind(input.status.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Overwrite regenerated content fields. `hook` is only touched when
    /// `set_hook` is true, and may then be set to `NULL` for formats that
    /// carry no hook.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        account_id: DbId,
        caption: Option<&str>,
        set_hook: bool,
        hook: Option<&str>,
        visual_concept: Option<&serde_json::Value>,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET \
                 caption = COALESCE($3, caption), \
                 hook = CASE WHEN $4 THEN $5 ELSE hook END, \
                 visual_concept = COALESCE($6, visual_concept) \
             WHERE id = $1 AND account_id = $2 AND deleted = FALSE \
             RETURNING {POST_COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(account_id)
            .bind(caption)
            .bind(set_hook)
            .bind(hook)
            .bind(visual_concept)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a post. Idempotent: returns `false` when the post is
    /// already deleted or missing.
    pub async fn soft_delete(pool: &PgPool, id: DbId, account_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE posts SET deleted = TRUE \
             WHERE id = $1 AND account_id = $2 AND deleted = FALSE",
        )
        .bind(id)
        .bind(account_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete every post belonging to the campaign, returning how
    /// many rows were removed (soft-deleted rows included).
    pub async fn delete_for_campaign(pool: &PgPool, campaign_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE campaign_id = $1")
            .bind(campaign_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
