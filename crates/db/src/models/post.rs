//! Post entity model and DTOs.

use postforge_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `posts` table.
///
/// Enum-backed columns (`post_type`, `behavioral_trigger`, `strategy_type`,
/// `tracking_focus`, `status`) are stored as their wire strings; the core
/// vocabularies are enforced before rows are written, not on read.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Post {
    pub id: DbId,
    pub campaign_id: DbId,
    pub account_id: DbId,
    /// 1-based, dense within the campaign at generation time.
    pub post_number: i32,
    pub post_name: String,
    pub scheduled_date: Date,
    pub post_type: String,
    pub platforms: Vec<String>,
    pub hook: Option<String>,
    pub caption: String,
    pub visual_concept: serde_json::Value,
    pub purpose: String,
    pub core_message: String,
    pub behavioral_trigger: String,
    pub strategy_type: String,
    pub tracking_focus: String,
    pub cta: String,
    pub status: String,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for one generated post. Built by the orchestrator from a
/// generated post plus its owning campaign and account.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub campaign_id: DbId,
    pub account_id: DbId,
    pub post_number: i32,
    pub post_name: String,
    pub scheduled_date: Date,
    pub post_type: String,
    pub platforms: Vec<String>,
    pub hook: Option<String>,
    pub caption: String,
    pub visual_concept: serde_json::Value,
    pub purpose: String,
    pub core_message: String,
    pub behavioral_trigger: String,
    pub strategy_type: String,
    pub tracking_focus: String,
    pub cta: String,
    pub status: String,
}

/// DTO for editing a post. All fields are optional; `status` is checked
/// against the draft/approved vocabulary by the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePost {
    pub post_name: Option<String>,
    pub scheduled_date: Option<Date>,
    pub hook: Option<String>,
    pub caption: Option<String>,
    pub visual_concept: Option<serde_json::Value>,
    pub status: Option<String>,
}
