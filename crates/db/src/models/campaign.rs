//! Campaign entity model and DTOs.

use postforge_core::content::{Platform, SalesChannel};
use postforge_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Shortest allowed campaign window, in whole days between the dates.
const MIN_CAMPAIGN_DAYS: i64 = 2;

/// Longest allowed campaign window.
const MAX_CAMPAIGN_DAYS: i64 = 90;

/// Post count requested when the caller leaves it out.
const DEFAULT_NUM_POSTS: i32 = 10;

/// A row from the `campaigns` table.
///
/// `strategy_framework` and `shot_list` stay `NULL` until the first
/// successful orchestration run writes its artifacts back.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Campaign {
    pub id: DbId,
    pub account_id: DbId,
    pub name: String,
    pub what_promoting: String,
    pub goal: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub important_date: Option<Date>,
    pub important_date_label: Option<String>,
    pub platforms: Vec<String>,
    pub sales_channel: String,
    pub offers_promos: Option<String>,
    /// Requested post count; 0 lets the strategy pick from the duration.
    pub num_posts: i32,
    pub strategy_framework: Option<serde_json::Value>,
    pub shot_list: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a campaign.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = validate_campaign_window))]
pub struct CreateCampaign {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(
        min = 10,
        max = 100,
        message = "Describe what you're promoting in 10 to 100 characters"
    ))]
    pub what_promoting: String,
    #[validate(length(max = 300))]
    pub goal: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub important_date: Option<Date>,
    #[validate(length(max = 100))]
    pub important_date_label: Option<String>,
    #[validate(
        length(min = 1, max = 3, message = "Pick 1 to 3 platforms"),
        custom(function = validate_platform_labels)
    )]
    pub platforms: Vec<String>,
    #[validate(custom(function = validate_sales_channel))]
    pub sales_channel: String,
    #[validate(length(max = 300))]
    pub offers_promos: Option<String>,
    #[validate(range(min = 0, max = 30))]
    #[serde(default = "default_num_posts")]
    pub num_posts: i32,
}

fn default_num_posts() -> i32 {
    DEFAULT_NUM_POSTS
}

fn validate_platform_labels(platforms: &[String]) -> Result<(), ValidationError> {
    let mut seen = Vec::with_capacity(platforms.len());
    for label in platforms {
        if Platform::parse(label).is_err() {
            let mut err = ValidationError::new("platform");
            err.message = Some(format!("Unknown platform '{label}'").into());
            return Err(err);
        }
        if seen.contains(&label.as_str()) {
            let mut err = ValidationError::new("platform");
            err.message = Some(format!("Platform '{label}' listed more than once").into());
            return Err(err);
        }
        seen.push(label.as_str());
    }
    Ok(())
}

fn validate_sales_channel(value: &str) -> Result<(), ValidationError> {
    SalesChannel::parse(value).map(|_| ()).map_err(|msg| {
        let mut err = ValidationError::new("sales_channel");
        err.message = Some(msg.into());
        err
    })
}

fn validate_campaign_window(campaign: &CreateCampaign) -> Result<(), ValidationError> {
    let duration = (campaign.end_date - campaign.start_date).num_days();
    if duration < MIN_CAMPAIGN_DAYS {
        return Err(window_error("Campaign must run for at least 2 days"));
    }
    if duration > MAX_CAMPAIGN_DAYS {
        return Err(window_error("Campaign must run for 90 days or less"));
    }
    if let Some(important) = campaign.important_date {
        if important < campaign.start_date || important > campaign.end_date {
            return Err(window_error("Important date must fall within the campaign dates"));
        }
    }
    Ok(())
}

fn window_error(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("campaign_window");
    err.message = Some(message.into());
    err
}

/// DTO for editing a campaign's descriptive fields. All fields are
/// optional. Window dates, platforms, and sales channel are fixed at
/// creation because the generated plan depends on them; the handler
/// checks a new `important_date` against the stored window.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCampaign {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 300))]
    pub goal: Option<String>,
    pub important_date: Option<Date>,
    #[validate(length(max = 100))]
    pub important_date_label: Option<String>,
    #[validate(length(max = 300))]
    pub offers_promos: Option<String>,
    #[validate(range(min = 0, max = 30))]
    pub num_posts: Option<i32>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
