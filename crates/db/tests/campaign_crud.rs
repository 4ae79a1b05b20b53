//! Integration tests for campaign CRUD, ownership scoping, and artifact
//! persistence.

use postforge_core::types::Date;
use postforge_db::models::campaign::{CreateCampaign, UpdateCampaign};
use postforge_db::repositories::{AccountRepo, CampaignRepo, PostRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> Date {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_campaign(name: &str) -> CreateCampaign {
    CreateCampaign {
        name: name.to_string(),
        what_promoting: "Hand-poured soy candle collection".to_string(),
        goal: Some("Sell out the first batch".to_string()),
        start_date: date(2026, 1, 5),
        end_date: date(2026, 1, 18),
        important_date: Some(date(2026, 1, 10)),
        important_date_label: Some("Launch day".to_string()),
        platforms: vec!["instagram".to_string(), "tiktok".to_string()],
        sales_channel: "etsy".to_string(),
        offers_promos: None,
        num_posts: 10,
    }
}

fn new_post(campaign_id: i64, account_id: i64, n: i32) -> postforge_db::models::post::NewPost {
    postforge_db::models::post::NewPost {
        campaign_id,
        account_id,
        post_number: n,
        post_name: format!("Post {n}"),
        scheduled_date: date(2026, 1, 5),
        post_type: "image".to_string(),
        platforms: vec!["instagram".to_string()],
        hook: None,
        caption: "caption".to_string(),
        visual_concept: serde_json::json!({"type": "single image", "shots": []}),
        purpose: "awareness".to_string(),
        core_message: "m".to_string(),
        behavioral_trigger: "curiosity".to_string(),
        strategy_type: "educational".to_string(),
        tracking_focus: "views".to_string(),
        cta: "Link in bio".to_string(),
        status: "draft".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_round_trips_fields(pool: PgPool) {
    let account = AccountRepo::create(&pool, "maker@example.com").await.unwrap();
    let campaign = CampaignRepo::create(&pool, account.id, &new_campaign("Winter launch"))
        .await
        .unwrap();

    assert_eq!(campaign.account_id, account.id);
    assert_eq!(campaign.name, "Winter launch");
    assert_eq!(campaign.platforms, vec!["instagram", "tiktok"]);
    assert_eq!(campaign.start_date, date(2026, 1, 5));
    assert_eq!(campaign.num_posts, 10);
    assert!(campaign.strategy_framework.is_none());
    assert!(campaign.shot_list.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_is_scoped_to_owner(pool: PgPool) {
    let owner = AccountRepo::create(&pool, "owner@example.com").await.unwrap();
    let other = AccountRepo::create(&pool, "other@example.com").await.unwrap();
    let campaign = CampaignRepo::create(&pool, owner.id, &new_campaign("Private"))
        .await
        .unwrap();

    let found = CampaignRepo::find_for_account(&pool, campaign.id, owner.id)
        .await
        .unwrap();
    assert!(found.is_some());

    let hidden = CampaignRepo::find_for_account(&pool, campaign.id, other.id)
        .await
        .unwrap();
    assert!(hidden.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_returns_newest_first(pool: PgPool) {
    let account = AccountRepo::create(&pool, "maker@example.com").await.unwrap();
    CampaignRepo::create(&pool, account.id, &new_campaign("First"))
        .await
        .unwrap();
    CampaignRepo::create(&pool, account.id, &new_campaign("Second"))
        .await
        .unwrap();

    let campaigns = CampaignRepo::list_for_account(&pool, account.id).await.unwrap();
    let names: Vec<&str> = campaigns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Second", "First"]);

    let count = CampaignRepo::count_for_account(&pool, account.id).await.unwrap();
    assert_eq!(count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_patches_only_provided_fields(pool: PgPool) {
    let account = AccountRepo::create(&pool, "maker@example.com").await.unwrap();
    let campaign = CampaignRepo::create(&pool, account.id, &new_campaign("Draft name"))
        .await
        .unwrap();

    let patch = UpdateCampaign {
        name: Some("Final name".to_string()),
        num_posts: Some(7),
        ..Default::default()
    };
    let updated = CampaignRepo::update(&pool, campaign.id, account.id, &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Final name");
    assert_eq!(updated.num_posts, 7);
    // Untouched fields keep their stored values.
    assert_eq!(updated.goal.as_deref(), Some("Sell out the first batch"));
    assert_eq!(updated.start_date, date(2026, 1, 5));
    assert_eq!(updated.platforms, vec!["instagram", "tiktok"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_is_scoped_to_owner(pool: PgPool) {
    let owner = AccountRepo::create(&pool, "owner@example.com").await.unwrap();
    let other = AccountRepo::create(&pool, "other@example.com").await.unwrap();
    let campaign = CampaignRepo::create(&pool, owner.id, &new_campaign("Private"))
        .await
        .unwrap();

    let patch = UpdateCampaign {
        name: Some("Hijacked".to_string()),
        ..Default::default()
    };
    let denied = CampaignRepo::update(&pool, campaign.id, other.id, &patch)
        .await
        .unwrap();
    assert!(denied.is_none());

    let kept = CampaignRepo::find_for_account(&pool, campaign.id, owner.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.name, "Private");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_plan_artifacts_persists_jsonb(pool: PgPool) {
    let account = AccountRepo::create(&pool, "maker@example.com").await.unwrap();
    let campaign = CampaignRepo::create(&pool, account.id, &new_campaign("Planned"))
        .await
        .unwrap();

    let strategy = serde_json::json!({"weekly_phases": [{"phase": "awareness", "post_count": 2}]});
    let shots = serde_json::json!({"shots": [{"shot_number": 1, "title": "Flat lay"}]});

    let updated = CampaignRepo::set_plan_artifacts(&pool, campaign.id, &strategy, &shots)
        .await
        .unwrap();
    assert!(updated);

    let fetched = CampaignRepo::find_for_account(&pool, campaign.id, account.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.strategy_framework, Some(strategy));
    assert_eq!(fetched.shot_list, Some(shots));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_plan_artifacts_missing_campaign_returns_false(pool: PgPool) {
    let strategy = serde_json::json!({});
    let updated = CampaignRepo::set_plan_artifacts(&pool, 9999, &strategy, &strategy)
        .await
        .unwrap();
    assert!(!updated);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_posts(pool: PgPool) {
    let account = AccountRepo::create(&pool, "maker@example.com").await.unwrap();
    let campaign = CampaignRepo::create(&pool, account.id, &new_campaign("Doomed"))
        .await
        .unwrap();
    PostRepo::insert_many(
        &pool,
        &[
            new_post(campaign.id, account.id, 1),
            new_post(campaign.id, account.id, 2),
        ],
    )
    .await
    .unwrap();

    let deleted = CampaignRepo::delete(&pool, campaign.id, account.id).await.unwrap();
    assert!(deleted);

    let remaining: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE campaign_id = $1")
        .bind(campaign.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_requires_ownership(pool: PgPool) {
    let owner = AccountRepo::create(&pool, "owner@example.com").await.unwrap();
    let other = AccountRepo::create(&pool, "other@example.com").await.unwrap();
    let campaign = CampaignRepo::create(&pool, owner.id, &new_campaign("Kept"))
        .await
        .unwrap();

    let deleted = CampaignRepo::delete(&pool, campaign.id, other.id).await.unwrap();
    assert!(!deleted);
}
