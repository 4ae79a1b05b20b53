//! Shared helpers for API integration tests: a scripted text generator,
//! app construction mirroring `main.rs`, and request plumbing.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use postforge_api::config::ServerConfig;
use postforge_api::router::build_app_router;
use postforge_api::state::AppState;
use postforge_core::types::DbId;
use postforge_db::repositories::AccountRepo;
use postforge_pipeline::PipelineConfig;
use postforge_provider::{GenerationRequest, ProviderError, TextGenerator};

// ---------------------------------------------------------------------------
// Scripted provider
// ---------------------------------------------------------------------------

/// Routes each request on the prompt's opening line and answers with canned
/// stage output, so API tests exercise the full pipeline without a network
/// call. Regeneration prompts are recognized by their `BRAND CONTEXT:`
/// opening.
pub struct ScriptedGenerator {
    pub strategy_response: String,
    pub shot_list_response: String,
    pub regeneration_response: String,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            strategy_response: format!("```json\n{}\n```", strategy_json()),
            shot_list_response: shot_list_json(),
            regeneration_response: "A fresh regenerated caption.".to_string(),
        }
    }

    pub fn with_strategy_response(mut self, response: &str) -> Self {
        self.strategy_response = response.to_string();
        self
    }

    pub fn with_regeneration_response(mut self, response: &str) -> Self {
        self.regeneration_response = response.to_string();
        self
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let prompt = &request.prompt;
        if prompt.starts_with("You are a social media strategist") {
            return Ok(self.strategy_response.clone());
        }
        if prompt.starts_with("You are a content production planner") {
            return Ok(self.shot_list_response.clone());
        }
        if prompt.starts_with("You are a social media content writer") {
            return Ok(post_response(parse_post_number(prompt)));
        }
        if prompt.starts_with("BRAND CONTEXT:") {
            return Ok(self.regeneration_response.clone());
        }
        panic!("unscripted prompt: {}", prompt.lines().next().unwrap_or(""));
    }
}

fn parse_post_number(prompt: &str) -> i32 {
    prompt
        .lines()
        .find_map(|line| line.trim().strip_prefix("- Post Number: "))
        .and_then(|n| n.trim().parse().ok())
        .unwrap_or(0)
}

/// Two phases summing to five posts, matching the five-post campaign in
/// [`campaign_body`].
pub fn strategy_json() -> String {
    serde_json::json!({
        "weekly_phases": [
            {
                "week": 1,
                "dates": "Jan 5-8",
                "phase": "awareness",
                "intent": "introduce the winter collection",
                "post_count": 3,
                "format_mix": {"reel": 2, "image": 1}
            },
            {
                "week": 2,
                "dates": "Jan 9-11",
                "phase": "conversion",
                "intent": "drive launch-day orders",
                "post_count": 2,
                "format_mix": {"carousel": 1, "image": 1}
            }
        ],
        "posting_frequency": {
            "default": "1 post every 1-2 days",
            "surge_dates": ["2026-01-10"]
        },
        "content_themes": [
            {"theme": "product beauty shots", "count": 3},
            {"theme": "behind-the-scenes process", "count": 2}
        ],
        "shot_requirements": ["3 hero product shots", "2 process clips"]
    })
    .to_string()
}

pub fn shot_list_json() -> String {
    let shots: Vec<serde_json::Value> = (1..=8)
        .map(|n| {
            serde_json::json!({
                "shot_number": n,
                "title": format!("Shot {n}"),
                "media_type": if n <= 5 { "photo" } else { "video" },
                "description": "tabletop setup near the window",
                "file_format": format!("Shot-{n}.jpg"),
                "reusable": true,
                "estimated_uses": 3,
                "checked": false
            })
        })
        .collect();
    serde_json::json!({
        "themes": [
            {"name": "warm minimal", "mood": "cozy", "color_palette": ["cream", "clay"]}
        ],
        "props": [{"item": "linen cloth", "where_to_find": "around the house", "themes": ["warm minimal"]}],
        "locations": [{"location": "kitchen table", "lighting": "morning window light", "setup_notes": "clear the clutter"}],
        "batch_sessions": [
            {"session_name": "Morning session", "duration": "2-3 hours", "shots": [1, 2, 3, 4], "prep_needed": ["clean table"]}
        ],
        "diy_tips": ["Shoot everything near a window"],
        "shots": shots
    })
    .to_string()
}

fn post_response(post_number: i32) -> String {
    serde_json::json!({
        "post_number": post_number,
        "post_name": format!("Post {post_number}"),
        "hook": format!("Hook {post_number}"),
        "caption": format!("Caption for post {post_number}"),
        "visual_concept": {
            "type": "single image",
            "description": "warm flat lay",
            "shots": [{"shot_number": 1, "title": "Shot 1", "sequence_order": 1}]
        },
        "platform_notes": {"instagram": {"format": "Feed post", "cta": "Link in bio"}},
        "purpose": "awareness",
        "core_message": "handmade quality",
        "behavioral_trigger": "curiosity",
        "format": "product showcase",
        "strategy_type": "promotional",
        "tracking_focus": "saves",
        "cta": "Shop the Etsy store",
        "status": "draft"
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_format: "pretty".to_string(),
        anthropic_api_key: None,
        anthropic_model: None,
        anthropic_base_url: None,
        generation_batch_size: 4,
        generation_batch_delay_ms: 0,
        generation_call_timeout_secs: 120,
    }
}

/// Build the full application router with the default scripted generator.
///
/// This goes through [`build_app_router`] so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with(pool, Arc::new(ScriptedGenerator::new()))
}

/// Build the application router around a specific generator.
pub fn build_app_with(pool: PgPool, generator: Arc<dyn TextGenerator>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator,
        // No inter-batch pause; a multi-batch run finishes in milliseconds.
        pipeline: PipelineConfig {
            batch_delay: Duration::ZERO,
            ..PipelineConfig::default()
        },
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request plumbing
// ---------------------------------------------------------------------------

/// Send a bare request with no body and no account header.
pub async fn send(app: Router, method: Method, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a request as `account_id` with an optional JSON body.
pub async fn send_as(
    app: Router,
    account_id: DbId,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("x-account-id", account_id.to_string());
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, account_id: DbId, path: &str) -> Response<Body> {
    send_as(app, account_id, Method::GET, path, None).await
}

pub async fn post_json(
    app: Router,
    account_id: DbId,
    path: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_as(app, account_id, Method::POST, path, Some(body)).await
}

pub async fn put_json(
    app: Router,
    account_id: DbId,
    path: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_as(app, account_id, Method::PUT, path, Some(body)).await
}

pub async fn patch_json(
    app: Router,
    account_id: DbId,
    path: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_as(app, account_id, Method::PATCH, path, Some(body)).await
}

pub async fn delete(app: Router, account_id: DbId, path: &str) -> Response<Body> {
    send_as(app, account_id, Method::DELETE, path, None).await
}

/// POST without a body, for endpoints whose body is optional.
pub async fn post_empty(app: Router, account_id: DbId, path: &str) -> Response<Body> {
    send_as(app, account_id, Method::POST, path, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a starter-tier account directly; identity comes from upstream,
/// so there is no signup endpoint to call.
pub async fn seed_account(pool: &PgPool) -> DbId {
    AccountRepo::create(pool, "maker@example.com").await.unwrap().id
}

/// Move an account onto another tier, bypassing billing.
pub async fn set_tier(pool: &PgPool, account_id: DbId, tier: &str) {
    sqlx::query("UPDATE accounts SET subscription_tier = $2 WHERE id = $1")
        .bind(account_id)
        .bind(tier)
        .execute(pool)
        .await
        .unwrap();
}

/// Request body for `PUT /api/brand-profile`.
pub fn brand_body() -> serde_json::Value {
    serde_json::json!({
        "business_name": "Maple & Clay",
        "what_you_sell": "handmade ceramic mugs",
        "what_makes_unique": "small-batch glazes",
        "target_customer": "coffee romantics",
        "brand_vibe_words": ["warm", "cozy", "handmade"]
    })
}

/// Request body for `POST /api/campaigns`: a seven-day window asking for
/// five posts on one platform.
pub fn campaign_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Winter launch",
        "what_promoting": "Winter glaze mug collection",
        "goal": "Sell out the first batch",
        "start_date": "2026-01-05",
        "end_date": "2026-01-11",
        "important_date": "2026-01-10",
        "important_date_label": "Launch Day",
        "platforms": ["instagram"],
        "sales_channel": "etsy",
        "num_posts": 5
    })
}

/// Seed a brand profile and campaign through the API; returns the
/// campaign id.
pub async fn seed_brand_and_campaign(app: &Router, account_id: DbId) -> DbId {
    let response = put_json(app.clone(), account_id, "/api/brand-profile", brand_body()).await;
    assert!(response.status().is_success(), "brand profile seed failed");

    let response = post_json(app.clone(), account_id, "/api/campaigns", campaign_body()).await;
    assert_eq!(response.status().as_u16(), 201, "campaign seed failed");
    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}
