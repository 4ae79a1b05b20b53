//! Route definitions for campaigns and their nested resources.
//!
//! Mounted at `/campaigns` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{campaigns, orchestrations, posts};
use crate::state::AppState;

/// Campaign routes.
///
/// ```text
/// POST   /                  -> create_campaign
/// GET    /                  -> list_campaigns
/// GET    /{id}              -> get_campaign
/// PATCH  /{id}              -> update_campaign
/// DELETE /{id}              -> delete_campaign
/// GET    /{id}/posts        -> list_campaign_posts
/// POST   /{id}/regenerate   -> regenerate_campaign (wipe and rerun)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(campaigns::create_campaign).get(campaigns::list_campaigns),
        )
        .route(
            "/{id}",
            get(campaigns::get_campaign)
                .patch(campaigns::update_campaign)
                .delete(campaigns::delete_campaign),
        )
        .route("/{id}/posts", get(posts::list_campaign_posts))
        .route("/{id}/regenerate", post(orchestrations::regenerate_campaign))
}
