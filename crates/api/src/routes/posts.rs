//! Route definitions for individual posts.
//!
//! Mounted at `/posts` by `api_routes()`. Per-campaign listing lives under
//! `/campaigns/{id}/posts`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Post routes.
///
/// ```text
/// GET    /{id}              -> get_post
/// PATCH  /{id}              -> update_post (edits, draft/approved)
/// DELETE /{id}              -> delete_post (soft delete)
/// POST   /{id}/regenerate   -> regenerate (caption/hook/visual_concept/all)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/{id}/regenerate", post(posts::regenerate))
}
