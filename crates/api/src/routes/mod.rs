pub mod brand_profile;
pub mod campaigns;
pub mod health;
pub mod orchestrations;
pub mod posts;
pub mod usage;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /orchestrations                   trigger a full pipeline run (POST)
///
/// /campaigns                        list, create
/// /campaigns/{id}                   get, update, delete
/// /campaigns/{id}/posts             list generated posts
/// /campaigns/{id}/regenerate        wipe posts and rerun (POST)
///
/// /brand-profile                    get, create-or-replace (GET, PUT)
///
/// /posts/{id}                       get, update, soft-delete
/// /posts/{id}/regenerate            regenerate one post's content (POST)
///
/// /usage                            tier, counters, limits (GET)
/// /usage/check                      advisory limit decision (POST)
/// ```
///
/// Every route expects the caller's `X-Account-Id` header; requests
/// without one are rejected 401 by the [`CurrentAccount`] extractor.
///
/// [`CurrentAccount`]: crate::extract::CurrentAccount
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/orchestrations", orchestrations::router())
        .nest("/campaigns", campaigns::router())
        .nest("/brand-profile", brand_profile::router())
        .nest("/posts", posts::router())
        .nest("/usage", usage::router())
}
