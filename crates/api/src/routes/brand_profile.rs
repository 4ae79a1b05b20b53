//! Route definitions for the brand profile singleton.
//!
//! Mounted at `/brand-profile` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::brand_profile;
use crate::state::AppState;

/// Brand profile routes.
///
/// ```text
/// GET    /                  -> get_brand_profile
/// PUT    /                  -> put_brand_profile (create-or-replace)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(brand_profile::get_brand_profile).put(brand_profile::put_brand_profile),
    )
}
