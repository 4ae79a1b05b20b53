//! Account-identity extractor for Axum handlers.
//!
//! Authentication lives upstream; by the time a request reaches this
//! service the session collaborator has resolved the caller and stamped
//! the account id onto the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use postforge_core::error::CoreError;
use postforge_core::types::DbId;

use crate::error::AppError;

/// Calling account extracted from the `X-Account-Id` header.
///
/// Use this as an extractor parameter in any handler that operates on
/// account-owned data:
///
/// ```ignore
/// async fn my_handler(account: CurrentAccount) -> AppResult<Json<()>> {
///     tracing::info!(account_id = account.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The id is not looked up here. Handlers that need the account row fetch
/// it themselves; pure reads stay one query cheaper and an id that matches
/// no row falls out of their ownership-scoped queries as a 404.
#[derive(Debug, Clone, Copy)]
pub struct CurrentAccount {
    /// The account's internal database id.
    pub id: DbId,
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-account-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing X-Account-Id header".into()))
            })?;

        let id: DbId = header.trim().parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid X-Account-Id header".into()))
        })?;

        Ok(CurrentAccount { id })
    }
}
