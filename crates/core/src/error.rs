//! Shared domain error taxonomy.
//!
//! Every crate above `postforge-core` maps its failures into [`CoreError`] or
//! wraps it in a more specific enum. The HTTP layer is the only place these
//! are converted into status codes.

use crate::types::DbId;

/// Domain-level errors. Variants correspond to distinct HTTP classes but do
/// not know anything about HTTP themselves.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity looked up by primary key does not exist (or is not visible
    /// to the requesting account).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with existing state (e.g. a second brand
    /// profile for an account that already has one).
    #[error("{0}")]
    Conflict(String),

    /// No account identity was supplied.
    #[error("{0}")]
    Unauthorized(String),

    /// The identity is known but not allowed to touch this resource.
    #[error("{0}")]
    Forbidden(String),

    /// A subscription-tier limit blocks the operation.
    #[error("{message}")]
    LimitExceeded { message: String },

    /// Unexpected internal failure; message is logged, not shown to clients.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the common by-id lookup miss.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
