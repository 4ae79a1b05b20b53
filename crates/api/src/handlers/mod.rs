//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `postforge_db` (and to
//! `postforge_pipeline` for generation) and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod brand_profile;
pub mod campaigns;
pub mod orchestrations;
pub mod posts;
pub mod usage;
