//! Domain types and pure campaign-planning logic shared by every postforge
//! crate.
//!
//! Nothing in here performs I/O. The generation pipeline, database layer, and
//! HTTP surface all depend on this crate; it depends on none of them.

pub mod content;
pub mod context;
pub mod error;
pub mod extract;
pub mod limits;
pub mod plan;
pub mod schedule;
pub mod types;
