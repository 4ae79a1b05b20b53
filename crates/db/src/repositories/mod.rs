//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod brand_profile_repo;
pub mod campaign_repo;
pub mod post_repo;

pub use account_repo::AccountRepo;
pub use brand_profile_repo::BrandProfileRepo;
pub use campaign_repo::CampaignRepo;
pub use post_repo::PostRepo;
