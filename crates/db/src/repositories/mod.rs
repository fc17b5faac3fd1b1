//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod master_shot_repo;
pub mod nas_server_repo;
pub mod version_shot_repo;

pub use master_shot_repo::MasterShotRepo;
pub use nas_server_repo::NasServerRepo;
pub use version_shot_repo::{CreateOutcome, UpdateOutcome, VersionShotRepo};
