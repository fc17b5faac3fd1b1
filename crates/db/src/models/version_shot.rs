//! Version shot entity model and DTOs.
//!
//! One versioned submission of a rendered/edited file for a
//! `(shot_id, task_id)` pair. `shot_id` and `task_id` are opaque identifiers
//! owned by the external production tracker.

use serde::{Deserialize, Serialize};
use shotvault_core::revision::RevisionState;
use shotvault_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::master_shot::MasterShot;

/// A row from the `version_shots` table.
///
/// The `commited` column keeps the historical spelling for wire
/// compatibility with existing clients.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VersionShot {
    pub id: DbId,
    pub shot_id: String,
    pub task_id: String,
    pub file_path: String,
    pub file_name: String,
    pub version_number: i32,
    pub master_shot_id: Option<DbId>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub locked: bool,
    pub locked_by_user_id: Option<String>,
    pub locked_by_user_name: Option<String>,
    pub commited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VersionShot {
    /// Interpret the lock/commit columns as a [`RevisionState`].
    pub fn revision_state(&self) -> RevisionState {
        RevisionState::from_flags(
            self.commited,
            self.locked,
            self.locked_by_user_id.as_deref(),
            self.locked_by_user_name.as_deref(),
        )
    }
}

/// DTO for submitting a new version shot.
///
/// `version_number` is normally auto-assigned per `(shot_id, task_id)`;
/// supplying one bypasses assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVersionShot {
    pub shot_id: String,
    pub task_id: String,
    pub file_path: String,
    pub file_name: String,
    pub version_number: Option<i32>,
    pub master_shot_id: Option<DbId>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// DTO for updating a version shot. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVersionShot {
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub master_shot_id: Option<DbId>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub locked: Option<bool>,
    pub locked_by_user_id: Option<String>,
    pub locked_by_user_name: Option<String>,
    pub commited: Option<bool>,
}

/// A version shot with its associated master shot, when one is linked.
#[derive(Debug, Clone, Serialize)]
pub struct VersionShotWithMaster {
    #[serde(flatten)]
    pub version: VersionShot,
    pub master_shot: Option<MasterShot>,
}
