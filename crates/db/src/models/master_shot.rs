//! Master shot entity model and DTOs.

use serde::{Deserialize, Serialize};
use shotvault_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `master_shots` table.
///
/// The canonical top-level record for a shot, keyed by
/// `(file_name, file_path)` and optionally placed on a NAS server.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MasterShot {
    pub id: DbId,
    pub file_name: String,
    pub file_path: String,
    pub description: Option<String>,
    pub nas_server_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a master shot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMasterShot {
    pub file_name: String,
    pub file_path: String,
    pub description: Option<String>,
    pub nas_server_id: Option<DbId>,
}

/// DTO for updating a master shot. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMasterShot {
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub description: Option<String>,
    pub nas_server_id: Option<DbId>,
}
