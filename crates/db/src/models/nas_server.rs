//! NAS storage registration model and DTOs.

use serde::{Deserialize, Serialize};
use shotvault_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::master_shot::MasterShot;

/// A row from the `nas_servers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NasServer {
    pub id: DbId,
    pub name: String,
    pub host: String,
    pub mount_path: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a NAS server.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNasServer {
    pub name: String,
    pub host: String,
    pub mount_path: String,
    pub description: Option<String>,
}

/// DTO for updating a NAS server. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNasServer {
    pub name: Option<String>,
    pub host: Option<String>,
    pub mount_path: Option<String>,
    pub description: Option<String>,
}

/// A NAS server with the master shots stored on it.
#[derive(Debug, Clone, Serialize)]
pub struct NasServerWithShots {
    #[serde(flatten)]
    pub nas_server: NasServer,
    pub master_shots: Vec<MasterShot>,
}
