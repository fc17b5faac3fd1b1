//! Repository for the `nas_servers` table.

use std::collections::HashMap;

use shotvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::nas_server::{CreateNasServer, NasServer, NasServerWithShots, UpdateNasServer};
use crate::repositories::MasterShotRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, host, mount_path, description, created_at, updated_at";

/// Provides CRUD operations for NAS server registrations.
pub struct NasServerRepo;

impl NasServerRepo {
    /// Register a new NAS server.
    pub async fn create(pool: &PgPool, input: &CreateNasServer) -> Result<NasServer, sqlx::Error> {
        let query = format!(
            "INSERT INTO nas_servers (name, host, mount_path, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NasServer>(&query)
            .bind(&input.name)
            .bind(&input.host)
            .bind(&input.mount_path)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a NAS server by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<NasServer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM nas_servers WHERE id = $1");
        sqlx::query_as::<_, NasServer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all NAS servers, by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<NasServer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM nas_servers ORDER BY name");
        sqlx::query_as::<_, NasServer>(&query).fetch_all(pool).await
    }

    /// List all NAS servers with the master shots stored on each.
    pub async fn list_with_shots(pool: &PgPool) -> Result<Vec<NasServerWithShots>, sqlx::Error> {
        let servers = Self::list(pool).await?;
        let shots = MasterShotRepo::list(pool).await?;

        let mut by_server: HashMap<DbId, Vec<_>> = HashMap::new();
        for shot in shots {
            if let Some(nas_id) = shot.nas_server_id {
                by_server.entry(nas_id).or_default().push(shot);
            }
        }

        Ok(servers
            .into_iter()
            .map(|nas_server| {
                let master_shots = by_server.remove(&nas_server.id).unwrap_or_default();
                NasServerWithShots {
                    nas_server,
                    master_shots,
                }
            })
            .collect())
    }

    /// Update a NAS server. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNasServer,
    ) -> Result<Option<NasServer>, sqlx::Error> {
        let query = format!(
            "UPDATE nas_servers SET
                name = COALESCE($2, name),
                host = COALESCE($3, host),
                mount_path = COALESCE($4, mount_path),
                description = COALESCE($5, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NasServer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.host)
            .bind(&input.mount_path)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a NAS server by ID. Returns `true` if a row was removed.
    ///
    /// Master shots referencing it keep their rows; the FK is set NULL.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM nas_servers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
