//! Repository for the `master_shots` table.

use shotvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::master_shot::{CreateMasterShot, MasterShot, UpdateMasterShot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, file_name, file_path, description, nas_server_id, created_at, updated_at";

/// Provides CRUD operations for master shots.
pub struct MasterShotRepo;

impl MasterShotRepo {
    /// Insert a new master shot.
    ///
    /// A duplicate `(file_name, file_path)` pair violates
    /// `uq_master_shots_file` and surfaces as a database error.
    pub async fn create(pool: &PgPool, input: &CreateMasterShot) -> Result<MasterShot, sqlx::Error> {
        let query = format!(
            "INSERT INTO master_shots (file_name, file_path, description, nas_server_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MasterShot>(&query)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .bind(&input.description)
            .bind(input.nas_server_id)
            .fetch_one(pool)
            .await
    }

    /// Find a master shot by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MasterShot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM master_shots WHERE id = $1");
        sqlx::query_as::<_, MasterShot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all master shots, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<MasterShot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM master_shots ORDER BY created_at DESC");
        sqlx::query_as::<_, MasterShot>(&query).fetch_all(pool).await
    }

    /// Update a master shot. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMasterShot,
    ) -> Result<Option<MasterShot>, sqlx::Error> {
        let query = format!(
            "UPDATE master_shots SET
                file_name = COALESCE($2, file_name),
                file_path = COALESCE($3, file_path),
                description = COALESCE($4, description),
                nas_server_id = COALESCE($5, nas_server_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MasterShot>(&query)
            .bind(id)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .bind(&input.description)
            .bind(input.nas_server_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a master shot by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM master_shots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
