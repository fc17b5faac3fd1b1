//! Repository for the `version_shots` table.
//!
//! Version numbers are assigned in the INSERT itself via a
//! `COALESCE(MAX(version_number), -1) + 1` subselect, so the first
//! submission for a `(shot_id, task_id)` pair gets 0. Two concurrent
//! auto-assigned inserts can still compute the same number; the
//! `uq_version_shots_revision` constraint rejects the loser and
//! [`VersionShotRepo::create`] retries it.

use shotvault_core::revision::EditDenied;
use shotvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::version_shot::{
    CreateVersionShot, UpdateVersionShot, VersionShot, VersionShotWithMaster,
};
use crate::repositories::MasterShotRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, shot_id, task_id, file_path, file_name, version_number, \
    master_shot_id, description, metadata, locked, locked_by_user_id, locked_by_user_name, \
    commited, created_at, updated_at";

/// Attempts per submission before giving up on version-number contention.
const CREATE_ATTEMPTS: u32 = 3;

/// Result of a submission attempt.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(Box<VersionShotWithMaster>),
    /// The `(file_path, file_name)` pair already exists somewhere.
    DuplicateFile,
    /// A caller-supplied version number is already taken for this shot/task.
    VersionTaken,
}

/// Result of a guarded update attempt.
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(Box<VersionShotWithMaster>),
    NotFound,
    /// The revision guard rejected the edit (committed or locked by another).
    Denied(EditDenied),
}

/// Provides submission, guarded-update, and keyed read/delete operations
/// for version shots.
pub struct VersionShotRepo;

impl VersionShotRepo {
    /// Submit a new version shot.
    ///
    /// When `input.version_number` is `None`, the next number for the
    /// `(shot_id, task_id)` pair is assigned inside the INSERT. A lost race
    /// on `uq_version_shots_revision` is retried up to [`CREATE_ATTEMPTS`]
    /// times; a caller-supplied number is never retried.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVersionShot,
    ) -> Result<CreateOutcome, sqlx::Error> {
        let query = format!(
            "INSERT INTO version_shots
                (shot_id, task_id, file_path, file_name, version_number,
                 master_shot_id, description, metadata)
             VALUES (
                $1, $2, $3, $4,
                COALESCE($5, (SELECT COALESCE(MAX(version_number), -1) + 1
                              FROM version_shots WHERE shot_id = $1 AND task_id = $2)),
                $6, $7, $8
             )
             RETURNING {COLUMNS}"
        );

        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = sqlx::query_as::<_, VersionShot>(&query)
                .bind(&input.shot_id)
                .bind(&input.task_id)
                .bind(&input.file_path)
                .bind(&input.file_name)
                .bind(input.version_number)
                .bind(input.master_shot_id)
                .bind(&input.description)
                .bind(&input.metadata)
                .fetch_one(pool)
                .await;

            match result {
                Ok(version) => {
                    let with_master = Self::attach_master(pool, version).await?;
                    return Ok(CreateOutcome::Created(Box::new(with_master)));
                }
                Err(err) => match unique_violation(&err) {
                    Some("uq_version_shots_file") => return Ok(CreateOutcome::DuplicateFile),
                    Some("uq_version_shots_revision") if input.version_number.is_some() => {
                        return Ok(CreateOutcome::VersionTaken);
                    }
                    Some("uq_version_shots_revision") if attempt < CREATE_ATTEMPTS => {
                        tracing::debug!(
                            attempt,
                            shot_id = %input.shot_id,
                            task_id = %input.task_id,
                            "version number raced with a concurrent submission, retrying"
                        );
                        continue;
                    }
                    _ => return Err(err),
                },
            }
        }
    }

    /// Find a version shot by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VersionShot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM version_shots WHERE id = $1");
        sqlx::query_as::<_, VersionShot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a version shot by ID with its master shot embedded.
    pub async fn find_by_id_with_master(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VersionShotWithMaster>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(version) => Ok(Some(Self::attach_master(pool, version).await?)),
            None => Ok(None),
        }
    }

    /// List all version shots, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<VersionShot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM version_shots ORDER BY created_at DESC");
        sqlx::query_as::<_, VersionShot>(&query).fetch_all(pool).await
    }

    /// List all version shots for a shot, across tasks.
    pub async fn list_by_shot(
        pool: &PgPool,
        shot_id: &str,
    ) -> Result<Vec<VersionShot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM version_shots WHERE shot_id = $1
             ORDER BY task_id, version_number DESC"
        );
        sqlx::query_as::<_, VersionShot>(&query)
            .bind(shot_id)
            .fetch_all(pool)
            .await
    }

    /// List all versions for a `(shot_id, task_id)` pair, latest on top.
    pub async fn list_by_shot_task(
        pool: &PgPool,
        shot_id: &str,
        task_id: &str,
    ) -> Result<Vec<VersionShot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM version_shots
             WHERE shot_id = $1 AND task_id = $2
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, VersionShot>(&query)
            .bind(shot_id)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// Find the latest (highest-numbered) version for a `(shot_id, task_id)` pair.
    pub async fn find_latest(
        pool: &PgPool,
        shot_id: &str,
        task_id: &str,
    ) -> Result<Option<VersionShot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM version_shots
             WHERE shot_id = $1 AND task_id = $2
             ORDER BY version_number DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, VersionShot>(&query)
            .bind(shot_id)
            .bind(task_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a specific version of a `(shot_id, task_id)` pair.
    pub async fn find_by_version_number(
        pool: &PgPool,
        shot_id: &str,
        task_id: &str,
        version_number: i32,
    ) -> Result<Option<VersionShot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM version_shots
             WHERE shot_id = $1 AND task_id = $2 AND version_number = $3"
        );
        sqlx::query_as::<_, VersionShot>(&query)
            .bind(shot_id)
            .bind(task_id)
            .bind(version_number)
            .fetch_optional(pool)
            .await
    }

    /// Apply a guarded update to a version shot.
    ///
    /// Runs in one transaction: the row is read `FOR UPDATE`, the revision
    /// guard decides whether `edit_user_id` may mutate it, and only then is
    /// the partial update applied. Releasing the lock (`locked = false`)
    /// also clears the holder columns so a stale holder can never pair with
    /// an unlocked row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        edit_user_id: &str,
        input: &UpdateVersionShot,
    ) -> Result<UpdateOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM version_shots WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, VersionShot>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(current) = current else {
            return Ok(UpdateOutcome::NotFound);
        };

        if let Err(denied) = current.revision_state().check_edit(edit_user_id) {
            return Ok(UpdateOutcome::Denied(denied));
        }

        let clearing_lock = input.locked == Some(false);
        let update = format!(
            "UPDATE version_shots SET
                file_path = COALESCE($2, file_path),
                file_name = COALESCE($3, file_name),
                master_shot_id = COALESCE($4, master_shot_id),
                description = COALESCE($5, description),
                metadata = COALESCE($6, metadata),
                locked = COALESCE($7, locked),
                locked_by_user_id = CASE WHEN $8 THEN NULL
                                         ELSE COALESCE($9, locked_by_user_id) END,
                locked_by_user_name = CASE WHEN $8 THEN NULL
                                           ELSE COALESCE($10, locked_by_user_name) END,
                commited = COALESCE($11, commited)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, VersionShot>(&update)
            .bind(id)
            .bind(&input.file_path)
            .bind(&input.file_name)
            .bind(input.master_shot_id)
            .bind(&input.description)
            .bind(&input.metadata)
            .bind(input.locked)
            .bind(clearing_lock)
            .bind(&input.locked_by_user_id)
            .bind(&input.locked_by_user_name)
            .bind(input.commited)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        let with_master = Self::attach_master(pool, updated).await?;
        Ok(UpdateOutcome::Updated(Box::new(with_master)))
    }

    /// Delete exactly one version of a `(shot_id, task_id)` pair.
    /// Returns `true` if a row was removed.
    pub async fn delete_by_version_number(
        pool: &PgPool,
        shot_id: &str,
        task_id: &str,
        version_number: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM version_shots \
             WHERE shot_id = $1 AND task_id = $2 AND version_number = $3",
        )
        .bind(shot_id)
        .bind(task_id)
        .bind(version_number)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load the linked master shot, if any.
    async fn attach_master(
        pool: &PgPool,
        version: VersionShot,
    ) -> Result<VersionShotWithMaster, sqlx::Error> {
        let master_shot = match version.master_shot_id {
            Some(master_id) => MasterShotRepo::find_by_id(pool, master_id).await?,
            None => None,
        };
        Ok(VersionShotWithMaster {
            version,
            master_shot,
        })
    }
}

/// Extract the constraint name from a PostgreSQL unique violation (23505).
fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return db_err.constraint();
        }
    }
    None
}
