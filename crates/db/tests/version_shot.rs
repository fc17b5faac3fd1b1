//! Integration tests for version shot submission, the revision guard, and
//! keyed reads/deletes.
//!
//! Exercises `VersionShotRepo` against a real database:
//! - Auto-assigned version numbers form the sequence 0, 1, 2, ...
//! - A caller-supplied version number bypasses assignment
//! - Duplicate `(file_path, file_name)` submissions are rejected
//! - The lock/commit guard admits only the holding user and never a
//!   committed row
//! - `find_latest` and `find_by_version_number` project correctly
//! - `delete_by_version_number` removes exactly one row

use assert_matches::assert_matches;
use shotvault_core::revision::EditDenied;
use shotvault_db::models::version_shot::{CreateVersionShot, UpdateVersionShot};
use shotvault_db::repositories::{CreateOutcome, UpdateOutcome, VersionShotRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_submission(shot_id: &str, task_id: &str, file: &str) -> CreateVersionShot {
    CreateVersionShot {
        shot_id: shot_id.to_string(),
        task_id: task_id.to_string(),
        file_path: format!("/renders/{shot_id}/{task_id}"),
        file_name: file.to_string(),
        version_number: None,
        master_shot_id: None,
        description: None,
        metadata: None,
    }
}

async fn submit(pool: &PgPool, input: &CreateVersionShot) -> shotvault_db::models::version_shot::VersionShot {
    match VersionShotRepo::create(pool, input).await.unwrap() {
        CreateOutcome::Created(created) => created.version,
        other => panic!("expected Created, got {other:?}"),
    }
}

fn lock_for(user_id: &str, user_name: &str) -> UpdateVersionShot {
    UpdateVersionShot {
        locked: Some(true),
        locked_by_user_id: Some(user_id.to_string()),
        locked_by_user_name: Some(user_name.to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: auto-assigned version numbers start at 0 and increment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_version_numbers_increment_from_zero(pool: PgPool) {
    let v0 = submit(&pool, &new_submission("S1", "comp", "a.mov")).await;
    let v1 = submit(&pool, &new_submission("S1", "comp", "b.mov")).await;
    let v2 = submit(&pool, &new_submission("S1", "comp", "c.mov")).await;

    assert_eq!(v0.version_number, 0);
    assert_eq!(v1.version_number, 1);
    assert_eq!(v2.version_number, 2);

    // A different task for the same shot starts its own sequence.
    let other = submit(&pool, &new_submission("S1", "lighting", "d.mov")).await;
    assert_eq!(other.version_number, 0);
}

// ---------------------------------------------------------------------------
// Test: caller-supplied version number bypasses assignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_explicit_version_number_bypasses_assignment(pool: PgPool) {
    let mut input = new_submission("S2", "comp", "a.mov");
    input.version_number = Some(40);
    let pinned = submit(&pool, &input).await;
    assert_eq!(pinned.version_number, 40);

    // The next auto-assigned number continues from the highest.
    let next = submit(&pool, &new_submission("S2", "comp", "b.mov")).await;
    assert_eq!(next.version_number, 41);
}

// ---------------------------------------------------------------------------
// Test: reusing a caller-supplied number is rejected, not overwritten
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_explicit_version_number_collision(pool: PgPool) {
    let mut first = new_submission("S3", "comp", "a.mov");
    first.version_number = Some(7);
    submit(&pool, &first).await;

    let mut second = new_submission("S3", "comp", "b.mov");
    second.version_number = Some(7);
    let outcome = VersionShotRepo::create(&pool, &second).await.unwrap();
    assert_matches!(outcome, CreateOutcome::VersionTaken);
}

// ---------------------------------------------------------------------------
// Test: duplicate (file_path, file_name) is rejected across shot/task pairs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_file_rejected(pool: PgPool) {
    let original = CreateVersionShot {
        shot_id: "S4".to_string(),
        task_id: "comp".to_string(),
        file_path: "/a".to_string(),
        file_name: "f1.mov".to_string(),
        version_number: None,
        master_shot_id: None,
        description: None,
        metadata: None,
    };
    submit(&pool, &original).await;

    // Same file under a completely different shot/task.
    let duplicate = CreateVersionShot {
        shot_id: "S5".to_string(),
        task_id: "lighting".to_string(),
        ..original.clone()
    };
    let outcome = VersionShotRepo::create(&pool, &duplicate).await.unwrap();
    assert_matches!(outcome, CreateOutcome::DuplicateFile);

    // No second row was created anywhere.
    let all = VersionShotRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: update applies fields on an open record
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_open_record(pool: PgPool) {
    let version = submit(&pool, &new_submission("S6", "comp", "a.mov")).await;

    let changes = UpdateVersionShot {
        description: Some("first pass".to_string()),
        ..Default::default()
    };
    let outcome = VersionShotRepo::update(&pool, version.id, "alice", &changes)
        .await
        .unwrap();

    match outcome {
        UpdateOutcome::Updated(updated) => {
            assert_eq!(updated.version.description.as_deref(), Some("first pass"));
            assert!(!updated.version.locked);
        }
        other => panic!("expected Updated, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: lock guard admits the holder and rejects everyone else
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_lock_guard(pool: PgPool) {
    let version = submit(&pool, &new_submission("S7", "comp", "a.mov")).await;

    // Alice takes the lock.
    let outcome = VersionShotRepo::update(&pool, version.id, "alice", &lock_for("alice", "Alice A."))
        .await
        .unwrap();
    assert_matches!(outcome, UpdateOutcome::Updated(_));

    // Bob is rejected.
    let changes = UpdateVersionShot {
        description: Some("bob was here".to_string()),
        ..Default::default()
    };
    let outcome = VersionShotRepo::update(&pool, version.id, "bob", &changes)
        .await
        .unwrap();
    assert_matches!(
        outcome,
        UpdateOutcome::Denied(EditDenied::LockedByOther { holder }) if holder == "Alice A."
    );

    // Alice may still edit.
    let changes = UpdateVersionShot {
        description: Some("alice revision".to_string()),
        ..Default::default()
    };
    let outcome = VersionShotRepo::update(&pool, version.id, "alice", &changes)
        .await
        .unwrap();
    match outcome {
        UpdateOutcome::Updated(updated) => {
            assert_eq!(
                updated.version.description.as_deref(),
                Some("alice revision")
            );
        }
        other => panic!("expected Updated, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: releasing a lock clears the holder columns
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_unlock_clears_holder(pool: PgPool) {
    let version = submit(&pool, &new_submission("S8", "comp", "a.mov")).await;

    VersionShotRepo::update(&pool, version.id, "alice", &lock_for("alice", "Alice A."))
        .await
        .unwrap();

    let release = UpdateVersionShot {
        locked: Some(false),
        ..Default::default()
    };
    let outcome = VersionShotRepo::update(&pool, version.id, "alice", &release)
        .await
        .unwrap();

    match outcome {
        UpdateOutcome::Updated(updated) => {
            assert!(!updated.version.locked);
            assert_eq!(updated.version.locked_by_user_id, None);
            assert_eq!(updated.version.locked_by_user_name, None);
        }
        other => panic!("expected Updated, got {other:?}"),
    }

    // Bob may edit again.
    let changes = UpdateVersionShot {
        description: Some("bob now".to_string()),
        ..Default::default()
    };
    let outcome = VersionShotRepo::update(&pool, version.id, "bob", &changes)
        .await
        .unwrap();
    assert_matches!(outcome, UpdateOutcome::Updated(_));
}

// ---------------------------------------------------------------------------
// Test: a committed record rejects every edit, including the lock holder's
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_committed_record_is_terminal(pool: PgPool) {
    let version = submit(&pool, &new_submission("S9", "comp", "a.mov")).await;

    let commit = UpdateVersionShot {
        commited: Some(true),
        ..Default::default()
    };
    let outcome = VersionShotRepo::update(&pool, version.id, "alice", &commit)
        .await
        .unwrap();
    assert_matches!(outcome, UpdateOutcome::Updated(_));

    // Even the user who committed it is rejected now.
    let changes = UpdateVersionShot {
        description: Some("too late".to_string()),
        ..Default::default()
    };
    let outcome = VersionShotRepo::update(&pool, version.id, "alice", &changes)
        .await
        .unwrap();
    assert_matches!(outcome, UpdateOutcome::Denied(EditDenied::Committed));
}

// ---------------------------------------------------------------------------
// Test: updating a missing record reports NotFound
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_record(pool: PgPool) {
    let outcome = VersionShotRepo::update(&pool, 999_999, "alice", &UpdateVersionShot::default())
        .await
        .unwrap();
    assert_matches!(outcome, UpdateOutcome::NotFound);
}

// ---------------------------------------------------------------------------
// Test: find_latest and find_by_version_number
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_latest_and_exact_lookup(pool: PgPool) {
    submit(&pool, &new_submission("S10", "comp", "a.mov")).await;
    submit(&pool, &new_submission("S10", "comp", "b.mov")).await;
    let newest = submit(&pool, &new_submission("S10", "comp", "c.mov")).await;

    let latest = VersionShotRepo::find_latest(&pool, "S10", "comp")
        .await
        .unwrap()
        .expect("latest version should exist");
    assert_eq!(latest.id, newest.id);
    assert_eq!(latest.version_number, 2);

    let exact = VersionShotRepo::find_by_version_number(&pool, "S10", "comp", 1)
        .await
        .unwrap()
        .expect("version 1 should exist");
    assert_eq!(exact.version_number, 1);
    assert_eq!(exact.file_name, "b.mov");

    let missing = VersionShotRepo::find_latest(&pool, "S10", "unknown-task")
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Test: list_by_shot_task orders latest first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_by_shot_task_ordered_desc(pool: PgPool) {
    submit(&pool, &new_submission("S11", "comp", "a.mov")).await;
    submit(&pool, &new_submission("S11", "comp", "b.mov")).await;
    submit(&pool, &new_submission("S11", "comp", "c.mov")).await;

    let versions = VersionShotRepo::list_by_shot_task(&pool, "S11", "comp")
        .await
        .unwrap();
    assert_eq!(versions.len(), 3);
    assert_eq!(versions[0].version_number, 2);
    assert_eq!(versions[1].version_number, 1);
    assert_eq!(versions[2].version_number, 0);
}

// ---------------------------------------------------------------------------
// Test: delete_by_version_number removes exactly that row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_by_version_number(pool: PgPool) {
    submit(&pool, &new_submission("S12", "comp", "a.mov")).await;
    submit(&pool, &new_submission("S12", "comp", "b.mov")).await;

    let deleted = VersionShotRepo::delete_by_version_number(&pool, "S12", "comp", 0)
        .await
        .unwrap();
    assert!(deleted);

    // The other version survives.
    let remaining = VersionShotRepo::list_by_shot_task(&pool, "S12", "comp")
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].version_number, 1);

    // Deleting it again reports absence.
    let deleted = VersionShotRepo::delete_by_version_number(&pool, "S12", "comp", 0)
        .await
        .unwrap();
    assert!(!deleted);
}
