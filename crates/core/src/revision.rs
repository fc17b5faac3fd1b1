//! Edit-guard state machine for version shot revisions.
//!
//! A version shot is in exactly one of three states:
//!
//! - [`RevisionState::Open`] -- anyone may edit.
//! - [`RevisionState::LockedBy`] -- only the holding user may edit.
//! - [`RevisionState::Committed`] -- terminal; no edit is ever allowed again.
//!
//! The stored row keeps two booleans plus the lock-holder columns; this
//! module is the single place that interprets them, so an invalid
//! combination (e.g. a committed row still carrying a stale lock) can never
//! leak into a handler decision: `Committed` always wins.

use crate::error::CoreError;

/// The interpreted state of a version shot row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionState {
    /// Unlocked and uncommitted.
    Open,
    /// Locked for editing by a single user.
    LockedBy {
        user_id: String,
        user_name: Option<String>,
    },
    /// Permanently immutable.
    Committed,
}

/// Why an edit was denied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditDenied {
    #[error("Cannot update a committed version shot.")]
    Committed,

    #[error("This version shot is locked by another user: {holder}")]
    LockedByOther { holder: String },
}

impl RevisionState {
    /// Interpret the stored flags. `commited` takes precedence over `locked`.
    pub fn from_flags(
        commited: bool,
        locked: bool,
        locked_by_user_id: Option<&str>,
        locked_by_user_name: Option<&str>,
    ) -> Self {
        if commited {
            return Self::Committed;
        }
        if locked {
            return Self::LockedBy {
                user_id: locked_by_user_id.unwrap_or_default().to_string(),
                user_name: locked_by_user_name.map(str::to_string),
            };
        }
        Self::Open
    }

    /// Decide whether `edit_user_id` may mutate a record in this state.
    pub fn check_edit(&self, edit_user_id: &str) -> Result<(), EditDenied> {
        match self {
            Self::Open => Ok(()),
            Self::Committed => Err(EditDenied::Committed),
            Self::LockedBy { user_id, user_name } => {
                if user_id == edit_user_id {
                    Ok(())
                } else {
                    Err(EditDenied::LockedByOther {
                        holder: user_name.clone().unwrap_or_else(|| user_id.clone()),
                    })
                }
            }
        }
    }
}

impl From<EditDenied> for CoreError {
    fn from(denied: EditDenied) -> Self {
        match denied {
            EditDenied::Committed => CoreError::Conflict(denied.to_string()),
            EditDenied::LockedByOther { .. } => CoreError::Forbidden(denied.to_string()),
        }
    }
}
