//! Store error types

use thiserror::Error;

/// Errors surfaced by the entity store.
///
/// `NotFound` and `Conflict` are expected outcomes callers branch on;
/// `Codec` and `Io` are the storage-failure channel and are never swallowed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id exists for the kind.
    #[error("{kind} record not found: {id}")]
    NotFound {
        /// Entity kind tag.
        kind: &'static str,
        /// Record id looked up.
        id: String,
    },

    /// A record with this id already exists for the kind.
    #[error("{kind} record already exists: {id}")]
    Conflict {
        /// Entity kind tag.
        kind: &'static str,
        /// Duplicate record id.
        id: String,
    },

    /// Record failed to (de)serialize across the backend seam.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Backing-store I/O failure.
    #[error("backend I/O error: {0}")]
    Io(String),
}

impl StoreError {
    /// True for the expected not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// True for the expected duplicate-id outcome.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Store result alias.
pub type StoreResult<T> = Result<T, StoreError>;
