//! Error types for the incident votes repository.
//! Defines specific errors that can occur while reading or writing incident documents.
use incident_votes_shared::types::IncidentId;
use thiserror::Error;

/// Represents errors that can occur within the incident votes repository.
#[derive(Debug, Error)]
pub enum IncidentVoteRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Incident not found: {0}")]
    NotFound(IncidentId),

    #[error("Version conflict on incident {incident_id}: expected {expected}, found {actual}")]
    VersionConflict {
        incident_id: IncidentId,
        expected: u64,
        actual: u64,
    },

    #[error("Invalid incident document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

impl IncidentVoteRepositoryError {
    /// Returns true if the error is a failed conditional update.
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, IncidentVoteRepositoryError::VersionConflict { .. })
    }
}
