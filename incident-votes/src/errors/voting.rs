//! Error types for the vote service.
use incident_votes_ledger::LedgerError;
use incident_votes_repository::IncidentVoteRepositoryError;
use incident_votes_shared::types::{IncidentId, IncidentVoteState};
use thiserror::Error;

/// Represents errors that can occur while casting or reconciling votes.
#[derive(Debug, Error)]
pub enum VoteServiceError {
    /// The vote was rejected before anything was read or written.
    #[error("Invalid vote: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Incident not found: {0}")]
    IncidentNotFound(IncidentId),

    #[error("Repository error: {0}")]
    Repository(#[from] IncidentVoteRepositoryError),

    /// The vote was computed but could not be stored.
    ///
    /// `optimistic` is the state the caller may keep showing; it is not rolled back.
    #[error("Failed to persist vote: {source}")]
    PersistFailed {
        optimistic: Box<IncidentVoteState>,
        source: IncidentVoteRepositoryError,
    },

    #[error("Gave up on incident {incident_id} after {attempts} conflicting writes")]
    ConflictRetriesExhausted {
        incident_id: IncidentId,
        attempts: u32,
    },

    #[error("Persistence task failed: {0}")]
    PersistTask(String),
}
