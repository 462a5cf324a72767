//! This module defines the `IncidentVoteRepository` trait, the document-store
//! collaborator that owns incident records and their vote fields.
use crate::errors::IncidentVoteRepositoryError;
use incident_votes_shared::types::{IncidentVoteState, VersionedVoteState};

/// A trait that defines the interface for reading and writing incident vote state.
///
/// Writes only touch the `upvotes`, `downvotes` and `votesByVoter` fields of the
/// incident document; all other fields are left as they are. Every successful
/// write increments the document version by one.
#[async_trait::async_trait]
pub trait IncidentVoteRepository: Send + Sync {
    /// Reads the vote state of an incident.
    ///
    /// # Arguments
    ///
    /// * `incident_id` - The incident document to read.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the incident does not exist, otherwise the normalized vote
    /// state together with the document version.
    async fn get_vote_state(
        &self,
        incident_id: &str,
    ) -> Result<Option<VersionedVoteState>, IncidentVoteRepositoryError>;

    /// Overwrites the vote fields of an incident regardless of its current version.
    ///
    /// Concurrent writers are not detected: the last write wins.
    ///
    /// # Returns
    ///
    /// The new document version, or `IncidentVoteRepositoryError::NotFound`
    /// if the incident does not exist.
    async fn update_vote_state(
        &self,
        incident_id: &str,
        state: &IncidentVoteState,
    ) -> Result<u64, IncidentVoteRepositoryError>;

    /// Overwrites the vote fields of an incident only if its version is still `expected_version`.
    ///
    /// # Returns
    ///
    /// The new document version, `IncidentVoteRepositoryError::VersionConflict`
    /// if another write happened since `expected_version` was read, or
    /// `IncidentVoteRepositoryError::NotFound` if the incident does not exist.
    async fn update_vote_state_if_version(
        &self,
        incident_id: &str,
        state: &IncidentVoteState,
        expected_version: u64,
    ) -> Result<u64, IncidentVoteRepositoryError>;
}
