//! The vote service: reads an incident's vote state, applies a vote through
//! the `VoteLedger` and writes the result back to the repository.
//!
//! Two flows are offered:
//!
//! - [`VoteService::cast_vote`] reads the stored state first. With
//!   `WriteMode::Versioned` the write is conditional on the version that was
//!   read and the vote is re-applied on conflict.
//! - [`VoteService::cast_vote_optimistic`] applies the vote to the caller's
//!   local view, returns the new state at once and persists it in the
//!   background with an unconditional write.
mod config;

pub use config::{VoteServiceConfig, WriteMode};

use std::sync::Arc;

use incident_votes_ledger::VoteLedger;
use incident_votes_repository::IncidentVoteRepository;
use incident_votes_shared::types::{IncidentVoteState, VersionedVoteState, VoteDirection};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::VoteServiceError;

/// The stored result of a vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    pub state: IncidentVoteState,
    /// Document version after the write.
    pub version: u64,
    /// Number of read-apply-write rounds, 1 unless version conflicts occurred.
    pub attempts: u32,
}

/// The result of recomputing an incident's counters from its per-voter map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    pub state: IncidentVoteState,
    pub version: u64,
    /// False if the counters already matched and nothing was written.
    pub changed: bool,
}

/// A vote applied to a local view, with its write still in flight.
pub struct OptimisticVote {
    /// The state to show immediately.
    pub state: IncidentVoteState,
    persist: JoinHandle<Result<u64, VoteServiceError>>,
}

impl OptimisticVote {
    /// Waits for the background write and returns the new document version.
    ///
    /// On failure the optimistic state stays as it is; the error is returned
    /// so the caller can tell the user.
    pub async fn confirm(self) -> Result<u64, VoteServiceError> {
        self.persist
            .await
            .map_err(|e| VoteServiceError::PersistTask(e.to_string()))?
    }
}

/// Casts and reconciles votes on incidents stored in an `IncidentVoteRepository`.
pub struct VoteService {
    repository: Arc<dyn IncidentVoteRepository>,
    config: VoteServiceConfig,
}

impl VoteService {
    /// Create a new VoteService with default configuration (versioned writes).
    pub fn new(repository: Arc<dyn IncidentVoteRepository>) -> Self {
        Self::with_config(repository, VoteServiceConfig::default())
    }

    /// Create a new VoteService with custom configuration.
    pub fn with_config(repository: Arc<dyn IncidentVoteRepository>, config: VoteServiceConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &VoteServiceConfig {
        &self.config
    }

    /// Applies a vote to the stored state of an incident and persists it.
    ///
    /// # Arguments
    ///
    /// * `incident_id` - The incident being voted on
    /// * `voter_id` - Identifier of the acting voter
    /// * `direction` - The requested vote direction
    ///
    /// # Returns
    ///
    /// * `Ok(VoteOutcome)` - The stored state and its version
    /// * `Err(VoteServiceError::Ledger)` - If the voter id is empty; nothing is read
    /// * `Err(VoteServiceError::IncidentNotFound)` - If the incident does not exist
    /// * `Err(VoteServiceError::PersistFailed)` - If the write failed; carries the computed state
    /// * `Err(VoteServiceError::ConflictRetriesExhausted)` - If every versioned write conflicted
    pub async fn cast_vote(
        &self,
        incident_id: &str,
        voter_id: &str,
        direction: VoteDirection,
    ) -> Result<VoteOutcome, VoteServiceError> {
        VoteLedger::validate_voter(voter_id)?;

        let mut attempts: u32 = 0;
        loop {
            attempts += 1;

            let current = self.load(incident_id).await?;
            let next = VoteLedger::apply_vote(&current.state, voter_id, direction)?;

            let written = match self.config.write_mode {
                WriteMode::LastWriteWins => {
                    self.repository.update_vote_state(incident_id, &next).await
                }
                WriteMode::Versioned => {
                    self.repository
                        .update_vote_state_if_version(incident_id, &next, current.version)
                        .await
                }
            };

            match written {
                Ok(version) => {
                    info!(
                        incident_id,
                        voter_id,
                        direction = %direction,
                        version,
                        attempts,
                        "Vote recorded"
                    );
                    return Ok(VoteOutcome {
                        state: next,
                        version,
                        attempts,
                    });
                }
                Err(e) if e.is_version_conflict() && attempts <= self.config.max_conflict_retries => {
                    warn!(incident_id, voter_id, attempt = attempts, error = %e, "Vote write conflicted, retrying");
                }
                Err(e) if e.is_version_conflict() => {
                    warn!(incident_id, voter_id, attempts, "Vote write conflicted, giving up");
                    return Err(VoteServiceError::ConflictRetriesExhausted {
                        incident_id: incident_id.to_string(),
                        attempts,
                    });
                }
                Err(e) => {
                    error!(incident_id, voter_id, error = %e, "Failed to persist vote");
                    return Err(VoteServiceError::PersistFailed {
                        optimistic: Box::new(next),
                        source: e,
                    });
                }
            }
        }
    }

    /// Applies a vote to the caller's local view and persists it in the background.
    ///
    /// The returned state is available at once. The write overwrites the
    /// stored vote fields with it, so votes stored since `local` was read are
    /// lost. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `VoteServiceError::Ledger` if the voter id is empty; nothing is written.
    pub fn cast_vote_optimistic(
        &self,
        incident_id: &str,
        local: &IncidentVoteState,
        voter_id: &str,
        direction: VoteDirection,
    ) -> Result<OptimisticVote, VoteServiceError> {
        let next = VoteLedger::apply_vote(local, voter_id, direction)?;

        let repository = Arc::clone(&self.repository);
        let incident_id = incident_id.to_string();
        let state = next.clone();
        let persist = tokio::spawn(async move {
            match repository.update_vote_state(&incident_id, &state).await {
                Ok(version) => Ok(version),
                Err(e) => {
                    error!(incident_id = %incident_id, error = %e, "Failed to persist optimistic vote");
                    Err(VoteServiceError::PersistFailed {
                        optimistic: Box::new(state),
                        source: e,
                    })
                }
            }
        });

        Ok(OptimisticVote {
            state: next,
            persist,
        })
    }

    /// Recomputes an incident's counters from its per-voter map and stores them if they drifted.
    ///
    /// Vote fields that are missing or negative in the stored document are
    /// written back as well. The write is always conditional so a repair
    /// never overwrites a vote cast in the meantime.
    pub async fn reconcile_incident(&self, incident_id: &str) -> Result<ReconcileOutcome, VoteServiceError> {
        let current = self.load(incident_id).await?;
        let repaired = VoteLedger::reconcile(&current.state);

        if repaired == current.state && !current.needs_normalization {
            return Ok(ReconcileOutcome {
                state: repaired,
                version: current.version,
                changed: false,
            });
        }

        let version = self
            .repository
            .update_vote_state_if_version(incident_id, &repaired, current.version)
            .await?;

        info!(
            incident_id,
            upvotes = repaired.upvotes,
            downvotes = repaired.downvotes,
            version,
            "Reconciled vote counters"
        );

        Ok(ReconcileOutcome {
            state: repaired,
            version,
            changed: true,
        })
    }

    async fn load(&self, incident_id: &str) -> Result<VersionedVoteState, VoteServiceError> {
        self.repository
            .get_vote_state(incident_id)
            .await?
            .ok_or_else(|| VoteServiceError::IncidentNotFound(incident_id.to_string()))
    }
}
