//! This module defines the `VoteLedger`, which applies a single voter's vote
//! to the vote state of an incident.
//!
//! A voter holds at most one active vote per incident. Voting the same way
//! twice clears the vote, voting the other way switches it.
use crate::errors::LedgerError;
use incident_votes_shared::types::{IncidentVoteDocument, IncidentVoteState, VoteDirection};

/// `VoteLedger` computes vote state transitions for incidents.
///
/// All operations are pure: they borrow the current state and return a new one.
pub struct VoteLedger;

#[derive(Debug, PartialEq, Eq)]
struct VotesDelta {
    upvotes: i8,
    downvotes: i8,
}

impl VoteLedger {
    /// Applies `direction` from `voter_id` to `current` and returns the next state.
    ///
    /// # Arguments
    ///
    /// * `current` - The vote state the vote is applied to
    /// * `voter_id` - Identifier of the acting voter
    /// * `direction` - The requested vote direction
    ///
    /// # Returns
    ///
    /// The next `IncidentVoteState`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidVoter` if `voter_id` is empty.
    pub fn apply_vote(
        current: &IncidentVoteState,
        voter_id: &str,
        direction: VoteDirection,
    ) -> Result<IncidentVoteState, LedgerError> {
        Self::validate_voter(voter_id)?;

        let previous = current.vote_of(voter_id);
        let (recorded, delta) = compute_vote_delta(previous, direction);

        let mut next = current.clone();
        next.upvotes = apply_delta(next.upvotes, delta.upvotes);
        next.downvotes = apply_delta(next.downvotes, delta.downvotes);
        match recorded {
            Some(direction) => {
                next.votes_by_voter.insert(voter_id.to_string(), direction);
            }
            None => {
                next.votes_by_voter.remove(voter_id);
            }
        }

        Ok(next)
    }

    /// Applies a vote whose state and direction come from untyped input.
    ///
    /// The document is normalized first (missing counters count as zero, a
    /// missing map as empty), then the direction string is parsed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidVoter` if `voter_id` is empty, or
    /// `LedgerError::InvalidDirection` if `direction` is neither `Up` nor `Down`.
    pub fn apply_raw_vote(
        current: &IncidentVoteDocument,
        voter_id: &str,
        direction: &str,
    ) -> Result<IncidentVoteState, LedgerError> {
        Self::validate_voter(voter_id)?;
        let direction = Self::parse_direction(direction)?;
        Self::apply_vote(&current.normalize(), voter_id, direction)
    }

    /// Parses a vote direction, ignoring ASCII case and surrounding whitespace.
    pub fn parse_direction(direction: &str) -> Result<VoteDirection, LedgerError> {
        let trimmed = direction.trim();
        if trimmed.eq_ignore_ascii_case("up") {
            Ok(VoteDirection::Up)
        } else if trimmed.eq_ignore_ascii_case("down") {
            Ok(VoteDirection::Down)
        } else {
            Err(LedgerError::InvalidDirection(direction.to_string()))
        }
    }

    /// Rejects empty and whitespace-only voter ids.
    pub fn validate_voter(voter_id: &str) -> Result<(), LedgerError> {
        if voter_id.trim().is_empty() {
            return Err(LedgerError::InvalidVoter);
        }
        Ok(())
    }

    /// Recomputes both counters from the per-voter map.
    pub fn reconcile(state: &IncidentVoteState) -> IncidentVoteState {
        let (upvotes, downvotes) = state.tally();
        IncidentVoteState {
            upvotes,
            downvotes,
            votes_by_voter: state.votes_by_voter.clone(),
        }
    }
}

/// Returns the vote to record for the voter and the counter changes.
///
/// `None` as the recorded vote means the voter's entry is removed.
fn compute_vote_delta(
    previous: Option<VoteDirection>,
    requested: VoteDirection,
) -> (Option<VoteDirection>, VotesDelta) {
    let (recorded, upvotes, downvotes) = match (previous, requested) {
        (None, VoteDirection::Up)                          => (Some(VoteDirection::Up), 1, 0),
        (None, VoteDirection::Down)                        => (Some(VoteDirection::Down), 0, 1),
        (Some(VoteDirection::Up), VoteDirection::Up)       => (None, -1, 0),
        (Some(VoteDirection::Down), VoteDirection::Down)   => (None, 0, -1),
        (Some(VoteDirection::Up), VoteDirection::Down)     => (Some(VoteDirection::Down), -1, 1),
        (Some(VoteDirection::Down), VoteDirection::Up)     => (Some(VoteDirection::Up), 1, -1),
    };

    (recorded, VotesDelta { upvotes, downvotes })
}

/// Counters never go below zero, even if the stored state had drifted.
fn apply_delta(count: u64, delta: i8) -> u64 {
    if delta < 0 {
        count.saturating_sub(u64::from(delta.unsigned_abs()))
    } else {
        count.saturating_add(delta as u64)
    }
}
