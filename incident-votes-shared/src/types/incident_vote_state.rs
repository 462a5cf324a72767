use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{VoteDirection, VoterId};

/// Represents the aggregate voting state attached to one incident.
///
/// `upvotes` and `downvotes` mirror the number of `Up` and `Down` entries in
/// `votes_by_voter`. A voter without an entry has no active vote.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IncidentVoteState {
    pub upvotes: u64,
    pub downvotes: u64,
    pub votes_by_voter: BTreeMap<VoterId, VoteDirection>,
}

impl IncidentVoteState {
    /// Returns the active vote of `voter_id`, if any.
    pub fn vote_of(&self, voter_id: &str) -> Option<VoteDirection> {
        self.votes_by_voter.get(voter_id).copied()
    }

    /// Counts the `Up` and `Down` entries of the per-voter map.
    pub fn tally(&self) -> (u64, u64) {
        self.votes_by_voter
            .values()
            .fold((0, 0), |(up, down), direction| match direction {
                VoteDirection::Up => (up + 1, down),
                VoteDirection::Down => (up, down + 1),
            })
    }

    /// Checks that both counters agree with the per-voter map.
    pub fn is_consistent(&self) -> bool {
        self.tally() == (self.upvotes, self.downvotes)
    }
}

/// An `IncidentVoteState` together with the version token of the document it was read from.
///
/// The version increases by one on every successful write and is used for
/// conditional updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedVoteState {
    pub state: IncidentVoteState,
    pub version: u64,
    /// True if the stored vote fields were missing or held negative counters.
    /// `state` then holds their normalized form, not what is stored.
    pub needs_normalization: bool,
}
