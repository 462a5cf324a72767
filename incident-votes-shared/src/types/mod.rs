mod incident_vote_document;
mod incident_vote_state;
mod vote_direction;

pub use incident_vote_document::IncidentVoteDocument;
pub use incident_vote_state::{IncidentVoteState, VersionedVoteState};
pub use vote_direction::VoteDirection;

/// Identifier of an incident document in the document store.
pub type IncidentId = String;

/// Identifier of a voter. Originates from the user's phone number.
pub type VoterId = String;
