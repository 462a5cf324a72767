//! Conversions between incident documents and vote state.
//!
//! Incident documents are JSON objects owned by the reporting flow. Only the
//! `upvotes`, `downvotes` and `votesByVoter` fields belong to this crate.
use incident_votes_shared::types::{IncidentVoteDocument, IncidentVoteState, VersionedVoteState};
use serde_json::Value;

/// Reads and normalizes the vote fields of an incident document stored at `version`.
pub fn decode_versioned_state(document: &Value, version: u64) -> Result<VersionedVoteState, serde_json::Error> {
    let fields: IncidentVoteDocument = serde_json::from_value(document.clone())?;
    Ok(VersionedVoteState {
        state: fields.normalize(),
        version,
        needs_normalization: !fields.is_normalized(),
    })
}

/// Builds the JSON object holding only the vote fields of `state`.
pub fn vote_fields(state: &IncidentVoteState) -> Result<Value, serde_json::Error> {
    serde_json::to_value(IncidentVoteDocument::from(state))
}

/// Replaces the vote fields of `document` with those of `state`, keeping every other field.
pub fn merge_vote_fields(
    document: &mut Value,
    state: &IncidentVoteState,
) -> Result<(), serde_json::Error> {
    let fields = vote_fields(state)?;
    match (document.as_object_mut(), fields) {
        (Some(target), Value::Object(fields)) => target.extend(fields),
        (_, fields) => *document = fields,
    }
    Ok(())
}
