use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{IncidentVoteState, VoteDirection, VoterId};

/// The vote fields of an incident document as they are found in the store.
///
/// Incidents created by the reporting flow may lack some or all of these
/// fields, and a hand-edited document may hold negative counters, so every
/// field is optional and signed. Unrelated incident fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IncidentVoteDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upvotes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downvotes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes_by_voter: Option<BTreeMap<VoterId, VoteDirection>>,
}

impl IncidentVoteDocument {
    /// Converts the document into a well-formed `IncidentVoteState`.
    ///
    /// Missing counters become 0, a missing map becomes empty and negative
    /// counters are floored at 0. Counters are not recomputed from the map.
    pub fn normalize(&self) -> IncidentVoteState {
        IncidentVoteState {
            upvotes: self.upvotes.map_or(0, |count| count.max(0) as u64),
            downvotes: self.downvotes.map_or(0, |count| count.max(0) as u64),
            votes_by_voter: self.votes_by_voter.clone().unwrap_or_default(),
        }
    }

    /// Checks that every field is present and no counter is negative, so
    /// `normalize` returns exactly what is stored.
    pub fn is_normalized(&self) -> bool {
        matches!((self.upvotes, self.downvotes), (Some(up), Some(down)) if up >= 0 && down >= 0)
            && self.votes_by_voter.is_some()
    }
}

impl From<&IncidentVoteState> for IncidentVoteDocument {
    fn from(state: &IncidentVoteState) -> Self {
        IncidentVoteDocument {
            upvotes: Some(i64::try_from(state.upvotes).unwrap_or(i64::MAX)),
            downvotes: Some(i64::try_from(state.downvotes).unwrap_or(i64::MAX)),
            votes_by_voter: Some(state.votes_by_voter.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_missing_fields() {
        let document: IncidentVoteDocument =
            serde_json::from_value(serde_json::json!({ "title": "Flooded bridge" })).unwrap();
        assert_eq!(document, IncidentVoteDocument::default());
        assert_eq!(document.normalize(), IncidentVoteState::default());
    }

    #[test]
    fn test_normalize_missing_map_keeps_counters() {
        let document: IncidentVoteDocument =
            serde_json::from_value(serde_json::json!({ "upvotes": 2 })).unwrap();
        let state = document.normalize();
        assert_eq!(state.upvotes, 2);
        assert_eq!(state.downvotes, 0);
        assert!(state.votes_by_voter.is_empty());
    }

    #[test]
    fn test_normalize_floors_negative_counters() {
        let document = IncidentVoteDocument {
            upvotes: Some(-4),
            downvotes: Some(1),
            votes_by_voter: None,
        };
        let state = document.normalize();
        assert_eq!(state.upvotes, 0);
        assert_eq!(state.downvotes, 1);
    }

    #[test]
    fn test_is_normalized() {
        let complete = IncidentVoteDocument {
            upvotes: Some(1),
            downvotes: Some(0),
            votes_by_voter: Some(BTreeMap::from([("u1".to_string(), VoteDirection::Up)])),
        };
        assert!(complete.is_normalized());

        let negative = IncidentVoteDocument {
            downvotes: Some(-3),
            ..complete.clone()
        };
        assert!(!negative.is_normalized());

        let missing_map = IncidentVoteDocument {
            votes_by_voter: None,
            ..complete
        };
        assert!(!missing_map.is_normalized());
        assert!(!IncidentVoteDocument::default().is_normalized());
    }

    #[test]
    fn test_deserialize_full_document() {
        let document: IncidentVoteDocument = serde_json::from_value(serde_json::json!({
            "upvotes": 1,
            "downvotes": 1,
            "votesByVoter": { "u1": "Up", "u2": "Down" },
            "category": "Flood"
        }))
        .unwrap();
        let state = document.normalize();
        assert_eq!(state.vote_of("u1"), Some(VoteDirection::Up));
        assert_eq!(state.vote_of("u2"), Some(VoteDirection::Down));
        assert!(state.is_consistent());
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        let result = serde_json::from_value::<IncidentVoteDocument>(serde_json::json!({
            "votesByVoter": { "u1": "Sideways" }
        }));
        assert!(result.is_err());
    }
}
