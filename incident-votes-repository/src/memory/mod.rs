//! In-memory implementation of the incident votes repository.
//!
//! Holds incident documents in a `HashMap` guarded by a `tokio::sync::RwLock`.
//! It honours the same versioning rules as the PostgreSQL backend and is used
//! for local runs and tests.
use std::collections::HashMap;

use async_trait::async_trait;
use incident_votes_shared::types::{IncidentId, IncidentVoteState, VersionedVoteState};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::{decode_versioned_state, merge_vote_fields};
use crate::{IncidentVoteRepository, IncidentVoteRepositoryError};

#[derive(Debug, Clone)]
struct StoredIncident {
    document: Value,
    version: u64,
}

/// In-memory document store for incidents.
#[derive(Debug, Default)]
pub struct InMemoryIncidentVoteRepository {
    incidents: RwLock<HashMap<IncidentId, StoredIncident>>,
}

impl InMemoryIncidentVoteRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new incident document at version 0, replacing any existing one.
    ///
    /// Incidents are created by the reporting flow; this stands in for it.
    pub async fn insert_incident(&self, incident_id: impl Into<IncidentId>, document: Value) {
        self.incidents.write().await.insert(
            incident_id.into(),
            StoredIncident {
                document,
                version: 0,
            },
        );
    }

    /// Returns a copy of the full incident document.
    pub async fn document(&self, incident_id: &str) -> Option<Value> {
        self.incidents
            .read()
            .await
            .get(incident_id)
            .map(|incident| incident.document.clone())
    }

    async fn write(
        &self,
        incident_id: &str,
        state: &IncidentVoteState,
        expected_version: Option<u64>,
    ) -> Result<u64, IncidentVoteRepositoryError> {
        let mut incidents = self.incidents.write().await;
        let incident = incidents
            .get_mut(incident_id)
            .ok_or_else(|| IncidentVoteRepositoryError::NotFound(incident_id.to_string()))?;

        if let Some(expected) = expected_version {
            if incident.version != expected {
                return Err(IncidentVoteRepositoryError::VersionConflict {
                    incident_id: incident_id.to_string(),
                    expected,
                    actual: incident.version,
                });
            }
        }

        merge_vote_fields(&mut incident.document, state)?;
        incident.version += 1;
        debug!(incident_id, version = incident.version, "Updated incident vote state");
        Ok(incident.version)
    }
}

#[async_trait]
impl IncidentVoteRepository for InMemoryIncidentVoteRepository {
    async fn get_vote_state(
        &self,
        incident_id: &str,
    ) -> Result<Option<VersionedVoteState>, IncidentVoteRepositoryError> {
        let incidents = self.incidents.read().await;
        let Some(incident) = incidents.get(incident_id) else {
            return Ok(None);
        };

        Ok(Some(decode_versioned_state(&incident.document, incident.version)?))
    }

    async fn update_vote_state(
        &self,
        incident_id: &str,
        state: &IncidentVoteState,
    ) -> Result<u64, IncidentVoteRepositoryError> {
        self.write(incident_id, state, None).await
    }

    async fn update_vote_state_if_version(
        &self,
        incident_id: &str,
        state: &IncidentVoteState,
        expected_version: u64,
    ) -> Result<u64, IncidentVoteRepositoryError> {
        self.write(incident_id, state, Some(expected_version)).await
    }
}
