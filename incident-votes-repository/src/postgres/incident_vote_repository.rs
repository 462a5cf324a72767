use async_trait::async_trait;
use incident_votes_shared::types::{IncidentVoteState, VersionedVoteState};
use sqlx::Row;
use tracing::debug;

use crate::document::{decode_versioned_state, vote_fields};
use crate::{IncidentVoteRepository, IncidentVoteRepositoryError};

/// PostgreSQL implementation of the incident votes repository.
///
/// Vote fields are merged into the stored document with the JSONB `||`
/// operator, so fields written by other flows survive a vote update.
pub struct PostgresIncidentVoteRepository {
    pool: sqlx::PgPool,
}

impl PostgresIncidentVoteRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresIncidentVoteRepository)` - Ready-to-use repository instance
    /// * `Err(IncidentVoteRepositoryError)` - Future validation errors (currently always succeeds)
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, IncidentVoteRepositoryError> {
        Ok(Self { pool })
    }

    /// Connects to the database at `url` and creates a repository on the new pool.
    pub async fn connect(url: &str) -> Result<Self, IncidentVoteRepositoryError> {
        let pool = sqlx::PgPool::connect(url).await?;
        Self::new(pool).await
    }

    /// Runs the embedded migrations that create the `incidents` table.
    pub async fn migrate(&self) -> Result<(), IncidentVoteRepositoryError> {
        sqlx::migrate!("src/postgres/migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Merges the vote fields into the incident document and bumps its version.
    ///
    /// With `expected_version` set, the update only applies if the stored
    /// version still matches.
    async fn write(
        &self,
        incident_id: &str,
        state: &IncidentVoteState,
        expected_version: Option<u64>,
    ) -> Result<u64, IncidentVoteRepositoryError> {
        let fields = vote_fields(state)?;

        let updated = sqlx::query(
            r#"
            UPDATE incidents
            SET document = document || $2,
                version = version + 1,
                updated_at = now()
            WHERE id = $1 AND ($3::bigint IS NULL OR version = $3)
            RETURNING version
            "#,
        )
        .bind(incident_id)
        .bind(&fields)
        .bind(expected_version.map(|version| version as i64))
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = updated {
            let version = to_version(row.try_get("version")?);
            debug!(incident_id, version, "Updated incident vote state");
            return Ok(version);
        }

        let current: Option<i64> = sqlx::query_scalar("SELECT version FROM incidents WHERE id = $1")
            .bind(incident_id)
            .fetch_optional(&self.pool)
            .await?;

        match (current, expected_version) {
            (None, _) => Err(IncidentVoteRepositoryError::NotFound(incident_id.to_string())),
            (Some(actual), Some(expected)) => Err(IncidentVoteRepositoryError::VersionConflict {
                incident_id: incident_id.to_string(),
                expected,
                actual: to_version(actual),
            }),
            // Created after the UPDATE ran, so it was missing when the write happened.
            (Some(_), None) => Err(IncidentVoteRepositoryError::NotFound(incident_id.to_string())),
        }
    }
}

fn to_version(version: i64) -> u64 {
    version.max(0) as u64
}

#[async_trait]
impl IncidentVoteRepository for PostgresIncidentVoteRepository {
    /// Reads the incident document and decodes its vote fields.
    async fn get_vote_state(
        &self,
        incident_id: &str,
    ) -> Result<Option<VersionedVoteState>, IncidentVoteRepositoryError> {
        let row = sqlx::query("SELECT document, version FROM incidents WHERE id = $1")
            .bind(incident_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let document: serde_json::Value = row.try_get("document")?;
        let version: i64 = row.try_get("version")?;

        Ok(Some(decode_versioned_state(&document, to_version(version))?))
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
