use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use incident_votes_repository::{
    IncidentVoteRepository, InMemoryIncidentVoteRepository, PostgresIncidentVoteRepository,
};
use serde_json::Value;
use tracing::info;

use crate::config::{Settings, StoreKind};
use crate::errors::AppError;
use crate::voting::VoteService;

/// `Dependencies` holds the initialized components of the application.
pub struct Dependencies {
    pub repository: Arc<dyn IncidentVoteRepository>,
    pub vote_service: VoteService,
}

impl Dependencies {
    /// Creates the repository selected by `settings` and the vote service on top of it.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on successful initialization or an
    /// `AppError` if the database cannot be reached or migrated.
    pub async fn new(settings: &Settings) -> Result<Self, AppError> {
        let repository: Arc<dyn IncidentVoteRepository> = match settings.store {
            StoreKind::Postgres => {
                let database_url = settings
                    .database_url
                    .as_deref()
                    .ok_or_else(|| AppError::config("DATABASE_URL must be set when VOTE_STORE=postgres"))?;
                let repository = PostgresIncidentVoteRepository::connect(database_url).await?;
                if settings.run_migrations {
                    repository.migrate().await?;
                    info!("Database migrations applied");
                }
                Arc::new(repository)
            }
            StoreKind::Memory => {
                let repository = InMemoryIncidentVoteRepository::new();
                if let Some(path) = &settings.seed_file {
                    seed_memory_store(&repository, path).await?;
                }
                Arc::new(repository)
            }
        };

        info!(
            store = ?settings.store,
            write_mode = ?settings.vote_service.write_mode,
            max_conflict_retries = settings.vote_service.max_conflict_retries,
            "Dependencies initialized"
        );

        let vote_service = VoteService::with_config(Arc::clone(&repository), settings.vote_service.clone());

        Ok(Self {
            repository,
            vote_service,
        })
    }
}

/// Loads the incidents of a JSON seed file (`{ "<incident-id>": { ...document } }`).
async fn seed_memory_store(repository: &InMemoryIncidentVoteRepository, path: &Path) -> Result<(), AppError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| AppError::config(format!("Failed to read VOTE_SEED_FILE {}: {}", path.display(), e)))?;
    let incidents: HashMap<String, Value> = serde_json::from_str(&contents)?;

    let count = incidents.len();
    for (incident_id, document) in incidents {
        repository.insert_incident(incident_id, document).await;
    }

    info!(path = %path.display(), incidents = count, "Seeded memory store");
    Ok(())
}
