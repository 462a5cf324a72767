//! Settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::errors::AppError;
use crate::voting::{VoteServiceConfig, WriteMode};

/// Default number of retries after a version conflict.
const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Which repository backs the vote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// PostgreSQL, configured through `DATABASE_URL`.
    Postgres,
    /// Process-local store, seeded from `VOTE_SEED_FILE`. Writes are lost on exit.
    Memory,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Reads `LOG_FORMAT` ("pretty" or "json", default: pretty).
    ///
    /// Read on its own so tracing can be installed before the remaining
    /// settings are parsed and their warnings logged.
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT").map(|value| value.to_lowercase()) {
            Ok(value) if value == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store: StoreKind,
    pub database_url: Option<String>,
    /// JSON object of incident id to incident document, loaded into the memory store.
    pub seed_file: Option<PathBuf>,
    pub run_migrations: bool,
    pub vote_service: VoteServiceConfig,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `VOTE_STORE`: "postgres" or "memory" (default: postgres)
    /// - `DATABASE_URL`: PostgreSQL connection string, required for the postgres store
    /// - `VOTE_SEED_FILE`: incidents to load into the memory store (optional)
    /// - `VOTE_WRITE_MODE`: "versioned" or "last-write-wins" (default: versioned)
    /// - `VOTE_MAX_CONFLICT_RETRIES`: retries after a version conflict (default: 3)
    /// - `RUN_MIGRATIONS`: run embedded migrations on start-up (default: true)
    ///
    /// `LOG_FORMAT` is read separately by `LogFormat::from_env`.
    ///
    /// Invalid optional values are logged and replaced by their default, so
    /// tracing should be initialized first.
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - Loaded settings
    /// * `Err(AppError::ConfigError)` - If `VOTE_STORE` is unknown or `DATABASE_URL` is missing
    pub fn from_env() -> Result<Self, AppError> {
        let store = match env::var("VOTE_STORE")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => StoreKind::Postgres,
            "memory" | "in-memory" => StoreKind::Memory,
            other => {
                return Err(AppError::config(format!("Unknown VOTE_STORE: {}", other)));
            }
        };

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err(AppError::config("DATABASE_URL must be set when VOTE_STORE=postgres"));
        }

        let seed_file = env::var("VOTE_SEED_FILE")
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        if seed_file.is_some() && store != StoreKind::Memory {
            warn!("VOTE_SEED_FILE is only used with VOTE_STORE=memory, ignoring it");
        }

        let write_mode = match env::var("VOTE_WRITE_MODE") {
            Ok(value) => WriteMode::parse(&value).unwrap_or_else(|| {
                warn!(value = %value, "Invalid VOTE_WRITE_MODE, defaulting to 'versioned'");
                WriteMode::Versioned
            }),
            Err(_) => WriteMode::Versioned,
        };

        let max_conflict_retries = match env::var("VOTE_MAX_CONFLICT_RETRIES") {
            Ok(value) => value.parse::<u32>().unwrap_or_else(|_| {
                warn!(value = %value, "Invalid VOTE_MAX_CONFLICT_RETRIES, using default");
                DEFAULT_MAX_CONFLICT_RETRIES
            }),
            Err(_) => DEFAULT_MAX_CONFLICT_RETRIES,
        };

        let run_migrations = env::var("RUN_MIGRATIONS")
            .map(|value| !matches!(value.to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Ok(Self {
            store,
            database_url,
            seed_file,
            run_migrations,
            vote_service: VoteServiceConfig {
                write_mode,
                max_conflict_retries,
            },
        })
    }
}
