use incident_votes_repository::IncidentVoteRepositoryError;
use thiserror::Error;

use crate::errors::VoteServiceError;

/// Errors that can occur during start-up or while running a command.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid command-line arguments.
    #[error("Usage error: {0}")]
    UsageError(String),

    #[error("Repository error: {0}")]
    Repository(#[from] IncidentVoteRepositoryError),

    #[error("Vote error: {0}")]
    Vote(#[from] VoteServiceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::UsageError(msg.into())
    }
}
