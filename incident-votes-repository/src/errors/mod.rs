//! Error types for the incident votes repository.
//! Consolidates and re-exports error types related to repository operations.
mod incident_votes;

pub use incident_votes::IncidentVoteRepositoryError;
