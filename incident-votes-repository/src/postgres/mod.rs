//! PostgreSQL implementation of the incident votes repository.
//!
//! Incidents are stored as JSONB documents, one row per incident, next to a
//! version counter used for conditional updates.
//!
//! ## Database Tables
//!
//! - `incidents`: incident documents keyed by id, with `version` and `updated_at`
mod incident_vote_repository;

pub use incident_vote_repository::PostgresIncidentVoteRepository;
