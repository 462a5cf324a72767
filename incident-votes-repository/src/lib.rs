//! # Incident Votes Repository
//! This crate provides traits and implementations for reading and writing the
//! vote fields of incident documents. It includes definitions for errors,
//! interfaces, and concrete implementations for PostgreSQL and in-memory storage.
pub mod document;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::IncidentVoteRepositoryError;
pub use interfaces::IncidentVoteRepository;
pub use memory::InMemoryIncidentVoteRepository;
pub use postgres::PostgresIncidentVoteRepository;
