//! # Incident Votes
//!
//! Up/down voting on disaster-relief incident reports.
//!
//! ## Architecture
//!
//! 1. **Ledger** (`incident-votes-ledger`): pure vote state transitions
//! 2. **Repository** (`incident-votes-repository`): incident documents in PostgreSQL or memory
//! 3. **Voting**: reads the current state, applies the ledger and persists the result
//!
//! ## Modules
//!
//! - [`command`]: Command-line arguments of the operator binary
//! - [`config`]: Settings and dependency initialization
//! - [`errors`]: Error types for the application
//! - [`voting`]: The vote service

pub mod command;
pub mod config;
pub mod errors;
pub mod voting;

pub use config::{Dependencies, Settings};
pub use errors::{AppError, VoteServiceError};
pub use voting::VoteService;
