//! Error types for the vote ledger.
//! Every variant is a caller contract violation reported before any change is made.
use thiserror::Error;

/// Represents errors that can occur when applying a vote.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid voter: voter id must not be empty")]
    InvalidVoter,

    #[error("Invalid vote direction: {0:?}")]
    InvalidDirection(String),
}
