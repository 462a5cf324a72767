//! # Incident Votes Ledger
//! This crate computes the next vote state of an incident from its current
//! state, a voter and a requested vote direction.
//! It holds no state and performs no I/O; persisting the result is up to the caller.
pub mod errors;
pub mod ledger;

pub use errors::LedgerError;
pub use ledger::VoteLedger;
