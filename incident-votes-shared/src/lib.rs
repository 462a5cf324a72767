//! # Incident Votes Shared
//! This crate defines shared data structures and types used across the incident votes crates.
//! It includes the vote direction, the per-incident vote state, and its stored document form.
pub mod types;
