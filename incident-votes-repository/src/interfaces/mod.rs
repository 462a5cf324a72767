//! This module defines and re-exports the interfaces for the incident votes repository.
mod incident_votes;

pub use incident_votes::IncidentVoteRepository;
