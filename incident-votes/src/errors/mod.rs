//! Error types for the incident votes application.
mod app;
mod voting;

pub use app::AppError;
pub use voting::VoteServiceError;
