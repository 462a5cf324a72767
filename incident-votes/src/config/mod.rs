//! Configuration module for the incident votes application.
//! Reads settings from the environment and wires up dependencies.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{LogFormat, Settings, StoreKind};
