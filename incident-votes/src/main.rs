//! Incident Votes Main Entry Point
//!
//! Casts a single vote on an incident, or reconciles an incident's counters,
//! against the configured document store and prints the result as JSON.

use std::env;

use dotenv::dotenv;
use incident_votes::command::Command;
use incident_votes::config::LogFormat;
use incident_votes::{AppError, Dependencies, Settings};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("incident_votes=info,incident_votes_repository=info")
    });

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    info!(
        service_name = "incident-votes",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

async fn run(settings: &Settings, command: Command) -> Result<String, AppError> {
    let dependencies = Dependencies::new(settings).await?;

    let output = match command {
        Command::Cast {
            incident_id,
            voter_id,
            direction,
        } => {
            let outcome = dependencies
                .vote_service
                .cast_vote(&incident_id, &voter_id, direction)
                .await?;
            serde_json::to_string_pretty(&outcome)?
        }
        Command::Reconcile { incident_id } => {
            let outcome = dependencies.vote_service.reconcile_incident(&incident_id).await?;
            serde_json::to_string_pretty(&outcome)?
        }
    };

    Ok(output)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing(LogFormat::from_env());

    let settings = Settings::from_env().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;

    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    match run(&settings, command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            Err(e)
        }
    }
}
