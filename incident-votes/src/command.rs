//! Command-line arguments of the `incident-votes` binary.

use incident_votes_ledger::VoteLedger;
use incident_votes_shared::types::{IncidentId, VoteDirection, VoterId};

use crate::errors::{AppError, VoteServiceError};

pub const USAGE: &str = "usage: incident-votes <incident-id> <voter-id> <Up|Down>\n       incident-votes reconcile <incident-id>";

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Cast (or toggle) a vote on an incident.
    Cast {
        incident_id: IncidentId,
        voter_id: VoterId,
        direction: VoteDirection,
    },
    /// Recompute an incident's counters from its per-voter map.
    Reconcile { incident_id: IncidentId },
}

impl Command {
    /// Parses the arguments that follow the program name.
    pub fn parse(args: &[String]) -> Result<Self, AppError> {
        match args {
            [keyword, incident_id] if keyword == "reconcile" => Ok(Command::Reconcile {
                incident_id: non_empty("incident-id", incident_id)?,
            }),
            [incident_id, voter_id, direction] if incident_id != "reconcile" => {
                let incident_id = non_empty("incident-id", incident_id)?;
                VoteLedger::validate_voter(voter_id).map_err(VoteServiceError::from)?;
                let direction = VoteLedger::parse_direction(direction).map_err(VoteServiceError::from)?;
                Ok(Command::Cast {
                    incident_id,
                    voter_id: voter_id.clone(),
                    direction,
                })
            }
            _ => Err(AppError::usage(USAGE)),
        }
    }
}

fn non_empty(name: &str, value: &str) -> Result<String, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::usage(format!("{} must not be empty", name)));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_votes_ledger::LedgerError;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_parse_cast() {
        let command = Command::parse(&args(&["incident-1", "+15550100", "down"])).unwrap();
        assert_eq!(
            command,
            Command::Cast {
                incident_id: "incident-1".to_string(),
                voter_id: "+15550100".to_string(),
                direction: VoteDirection::Down,
            }
        );
    }

    #[test]
    fn test_parse_reconcile() {
        let command = Command::parse(&args(&["reconcile", "incident-1"])).unwrap();
        assert_eq!(
            command,
            Command::Reconcile {
                incident_id: "incident-1".to_string()
            }
        );
    }

    #[test]
    fn test_parse_invalid_direction() {
        let result = Command::parse(&args(&["incident-1", "u1", "Sideways"]));
        assert!(matches!(
            result,
            Err(AppError::Vote(VoteServiceError::Ledger(LedgerError::InvalidDirection(_))))
        ));
    }

    #[test]
    fn test_parse_empty_voter() {
        let result = Command::parse(&args(&["incident-1", "", "Up"]));
        assert!(matches!(
            result,
            Err(AppError::Vote(VoteServiceError::Ledger(LedgerError::InvalidVoter)))
        ));
    }

    #[test]
    fn test_parse_reconcile_with_extra_argument() {
        let result = Command::parse(&args(&["reconcile", "incident-1", "Up"]));
        assert!(matches!(result, Err(AppError::UsageError(_))));
    }

    #[test]
    fn test_parse_wrong_arity() {
        assert!(matches!(Command::parse(&args(&[])), Err(AppError::UsageError(_))));
        assert!(matches!(
            Command::parse(&args(&["incident-1", "u1"])),
            Err(AppError::UsageError(_))
        ));
    }
}
