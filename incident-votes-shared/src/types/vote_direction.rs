use serde::{Deserialize, Serialize};

/// Represents the direction of a vote cast on an incident.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VoteDirection {
    /// Indicates the incident is confirmed or endorsed.
    Up,
    /// Indicates the incident is disputed.
    Down,
}

impl VoteDirection {
    /// Returns the string used for this direction in stored documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "Up",
            VoteDirection::Down => "Down",
        }
    }
}

impl std::fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
