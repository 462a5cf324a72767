//! Configuration types for the `VoteService`.

/// How vote updates are written back to the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite the vote fields unconditionally. Concurrent votes on the same
    /// incident can be lost: both writers read the same state and the later
    /// write wins.
    LastWriteWins,
    /// Write only if the document version is unchanged since it was read, and
    /// re-read and re-apply the vote on conflict.
    Versioned,
}

impl WriteMode {
    /// Parse a write mode name.
    ///
    /// Valid values: "versioned" or "last-write-wins" (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "versioned" => Some(Self::Versioned),
            "last-write-wins" | "last_write_wins" | "lww" => Some(Self::LastWriteWins),
            _ => None,
        }
    }
}

/// Configuration for the `VoteService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteServiceConfig {
    pub write_mode: WriteMode,
    /// Number of times a vote is re-applied after a version conflict.
    /// Only used with `WriteMode::Versioned`.
    pub max_conflict_retries: u32,
}

impl Default for VoteServiceConfig {
    fn default() -> Self {
        Self {
            write_mode: WriteMode::Versioned,
            max_conflict_retries: 3,
        }
    }
}

impl VoteServiceConfig {
    /// Create a config that reproduces unconditional last-write-wins updates.
    pub fn last_write_wins() -> Self {
        Self {
            write_mode: WriteMode::LastWriteWins,
            max_conflict_retries: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write_mode() {
        assert_eq!(WriteMode::parse("versioned"), Some(WriteMode::Versioned));
        assert_eq!(WriteMode::parse("Last-Write-Wins"), Some(WriteMode::LastWriteWins));
        assert_eq!(WriteMode::parse("lww"), Some(WriteMode::LastWriteWins));
        assert_eq!(WriteMode::parse("eventually"), None);
    }

    #[test]
    fn test_default_config_is_versioned() {
        let config = VoteServiceConfig::default();
        assert_eq!(config.write_mode, WriteMode::Versioned);
        assert_eq!(config.max_conflict_retries, 3);
    }
}
