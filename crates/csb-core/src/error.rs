use std::fmt;
use std::path::PathBuf;

use crate::model::AgentId;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ScenarioUnreadable,
    ScenarioParseError,
    UnsupportedFormat,
    DuplicateAgentId,
    ReservedAgentId,
    ExpectationMismatch,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ScenarioUnreadable => "E1001",
            Self::ScenarioParseError => "E1002",
            Self::UnsupportedFormat => "E1003",
            Self::DuplicateAgentId => "E2001",
            Self::ReservedAgentId => "E2002",
            Self::ExpectationMismatch => "E3001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ScenarioUnreadable => "Scenario file could not be read",
            Self::ScenarioParseError => "Scenario file parse error",
            Self::UnsupportedFormat => "Unsupported scenario format",
            Self::DuplicateAgentId => "Duplicate agent id",
            Self::ReservedAgentId => "Reserved agent id",
            Self::ExpectationMismatch => "Result differs from expected winner",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ScenarioUnreadable => Some("Check the path and read permissions."),
            Self::ScenarioParseError => {
                Some("Every agent and customer needs both an `id` and a `score`.")
            }
            Self::UnsupportedFormat => Some("Use a .toml or .json scenario file."),
            Self::DuplicateAgentId => Some("Give every agent in the roster a distinct id."),
            Self::ReservedAgentId => Some("Agent id 0 means \"no winner\"; number agents from 1."),
            Self::ExpectationMismatch => Some("Rerun with --explain to see per-agent counts."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while loading or validating a roster.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {format} scenario: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("unsupported scenario format: {0}")]
    UnsupportedFormat(String),

    #[error("agent id {0} appears more than once")]
    DuplicateAgentId(AgentId),

    #[error("agent id 0 is reserved for the no-winner sentinel")]
    ReservedAgentId,
}

impl RosterError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::ScenarioUnreadable,
            Self::Parse { .. } => ErrorCode::ScenarioParseError,
            Self::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            Self::DuplicateAgentId(_) => ErrorCode::DuplicateAgentId,
            Self::ReservedAgentId => ErrorCode::ReservedAgentId,
        }
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse {
            format: "json",
            message: e.to_string(),
        }
    }
}

impl From<toml::de::Error> for RosterError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse {
            format: "toml",
            message: e.to_string(),
        }
    }
}
