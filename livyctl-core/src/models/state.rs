//! Session states reported by the Livy server.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// State of a Livy session
///
/// The client never chooses a state; it only records what the server last
/// reported (plus `NotStarted` before creation and `Dead` after deletion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Session has not been created on the server
    NotStarted,
    /// Ready to accept statements
    Idle,
    /// Interpreter is being launched
    Starting,
    /// Running a statement
    Busy,
    /// Session failed
    Error,
    /// Session is gone
    Dead,
}

impl SessionState {
    /// All states understood by the client
    pub const ALL: [Self; 6] = [
        Self::NotStarted,
        Self::Idle,
        Self::Starting,
        Self::Busy,
        Self::Error,
        Self::Dead,
    ];

    /// Returns the wire name of the state
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Busy => "busy",
            Self::Error => "error",
            Self::Dead => "dead",
        }
    }
}

impl FromStr for SessionState {
    type Err = SessionError;

    /// Parses a wire name exactly; anything else is a consistency error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| SessionError::UnknownState(s.to_string()))
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
