//! Session identifiers.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SessionError;

/// String form of [`SessionId::NotStarted`]
pub const NOT_STARTED_ID: &str = "-1";

/// Identifier of a Livy session
///
/// Serialized as a string: the server-assigned integer, or `"-1"` for a
/// session that was never created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionId {
    /// No session exists on the server yet
    #[default]
    NotStarted,
    /// Id assigned by the server
    Assigned(u64),
}

impl SessionId {
    /// Returns the assigned id, if any
    #[must_use]
    pub const fn assigned(&self) -> Option<u64> {
        match self {
            Self::NotStarted => None,
            Self::Assigned(id) => Some(*id),
        }
    }

    /// Returns `true` for the not-started sentinel
    #[must_use]
    pub const fn is_not_started(&self) -> bool {
        matches!(self, Self::NotStarted)
    }
}

impl FromStr for SessionId {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == NOT_STARTED_ID {
            return Ok(Self::NotStarted);
        }
        trimmed
            .parse::<u64>()
            .map(Self::Assigned)
            .map_err(|_| SessionError::Config(format!("invalid session id '{s}'")))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => f.write_str(NOT_STARTED_ID),
            Self::Assigned(id) => write!(f, "{id}"),
        }
    }
}

impl From<u64> for SessionId {
    fn from(id: u64) -> Self {
        Self::Assigned(id)
    }
}

impl Serialize for SessionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
