//! Persistable snapshot of a session.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{SessionError, SessionResult};
use crate::models::{Language, SessionId};

/// Schema version written into every snapshot
pub const SNAPSHOT_VERSION: &str = "0.0.0";

/// Serialized form of a session: identity plus the transport's own fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session id in string form
    pub id: SessionId,
    /// Session language
    pub language: Language,
    /// Whether the SQL context was created
    #[serde(rename = "sqlcontext")]
    pub sql_context: bool,
    /// Snapshot schema version
    pub version: String,
    /// Connection fields contributed by the HTTP client
    #[serde(flatten)]
    pub transport: Map<String, Value>,
}

impl SessionSnapshot {
    /// Builds a snapshot; the session fields win over transport fields of
    /// the same name
    #[must_use]
    pub fn new(
        id: SessionId,
        language: Language,
        sql_context: bool,
        mut transport: Map<String, Value>,
    ) -> Self {
        for key in ["id", "language", "sqlcontext", "version"] {
            transport.remove(key);
        }
        Self {
            id,
            language,
            sql_context,
            version: SNAPSHOT_VERSION.to_string(),
            transport,
        }
    }

    /// Flattens the snapshot into a single JSON object
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.transport.clone();
        map.insert("id".to_string(), Value::String(self.id.to_string()));
        map.insert(
            "language".to_string(),
            Value::String(self.language.as_str().to_string()),
        );
        map.insert("sqlcontext".to_string(), Value::Bool(self.sql_context));
        map.insert("version".to_string(), Value::String(self.version.clone()));
        map
    }

    /// Parses a snapshot from JSON text and checks its version
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the text is not a snapshot or was
    /// written with an unknown schema version.
    pub fn from_json(text: &str) -> SessionResult<Self> {
        let snapshot: Self = serde_json::from_str(text)
            .map_err(|e| SessionError::Config(format!("invalid session snapshot: {e}")))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Checks that the snapshot was written with [`SNAPSHOT_VERSION`]
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] on a version mismatch.
    pub fn check_version(&self) -> SessionResult<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SessionError::Config(format!(
                "unsupported snapshot version '{}', expected '{SNAPSHOT_VERSION}'",
                self.version
            )));
        }
        Ok(())
    }
}
