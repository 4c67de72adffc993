//! JSON shapes of the Livy session and statement endpoints.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{SessionError, SessionResult};

/// Statement state that keeps the poll loop going
pub(crate) const STATEMENT_RUNNING: &str = "running";

/// Response of `POST /sessions` and entry of `GET /sessions`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionInfo {
    pub id: u64,
    pub state: String,
}

/// Response of `GET /sessions`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionList {
    pub sessions: Vec<SessionInfo>,
}

/// Response of `POST /sessions/{id}/statements`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatementCreated {
    pub id: u64,
}

/// Response of `GET /sessions/{id}/statements`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatementList {
    pub statements: Vec<StatementInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatementInfo {
    pub id: u64,
    pub state: String,
    #[serde(default)]
    pub output: Option<StatementResult>,
}

/// `output` object of a finished statement
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatementResult {
    pub status: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub ename: Option<String>,
    #[serde(default)]
    pub evalue: Option<String>,
    #[serde(default)]
    pub traceback: Vec<String>,
}

/// Decodes a response body into one of the shapes above
pub(crate) fn decode<T: DeserializeOwned>(what: &str, body: Value) -> SessionResult<T> {
    serde_json::from_value(body).map_err(|e| SessionError::Decode(format!("{what}: {e}")))
}
