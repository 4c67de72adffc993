//! Results of executed statements.

use serde::{Deserialize, Serialize};

use super::wire::StatementResult;
use crate::error::{SessionError, SessionResult};

/// MIME key holding the plain-text result of a statement
const TEXT_PLAIN: &str = "text/plain";

/// Outcome of a statement that reached a terminal state
///
/// Remote evaluation failures are values, not errors: the statement ran and
/// the interpreter reported an exception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum StatementOutput {
    /// Statement succeeded with this plain-text output
    Ok(String),
    /// Statement raised in the remote interpreter
    Error {
        /// Exception name, when reported
        name: Option<String>,
        /// Exception message
        value: String,
        /// Remote traceback lines
        traceback: Vec<String>,
    },
}

impl StatementOutput {
    /// Returns the text a caller would print: output on success, the
    /// exception message on failure
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Ok(text) => text,
            Self::Error { value, .. } => value,
        }
    }

    /// Consumes the output and returns [`StatementOutput::text`]
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Ok(text) => text,
            Self::Error { value, .. } => value,
        }
    }

    /// Returns `true` if the remote interpreter reported an error
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub(crate) fn from_result(statement_id: u64, result: StatementResult) -> SessionResult<Self> {
        match result.status.as_str() {
            "ok" => {
                let text = result
                    .data
                    .get(TEXT_PLAIN)
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        SessionError::Decode(format!(
                            "statement {statement_id} has no {TEXT_PLAIN} output"
                        ))
                    })?;
                Ok(Self::Ok(text.to_string()))
            }
            "error" => {
                let value = result.evalue.ok_or_else(|| {
                    SessionError::Decode(format!("statement {statement_id} error has no evalue"))
                })?;
                Ok(Self::Error {
                    name: result.ename,
                    value,
                    traceback: result.traceback,
                })
            }
            other => {
                tracing::warn!(statement_id, status = other, "Unknown statement status, returning empty output");
                Ok(Self::Ok(String::new()))
            }
        }
    }
}
