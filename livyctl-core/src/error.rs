//! Error types for `livyctl`
//!
//! Each area of the crate has its own error enum. Session operations fold
//! transport failures into [`SessionError`].

use std::path::PathBuf;

use thiserror::Error;

use crate::http::HttpError;
use crate::models::SessionState;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A configuration value is out of range or otherwise invalid
    #[error("Invalid value for '{field}': {reason}")]
    Validation {
        /// Name of the offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The configuration directory could not be determined
    #[error("Configuration directory not found: {0}")]
    NotFound(PathBuf),

    /// Reading the configuration file failed
    #[error("Failed to read configuration: {0}")]
    Read(String),

}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Broad classification of a [`SessionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// Invalid constructor arguments or settings
    Configuration,
    /// A bounded wait ran out of budget
    Timeout,
    /// The server returned data that contradicts the client's view
    StateConsistency,
    /// The operation is not allowed in the session's current state
    InvalidOperation,
    /// The HTTP transport failed or returned an unexpected status
    Transport,
    /// Polling was stopped by a cancellation token
    Cancelled,
}

/// Errors raised by the session controller
#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid session parameters
    #[error("Invalid session configuration: {0}")]
    Config(String),

    /// Language outside the supported set
    #[error("Session of language '{language}' not supported. Session must be of languages {supported}")]
    UnsupportedLanguage {
        /// The rejected language, lowercased
        language: String,
        /// Comma separated list of supported languages
        supported: String,
    },

    /// `wait_for_state` budget exhausted
    #[error("Session {session_id} did not reach {target} state in time. Current state is {current}")]
    Timeout {
        /// Session id in string form
        session_id: String,
        /// State that was waited for
        target: SessionState,
        /// Last state observed before giving up
        current: SessionState,
    },

    /// Zero or several sessions matched this session's id
    #[error("Expected one session of id {session_id} but got {count} sessions")]
    SessionCount {
        /// Session id in string form
        session_id: String,
        /// Number of matching entries in the session list
        count: usize,
    },

    /// The server reported a state outside the known set
    #[error("State '{0}' not supported by session")]
    UnknownState(String),

    /// A submitted statement is missing from the statement list
    #[error("Statement {statement_id} not found in session {session_id}")]
    StatementNotFound {
        /// Session id in string form
        session_id: String,
        /// Statement id returned on submission
        statement_id: u64,
    },

    /// The response body did not have the expected shape
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// The operation is not valid in the current session state
    #[error("Cannot {operation} session {session_id} that is in state '{state}'")]
    InvalidOperation {
        /// Name of the rejected operation
        operation: &'static str,
        /// Session id in string form
        session_id: String,
        /// Cached state at the time of the call
        state: SessionState,
    },

    /// Statement polling was cancelled
    #[error("Polling of statement {statement_id} in session {session_id} was cancelled")]
    Cancelled {
        /// Session id in string form
        session_id: String,
        /// Statement being polled
        statement_id: u64,
    },

    /// HTTP transport error
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl SessionError {
    /// Classifies the error
    #[must_use]
    pub const fn kind(&self) -> SessionErrorKind {
        match self {
            Self::Config(_) | Self::UnsupportedLanguage { .. } => SessionErrorKind::Configuration,
            Self::Timeout { .. } => SessionErrorKind::Timeout,
            Self::SessionCount { .. }
            | Self::UnknownState(_)
            | Self::StatementNotFound { .. }
            | Self::Decode(_) => SessionErrorKind::StateConsistency,
            Self::InvalidOperation { .. } => SessionErrorKind::InvalidOperation,
            Self::Cancelled { .. } => SessionErrorKind::Cancelled,
            Self::Http(_) => SessionErrorKind::Transport,
        }
    }
}

/// Result type alias for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;
