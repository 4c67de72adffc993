//! CLI error types and exit codes.

use livyctl_core::{ConfigError, HttpError, SessionError, SessionErrorKind};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, validation, or IO errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Session failure - the server rejected a request, a wait timed out, or
    /// the session was in the wrong state
    pub const SESSION_FAILURE: i32 = 2;
    /// The code ran but the remote interpreter reported an error
    pub const REMOTE_ERROR: i32 = 3;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session snapshot could not be read or written
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Session operation failed
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Remote evaluation error, already printed to stdout
    #[error("Remote evaluation failed: {0}")]
    Remote(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<HttpError> for CliError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::InvalidConfig(reason) => Self::Config(reason),
            other => Self::Session(other.into()),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, snapshot, IO)
    /// - 2: Session failure
    /// - 3: Remote evaluation error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Session(e) => match e.kind() {
                SessionErrorKind::Configuration => exit_codes::GENERAL_ERROR,
                _ => exit_codes::SESSION_FAILURE,
            },
            Self::Remote(_) => exit_codes::REMOTE_ERROR,
            Self::Config(_) | Self::Snapshot(_) | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
