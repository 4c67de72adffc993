//! Polling cadence and timeouts of a session.

use std::time::Duration;

use crate::error::{SessionError, SessionResult};

/// Default interval between session state polls in seconds
pub const DEFAULT_STATE_POLL_INTERVAL_SECS: f64 = 2.0;

/// Default interval between statement polls in seconds
pub const DEFAULT_STATEMENT_POLL_INTERVAL_SECS: f64 = 2.0;

/// Default time to wait for an idle session before creating the SQL context
pub const DEFAULT_SQL_CONTEXT_TIMEOUT_SECS: f64 = 60.0;

/// Timing parameters of a session
///
/// `state_poll_interval` must be non-zero; the other two may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimings {
    /// Delay between session state polls in `wait_for_state`
    pub state_poll_interval: Duration,
    /// Delay between statement polls while a statement is running
    pub statement_poll_interval: Duration,
    /// Budget for reaching `idle` before the SQL context is created
    pub sql_context_timeout: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            state_poll_interval: Duration::from_secs_f64(DEFAULT_STATE_POLL_INTERVAL_SECS),
            statement_poll_interval: Duration::from_secs_f64(DEFAULT_STATEMENT_POLL_INTERVAL_SECS),
            sql_context_timeout: Duration::from_secs_f64(DEFAULT_SQL_CONTEXT_TIMEOUT_SECS),
        }
    }
}

impl SessionTimings {
    /// Builds timings from seconds
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] for negative, NaN or infinite values,
    /// or a zero state poll interval.
    pub fn from_secs(
        state_poll_interval: f64,
        statement_poll_interval: f64,
        sql_context_timeout: f64,
    ) -> SessionResult<Self> {
        let timings = Self {
            state_poll_interval: secs("state_poll_interval", state_poll_interval)?,
            statement_poll_interval: secs("statement_poll_interval", statement_poll_interval)?,
            sql_context_timeout: secs("sql_context_timeout", sql_context_timeout)?,
        };
        timings.validate()?;
        Ok(timings)
    }

    /// Sets the state poll interval
    #[must_use]
    pub const fn with_state_poll_interval(mut self, interval: Duration) -> Self {
        self.state_poll_interval = interval;
        self
    }

    /// Sets the statement poll interval
    #[must_use]
    pub const fn with_statement_poll_interval(mut self, interval: Duration) -> Self {
        self.statement_poll_interval = interval;
        self
    }

    /// Sets the SQL context creation timeout
    #[must_use]
    pub const fn with_sql_context_timeout(mut self, timeout: Duration) -> Self {
        self.sql_context_timeout = timeout;
        self
    }

    /// Checks the invariants that a `Duration` cannot express
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the state poll interval is zero.
    pub fn validate(&self) -> SessionResult<()> {
        if self.state_poll_interval.is_zero() {
            return Err(SessionError::Config(
                "state_poll_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn secs(field: &str, value: f64) -> SessionResult<Duration> {
    Duration::try_from_secs_f64(value)
        .map_err(|_| SessionError::Config(format!("{field} must be a non-negative number of seconds, got {value}")))
}
