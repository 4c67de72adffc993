//! Settings loaded from `config.toml`.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::error::{ConfigError, ConfigResult};
use crate::http::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::models::Language;
use crate::session::{
    DEFAULT_SQL_CONTEXT_TIMEOUT_SECS, DEFAULT_STATE_POLL_INTERVAL_SECS,
    DEFAULT_STATEMENT_POLL_INTERVAL_SECS, SessionTimings,
};

/// Connection and timing settings for Livy sessions
#[derive(Debug, Clone, Deserialize)]
pub struct LivySettings {
    /// Livy endpoint, e.g. `http://localhost:8998`
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Username for HTTP basic authentication
    #[serde(default)]
    pub username: Option<String>,
    /// Password for HTTP basic authentication, redacted in debug output
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub password: Option<SecretString>,
    /// Default session language
    #[serde(default = "default_language")]
    pub language: String,
    /// Seconds between session state polls
    #[serde(default = "default_state_poll_interval")]
    pub state_poll_interval_secs: f64,
    /// Seconds between statement polls
    #[serde(default = "default_statement_poll_interval")]
    pub statement_poll_interval_secs: f64,
    /// Seconds to wait for an idle session before creating the SQL context
    #[serde(default = "default_sql_context_timeout")]
    pub sql_context_timeout_secs: f64,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_language() -> String {
    Language::Python.as_str().to_string()
}

const fn default_state_poll_interval() -> f64 {
    DEFAULT_STATE_POLL_INTERVAL_SECS
}

const fn default_statement_poll_interval() -> f64 {
    DEFAULT_STATEMENT_POLL_INTERVAL_SECS
}

const fn default_sql_context_timeout() -> f64 {
    DEFAULT_SQL_CONTEXT_TIMEOUT_SECS
}

const fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl Default for LivySettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            username: None,
            password: None,
            language: default_language(),
            state_poll_interval_secs: default_state_poll_interval(),
            statement_poll_interval_secs: default_statement_poll_interval(),
            sql_context_timeout_secs: default_sql_context_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl LivySettings {
    /// Parses settings from TOML text and validates them
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Validation`] for out-of-range values.
    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks every value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first invalid field.
    pub fn validate(&self) -> ConfigResult<()> {
        self.language.parse::<Language>().map_err(|e| ConfigError::Validation {
            field: "language".to_string(),
            reason: e.to_string(),
        })?;
        self.timings()?;
        if let Some(ref endpoint) = self.endpoint
            && endpoint.trim().is_empty()
        {
            return Err(ConfigError::Validation {
                field: "endpoint".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "request_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Builds session timings from the configured seconds
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for negative, non-finite or zero
    /// state poll values.
    pub fn timings(&self) -> ConfigResult<SessionTimings> {
        SessionTimings::from_secs(
            self.state_poll_interval_secs,
            self.statement_poll_interval_secs,
            self.sql_context_timeout_secs,
        )
        .map_err(|e| ConfigError::Validation {
            field: "timings".to_string(),
            reason: e.to_string(),
        })
    }
}
