//! HTTP transport used by the session controller
//!
//! The controller only talks to the server through the [`HttpClient`] trait:
//! a verb, a path relative to the Livy endpoint, the status codes the caller
//! accepts and an optional JSON body. [`ReqwestHttpClient`] is the production
//! implementation; tests use [`crate::testing::ScriptedHttpClient`].

mod reqwest_client;

pub use reqwest_client::{
    DEFAULT_REQUEST_TIMEOUT_SECS, ReqwestHttpClient, ReqwestHttpClientBuilder,
};

use serde_json::{Map, Value};
use thiserror::Error;

/// HTTP verbs used against the Livy API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl Method {
    /// Returns the verb as sent on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by an [`HttpClient`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// The server answered with a status outside the accepted set
    #[error("{method} {path} returned status {status}, expected one of {expected:?}: {body}")]
    UnexpectedStatus {
        /// Request verb
        method: Method,
        /// Request path
        path: String,
        /// Received status code
        status: u16,
        /// Accepted status codes
        expected: Vec<u16>,
        /// Start of the response body, for diagnostics
        body: String,
    },

    /// The request could not be sent or the response not received
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// The response body is not valid JSON
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// The client was configured with an unusable endpoint or credentials
    #[error("Invalid HTTP client configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for HTTP operations
pub type HttpResult<T> = std::result::Result<T, HttpError>;

/// Transport collaborator of the session controller
pub trait HttpClient: Send {
    /// Sends a request and returns the parsed JSON body
    ///
    /// Empty bodies are returned as [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::UnexpectedStatus`] when the status is not in
    /// `accepted`, or a transport/decode error.
    fn send(
        &self,
        method: Method,
        path: &str,
        accepted: &[u16],
        body: Option<&Value>,
    ) -> HttpResult<Value>;

    /// Connection fields (endpoint, auth) to persist alongside a session
    fn serialize(&self) -> Map<String, Value>;

    /// Sends a GET request
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    fn get(&self, path: &str, accepted: &[u16]) -> HttpResult<Value> {
        self.send(Method::Get, path, accepted, None)
    }

    /// Sends a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    fn post(&self, path: &str, accepted: &[u16], body: &Value) -> HttpResult<Value> {
        self.send(Method::Post, path, accepted, Some(body))
    }

    /// Sends a DELETE request
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    fn delete(&self, path: &str, accepted: &[u16]) -> HttpResult<Value> {
        self.send(Method::Delete, path, accepted, None)
    }
}

/// Parses a response body, treating blank bodies as `null`
pub(crate) fn parse_body(text: &str) -> HttpResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| HttpError::Decode(e.to_string()))
}

/// Truncates a body for inclusion in an error message
pub(crate) fn body_excerpt(text: &str) -> String {
    const MAX_CHARS: usize = 200;
    let mut excerpt: String = text.chars().take(MAX_CHARS).collect();
    if text.chars().count() > MAX_CHARS {
        excerpt.push_str("...");
    }
    excerpt
}
