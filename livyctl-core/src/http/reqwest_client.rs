//! Blocking `reqwest` transport for the Livy REST API.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

use super::{HttpClient, HttpError, HttpResult, Method, body_excerpt, parse_body};
use crate::config::LivySettings;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Header Livy requires on state-changing requests when CSRF protection is on
const REQUESTED_BY_HEADER: &str = "X-Requested-By";

/// [`HttpClient`] backed by `reqwest::blocking`
#[derive(Debug)]
pub struct ReqwestHttpClient {
    endpoint: String,
    username: Option<String>,
    password: Option<SecretString>,
    client: reqwest::blocking::Client,
}

/// Builder for [`ReqwestHttpClient`]
#[derive(Debug)]
pub struct ReqwestHttpClientBuilder {
    endpoint: String,
    username: Option<String>,
    password: Option<SecretString>,
    timeout: Duration,
}

impl ReqwestHttpClientBuilder {
    /// Enables HTTP basic authentication
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: Option<SecretString>) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    /// Sets the per-request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidConfig`] if the endpoint is not an
    /// `http(s)` URL or the underlying client cannot be created.
    pub fn build(self) -> HttpResult<ReqwestHttpClient> {
        let endpoint = self.endpoint.trim().trim_end_matches('/').to_string();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(HttpError::InvalidConfig(format!(
                "endpoint '{endpoint}' must start with http:// or https://"
            )));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| HttpError::InvalidConfig(e.to_string()))?;

        Ok(ReqwestHttpClient {
            endpoint,
            username: self.username,
            password: self.password,
            client,
        })
    }
}

impl ReqwestHttpClient {
    /// Starts building a client for the given Livy endpoint
    #[must_use]
    pub fn builder(endpoint: impl Into<String>) -> ReqwestHttpClientBuilder {
        ReqwestHttpClientBuilder {
            endpoint: endpoint.into(),
            username: None,
            password: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Builds a client from loaded settings
    ///
    /// # Errors
    ///
    /// Returns an error if the configured endpoint is missing or invalid.
    pub fn from_settings(settings: &LivySettings) -> HttpResult<Self> {
        let endpoint = settings
            .endpoint
            .as_deref()
            .ok_or_else(|| HttpError::InvalidConfig("no Livy endpoint configured".to_string()))?;

        let mut builder =
            Self::builder(endpoint).timeout(Duration::from_secs(settings.request_timeout_secs));
        if let Some(ref username) = settings.username {
            builder = builder.basic_auth(username.clone(), settings.password.clone());
        }
        builder.build()
    }

    /// Returns the endpoint requests are sent to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    const fn to_reqwest_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn send(
        &self,
        method: Method,
        path: &str,
        accepted: &[u16],
        body: Option<&Value>,
    ) -> HttpResult<Value> {
        let url = format!("{}{}", self.endpoint, path);
        tracing::trace!(%method, %url, "Sending Livy request");

        let mut request = self
            .client
            .request(Self::to_reqwest_method(method), &url)
            .header(REQUESTED_BY_HEADER, "livyctl");
        if let Some(ref username) = self.username {
            request = request.basic_auth(
                username,
                self.password.as_ref().map(|p| p.expose_secret().to_string()),
            );
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        if !accepted.contains(&status) {
            return Err(HttpError::UnexpectedStatus {
                method,
                path: path.to_string(),
                status,
                expected: accepted.to_vec(),
                body: body_excerpt(&text),
            });
        }

        parse_body(&text)
    }

    fn serialize(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("endpoint".to_string(), Value::String(self.endpoint.clone()));
        match self.username {
            Some(ref username) => {
                map.insert("auth".to_string(), Value::String("basic".to_string()));
                map.insert("username".to_string(), Value::String(username.clone()));
            }
            None => {
                map.insert("auth".to_string(), Value::String("none".to_string()));
            }
        }
        map
    }
}
