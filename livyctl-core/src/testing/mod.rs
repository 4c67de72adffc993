//! Test doubles for the session collaborators.
//!
//! [`ScriptedHttpClient`] answers requests from per-route queues of canned
//! responses and records every request it receives; [`RecordingSleeper`]
//! records requested delays instead of blocking. Clones share their state,
//! so a test can keep one handle while the session owns another.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::{Map, Value};

use crate::http::{HttpClient, HttpError, HttpResult, Method};
use crate::polling::Sleeper;

/// A request seen by [`ScriptedHttpClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Verb
    pub method: Method,
    /// Path relative to the endpoint
    pub path: String,
    /// JSON body, for POST requests
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct ScriptedResponse {
    status: u16,
    body: Value,
}

#[derive(Debug, Default)]
struct Script {
    routes: HashMap<(Method, String), VecDeque<ScriptedResponse>>,
    requests: Vec<RecordedRequest>,
}

/// In-memory [`HttpClient`] with scripted responses
///
/// Responses queued for a route are returned in order; the last one keeps
/// being returned once the queue is down to it. A request to a route with no
/// script fails with a transport error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHttpClient {
    script: Arc<Mutex<Script>>,
    transport: Map<String, Value>,
}

impl ScriptedHttpClient {
    /// Creates a client with no scripted routes
    #[must_use]
    pub fn new() -> Self {
        let mut transport = Map::new();
        transport.insert(
            "endpoint".to_string(),
            Value::String("http://scripted".to_string()),
        );
        Self {
            script: Arc::default(),
            transport,
        }
    }

    /// Queues a response for `method path`
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.lock()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(ScriptedResponse { status, body });
        self
    }

    /// All requests received so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received for `method path`
    #[must_use]
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HttpClient for ScriptedHttpClient {
    fn send(
        &self,
        method: Method,
        path: &str,
        accepted: &[u16],
        body: Option<&Value>,
    ) -> HttpResult<Value> {
        let mut script = self.lock();
        script.requests.push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        let response = script
            .routes
            .get_mut(&(method, path.to_string()))
            .and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
            .ok_or_else(|| {
                HttpError::Transport(format!("no scripted response for {method} {path}"))
            })?;

        if !accepted.contains(&response.status) {
            return Err(HttpError::UnexpectedStatus {
                method,
                path: path.to_string(),
                status: response.status,
                expected: accepted.to_vec(),
                body: response.body.to_string(),
            });
        }
        Ok(response.body)
    }

    fn serialize(&self) -> Map<String, Value> {
        self.transport.clone()
    }
}

/// [`Sleeper`] that records delays and returns immediately
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Creates a sleeper with no recorded delays
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of delays requested so far
    #[must_use]
    pub fn count(&self) -> usize {
        self.sleeps().len()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}
