//! `livyctl` Core Library
//!
//! This crate drives interactive sessions on an Apache Livy server: it
//! creates a session, waits for it to become ready, binds a SQL context,
//! runs code statements and deletes the session when done.
//!
//! # Crate Structure
//!
//! - [`models`] - Core value types (session id, state, language)
//! - [`session`] - The [`LivySession`] controller, timings and snapshots
//! - [`http`] - The [`HttpClient`] seam and its `reqwest` implementation
//! - [`polling`] - Poll budgets, sleepers and cancellation
//! - [`config`] - Settings file loading and validation
//! - [`tracing`] - Subscriber setup for binaries
//! - [`testing`] - In-memory doubles for the HTTP client and sleeper

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod polling;
pub mod session;
pub mod testing;
pub mod tracing;

pub use config::{ConfigManager, LivySettings};
pub use error::{ConfigError, ConfigResult, SessionError, SessionErrorKind, SessionResult};
pub use http::{
    HttpClient, HttpError, HttpResult, Method, ReqwestHttpClient, ReqwestHttpClientBuilder,
};
pub use models::{Language, SessionId, SessionState};
pub use polling::{CancellationToken, PollBudget, Sleeper, ThreadSleeper};
pub use session::{LivySession, SessionSnapshot, SessionTimings, StatementOutput, dedent};
pub use tracing::{TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing};
