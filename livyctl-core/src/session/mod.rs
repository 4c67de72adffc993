//! Livy session lifecycle
//!
//! This module provides [`LivySession`], which creates a session, waits for
//! it to become ready, runs statements in it and deletes it, together with
//! its timing parameters, statement results and persisted snapshot.

mod code;
mod controller;
mod snapshot;
mod statement;
mod timings;
mod wire;

pub use code::dedent;
pub use controller::LivySession;
pub use snapshot::{SNAPSHOT_VERSION, SessionSnapshot};
pub use statement::StatementOutput;
pub use timings::{
    DEFAULT_SQL_CONTEXT_TIMEOUT_SECS, DEFAULT_STATE_POLL_INTERVAL_SECS,
    DEFAULT_STATEMENT_POLL_INTERVAL_SECS, SessionTimings,
};
