//! Session controller for a single Livy session
//!
//! [`LivySession`] owns the identity and last observed state of one remote
//! session. Every state read is a round trip to the server; the cached value
//! is only what the server said last.

use std::time::Duration;

use serde_json::{Map, Value, json};
use tracing::Span;

use super::code::dedent;
use super::snapshot::SessionSnapshot;
use super::statement::StatementOutput;
use super::timings::SessionTimings;
use super::wire::{
    STATEMENT_RUNNING, SessionInfo, SessionList, StatementCreated, StatementList, decode,
};
use crate::error::{SessionError, SessionResult};
use crate::http::HttpClient;
use crate::models::{Language, SessionId, SessionState};
use crate::polling::{CancellationToken, PollBudget, Sleeper, ThreadSleeper};

const SESSIONS_PATH: &str = "/sessions";

/// A Livy session and the protocol to drive it
///
/// Not thread-safe: one controller is meant to be driven by one thread.
pub struct LivySession {
    id: SessionId,
    language: Language,
    state: SessionState,
    sql_context_started: bool,
    timings: SessionTimings,
    http: Box<dyn HttpClient>,
    sleeper: Box<dyn Sleeper>,
    span: Span,
}

impl std::fmt::Debug for LivySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LivySession")
            .field("id", &self.id)
            .field("language", &self.language)
            .field("state", &self.state)
            .field("sql_context_started", &self.sql_context_started)
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}

impl LivySession {
    /// Creates a controller without contacting the server
    ///
    /// A `NotStarted` id gives a fresh session in state `not_started`; an
    /// assigned id adopts an existing session, assumed `busy` until polled.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the language is not supported, the
    /// timings are invalid, or `sql_created` is set without a session id.
    pub fn new(
        http: Box<dyn HttpClient>,
        language: &str,
        session_id: SessionId,
        sql_created: bool,
        timings: SessionTimings,
    ) -> SessionResult<Self> {
        timings.validate()?;
        if session_id.is_not_started() && sql_created {
            return Err(SessionError::Config(
                "Cannot indicate sql state without session id.".to_string(),
            ));
        }
        let language: Language = language.parse()?;

        let (state, sql_context_started) = if session_id.is_not_started() {
            (SessionState::NotStarted, false)
        } else {
            (SessionState::Busy, sql_created)
        };

        let span = tracing::info_span!(
            "livy_session",
            session_id = %session_id,
            language = %language
        );

        Ok(Self {
            id: session_id,
            language,
            state,
            sql_context_started,
            timings,
            http,
            sleeper: Box::new(ThreadSleeper),
            span,
        })
    }

    /// Creates a controller for a session that has yet to be started
    ///
    /// # Errors
    ///
    /// See [`LivySession::new`].
    pub fn fresh(
        http: Box<dyn HttpClient>,
        language: &str,
        timings: SessionTimings,
    ) -> SessionResult<Self> {
        Self::new(http, language, SessionId::NotStarted, false, timings)
    }

    /// Creates a controller for a session that already exists on the server
    ///
    /// # Errors
    ///
    /// See [`LivySession::new`].
    pub fn adopt(
        http: Box<dyn HttpClient>,
        language: &str,
        session_id: u64,
        sql_created: bool,
        timings: SessionTimings,
    ) -> SessionResult<Self> {
        Self::new(
            http,
            language,
            SessionId::Assigned(session_id),
            sql_created,
            timings,
        )
    }

    /// Recreates a controller from a snapshot written by [`LivySession::serialize`]
    ///
    /// # Errors
    ///
    /// Returns a configuration error on a snapshot version mismatch, or any
    /// error of [`LivySession::new`].
    pub fn from_snapshot(
        http: Box<dyn HttpClient>,
        snapshot: &SessionSnapshot,
        timings: SessionTimings,
    ) -> SessionResult<Self> {
        snapshot.check_version()?;
        Self::new(
            http,
            snapshot.language.as_str(),
            snapshot.id,
            snapshot.sql_context,
            timings,
        )
    }

    /// Replaces the sleeper used between polls
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Replaces the span all events of this session are recorded in
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Session id
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Session language
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Whether `sqlContext` has been bound in the remote session
    pub const fn sql_context_started(&self) -> bool {
        self.sql_context_started
    }

    /// Last state observed, without contacting the server
    pub const fn cached_state(&self) -> SessionState {
        self.state
    }

    /// Timing parameters
    pub const fn timings(&self) -> &SessionTimings {
        &self.timings
    }

    /// Transport used by this session
    pub fn http_client(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    /// Creates the session on the server
    ///
    /// # Errors
    ///
    /// Fails if the session already has an id, the server does not answer
    /// 201, or the response cannot be understood. If the server created the
    /// session but reported an unknown state, the id is kept and the session
    /// is treated as `busy` so that [`LivySession::delete`] can remove it.
    pub fn start(&mut self) -> SessionResult<()> {
        let _entered = self.span.clone().entered();
        if !self.id.is_not_started() {
            return Err(self.invalid_operation("start"));
        }
        tracing::debug!("Starting '{}' session", self.language);

        let body = self.http.post(
            SESSIONS_PATH,
            &[201],
            &json!({ "kind": self.language.livy_kind() }),
        )?;
        let info: SessionInfo = decode("session creation", body)?;

        self.id = SessionId::Assigned(info.id);
        self.span
            .record("session_id", tracing::field::display(&self.id));
        self.state = match info.state.parse() {
            Ok(state) => state,
            Err(e) => {
                // The session exists remotely; keep it deletable.
                self.state = SessionState::Busy;
                return Err(e);
            }
        };

        tracing::debug!(state = %self.state, "Session '{}' started", self.language);
        Ok(())
    }

    /// Binds `sqlContext` in the remote session, once
    ///
    /// Waits for the session to become idle first, bounded by the configured
    /// SQL context timeout.
    ///
    /// # Errors
    ///
    /// Fails if the session was never started or has been deleted, does not
    /// become idle in time, or the bootstrap statement cannot be executed.
    pub fn create_sql_context(&mut self) -> SessionResult<()> {
        let _entered = self.span.clone().entered();
        self.ensure_usable("create sql context in")?;
        if self.sql_context_started {
            return Ok(());
        }
        tracing::debug!("Starting '{}' sql session", self.language);

        self.wait_for_state(SessionState::Idle, self.timings.sql_context_timeout)?;
        let output = self.execute_statement(self.language.sql_context_command(), None)?;
        if output.is_error() {
            tracing::warn!(error = output.text(), "SQL context bootstrap reported an error");
        }
        self.sql_context_started = true;

        tracing::debug!("Started '{}' sql session", self.language);
        Ok(())
    }

    /// Runs `code` and returns its output
    ///
    /// Remote evaluation errors are returned as output text, not as errors;
    /// use [`LivySession::execute_statement`] to tell them apart. Polls
    /// until the statement leaves the `running` state, without a time limit.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, on an unusable response, or if the
    /// session was never started or has been deleted.
    pub fn execute(&self, code: &str) -> SessionResult<String> {
        self.execute_statement(code, None)
            .map(StatementOutput::into_text)
    }

    /// Runs `code` and returns the tagged statement outcome
    ///
    /// Statement polling stops with [`SessionError::Cancelled`] once
    /// `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`LivySession::execute`].
    pub fn execute_statement(
        &self,
        code: &str,
        cancel: Option<&CancellationToken>,
    ) -> SessionResult<StatementOutput> {
        let _entered = self.span.clone().entered();
        self.ensure_usable("execute code in")?;

        let code = dedent(code);
        tracing::debug!("Executing code:\n{code}");

        let body = self
            .http
            .post(&self.statements_path(), &[201], &json!({ "code": code }))?;
        let created: StatementCreated = decode("statement creation", body)?;

        self.statement_output(created.id, cancel)
    }

    /// Deletes the session on the server
    ///
    /// A 404 answer counts as already deleted.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-operation error if the session was never
    /// started or is already dead, or on transport errors.
    pub fn delete(&mut self) -> SessionResult<()> {
        let _entered = self.span.clone().entered();
        tracing::debug!("Deleting session '{}'", self.id);

        match self.state {
            SessionState::NotStarted | SessionState::Dead => Err(self.invalid_operation("delete")),
            _ => {
                self.http.delete(&self.session_path(), &[200, 404])?;
                self.state = SessionState::Dead;
                Ok(())
            }
        }
    }

    /// Blocks until the server reports `target`
    ///
    /// Each retry sleeps the state poll interval and takes that same
    /// interval off `budget`, whatever time the poll itself took.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Timeout`] once the budget is spent, or any
    /// error of [`LivySession::state`].
    pub fn wait_for_state(&mut self, target: SessionState, budget: Duration) -> SessionResult<()> {
        let _entered = self.span.clone().entered();
        self.ensure_usable("wait for state of")?;

        let mut budget = PollBudget::new(budget, self.timings.state_poll_interval);
        loop {
            let current = self.state()?;
            if current == target {
                return Ok(());
            }
            if budget.is_exhausted() {
                return Err(SessionError::Timeout {
                    session_id: self.id.to_string(),
                    target,
                    current,
                });
            }
            tracing::debug!(
                state = %current,
                remaining = ?budget.remaining(),
                "Session {} in state {}. Sleeping {:?}",
                self.id,
                current,
                self.timings.state_poll_interval
            );
            let delay = budget.consume();
            self.sleeper.sleep(delay);
        }
    }

    /// Reads the current state from the server and caches it
    ///
    /// # Errors
    ///
    /// Fails if the session list does not hold exactly one entry with this
    /// id, or if the reported state is unknown.
    pub fn state(&mut self) -> SessionResult<SessionState> {
        let body = self.http.get(SESSIONS_PATH, &[200])?;
        let list: SessionList = decode("session list", body)?;

        let id = self.id.assigned();
        let mut matching = list
            .sessions
            .into_iter()
            .filter(|session| Some(session.id) == id);
        let first = matching.next();
        let extra = matching.count();
        let session = match first {
            Some(session) if extra == 0 => session,
            first => {
                return Err(SessionError::SessionCount {
                    session_id: self.id.to_string(),
                    count: usize::from(first.is_some()) + extra,
                });
            }
        };

        let state: SessionState = session.state.parse()?;
        self.state = state;
        Ok(state)
    }

    /// Serializes the session together with the transport's fields
    pub fn serialize(&self) -> Map<String, Value> {
        self.snapshot().to_map()
    }

    /// Typed form of [`LivySession::serialize`]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            self.id,
            self.language,
            self.sql_context_started,
            self.http.serialize(),
        )
    }

    fn statement_output(
        &self,
        statement_id: u64,
        cancel: Option<&CancellationToken>,
    ) -> SessionResult<StatementOutput> {
        let path = self.statements_path();
        loop {
            let body = self.http.get(&path, &[200])?;
            let list: StatementList = decode("statement list", body)?;
            let statement = list
                .statements
                .into_iter()
                .find(|s| s.id == statement_id)
                .ok_or_else(|| SessionError::StatementNotFound {
                    session_id: self.id.to_string(),
                    statement_id,
                })?;

            tracing::debug!("State of statement {} is {}", statement_id, statement.state);

            if statement.state != STATEMENT_RUNNING {
                let result = statement.output.ok_or_else(|| {
                    SessionError::Decode(format!(
                        "statement {statement_id} finished in state '{}' without output",
                        statement.state
                    ))
                })?;
                let output = StatementOutput::from_result(statement_id, result)?;
                tracing::debug!("Output of statement {} is {}", statement_id, output.text());
                return Ok(output);
            }

            if let Some(token) = cancel
                && token.is_cancelled()
            {
                return Err(SessionError::Cancelled {
                    session_id: self.id.to_string(),
                    statement_id,
                });
            }
            self.sleeper.sleep(self.timings.statement_poll_interval);
        }
    }

    fn ensure_usable(&self, operation: &'static str) -> SessionResult<()> {
        if self.id.is_not_started() || self.state == SessionState::Dead {
            return Err(self.invalid_operation(operation));
        }
        Ok(())
    }

    fn invalid_operation(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidOperation {
            operation,
            session_id: self.id.to_string(),
            state: self.state,
        }
    }

    fn session_path(&self) -> String {
        format!("{SESSIONS_PATH}/{}", self.id)
    }

    fn statements_path(&self) -> String {
        format!("{SESSIONS_PATH}/{}/statements", self.id)
    }
}
