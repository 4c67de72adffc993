//! Integration tests for session start, state polling and deletion

use std::time::Duration;

use livyctl_core::testing::{RecordingSleeper, ScriptedHttpClient};
use livyctl_core::{
    Language, LivySession, Method, SessionError, SessionErrorKind, SessionId, SessionState,
    SessionTimings,
};
use serde_json::{Value, json};

fn timings() -> SessionTimings {
    SessionTimings::default()
        .with_state_poll_interval(Duration::from_secs(1))
        .with_statement_poll_interval(Duration::from_millis(100))
        .with_sql_context_timeout(Duration::from_secs(5))
}

fn sessions_with(id: u64, state: &str) -> Value {
    json!({ "sessions": [{ "id": id, "state": state }] })
}

fn fresh(http: &ScriptedHttpClient, sleeper: &RecordingSleeper, language: &str) -> LivySession {
    LivySession::fresh(Box::new(http.clone()), language, timings())
        .unwrap()
        .with_sleeper(Box::new(sleeper.clone()))
}

#[test]
fn python_session_starts_and_binds_sql_context() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Post, "/sessions", 201, json!({"id": 7, "state": "starting"}));
    http.respond(Method::Get, "/sessions", 200, sessions_with(7, "starting"));
    http.respond(Method::Get, "/sessions", 200, sessions_with(7, "idle"));
    http.respond(Method::Post, "/sessions/7/statements", 201, json!({"id": 0}));
    http.respond(
        Method::Get,
        "/sessions/7/statements",
        200,
        json!({"statements": [{
            "id": 0,
            "state": "available",
            "output": {"status": "ok", "data": {"text/plain": ""}}
        }]}),
    );

    let mut session = fresh(&http, &sleeper, "python");
    session.start().unwrap();
    assert_eq!(session.id().to_string(), "7");
    assert_eq!(session.cached_state(), SessionState::Starting);

    session.create_sql_context().unwrap();
    assert!(session.sql_context_started());
    assert_eq!(session.cached_state(), SessionState::Idle);
    assert_eq!(sleeper.count(), 1);

    let requests = http.requests();
    assert_eq!(requests[0].body, Some(json!({"kind": "pyspark"})));
    let submitted = requests
        .iter()
        .find(|r| r.method == Method::Post && r.path == "/sessions/7/statements")
        .and_then(|r| r.body.clone())
        .unwrap();
    assert_eq!(
        submitted,
        json!({"code": Language::Python.sql_context_command()})
    );
}

#[test]
fn unknown_initial_state_keeps_session_deletable() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Post, "/sessions", 201, json!({"id": 7, "state": "recovering"}));
    http.respond(Method::Delete, "/sessions/7", 200, Value::Null);

    let mut session = fresh(&http, &sleeper, "scala");
    let err = session.start().unwrap_err();
    assert!(matches!(err, SessionError::UnknownState(ref s) if s == "recovering"));
    assert_eq!(session.id(), SessionId::Assigned(7));
    assert_eq!(session.cached_state(), SessionState::Busy);

    session.delete().unwrap();
    assert_eq!(session.cached_state(), SessionState::Dead);
    assert_eq!(http.count(Method::Delete, "/sessions/7"), 1);
}

#[test]
fn sql_context_is_created_once() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Get, "/sessions", 200, sessions_with(3, "idle"));
    http.respond(Method::Post, "/sessions/3/statements", 201, json!({"id": 0}));
    http.respond(
        Method::Get,
        "/sessions/3/statements",
        200,
        json!({"statements": [{
            "id": 0,
            "state": "available",
            "output": {"status": "ok", "data": {"text/plain": ""}}
        }]}),
    );

    let mut session = LivySession::adopt(Box::new(http.clone()), "scala", 3, false, timings())
        .unwrap()
        .with_sleeper(Box::new(sleeper.clone()));
    session.create_sql_context().unwrap();
    session.create_sql_context().unwrap();

    assert_eq!(http.count(Method::Post, "/sessions/3/statements"), 1);
}

#[test]
fn sql_context_already_created_sends_nothing() {
    let http = ScriptedHttpClient::new();
    let mut session =
        LivySession::adopt(Box::new(http.clone()), "scala", 3, true, timings()).unwrap();
    session.create_sql_context().unwrap();
    assert!(http.requests().is_empty());
}

#[test]
fn wait_times_out_after_budget_intervals() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Get, "/sessions", 200, sessions_with(7, "starting"));

    let mut session = LivySession::adopt(Box::new(http.clone()), "python", 7, false, timings())
        .unwrap()
        .with_sleeper(Box::new(sleeper.clone()));
    let err = session
        .wait_for_state(SessionState::Idle, Duration::from_secs(3))
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Timeout {
            target: SessionState::Idle,
            current: SessionState::Starting,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "Session 7 did not reach idle state in time. Current state is starting"
    );
    assert_eq!(sleeper.count(), 3);
    assert_eq!(http.count(Method::Get, "/sessions"), 4);
}

#[test]
fn zero_budget_polls_once() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Get, "/sessions", 200, sessions_with(7, "busy"));

    let mut session = LivySession::adopt(Box::new(http.clone()), "python", 7, false, timings())
        .unwrap()
        .with_sleeper(Box::new(sleeper.clone()));
    let err = session
        .wait_for_state(SessionState::Idle, Duration::ZERO)
        .unwrap_err();

    assert_eq!(err.kind(), SessionErrorKind::Timeout);
    assert_eq!(sleeper.count(), 0);
    assert_eq!(http.count(Method::Get, "/sessions"), 1);
}

#[test]
fn missing_session_is_count_error() {
    let http = ScriptedHttpClient::new();
    http.respond(Method::Get, "/sessions", 200, json!({"sessions": []}));
    let mut session =
        LivySession::adopt(Box::new(http), "python", 7, false, timings()).unwrap();

    let err = session.state().unwrap_err();
    assert!(matches!(err, SessionError::SessionCount { count: 0, .. }));
    assert_eq!(err.kind(), SessionErrorKind::StateConsistency);
}

#[test]
fn duplicate_session_is_count_error() {
    let http = ScriptedHttpClient::new();
    http.respond(
        Method::Get,
        "/sessions",
        200,
        json!({"sessions": [{"id": 7, "state": "idle"}, {"id": 7, "state": "busy"}]}),
    );
    let mut session =
        LivySession::adopt(Box::new(http), "python", 7, false, timings()).unwrap();

    let err = session.state().unwrap_err();
    assert!(matches!(err, SessionError::SessionCount { count: 2, .. }));
}

#[test]
fn unknown_state_is_rejected() {
    let http = ScriptedHttpClient::new();
    http.respond(Method::Get, "/sessions", 200, sessions_with(7, "recovering"));
    let mut session =
        LivySession::adopt(Box::new(http), "python", 7, false, timings()).unwrap();

    let err = session.state().unwrap_err();
    assert!(matches!(err, SessionError::UnknownState(ref s) if s == "recovering"));
    assert_eq!(session.cached_state(), SessionState::Busy);
}

#[test]
fn delete_of_unstarted_session_is_invalid() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    let mut session = fresh(&http, &sleeper, "scala");

    let err = session.delete().unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::InvalidOperation);
    assert!(http.requests().is_empty());
}

#[test]
fn delete_marks_session_dead_once() {
    let http = ScriptedHttpClient::new();
    http.respond(Method::Delete, "/sessions/4", 200, json!({"msg": "deleted"}));
    let mut session =
        LivySession::adopt(Box::new(http.clone()), "scala", 4, false, timings()).unwrap();

    session.delete().unwrap();
    assert_eq!(session.cached_state(), SessionState::Dead);

    let err = session.delete().unwrap_err();
    assert!(matches!(
        err,
        SessionError::InvalidOperation {
            state: SessionState::Dead,
            ..
        }
    ));
    assert_eq!(http.count(Method::Delete, "/sessions/4"), 1);
}

#[test]
fn delete_with_server_error_keeps_state() {
    let http = ScriptedHttpClient::new();
    http.respond(Method::Delete, "/sessions/4", 500, Value::Null);
    let mut session =
        LivySession::adopt(Box::new(http), "scala", 4, false, timings()).unwrap();

    let err = session.delete().unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::Transport);
    assert_eq!(session.cached_state(), SessionState::Busy);
}

#[test]
fn serialize_merges_transport_fields() {
    let http = ScriptedHttpClient::new();
    let session = LivySession::adopt(Box::new(http), "python", 12, true, timings()).unwrap();
    let map = session.serialize();

    assert_eq!(map.get("id"), Some(&json!("12")));
    assert_eq!(map.get("language"), Some(&json!("python")));
    assert_eq!(map.get("sqlcontext"), Some(&json!(true)));
    assert_eq!(map.get("version"), Some(&json!("0.0.0")));
    assert_eq!(map.get("endpoint"), Some(&json!("http://scripted")));
}

#[test]
fn fresh_session_serializes_sentinel_id() {
    let session =
        LivySession::fresh(Box::new(ScriptedHttpClient::new()), "scala", timings()).unwrap();
    assert_eq!(session.id(), SessionId::NotStarted);
    assert_eq!(session.serialize().get("id"), Some(&json!("-1")));
}
