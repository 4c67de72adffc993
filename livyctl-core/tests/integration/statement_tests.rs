//! Integration tests for statement submission and result polling

use std::time::Duration;

use livyctl_core::testing::{RecordingSleeper, ScriptedHttpClient};
use livyctl_core::{
    CancellationToken, LivySession, Method, SessionError, SessionErrorKind, SessionTimings,
    StatementOutput,
};
use serde_json::{Value, json};

const STATEMENTS: &str = "/sessions/5/statements";

fn session(http: &ScriptedHttpClient, sleeper: &RecordingSleeper) -> LivySession {
    let timings = SessionTimings::default()
        .with_state_poll_interval(Duration::from_secs(1))
        .with_statement_poll_interval(Duration::from_millis(250));
    LivySession::adopt(Box::new(http.clone()), "python", 5, false, timings)
        .unwrap()
        .with_sleeper(Box::new(sleeper.clone()))
}

fn statement(id: u64, state: &str, output: Value) -> Value {
    json!({ "statements": [{ "id": id, "state": state, "output": output }] })
}

#[test]
fn ok_output_is_returned_after_running_polls() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Post, STATEMENTS, 201, json!({"id": 2}));
    http.respond(Method::Get, STATEMENTS, 200, statement(2, "running", Value::Null));
    http.respond(Method::Get, STATEMENTS, 200, statement(2, "running", Value::Null));
    http.respond(
        Method::Get,
        STATEMENTS,
        200,
        statement(
            2,
            "available",
            json!({"status": "ok", "data": {"text/plain": "res0: Int = 2"}}),
        ),
    );

    let output = session(&http, &sleeper).execute("1 + 1").unwrap();
    assert_eq!(output, "res0: Int = 2");
    assert_eq!(sleeper.sleeps(), vec![Duration::from_millis(250); 2]);
    assert_eq!(http.count(Method::Get, STATEMENTS), 3);
}

#[test]
fn remote_error_is_output_not_failure() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Post, STATEMENTS, 201, json!({"id": 0}));
    http.respond(
        Method::Get,
        STATEMENTS,
        200,
        statement(
            0,
            "available",
            json!({
                "status": "error",
                "ename": "NameError",
                "evalue": "name 'x' is not defined",
                "traceback": ["Traceback (most recent call last):\n"]
            }),
        ),
    );

    let session = session(&http, &sleeper);
    let text = session.execute("x").unwrap();
    assert_eq!(text, "name 'x' is not defined");

    let output = session.execute_statement("x", None).unwrap();
    assert_eq!(
        output,
        StatementOutput::Error {
            name: Some("NameError".to_string()),
            value: "name 'x' is not defined".to_string(),
            traceback: vec!["Traceback (most recent call last):\n".to_string()],
        }
    );
}

#[test]
fn indented_code_is_dedented_before_submission() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Post, STATEMENTS, 201, json!({"id": 1}));
    http.respond(
        Method::Get,
        STATEMENTS,
        200,
        statement(1, "available", json!({"status": "ok", "data": {"text/plain": ""}})),
    );

    session(&http, &sleeper).execute("    a\n    b").unwrap();

    let posted = http
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Post)
        .and_then(|r| r.body)
        .unwrap();
    assert_eq!(posted, json!({"code": "a\nb"}));
}

#[test]
fn unknown_output_status_gives_empty_text() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Post, STATEMENTS, 201, json!({"id": 0}));
    http.respond(
        Method::Get,
        STATEMENTS,
        200,
        statement(0, "available", json!({"status": "aborted"})),
    );

    assert_eq!(session(&http, &sleeper).execute("x").unwrap(), "");
}

#[test]
fn terminal_statement_without_output_is_decode_error() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Post, STATEMENTS, 201, json!({"id": 0}));
    http.respond(Method::Get, STATEMENTS, 200, statement(0, "cancelled", Value::Null));

    let err = session(&http, &sleeper).execute("x").unwrap_err();
    assert!(matches!(err, SessionError::Decode(_)));
    assert_eq!(err.kind(), SessionErrorKind::StateConsistency);
}

#[test]
fn rejected_submission_is_transport_error() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Post, STATEMENTS, 400, json!({"msg": "session busy"}));

    let err = session(&http, &sleeper).execute("x").unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::Transport);
    assert_eq!(http.count(Method::Get, STATEMENTS), 0);
}

#[test]
fn cancellation_from_another_handle_stops_polling() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Post, STATEMENTS, 201, json!({"id": 0}));
    http.respond(Method::Get, STATEMENTS, 200, statement(0, "running", Value::Null));

    let token = CancellationToken::new();
    let handle = token.clone();
    handle.cancel();

    let err = session(&http, &sleeper)
        .execute_statement("while True: pass", Some(&token))
        .unwrap_err();
    assert!(matches!(err, SessionError::Cancelled { statement_id: 0, .. }));
}

#[test]
fn expired_deadline_cancels_polling() {
    let http = ScriptedHttpClient::new();
    let sleeper = RecordingSleeper::new();
    http.respond(Method::Post, STATEMENTS, 201, json!({"id": 0}));
    http.respond(Method::Get, STATEMENTS, 200, statement(0, "running", Value::Null));

    let token = CancellationToken::with_timeout(Duration::ZERO);
    let err = session(&http, &sleeper)
        .execute_statement("spin()", Some(&token))
        .unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::Cancelled);
}
