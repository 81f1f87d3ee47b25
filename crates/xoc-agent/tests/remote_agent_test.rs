//! Tests for the newline-delimited JSON agent client

use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::time::Duration;
use xoc_agent::{decode_chunk_line, AgentChunk, AgentError, AgentSession, RemoteAgent, SessionConfig};

/// Spawn a local agent service and return its stream URL.
async fn spawn_agent_service(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/agent/stream")
}

async fn echo_stream(headers: HeaderMap, Json(body): Json<Value>) -> String {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();
    let lines = [
        json!({"agent": {"messages": [{"content": format!("thread={} ", body["thread_id"].as_str().unwrap_or(""))}]}}),
        json!({"tools": {"messages": [{"content": format!("message={} ", body["message"].as_str().unwrap_or(""))}]}}),
        json!({"agent": {"messages": [{"content": format!("auth={auth}")}]}}),
    ];
    // Last line deliberately has no trailing newline.
    lines
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_remote_agent_streams_and_accumulates_reply() {
    let url = spawn_agent_service(Router::new().route("/agent/stream", post(echo_stream))).await;
    let agent = RemoteAgent::new(url, Some("secret".to_string()), Duration::from_secs(5)).unwrap();
    let mut session = AgentSession::new(agent, SessionConfig::new("demo-thread"));

    let reply = session.dispatch("mint 0.05 xoc").await.unwrap();

    assert_eq!(
        reply,
        "thread=demo-thread message=mint 0.05 xoc auth=Bearer secret"
    );
}

#[tokio::test]
async fn test_remote_agent_reports_error_status() {
    let app = Router::new().route(
        "/agent/stream",
        post(|| async { (StatusCode::BAD_GATEWAY, "rpc unavailable") }),
    );
    let url = spawn_agent_service(app).await;
    let agent = RemoteAgent::new(url, None, Duration::from_secs(5)).unwrap();
    let mut session = AgentSession::new(agent, SessionConfig::fresh());

    let err = session.dispatch("wrap 0.0001 eth to weth").await.unwrap_err();
    match err {
        AgentError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "rpc unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_remote_agent_rejects_malformed_lines() {
    let app = Router::new().route(
        "/agent/stream",
        post(|| async { "{\"agent\":{\"messages\":[{\"content\":\"ok\"}]}}\nnot json\n" }),
    );
    let url = spawn_agent_service(app).await;
    let agent = RemoteAgent::new(url, None, Duration::from_secs(5)).unwrap();
    let mut session = AgentSession::new(agent, SessionConfig::fresh());

    let err = session.dispatch("mint 0.05 xoc").await.unwrap_err();
    assert!(matches!(err, AgentError::MalformedChunk(_)));
}

#[test]
fn test_decode_chunk_line_variants() {
    assert_eq!(decode_chunk_line("   ").unwrap(), None);
    assert_eq!(
        decode_chunk_line(r#"{"agent":{"messages":[{"content":"hi"}]}}"#).unwrap(),
        Some(AgentChunk::Agent("hi".to_string()))
    );
    assert_eq!(
        decode_chunk_line(r#"{"tools":{"messages":[{"content":"Native Balance: 1"}]}}"#).unwrap(),
        Some(AgentChunk::Tools("Native Balance: 1".to_string()))
    );
    // Untagged graph events are skipped.
    assert_eq!(decode_chunk_line(r#"{"__start__":{}}"#).unwrap(), None);
    // Non-string content is rendered as JSON.
    assert_eq!(
        decode_chunk_line(r#"{"agent":{"messages":[{"content":[{"type":"text"}]}]}}"#).unwrap(),
        Some(AgentChunk::Agent(r#"[{"type":"text"}]"#.to_string()))
    );
    assert!(decode_chunk_line("{broken").is_err());
}
