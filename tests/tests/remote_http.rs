//! Remote script transport against a real HTTP endpoint.

use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use skill_kernel::prelude::*;
use skill_kernel::resources::ScriptCallRequest;
use std::sync::Arc;
use std::time::Duration;

async fn script_endpoint(
    Path(name): Path<String>,
    Json(request): Json<ScriptCallRequest>,
) -> axum::response::Response {
    assert_eq!(name, request.script_name);

    match name.as_str() {
        "echo" => Json(serde_json::json!({ "result": request.args })).into_response(),
        "broken" => Json(serde_json::json!({ "error": "remote failure" })).into_response(),
        // 不符合约定的端点：裸文本响应
        "plain" => "plain text result".into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(serde_json::json!({ "result": "late" })).into_response()
        }
        _ => (StatusCode::NOT_FOUND, "no such script").into_response(),
    }
}

/// Spawns the test server and returns its base URL.
async fn spawn_server() -> String {
    let app = axum::Router::new().route("/scripts/{name}", post(script_endpoint));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/scripts")
}

fn ctx() -> SkillContext {
    SkillContext::new("remote-http")
}

#[tokio::test]
async fn test_remote_script_round_trip() {
    let base_url = spawn_server().await;
    let transport = Arc::new(HttpScriptTransport::new(base_url));

    let script = RemoteScript::new("echo", transport);
    let result = script.run(&ctx(), "\"ping\"").await.unwrap();
    assert_eq!(result, "\"ping\"");
}

#[tokio::test]
async fn test_remote_error_field_is_failure() {
    let base_url = spawn_server().await;
    let transport = Arc::new(HttpScriptTransport::new(base_url));

    let script = RemoteScript::new("broken", transport);
    let err = script.run(&ctx(), "{}").await.unwrap_err();
    assert!(matches!(err, SkillError::ExecutionFailed(ref msg) if msg == "remote failure"));
}

#[tokio::test]
async fn test_non_json_body_passes_through() {
    let base_url = spawn_server().await;
    let transport = Arc::new(HttpScriptTransport::new(base_url));

    let script = RemoteScript::new("plain", transport);
    let result = script.run(&ctx(), "{}").await.unwrap();
    assert_eq!(result, "plain text result");
}

#[tokio::test]
async fn test_non_2xx_is_transport_error() {
    let base_url = spawn_server().await;
    let transport = Arc::new(HttpScriptTransport::new(base_url));

    let script = RemoteScript::new("unknown", transport);
    let err = script.run(&ctx(), "{}").await.unwrap_err();
    assert!(matches!(err, SkillError::Transport(ref msg) if msg.contains("404")));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let base_url = spawn_server().await;
    let transport =
        Arc::new(HttpScriptTransport::new(base_url).with_timeout(Duration::from_millis(200)));

    let script = RemoteScript::new("slow", transport);
    let err = script.run(&ctx(), "{}").await.unwrap_err();
    assert!(matches!(err, SkillError::Timeout { .. }));
}

#[tokio::test]
async fn test_in_flight_call_can_be_cancelled() {
    let base_url = spawn_server().await;
    let transport = Arc::new(HttpScriptTransport::new(base_url));
    let script = RemoteScript::new("slow", transport);

    let ctx = ctx();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.trigger_interrupt();
    });

    let err = script.run(&ctx, "{}").await.unwrap_err();
    assert!(matches!(err, SkillError::Interrupted));
}

#[tokio::test]
async fn test_remote_script_inside_skill_body() {
    let base_url = spawn_server().await;
    let transport = Arc::new(HttpScriptTransport::new(base_url));

    let skill = SkillBuilder::new("remote_demo", "remote scripts in a body")
        .body(format!("Call {}", embed_script("echo")))
        .script(Arc::new(RemoteScript::new("echo", transport)))
        .build();

    let outcomes = skill.auto_execute(&ctx(), "\"x\"").await.unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].error.is_none());
    assert_eq!(outcomes[0].result, "\"x\"");
}
