use std::io::Cursor;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use ytsub_mcp_server::{McpServerBuilder, ServerState};
use ytsub_mcp_types::{CallToolResult, ErrorCode, Tool};

async fn run_session(lines: &[&str]) -> (Vec<Value>, ServerState) {
    let server = McpServerBuilder::new("transport-test", "0.0.1")
        .tool_fn(Tool::new("shout", "Upper-case the input"), |args| async move {
            let text = args.get("text").and_then(Value::as_str).unwrap_or_default();
            anyhow::Ok(CallToolResult::text(text.to_uppercase()))
        })
        .build()
        .unwrap();

    let input = lines.join("\n") + "\n";
    let mut output = Vec::new();
    server
        .serve(Cursor::new(input.into_bytes()), &mut output)
        .await
        .unwrap();

    let responses = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (responses, server.state().await)
}

#[tokio::test]
async fn test_full_session_over_newline_delimited_json() {
    let (responses, state) = run_session(&[
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"it","version":"1"}}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        r#"{"jsonrpc":"2.0","id":"call-1","method":"tools/call","params":{"name":"shout","arguments":{"text":"hey"}}}"#,
    ])
    .await;

    // The notification and the blank line produce no output.
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], json!(1));
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], json!("transport-test"));
    assert_eq!(responses[1]["result"]["tools"][0]["name"], json!("shout"));
    assert_eq!(responses[2]["id"], json!("call-1"));
    assert_eq!(
        responses[2]["result"],
        json!({ "content": [{ "type": "text", "text": "HEY" }] })
    );
    assert_eq!(state, ServerState::Stopped);
}

#[tokio::test]
async fn test_garbage_line_gets_parse_error_and_loop_continues() {
    let (responses, _) = run_session(&[
        "this is not json",
        r#"{"jsonrpc":"2.0","id":5,"method":"ping"}"#,
    ])
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], json!(0));
    assert_eq!(responses[0]["error"]["code"], json!(ErrorCode::PARSE_ERROR));
    assert_eq!(responses[1]["id"], json!(5));
    assert_eq!(responses[1]["result"], json!({}));
}

#[tokio::test]
async fn test_message_without_method_is_an_invalid_request() {
    let (responses, _) = run_session(&[
        r#"{"jsonrpc":"2.0","id":4}"#,
        r#"{"jsonrpc":"2.0","id":5,"method":"ping"}"#,
    ])
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], json!(4));
    assert_eq!(responses[0]["error"]["code"], json!(ErrorCode::INVALID_REQUEST));
    assert_eq!(responses[1]["result"], json!({}));
}

#[tokio::test]
async fn test_unknown_tool_over_transport() {
    let (responses, _) = run_session(&[
        r#"{"jsonrpc":"2.0","id":9,"method":"tools/call","params":{"name":"whisper","arguments":{}}}"#,
    ])
    .await;

    assert_eq!(responses[0]["error"]["code"], json!(ErrorCode::INVALID_PARAMS));
    assert!(responses[0].get("result").is_none());
}
