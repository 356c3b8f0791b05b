//! End-to-end sessions against the assembled server, over in-memory pipes.

use std::io::Cursor;

use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use ytsub_cli::{Cli, TOOL_NAME, build_server};

async fn run_session(cli: &Cli, messages: &[Value]) -> Vec<Value> {
    let server = build_server(cli.tool()).unwrap();
    let input: String = messages.iter().map(|m| format!("{m}\n")).collect();
    let mut output = Vec::new();

    server.serve(Cursor::new(input.into_bytes()), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn handshake() -> Vec<Value> {
    vec![
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "1.0"}
        }}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    ]
}

fn call(id: i64, name: &str, arguments: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": "tools/call",
        "params": {"name": name, "arguments": arguments}})
}

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("ytsub-mcp").chain(args.iter().copied())).unwrap()
}

#[tokio::test]
async fn test_list_advertises_single_tool() {
    let mut messages = handshake();
    messages.push(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}));

    let responses = run_session(&cli(&["--cookie-browser", "chrome"]), &messages).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "ytsub-mcp");
    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], TOOL_NAME);
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["url"]));
}

#[tokio::test]
async fn test_unknown_tool_is_a_protocol_error() {
    let mut messages = handshake();
    messages.push(call(2, "download_vimeo_url", json!({"url": "x"})));

    let responses = run_session(&cli(&["--cookie-browser", "chrome"]), &messages).await;

    assert_eq!(responses[1]["error"]["code"], -32602);
    assert_eq!(responses[1]["error"]["message"], "Unknown tool: download_vimeo_url");
    assert!(responses[1].get("result").is_none());
}

#[tokio::test]
async fn test_unsupported_browser_yields_error_envelope() {
    let root = tempfile::tempdir().unwrap();
    let temp_dir = root.path().to_str().unwrap();
    let mut messages = handshake();
    messages.push(call(2, TOOL_NAME, json!({"url": "https://youtu.be/abc"})));

    let responses = run_session(
        &cli(&["--cookie-browser", "safari", "--temp-dir", temp_dir]),
        &messages,
    )
    .await;

    let result = &responses[1]["result"];
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Error downloading video: Unsupported cookie browser"));
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_failing_downloader_yields_error_envelope_and_cleans_up() {
    let root = tempfile::tempdir().unwrap();
    let temp_dir = root.path().to_str().unwrap();
    let mut messages = handshake();
    messages.push(call(2, TOOL_NAME, json!({"url": "https://www.youtube.com/watch?v=nope"})));

    let responses = run_session(
        &cli(&[
            "--cookie-browser",
            "Chrome",
            "--yt-dlp",
            "false",
            "--temp-dir",
            temp_dir,
        ]),
        &messages,
    )
    .await;

    let result = &responses[1]["result"];
    assert_eq!(result["isError"], true);
    assert!(
        result["content"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Error downloading video: yt-dlp failed")
    );
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}
