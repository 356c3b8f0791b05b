//! The seam between the protocol layer and tool implementations.

use std::future::Future;

use anyhow::Result;
use serde_json::Value;
use ytsub_mcp_types::{CallToolResult, Tool};

/// A callable tool.
///
/// Return `Ok` with [`CallToolResult::error`] for failures the caller should
/// read. An `Err` is also turned into an error envelope by the server, with
/// the error's message as its text.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Descriptor advertised through `tools/list`.
    fn tool(&self) -> Tool;

    /// Run the tool with the caller's arguments object (`{}` when omitted).
    async fn execute(&self, arguments: Value) -> Result<CallToolResult>;
}

/// A tool backed by an async closure.
pub struct FnToolHandler<F> {
    tool: Tool,
    handler: F,
}

impl<F, Fut> FnToolHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<CallToolResult>> + Send,
{
    pub fn new(tool: Tool, handler: F) -> Self {
        Self { tool, handler }
    }
}

#[async_trait::async_trait]
impl<F, Fut> ToolHandler for FnToolHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<CallToolResult>> + Send,
{
    fn tool(&self) -> Tool {
        self.tool.clone()
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        (self.handler)(arguments).await
    }
}
