//! Assembling an [`McpServer`].

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Result, bail};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use ytsub_mcp_types::{CallToolResult, Implementation, ServerCapabilities, Tool};

use crate::handlers::{FnToolHandler, ToolHandler};
use crate::server::{McpServer, Session};

/// Collects server identity and tools; [`build`](Self::build) freezes them.
pub struct McpServerBuilder {
    info: Implementation,
    handlers: Vec<Arc<dyn ToolHandler>>,
    instructions: Option<String>,
}

impl McpServerBuilder {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: Implementation::new(name, version),
            handlers: Vec::new(),
            instructions: None,
        }
    }

    pub fn tool_handler(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Register an async closure as a tool.
    pub fn tool_fn<F, Fut>(self, tool: Tool, handler: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CallToolResult>> + Send + 'static,
    {
        self.tool_handler(Arc::new(FnToolHandler::new(tool, handler)))
    }

    /// Usage hints returned from `initialize`.
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Fails if two handlers advertise the same tool name.
    pub fn build(self) -> Result<Arc<McpServer>> {
        let mut tools = BTreeMap::new();
        for handler in self.handlers {
            match tools.entry(handler.tool().name) {
                Entry::Occupied(entry) => bail!("Duplicate tool registration: {}", entry.key()),
                Entry::Vacant(entry) => {
                    debug!(tool = %entry.key(), "Registered tool");
                    entry.insert(handler);
                }
            }
        }

        let capabilities = if tools.is_empty() {
            ServerCapabilities::default()
        } else {
            ServerCapabilities::default().with_tools()
        };

        Ok(Arc::new(McpServer {
            info: self.info,
            capabilities,
            tools,
            session: RwLock::new(Session::default()),
            running: AtomicBool::new(false),
            instructions: self.instructions,
        }))
    }
}
