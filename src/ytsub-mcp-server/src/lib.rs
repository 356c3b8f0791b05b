//! ytsub MCP Server - tool registry and dispatcher over a stdio transport.
//!
//! The server advertises a fixed set of tools, routes `tools/call` to the
//! matching [`ToolHandler`], and turns handler failures into error envelopes
//! (`isError: true`) so the caller always gets a text answer. Only an unknown
//! tool name is reported as a JSON-RPC error.
//!
//! # Example
//! ```rust,no_run
//! use ytsub_mcp_server::McpServerBuilder;
//! use ytsub_mcp_types::{CallToolResult, Tool};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServerBuilder::new("my-server", "1.0.0")
//!         .tool_fn(Tool::new("hello", "Say hello"), |_| async {
//!             anyhow::Ok(CallToolResult::text("hi"))
//!         })
//!         .build()?;
//!
//!     server.run_stdio().await
//! }
//! ```

mod builder;
mod handlers;
mod server;
mod transport;

pub use builder::McpServerBuilder;
pub use handlers::{FnToolHandler, ToolHandler};
pub use server::{McpServer, ServerState};

pub use ytsub_mcp_types;
