//! ytsub MCP Types - the slice of the Model Context Protocol the subtitle server speaks.
//!
//! Only what a single-tool stdio server needs is modelled here:
//! - JSON-RPC 2.0 envelopes and error codes
//! - The `initialize` handshake and server capabilities
//! - Tool descriptors, `tools/list` and `tools/call` payloads
//! - Text content blocks
//!
//! # Example
//! ```rust
//! use ytsub_mcp_types::{PropertySchema, Tool, ToolInputSchema};
//!
//! let tool = Tool::new("download_youtube_url", "Fetch subtitles")
//!     .with_schema(ToolInputSchema::object()
//!         .required_property("url", PropertySchema::string().description("Video URL")));
//! assert!(tool.input_schema.is_required("url"));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

mod capabilities;
mod content;
mod initialization;
mod jsonrpc;
mod tools;

/// MCP method name constants.
pub mod methods;

// ============================================================================
// Protocol Version
// ============================================================================

/// MCP protocol version spoken by the server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

// ============================================================================
// Re-exports
// ============================================================================

pub use jsonrpc::{
    ErrorCode, IncomingMessage, InvalidMessage, JSONRPC_VERSION, JsonRpcError, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, RequestId,
};

pub use initialization::{Implementation, InitializeParams, InitializeResult};

pub use capabilities::{ServerCapabilities, ToolsCapability};

pub use tools::{
    CallToolParams, CallToolResult, ListToolsResult, PropertySchema, SchemaType, Tool,
    ToolInputSchema,
};

pub use content::Content;
