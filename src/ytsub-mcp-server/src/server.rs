//! Request dispatch: the handshake, tool listing and tool calls.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use ytsub_mcp_types::{
    CallToolParams, CallToolResult, Implementation, InitializeParams, InitializeResult,
    JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, ListToolsResult,
    ServerCapabilities, Tool, methods,
};

use crate::handlers::ToolHandler;

/// Lifecycle of the (single) client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Uninitialized,
    /// `initialize` answered, waiting for `notifications/initialized`.
    Initializing,
    Ready,
    ShuttingDown,
    Stopped,
}

/// What the server knows about its peer.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) state: ServerState,
    pub(crate) client: Option<Implementation>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: ServerState::Uninitialized,
            client: None,
        }
    }
}

/// MCP server with a fixed set of tools.
pub struct McpServer {
    pub(crate) info: Implementation,
    pub(crate) capabilities: ServerCapabilities,
    /// Keyed by tool name; fixed once built.
    pub(crate) tools: BTreeMap<String, Arc<dyn ToolHandler>>,
    pub(crate) session: RwLock<Session>,
    pub(crate) running: AtomicBool,
    pub(crate) instructions: Option<String>,
}

impl McpServer {
    pub fn info(&self) -> &Implementation {
        &self.info
    }

    pub fn capabilities(&self) -> &ServerCapabilities {
        &self.capabilities
    }

    pub async fn state(&self) -> ServerState {
        self.session.read().await.state
    }

    pub(crate) async fn set_state(&self, state: ServerState) {
        self.session.write().await.state = state;
    }

    /// Client identity from `initialize`, once the handshake happened.
    pub async fn client_info(&self) -> Option<Implementation> {
        self.session.read().await.client.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Descriptors of all registered tools, ordered by name.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.values().map(|handler| handler.tool()).collect()
    }

    /// Answer one request. Never fails: faults become error responses.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!(method = %request.method, id = %request.id, "Handling request");

        let result = match request.method.as_str() {
            methods::INITIALIZE => self.initialize(request.params).await,
            methods::PING => Ok(Value::Object(Map::new())),
            methods::TOOLS_LIST => encode(ListToolsResult::new(self.tools())),
            methods::TOOLS_CALL => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        if let Err(error) = &result {
            debug!(id = %request.id, %error, "Request failed");
        }
        JsonRpcResponse::from_result(request.id, result)
    }

    pub async fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            methods::INITIALIZED => {
                self.set_state(ServerState::Ready).await;
                info!("Client ready");
            }
            // Calls run to completion on the read loop; there is nothing to cancel.
            methods::CANCELLED => debug!("Ignoring cancellation"),
            other => warn!(method = %other, "Ignoring unknown notification"),
        }
    }

    async fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => decode(params)?,
            None => InitializeParams::default(),
        };

        {
            let mut session = self.session.write().await;
            if session.state != ServerState::Uninitialized {
                return Err(JsonRpcError::invalid_request("Server already initialized"));
            }
            session.state = ServerState::Initializing;
            info!(
                client = %params.client_info.name,
                version = %params.client_info.version,
                protocol = %params.protocol_version,
                "Client connected"
            );
            session.client = Some(params.client_info);
        }

        encode(InitializeResult::new(
            self.info.clone(),
            self.capabilities.clone(),
            self.instructions.clone(),
        ))
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let CallToolParams { name, arguments } =
            decode(params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?)?;

        // An unknown name is a protocol fault, never an error envelope.
        let handler = self
            .tools
            .get(&name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {name}")))?;

        debug!(tool = %name, "Calling tool");
        let arguments = arguments.unwrap_or_else(|| Value::Object(Map::new()));
        let result = handler.execute(arguments).await.unwrap_or_else(|e| {
            warn!(tool = %name, error = %e, "Tool handler failed");
            CallToolResult::error(e.to_string())
        });

        encode(result)
    }
}

fn decode<T: DeserializeOwned>(params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))
}

fn encode<T: Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
