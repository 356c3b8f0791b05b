//! JSON-RPC 2.0 envelopes, one per line on the wire.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC version string.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request id, echoed back verbatim in the response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

impl RequestId {
    /// Id used to answer a line that could not be read as a request at all.
    pub const UNKNOWN: RequestId = RequestId::Number(0);
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<i32> for RequestId {
    fn from(id: i32) -> Self {
        Self::Number(id.into())
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self::String(id)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => n.fmt(f),
            Self::String(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: impl Into<RequestId>, method: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params: None,
        }
    }

    pub fn with_params(self, params: Value) -> Self {
        Self {
            params: Some(params),
            ..self
        }
    }
}

/// A message without an `id`. Never answered.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params: None,
        }
    }
}

/// One line read from the client.
#[derive(Debug, Clone)]
pub enum IncomingMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
}

/// A line that could not be turned into a message, with the id to answer it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMessage {
    pub id: RequestId,
    pub error: JsonRpcError,
}

impl fmt::Display for InvalidMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id {})", self.error, self.id)
    }
}

impl std::error::Error for InvalidMessage {}

impl From<InvalidMessage> for JsonRpcResponse {
    fn from(invalid: InvalidMessage) -> Self {
        Self::error(invalid.id, invalid.error)
    }
}

impl IncomingMessage {
    /// Classify a line: anything with an `id` is a request, anything else
    /// with a `method` is a notification.
    ///
    /// Text that is not JSON is a parse error answered under
    /// [`RequestId::UNKNOWN`]. JSON that is not a valid message is an invalid
    /// request, answered under its own id when that id is readable.
    pub fn parse(line: &str) -> Result<Self, InvalidMessage> {
        let value: Value = serde_json::from_str(line).map_err(|e| InvalidMessage {
            id: RequestId::UNKNOWN,
            error: JsonRpcError::parse_error(format!("Invalid JSON: {e}")),
        })?;

        let id = value
            .get("id")
            .filter(|id| !id.is_null())
            .map(|id| RequestId::deserialize(id).ok());

        let message = match id {
            Some(_) => serde_json::from_value(value).map(Self::Request),
            None => serde_json::from_value(value).map(Self::Notification),
        };
        message.map_err(|e| InvalidMessage {
            id: id.flatten().unwrap_or(RequestId::UNKNOWN),
            error: JsonRpcError::invalid_request(format!("Invalid JSON-RPC message: {e}")),
        })
    }
}

/// Response to a request: either `result` or `error`, never both.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn from_result(id: RequestId, result: Result<Value, JsonRpcError>) -> Self {
        let (result, error) = match result {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
            error,
        }
    }

    pub fn success(id: impl Into<RequestId>, result: Value) -> Self {
        Self::from_result(id.into(), Ok(result))
    }

    pub fn error(id: impl Into<RequestId>, error: JsonRpcError) -> Self {
        Self::from_result(id.into(), Err(error))
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }
}

/// Error object carried by an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PARSE_ERROR, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_REQUEST, message)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(ErrorCode::METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    /// Also used for calls naming a tool that is not registered.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_PARAMS, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INTERNAL_ERROR, message)
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for JsonRpcError {}

/// Standard JSON-RPC error codes.
pub struct ErrorCode;

impl ErrorCode {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}
