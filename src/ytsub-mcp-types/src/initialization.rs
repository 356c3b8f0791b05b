//! The `initialize` handshake.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::PROTOCOL_VERSION;
use crate::capabilities::ServerCapabilities;

/// Name and version of either peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

impl Implementation {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// `initialize` params sent by the client. Missing params are treated as
/// this type's default.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,
    /// Accepted and ignored; the server never calls back into the client.
    #[serde(default)]
    pub capabilities: Value,
    #[serde(default = "anonymous_client")]
    pub client_info: Implementation,
}

fn default_protocol_version() -> String {
    PROTOCOL_VERSION.to_string()
}

fn anonymous_client() -> Implementation {
    Implementation::new("unknown-client", "0.0.0")
}

impl Default for InitializeParams {
    fn default() -> Self {
        Self {
            protocol_version: default_protocol_version(),
            capabilities: Value::Object(Map::new()),
            client_info: anonymous_client(),
        }
    }
}

/// Answer to `initialize`. The server always replies with the version it
/// speaks, whatever the client asked for.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: Implementation,
    /// Usage hints for the model on the client side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResult {
    pub fn new(
        server_info: Implementation,
        capabilities: ServerCapabilities,
        instructions: Option<String>,
    ) -> Self {
        Self {
            protocol_version: default_protocol_version(),
            capabilities,
            server_info,
            instructions,
        }
    }
}
