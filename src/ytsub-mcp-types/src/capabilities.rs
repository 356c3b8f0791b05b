//! What the server advertises during `initialize`.
//!
//! Client capabilities are accepted as an opaque value on
//! [`InitializeParams`](crate::InitializeParams); the server never calls back
//! into the client.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ServerCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

impl ServerCapabilities {
    pub fn with_tools(self) -> Self {
        Self {
            tools: Some(ToolsCapability::default()),
        }
    }

    pub fn has_tools(&self) -> bool {
        self.tools.is_some()
    }
}

/// The tool set never changes after startup, so `listChanged` is never sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub list_changed: bool,
}
