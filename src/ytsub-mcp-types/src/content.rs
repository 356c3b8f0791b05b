//! Content blocks returned by tool calls.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Content item. Serialized as `{ "type": "text", "text": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Content {
    /// Plain text content.
    Text { text: String },
}

impl Content {
    /// Create text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Get as text if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
        }
    }
}
