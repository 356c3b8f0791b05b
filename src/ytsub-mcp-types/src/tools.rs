//! Tool descriptors and the `tools/list` / `tools/call` payloads.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::Content;

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Name callers pass to `tools/call`.
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

impl Tool {
    /// A tool that takes an empty arguments object.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: ToolInputSchema::object(),
        }
    }

    pub fn with_schema(self, input_schema: ToolInputSchema) -> Self {
        Self {
            input_schema,
            ..self
        }
    }
}

/// JSON Schema `type` keyword values used by tool schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    String,
}

/// Schema of a tool's arguments object. Properties are kept sorted so the
/// advertised descriptor is identical on every run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ToolInputSchema {
    pub fn object() -> Self {
        Self {
            schema_type: SchemaType::Object,
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// Add an optional property.
    pub fn property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Add a property callers must supply.
    pub fn required_property(self, name: impl Into<String>, schema: PropertySchema) -> Self {
        let name = name.into();
        let mut this = self.property(name.clone(), schema);
        if !this.required.contains(&name) {
            this.required.push(name);
        }
        this
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

impl Default for ToolInputSchema {
    fn default() -> Self {
        Self::object()
    }
}

/// Schema of a single scalar argument.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertySchema {
    pub fn string() -> Self {
        Self {
            schema_type: SchemaType::String,
            description: None,
        }
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }
}

/// `tools/list` result. The tool set is small and fixed, so there is no paging.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListToolsResult {
    pub tools: Vec<Tool>,
}

impl ListToolsResult {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self { tools }
    }
}

/// `tools/call` params.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

/// `tools/call` result. A failed tool still produces this envelope with
/// `isError: true`; only protocol faults become JSON-RPC errors.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(message)],
            is_error: true,
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(Content::as_text)
    }
}
