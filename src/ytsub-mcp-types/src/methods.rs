//! MCP method name constants.

// Lifecycle
/// Initialize method.
pub const INITIALIZE: &str = "initialize";
/// Ping method.
pub const PING: &str = "ping";

// Notifications
/// Sent by the client once it has processed the initialize result.
pub const INITIALIZED: &str = "notifications/initialized";
/// Cancelled notification.
pub const CANCELLED: &str = "notifications/cancelled";

// Tools
/// List tools method.
pub const TOOLS_LIST: &str = "tools/list";
/// Call tool method.
pub const TOOLS_CALL: &str = "tools/call";
