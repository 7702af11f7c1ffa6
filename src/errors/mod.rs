mod graph_error;
mod mcp_error;
mod tool_error;

pub use graph_error::{ApiErrorDetail, GraphError};
pub use mcp_error::{ErrorCode, McpError};
pub use tool_error::{ToolError, ToolErrorKind};
