use crate::errors::ToolError;
use crate::utils::suggest::suggest;

pub fn unknown_tool_error(group: &str, tool: &str, known_tools: &[&str]) -> ToolError {
    let shown: Vec<&str> = known_tools.iter().take(24).copied().collect();
    let mut err = ToolError::invalid_params(format!("Unknown {} tool: {}", group, tool));
    if let Some(best) = suggest(tool, known_tools, 1).first() {
        err = err.with_hint(format!("Did you mean: {}?", best));
    } else if !shown.is_empty() {
        err = err
            .with_hint(format!("Use one of: {}.", shown.join(", ")))
            .with_details(serde_json::json!({ "known_tools": known_tools }));
    }
    err
}

pub fn invalid_arguments(tool: &str, err: serde_json::Error) -> ToolError {
    ToolError::invalid_params(format!("Invalid arguments for {}: {}", tool, err))
}
