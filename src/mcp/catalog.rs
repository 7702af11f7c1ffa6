use crate::errors::{ErrorCode, McpError};
use crate::utils::suggest::suggest;
use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

const MAX_REPORTED_ERRORS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

static TOOL_CATALOG: Lazy<Vec<ToolDef>> = Lazy::new(|| {
    let raw = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tool_catalog.json"));
    serde_json::from_str(raw).expect("tool_catalog.json must be valid JSON")
});

static TOOL_MAP: Lazy<HashMap<String, ToolDef>> = Lazy::new(|| {
    TOOL_CATALOG
        .iter()
        .cloned()
        .map(|tool| (tool.name.clone(), tool))
        .collect()
});

static TOOL_VALIDATORS: Lazy<HashMap<String, JSONSchema>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for tool in TOOL_CATALOG.iter() {
        if let Ok(schema) = JSONSchema::compile(&tool.input_schema) {
            map.insert(tool.name.clone(), schema);
        }
    }
    map
});

pub fn tool_catalog() -> &'static Vec<ToolDef> {
    &TOOL_CATALOG
}

pub fn tool_by_name(name: &str) -> Option<&'static ToolDef> {
    TOOL_MAP.get(name)
}

pub fn tool_names() -> Vec<&'static str> {
    TOOL_CATALOG.iter().map(|tool| tool.name.as_str()).collect()
}

/// `tools/list` payload entries, in catalog order.
pub fn list_tools() -> Vec<ToolDef> {
    TOOL_CATALOG.clone()
}

pub fn validate_tool_args(tool_name: &str, args: &Value) -> Result<(), McpError> {
    let (Some(tool), Some(schema)) = (tool_by_name(tool_name), TOOL_VALIDATORS.get(tool_name))
    else {
        return Ok(());
    };
    if let Err(errors) = schema.validate(args) {
        let message = format_schema_errors(tool_name, errors, &tool.input_schema);
        return Err(McpError::new(ErrorCode::InvalidParams, message));
    }
    Ok(())
}

fn format_schema_errors(
    tool_name: &str,
    errors: jsonschema::ErrorIterator,
    schema: &Value,
) -> String {
    let mut rendered = Vec::new();
    let mut did_you_means = Vec::new();

    for err in errors.take(MAX_REPORTED_ERRORS) {
        let instance_path = match err.instance_path.to_string() {
            path if path.is_empty() => "(root)".to_string(),
            path => path,
        };
        match &err.kind {
            ValidationErrorKind::AdditionalProperties { unexpected } => {
                let known = known_properties(schema, &err.schema_path.to_string());
                for unknown in unexpected {
                    rendered.push(format!("{}: unknown field '{}'", instance_path, unknown));
                    if let Some(best) = suggest(unknown, &known, 1).first() {
                        did_you_means.push(format!("'{}' -> '{}'", unknown, best));
                    }
                }
            }
            ValidationErrorKind::Required { property } => {
                let prop = property
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| property.to_string());
                rendered.push(format!("{}: missing required field '{}'", instance_path, prop));
            }
            ValidationErrorKind::Type { kind } => {
                rendered.push(format!("{}: expected {}", instance_path, format_type_kind(kind)));
            }
            _ => rendered.push(format!("{}: {}", instance_path, err)),
        }
    }

    let mut lines = vec![format!("Invalid arguments for {}", tool_name)];
    lines.extend(rendered.iter().map(|line| format!("- {}", line)));
    if !did_you_means.is_empty() {
        lines.push(format!("Did you mean: {}", did_you_means.join(" | ")));
    }
    lines.join("\n")
}

fn format_type_kind(kind: &TypeKind) -> String {
    match kind {
        TypeKind::Single(primitive) => primitive.to_string(),
        TypeKind::Multiple(types) => {
            let list: Vec<String> = (*types).into_iter().map(|t| t.to_string()).collect();
            if list.is_empty() {
                "unknown".to_string()
            } else {
                list.join(" | ")
            }
        }
    }
}

/// Property names of the object schema that owns the failing keyword.
fn known_properties(schema: &Value, schema_path: &str) -> Vec<String> {
    let mut segments: Vec<&str> = schema_path.split('/').filter(|s| !s.is_empty()).collect();
    segments.pop();
    let mut current = schema;
    for segment in segments {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Vec::new(),
        }
    }
    current
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_parses_and_every_schema_compiles() {
        assert!(!tool_catalog().is_empty());
        for tool in tool_catalog() {
            assert!(
                TOOL_VALIDATORS.contains_key(&tool.name),
                "schema for {} must compile",
                tool.name
            );
            assert_eq!(tool.input_schema["type"], "object");
        }
    }

    #[test]
    fn unknown_field_is_rejected_with_suggestion() {
        let err = validate_tool_args(
            "get_ads_by_adaccount",
            &serde_json::json!({"act_id": "act_1", "limt": 5}),
        )
        .expect_err("unknown field");
        assert_eq!(err.code, ErrorCode::InvalidParams);
        assert!(err.message.contains("unknown field 'limt'"));
        assert!(err.message.contains("'limt' -> 'limit'"));
    }

    #[test]
    fn missing_required_id_is_reported() {
        let err = validate_tool_args("get_ad_by_id", &serde_json::json!({}))
            .expect_err("missing ad_id");
        assert!(err.message.contains("missing required field 'ad_id'"));
    }

    #[test]
    fn well_formed_insights_args_pass() {
        validate_tool_args(
            "get_campaign_insights",
            &serde_json::json!({
                "campaign_id": "1",
                "fields": ["spend", "impressions"],
                "time_range": {"since": "2024-01-01", "until": "2024-01-31"},
                "time_increment": 7,
                "breakdowns": ["age"],
            }),
        )
        .expect("valid");
    }
}
