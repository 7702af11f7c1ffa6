use crate::errors::ToolError;
use crate::utils::tool_errors::invalid_arguments;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Clone, Default)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    /// Decodes tool arguments into their typed record. `null` counts as `{}`.
    pub fn parse_args<T: DeserializeOwned>(&self, tool: &str, args: Value) -> Result<T, ToolError> {
        let args = if args.is_null() {
            Value::Object(Default::default())
        } else {
            args
        };
        serde_json::from_value(args).map_err(|err| invalid_arguments(tool, err))
    }

    /// Node ids are opaque path segments; only emptiness is rejected.
    pub fn ensure_id(&self, value: &str, label: &str) -> Result<String, ToolError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Removes `key` from an argument object and validates it as a node id.
    /// The remaining arguments are left for the options record.
    pub fn take_id(&self, args: &mut Value, key: &str) -> Result<String, ToolError> {
        match args.as_object_mut().and_then(|map| map.remove(key)) {
            Some(Value::String(raw)) => self.ensure_id(&raw, key),
            Some(_) => Err(ToolError::invalid_params(format!("{} must be a string", key))),
            None => Err(ToolError::invalid_params(format!("{} is required", key))),
        }
    }

    pub fn take_id_list(&self, args: &mut Value, key: &str) -> Result<Vec<String>, ToolError> {
        let raw = args
            .as_object_mut()
            .and_then(|map| map.remove(key))
            .ok_or_else(|| ToolError::invalid_params(format!("{} is required", key)))?;
        let values: Vec<String> = serde_json::from_value(raw).map_err(|_| {
            ToolError::invalid_params(format!("{} must be an array of strings", key))
        })?;
        self.ensure_id_list(&values, key)
    }

    pub fn ensure_id_list(&self, values: &[String], label: &str) -> Result<Vec<String>, ToolError> {
        if values.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must contain at least one id",
                label
            )));
        }
        values
            .iter()
            .enumerate()
            .map(|(idx, value)| self.ensure_id(value, &format!("{}[{}]", label, idx)))
            .collect()
    }
}
