//! Typed option records accepted by the Graph tools.
//!
//! Every field is optional; `None` means "omit the parameter". The records
//! serialize to a JSON object keyed by the Graph API parameter name, which is
//! what the query encoder classifies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A list of strings, or a value the caller has already rendered as text
/// (`"name,id"`, `'["ACTIVE"]'`). Pre-rendered text is forwarded untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListOrText {
    List(Vec<String>),
    Text(String),
}

impl ListOrText {
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ListOrText::List(items.into_iter().map(Into::into).collect())
    }
}

/// Absolute date window, `YYYY-MM-DD` bounds inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub since: String,
    pub until: String,
}

impl TimeRange {
    pub fn new(since: impl Into<String>, until: impl Into<String>) -> Self {
        Self {
            since: since.into(),
            until: until.into(),
        }
    }
}

/// Either a day count (1-90) or a named period such as `monthly` or `all_days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeIncrement {
    Days(u32),
    Named(String),
}

impl TimeIncrement {
    pub fn as_param(&self) -> String {
        match self {
            TimeIncrement::Days(days) => days.to_string(),
            TimeIncrement::Named(name) => name.clone(),
        }
    }
}

/// Options shared by node lookups and collection edges (ads, ad sets,
/// campaigns, creatives, activities).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<ListOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtering: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_since: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_status: Option<ListOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_ad_categories: Option<ListOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<ListOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_guarantee_agreement_status: Option<ListOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_drafts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_height: Option<u32>,
    // Activity log filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_children: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_oids: Option<ListOrText>,
}

impl GraphOptions {
    pub fn with_fields(fields: Option<ListOrText>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn to_param_map(&self) -> Map<String, Value> {
        to_param_map(self)
    }
}

/// Options for the `insights` edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<ListOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtering: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ranges: Option<Vec<TimeRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_increment: Option<TimeIncrement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_attribution_windows: Option<ListOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_breakdowns: Option<ListOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_report_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdowns: Option<ListOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_summary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_account_attribution_setting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_unified_attribution_setting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl InsightsOptions {
    /// Fills `level` only when the caller left it unset.
    pub fn with_default_level(mut self, level: &str) -> Self {
        if self.level.is_none() {
            self.level = Some(level.to_string());
        }
        self
    }

    pub fn to_param_map(&self) -> Map<String, Value> {
        to_param_map(self)
    }
}

fn to_param_map<T: Serialize>(options: &T) -> Map<String, Value> {
    match serde_json::to_value(options) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_options_do_not_appear_in_param_map() {
        let options = GraphOptions {
            limit: Some(25),
            ..GraphOptions::default()
        };
        let map = options.to_param_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("limit"), Some(&serde_json::json!(25)));
    }

    #[test]
    fn fields_accept_list_or_prejoined_text() {
        let list: GraphOptions =
            serde_json::from_value(serde_json::json!({"fields": ["name", "id"]})).expect("list");
        assert_eq!(list.fields, Some(ListOrText::list(["name", "id"])));
        let text: GraphOptions =
            serde_json::from_value(serde_json::json!({"fields": "name,id"})).expect("text");
        assert_eq!(text.fields, Some(ListOrText::Text("name,id".to_string())));
    }

    #[test]
    fn time_increment_accepts_days_or_named_period() {
        let days: InsightsOptions =
            serde_json::from_value(serde_json::json!({"time_increment": 7})).expect("days");
        assert_eq!(days.time_increment, Some(TimeIncrement::Days(7)));
        let named: InsightsOptions =
            serde_json::from_value(serde_json::json!({"time_increment": "monthly"}))
                .expect("named");
        assert_eq!(named.time_increment.map(|t| t.as_param()), Some("monthly".to_string()));
    }

    #[test]
    fn default_level_does_not_override_caller_level() {
        let options = InsightsOptions {
            level: Some("ad".to_string()),
            ..InsightsOptions::default()
        };
        assert_eq!(options.with_default_level("campaign").level.as_deref(), Some("ad"));
        assert_eq!(
            InsightsOptions::default()
                .with_default_level("campaign")
                .level
                .as_deref(),
            Some("campaign")
        );
    }
}
