//! Turns typed options into the flat string query the Graph API expects.

use crate::constants::edges::{TIMELINE, TIMELINE_WINDOW_KEYS};
use crate::constants::encoding::{COMMA_JOINED, JSON_ENCODED};
use crate::constants::graph::ACCESS_TOKEN_PARAM;
use crate::constants::insights::{ALL_DAYS, BOOLEAN_FLAGS, TIME_KEYS};
use crate::services::graph_options::{GraphOptions, InsightsOptions};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Encoded query: parameter name to its wire text.
pub type QueryParams = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamEncoding {
    PassThrough,
    Json,
    CommaJoined,
}

static ENCODINGS: Lazy<HashMap<&'static str, ParamEncoding>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for key in JSON_ENCODED {
        map.insert(*key, ParamEncoding::Json);
    }
    for key in COMMA_JOINED {
        map.insert(*key, ParamEncoding::CommaJoined);
    }
    map
});

pub fn encoding_for(key: &str) -> ParamEncoding {
    ENCODINGS
        .get(key)
        .copied()
        .unwrap_or(ParamEncoding::PassThrough)
}

/// Base map every authenticated call starts from.
pub fn base_params(access_token: &str) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert(ACCESS_TOKEN_PARAM.to_string(), access_token.to_string());
    params
}

/// Wire text for one option, or `None` when it must be omitted. Options that
/// would encode to empty text are omitted on every path.
pub fn encode_value(key: &str, value: &Value) -> Option<String> {
    let encoded = match (encoding_for(key), value) {
        (_, Value::Null) => None,
        (ParamEncoding::Json, Value::Array(_) | Value::Object(_)) => Some(value.to_string()),
        (ParamEncoding::CommaJoined, Value::Array(items)) => {
            let parts: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
            match parts {
                Some(parts) => Some(parts.join(",")),
                None => Some(value.to_string()),
            }
        }
        (_, Value::String(text)) => Some(text.clone()),
        (_, Value::Bool(flag)) => Some(flag.to_string()),
        (_, Value::Number(number)) => Some(number.to_string()),
        // Unclassified lists and objects still need a single text value.
        (_, Value::Array(_) | Value::Object(_)) => Some(value.to_string()),
    };
    encoded.filter(|text| !text.is_empty())
}

/// Generic pass: encodes every present option on top of `base`.
pub fn encode_params(base: QueryParams, options: &Map<String, Value>) -> QueryParams {
    encode_params_excluding(base, options, &[])
}

pub fn encode_params_excluding(
    mut base: QueryParams,
    options: &Map<String, Value>,
    excluded: &[&str],
) -> QueryParams {
    for (key, value) in options {
        if excluded.contains(&key.as_str()) {
            continue;
        }
        if let Some(encoded) = encode_value(key, value) {
            base.insert(key.clone(), encoded);
        }
    }
    base
}

pub fn is_timeline_edge(edge: &str) -> bool {
    TIMELINE.contains(&edge)
}

/// Removes the timeline window keys from `options` and returns them.
pub fn split_time_window(options: &mut Map<String, Value>) -> Map<String, Value> {
    let mut window = Map::new();
    for key in TIMELINE_WINDOW_KEYS {
        if let Some(value) = options.remove(*key) {
            window.insert((*key).to_string(), value);
        }
    }
    window
}

/// Timeline windows accept a range and explicit bounds together; nothing is
/// dropped in favour of anything else.
pub fn encode_time_window(window: &Map<String, Value>) -> QueryParams {
    let mut params = QueryParams::new();
    for (key, value) in window {
        let encoded = match value {
            Value::Object(_) => Some(value.to_string()),
            other => encode_value(key, other),
        };
        if let Some(encoded) = encoded {
            params.insert(key.clone(), encoded);
        }
    }
    params
}

/// Parameters for a node lookup or an edge listing.
pub fn build_edge_params(
    base: QueryParams,
    edge: Option<&str>,
    options: &GraphOptions,
) -> QueryParams {
    let mut map = options.to_param_map();
    if !edge.is_some_and(is_timeline_edge) {
        return encode_params(base, &map);
    }
    let window = split_time_window(&mut map);
    let mut params = encode_params(base, &map);
    params.extend(encode_time_window(&window));
    params
}

/// Parameters for an `insights` query.
///
/// Precedence: an explicit `time_range`/`time_ranges` beats `since`/`until`,
/// and any of those four beats `date_preset`. `time_increment=all_days` is
/// the API default and is never sent. Boolean flags are sent only as `true`.
pub fn build_insights_params(base: QueryParams, options: &InsightsOptions) -> QueryParams {
    let map = options.to_param_map();
    let excluded: Vec<&str> = TIME_KEYS.iter().chain(BOOLEAN_FLAGS).copied().collect();
    let mut params = encode_params_excluding(base, &map, &excluded);

    let since = options.since.as_deref().filter(|s| !s.is_empty());
    let until = options.until.as_deref().filter(|s| !s.is_empty());
    let time_ranges = options.time_ranges.as_ref().filter(|r| !r.is_empty());
    let has_range = options.time_range.is_some() || time_ranges.is_some();

    if !has_range && since.is_none() && until.is_none() {
        if let Some(preset) = options.date_preset.as_deref().filter(|p| !p.is_empty()) {
            params.insert("date_preset".to_string(), preset.to_string());
        }
    }

    if let Some(range) = map.get("time_range") {
        params.insert("time_range".to_string(), range.to_string());
    }
    if let Some(ranges) = map.get("time_ranges").filter(|_| time_ranges.is_some()) {
        params.insert("time_ranges".to_string(), ranges.to_string());
    }

    if let Some(increment) = options.time_increment.as_ref() {
        let value = increment.as_param();
        if !value.is_empty() && value != "0" && value != ALL_DAYS {
            params.insert("time_increment".to_string(), value);
        }
    }

    if !has_range {
        if let Some(since) = since {
            params.insert("since".to_string(), since.to_string());
        }
        if let Some(until) = until {
            params.insert("until".to_string(), until.to_string());
        }
    }

    for flag in BOOLEAN_FLAGS {
        if map.get(*flag).and_then(Value::as_bool).unwrap_or(false) {
            params.insert((*flag).to_string(), "true".to_string());
        }
    }

    params
}
