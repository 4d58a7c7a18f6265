// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde_json::{Map, Number, Value};

/// Largest integer that an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Copy the named keys (those that are present) into a new map.
pub fn pick<S: AsRef<str>>(obj: &Map<String, Value>, keys: &[S]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|k| {
            let k = k.as_ref();
            obj.get(k).map(|v| (k.to_string(), v.clone()))
        })
        .collect()
}

/// Copy every entry except the named keys into a new map.
pub fn omit<S: AsRef<str>>(obj: &Map<String, Value>, keys: &[S]) -> Map<String, Value> {
    obj.iter()
        .filter(|(k, _)| !keys.iter().any(|o| o.as_ref() == k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// A value is empty if it is null, has no entries or is a scalar other than a non-empty
/// string.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
        Value::String(s) => s.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Object(obj) => obj.is_empty(),
    }
}

/// Whether the value counts as true in a boolean context: null, `false`, zero and the empty
/// string do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Render a value as a string in the loosely typed way identifiers are rendered on the wire:
/// numbers lose a trailing `.0`, arrays are joined with commas and objects are opaque.
pub fn to_js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                ow => to_js_string(ow),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
