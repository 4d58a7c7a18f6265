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

use serde_json::{Map, Value};

/// Iterator over the non-empty segments of a path. Any run of `.`, `,`, `[` or `]` separates
/// two segments.
pub struct PathSegments<'a> {
    inner: std::str::Split<'a, fn(char) -> bool>,
}

fn is_separator(c: char) -> bool {
    matches!(c, '.' | ',' | '[' | ']')
}

impl<'a> PathSegments<'a> {
    pub fn new(path: &'a str) -> Self {
        PathSegments {
            inner: path.split(is_separator as fn(char) -> bool),
        }
    }
}

impl<'a> Iterator for PathSegments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|s| !s.is_empty())
    }
}

fn as_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        segment.parse().ok()
    }
}

fn select<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(obj) => obj.get(segment),
        Value::Array(arr) => as_index(segment).and_then(|i| arr.get(i)),
        _ => None,
    }
}

/// Read the value at a path. An empty path selects the root.
pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    PathSegments::new(path).try_fold(value, select)
}

fn empty_container(next_segment: &str) -> Value {
    if as_index(next_segment).is_some() {
        Value::Array(vec![])
    } else {
        Value::Object(Map::new())
    }
}

fn child_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(obj) => Some(obj.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(arr) => {
            let idx = as_index(segment)?;
            if idx == arr.len() {
                arr.push(Value::Null);
            }
            arr.get_mut(idx)
        }
        _ => None,
    }
}

/// Write a value at a path, creating intermediate containers as required. An intermediate is
/// created as an array when the following segment is a non-negative integer and as an object
/// otherwise. Existing intermediates that are not containers are replaced.
///
/// An array only grows by appending: an index may be at most the current length of the array.
///
/// Returns `false` if the path is empty, the root is not a container or an index is past the
/// end of an array. The target is left unchanged in the first two cases; in the last, any
/// intermediate containers created before the bad index remain.
pub fn set(target: &mut Value, path: &str, new_value: Value) -> bool {
    let segments = PathSegments::new(path).collect::<Vec<_>>();
    let Some((last, init)) = segments.split_last() else {
        return false;
    };
    if !(target.is_object() || target.is_array()) {
        return false;
    }
    let mut current = target;
    for (i, segment) in init.iter().enumerate() {
        let next_segment = segments[i + 1];
        let Some(child) = child_mut(current, segment) else {
            return false;
        };
        if !(child.is_object() || child.is_array()) {
            *child = empty_container(next_segment);
        }
        current = child;
    }
    match child_mut(current, last) {
        Some(slot) => {
            *slot = new_value;
            true
        }
        None => false,
    }
}
