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

use std::sync::Arc;

use jsonapi_model::JsonObject;
use serde_json::Value;

use super::callback::{BinaryObjectFn, BinaryValueFn, Callback, UnaryObjectFn, UnaryValueFn};

/// Determines which argument a single argument function receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackMode {
    /// Single argument functions receive the data being serialized.
    #[default]
    Data,
    /// Single argument functions receive the extra data passed to the serializer. This is
    /// used for the top level links and meta of a document.
    ExtraData,
}

/// Produces one entry of a links or meta object.
#[derive(Debug, Clone)]
pub enum Producer {
    Static(Value),
    Unary(Callback<UnaryValueFn>),
    Binary(Callback<BinaryValueFn>),
}

impl Producer {
    fn produce(&self, data: &Value, extra_data: &Value, mode: FallbackMode) -> Option<Value> {
        match self {
            Producer::Static(value) => Some(value.clone()),
            Producer::Unary(f) => match mode {
                FallbackMode::Data => f.get()(data),
                FallbackMode::ExtraData => f.get()(extra_data),
            },
            Producer::Binary(f) => f.get()(data, extra_data),
        }
    }
}

impl From<Value> for Producer {
    fn from(value: Value) -> Self {
        Producer::Static(value)
    }
}

/// The description of a links or meta object. This is either a list of named entries
/// (each a fixed value or computed) or a function that computes the whole object.
#[derive(Debug, Clone)]
pub enum OptionsValue {
    Fields(Vec<(String, Producer)>),
    Unary(Callback<UnaryObjectFn>),
    Binary(Callback<BinaryObjectFn>),
}

impl Default for OptionsValue {
    fn default() -> Self {
        OptionsValue::Fields(vec![])
    }
}

impl From<JsonObject> for OptionsValue {
    fn from(obj: JsonObject) -> Self {
        OptionsValue::Fields(
            obj.into_iter()
                .map(|(k, v)| (k, Producer::Static(v)))
                .collect(),
        )
    }
}

impl OptionsValue {
    /// Compute the whole object from the data alone (or the extra data, for top level
    /// options).
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(&Value) -> JsonObject + Send + Sync + 'static,
    {
        let f: Arc<UnaryObjectFn> = Arc::new(f);
        OptionsValue::Unary(f.into())
    }

    /// Compute the whole object from the data and the extra data.
    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> JsonObject + Send + Sync + 'static,
    {
        let f: Arc<BinaryObjectFn> = Arc::new(f);
        OptionsValue::Binary(f.into())
    }

    /// Add a fixed entry. If this value is a function, it is replaced by a list of fields.
    pub fn with_value(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_producer(key, Producer::Static(value.into()))
    }

    /// Add an entry computed from the data alone (or the extra data, for top level options).
    pub fn with_unary<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        let f: Arc<UnaryValueFn> = Arc::new(f);
        self.with_producer(key, Producer::Unary(f.into()))
    }

    /// Add an entry computed from the data and the extra data.
    pub fn with_binary<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Option<Value> + Send + Sync + 'static,
    {
        let f: Arc<BinaryValueFn> = Arc::new(f);
        self.with_producer(key, Producer::Binary(f.into()))
    }

    pub fn with_producer(self, key: impl Into<String>, producer: Producer) -> Self {
        let key = key.into();
        let mut fields = match self {
            OptionsValue::Fields(fields) => fields,
            _ => vec![],
        };
        match fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = producer,
            None => fields.push((key, producer)),
        }
        OptionsValue::Fields(fields)
    }

    pub fn is_function(&self) -> bool {
        !matches!(self, OptionsValue::Fields(_))
    }

    /// Evaluate the options against some data. Returns nothing if the result has no entries
    /// so that empty objects are never emitted.
    pub fn process(
        &self,
        data: &Value,
        extra_data: &Value,
        mode: FallbackMode,
    ) -> Option<JsonObject> {
        let processed = match self {
            OptionsValue::Fields(fields) => fields
                .iter()
                .filter_map(|(key, producer)| {
                    producer
                        .produce(data, extra_data, mode)
                        .map(|v| (key.clone(), v))
                })
                .collect(),
            OptionsValue::Unary(f) => match mode {
                FallbackMode::Data => f.get()(data),
                FallbackMode::ExtraData => f.get()(extra_data),
            },
            OptionsValue::Binary(f) => f.get()(data, extra_data),
        };
        if processed.is_empty() {
            None
        } else {
            Some(processed)
        }
    }
}
