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

mod attributes;
mod case;
mod document;
mod included;
mod relationships;
mod resource;


use jsonapi_model::JsonObject;
use jsonapi_utilities::format::CaseConverter;
use serde_json::{Map, Value};

pub use document::SerializeOptions;
pub use included::Included;

use crate::config::SerializerConfig;
use crate::error::ConfigError;
use crate::schema::{
    DynamicType, FallbackMode, OptionsValue, Overrides, SchemaOptions, SchemaRegistry,
    DEFAULT_SCHEMA,
};

/// The type of the resources being serialized or deserialized.
#[derive(Debug, Clone, Copy)]
pub enum ResourceType<'a> {
    /// A single registered type.
    Named(&'a str),
    /// Resources of mixed types, each resolved from its own data.
    Dynamic(&'a DynamicType),
}

impl<'a> From<&'a str> for ResourceType<'a> {
    fn from(name: &'a str) -> Self {
        ResourceType::Named(name)
    }
}

impl<'a> From<&'a String> for ResourceType<'a> {
    fn from(name: &'a String) -> Self {
        ResourceType::Named(name.as_str())
    }
}

impl<'a> From<&'a DynamicType> for ResourceType<'a> {
    fn from(dynamic: &'a DynamicType) -> Self {
        ResourceType::Dynamic(dynamic)
    }
}

/// Converts between plain JSON data and JSON:API documents, according to a registry of
/// schemas.
///
/// Schemas are registered up front with [`Serializer::register`] and friends. After that, a
/// serializer only needs a shared reference, so it can be shared between tasks. Independent
/// serializers (with independent registries) can coexist.
///
/// # Example
/// ```
/// use jsonapi::{Relationship, Serializer};
/// use serde_json::json;
///
/// let mut serializer = Serializer::new();
/// let article = serializer
///     .schema()
///     .with_relationship("author", Relationship::new("people"));
/// serializer.register("article", article).unwrap();
/// serializer.register("people", serializer.schema()).unwrap();
///
/// let doc = serializer
///     .serialize("article", &json!({ "id": 1, "title": "T", "author": 2 }))
///     .unwrap();
/// let doc = serde_json::to_value(&doc).unwrap();
/// assert_eq!(
///     doc["data"]["relationships"]["author"]["data"],
///     json!({ "type": "people", "id": "2" })
/// );
/// ```
#[derive(Debug)]
pub struct Serializer {
    config: SerializerConfig,
    registry: SchemaRegistry,
    converter: CaseConverter,
}

impl Default for Serializer {
    fn default() -> Self {
        Serializer::with_config(SerializerConfig::default())
    }
}

impl Serializer {
    pub fn new() -> Self {
        Serializer::default()
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        let converter = CaseConverter::new(config.convert_case_cache_size);
        Serializer {
            config,
            registry: SchemaRegistry::default(),
            converter,
        }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn case_converter(&self) -> &CaseConverter {
        &self.converter
    }

    /// New schema options, starting from the configured defaults.
    pub fn schema(&self) -> SchemaOptions {
        self.config.defaults.clone()
    }

    /// Register the default schema for a type.
    pub fn register(
        &mut self,
        resource_type: &str,
        options: SchemaOptions,
    ) -> Result<(), ConfigError> {
        self.register_schema(resource_type, DEFAULT_SCHEMA, options)
    }

    /// Register a named schema for a type.
    pub fn register_schema(
        &mut self,
        resource_type: &str,
        schema: &str,
        options: SchemaOptions,
    ) -> Result<(), ConfigError> {
        self.registry.insert(resource_type, schema, options)
    }

    /// Register a schema from a JSON description, applied over the configured defaults.
    pub fn register_value(
        &mut self,
        resource_type: &str,
        schema: Option<&str>,
        options: &Value,
    ) -> Result<(), ConfigError> {
        let options = self.schema().merge_value(options)?;
        self.register_schema(resource_type, schema.unwrap_or(DEFAULT_SCHEMA), options)
    }

    /// Evaluate link or meta options against some data.
    pub fn process_options_values(
        &self,
        values: &OptionsValue,
        data: &Value,
        extra_data: &Value,
        mode: FallbackMode,
    ) -> Option<JsonObject> {
        values.process(data, extra_data, mode)
    }
}

/// The state of a single serialization call.
pub(crate) struct Pass<'a> {
    serializer: &'a Serializer,
    extra_data: &'a Value,
    overrides: &'a Overrides,
    included: &'a mut Included,
}

impl<'a> Pass<'a> {
    pub(crate) fn new(
        serializer: &'a Serializer,
        extra_data: &'a Value,
        overrides: &'a Overrides,
        included: &'a mut Included,
    ) -> Self {
        Pass {
            serializer,
            extra_data,
            overrides,
            included,
        }
    }
}

pub(crate) fn empty_object() -> Value {
    Value::Object(Map::new())
}
