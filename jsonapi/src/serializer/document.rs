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

use std::borrow::Cow;

use jsonapi_model::{Document, JsonApiObject, PrimaryData};
use serde_json::Value;
use tracing::trace;

use super::resource::push_element;
use super::{empty_object, Included, Pass, ResourceType, Serializer};
use crate::error::SerializerError;
use crate::schema::{
    overridden, DynamicType, FallbackMode, OptionsValue, Overrides, SchemaOptions,
    SchemaOverride, DEFAULT_SCHEMA,
};

/// Optional parameters for serializing a document.
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// The schema to use for a fixed type. Defaults to `"default"`.
    pub schema: Option<String>,
    /// Passed to links and meta functions. Defaults to an empty object.
    pub extra_data: Value,
    /// Leave out the primary data, producing a document with only links and meta.
    pub exclude_data: bool,
    /// Options replacing the registered options for particular types.
    pub overrides: Overrides,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            schema: None,
            extra_data: empty_object(),
            exclude_data: false,
            overrides: Overrides::default(),
        }
    }
}

impl SerializeOptions {
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_extra_data(mut self, extra_data: Value) -> Self {
        self.extra_data = extra_data;
        self
    }

    pub fn with_exclude_data(mut self, exclude_data: bool) -> Self {
        self.exclude_data = exclude_data;
        self
    }

    pub fn with_override(mut self, resource_type: impl Into<String>, o: SchemaOverride) -> Self {
        self.overrides.insert(resource_type.into(), o);
        self
    }

    fn schema_name(&self) -> &str {
        self.schema.as_deref().unwrap_or(DEFAULT_SCHEMA)
    }
}

/// The options governing the top level of a document.
enum Envelope<'a> {
    Fixed(&'a str, Cow<'a, SchemaOptions>),
    Dynamic(&'a DynamicType),
}

impl<'a> Envelope<'a> {
    fn resolve(
        serializer: &'a Serializer,
        resource_type: ResourceType<'a>,
        options: &'a SerializeOptions,
    ) -> Result<Self, SerializerError> {
        match resource_type {
            ResourceType::Named(name) => {
                let base = serializer.registry.resolve(name, options.schema_name())?;
                Ok(Envelope::Fixed(name, overridden(base, &options.overrides, name)))
            }
            ResourceType::Dynamic(dynamic) => {
                dynamic.validate()?;
                Ok(Envelope::Dynamic(dynamic))
            }
        }
    }

    fn top_level_meta(&self) -> &OptionsValue {
        match self {
            Envelope::Fixed(_, options) => &options.top_level_meta,
            Envelope::Dynamic(dynamic) => &dynamic.top_level_meta,
        }
    }

    fn top_level_links(&self) -> &OptionsValue {
        match self {
            Envelope::Fixed(_, options) => &options.top_level_links,
            Envelope::Dynamic(dynamic) => &dynamic.top_level_links,
        }
    }

    fn jsonapi_object(&self) -> bool {
        match self {
            Envelope::Fixed(_, options) => options.jsonapi_object,
            Envelope::Dynamic(dynamic) => dynamic.jsonapi_object,
        }
    }

    fn serialize_element(
        &self,
        pass: &mut Pass<'_>,
        data: &Value,
    ) -> Result<PrimaryData, SerializerError> {
        let result = match self {
            Envelope::Fixed(name, options) => pass.resource(name, data, options)?,
            Envelope::Dynamic(dynamic) => pass.mixed(dynamic, data)?,
        };
        Ok(result)
    }

    fn assemble(
        &self,
        data: &Value,
        options: &SerializeOptions,
        primary: Option<PrimaryData>,
        included: Included,
    ) -> Document {
        let extra_data = &options.extra_data;
        Document {
            jsonapi: self.jsonapi_object().then(JsonApiObject::default),
            meta: self
                .top_level_meta()
                .process(data, extra_data, FallbackMode::ExtraData),
            links: self
                .top_level_links()
                .process(data, extra_data, FallbackMode::ExtraData),
            data: primary,
            included: included.into_resources(),
        }
    }
}

impl Serializer {
    /// Serialize data with the default schema for its type.
    pub fn serialize<'a, T>(
        &self,
        resource_type: T,
        data: &Value,
    ) -> Result<Document, SerializerError>
    where
        T: Into<ResourceType<'a>>,
    {
        self.serialize_with(resource_type, data, &SerializeOptions::default())
    }

    /// Serialize data with the default schema for its type, passing extra data to the links
    /// and meta functions.
    pub fn serialize_with_extra_data<'a, T>(
        &self,
        resource_type: T,
        data: &Value,
        extra_data: &Value,
    ) -> Result<Document, SerializerError>
    where
        T: Into<ResourceType<'a>>,
    {
        let options = SerializeOptions::default().with_extra_data(extra_data.clone());
        self.serialize_with(resource_type, data, &options)
    }

    /// Serialize data into a document.
    ///
    /// # Arguments
    /// * `resource_type` - A registered type name or a dynamic type.
    /// * `data` - A resource or an array of resources.
    /// * `options` - The schema, extra data and overrides to use.
    pub fn serialize_with<'a, T>(
        &self,
        resource_type: T,
        data: &Value,
        options: &SerializeOptions,
    ) -> Result<Document, SerializerError>
    where
        T: Into<ResourceType<'a>>,
    {
        let envelope = Envelope::resolve(self, resource_type.into(), options)?;
        let mut included = Included::default();
        let primary = if options.exclude_data {
            None
        } else {
            let mut pass = Pass::new(self, &options.extra_data, &options.overrides, &mut included);
            Some(envelope.serialize_element(&mut pass, data)?)
        };
        Ok(envelope.assemble(data, options, primary, included))
    }

    /// Serialize data with the default schema for its type, yielding to the runtime between
    /// the elements of an array.
    pub async fn serialize_async<'a, T>(
        &self,
        resource_type: T,
        data: &Value,
    ) -> Result<Document, SerializerError>
    where
        T: Into<ResourceType<'a>>,
    {
        self.serialize_with_async(resource_type, data, &SerializeOptions::default())
            .await
    }

    /// As [`Serializer::serialize_with`] but yielding to the runtime before each element of
    /// an array is serialized. The first error stops any further elements from being
    /// serialized.
    pub async fn serialize_with_async<'a, T>(
        &self,
        resource_type: T,
        data: &Value,
        options: &SerializeOptions,
    ) -> Result<Document, SerializerError>
    where
        T: Into<ResourceType<'a>>,
    {
        let envelope = Envelope::resolve(self, resource_type.into(), options)?;
        let mut included = Included::default();
        let primary = if options.exclude_data {
            None
        } else {
            let elements = match data {
                Value::Array(items) => items.as_slice(),
                ow => std::slice::from_ref(ow),
            };
            let mut resources = Vec::with_capacity(elements.len());
            let mut pass = Pass::new(self, &options.extra_data, &options.overrides, &mut included);
            for (i, element) in elements.iter().enumerate() {
                tokio::task::yield_now().await;
                trace!(index = i, total = elements.len(), "Serializing element.");
                let serialized = envelope.serialize_element(&mut pass, element)?;
                push_element(&mut resources, serialized);
            }
            Some(if data.is_array() {
                PrimaryData::Many(resources)
            } else {
                resources.into_iter().next().into()
            })
        };
        Ok(envelope.assemble(data, options, primary, included))
    }
}
