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

use jsonapi_model::{PrimaryData, ResourceObject};
use jsonapi_utilities::path::{is_empty, is_truthy, to_js_string};
use serde_json::Value;

use super::{Included, Pass, Serializer};
use crate::error::ResolutionError;
use crate::schema::{
    overridden, DynamicType, FallbackMode, Overrides, SchemaOptions, DEFAULT_SCHEMA,
};

/// Collect the results for the elements of an array. Arrays are flattened and empty elements
/// are dropped.
pub(crate) fn push_element(resources: &mut Vec<ResourceObject>, element: PrimaryData) {
    match element {
        PrimaryData::One(resource) => resources.push(*resource),
        PrimaryData::Many(many) => resources.extend(many),
        PrimaryData::Null => {}
    }
}

impl<'a> Pass<'a> {
    /// Serialize data of a fixed type. Empty objects and anything that is not an object or an
    /// array serialize as null.
    pub(crate) fn resource(
        &mut self,
        resource_type: &str,
        data: &Value,
        options: &SchemaOptions,
    ) -> Result<PrimaryData, ResolutionError> {
        match data {
            Value::Array(items) => {
                let mut resources = Vec::with_capacity(items.len());
                for item in items {
                    let element = self.resource(resource_type, item, options)?;
                    push_element(&mut resources, element);
                }
                Ok(PrimaryData::Many(resources))
            }
            Value::Object(_) if !is_empty(data) => {
                Ok(self.object(resource_type, data, options)?.into())
            }
            _ => Ok(PrimaryData::Null),
        }
    }

    /// Serialize data where the type of each resource is resolved from the resource itself.
    pub(crate) fn mixed(
        &mut self,
        dynamic: &DynamicType,
        data: &Value,
    ) -> Result<PrimaryData, ResolutionError> {
        match data {
            Value::Array(items) => {
                let mut resources = Vec::with_capacity(items.len());
                for item in items {
                    let element = self.mixed(dynamic, item)?;
                    push_element(&mut resources, element);
                }
                Ok(PrimaryData::Many(resources))
            }
            Value::Object(_) if !is_empty(data) => {
                let resource_type = dynamic
                    .resolver
                    .resolve(data)
                    .ok_or_else(|| ResolutionError::UnresolvableType(data.to_string()))?;
                let serializer = self.serializer;
                let base = serializer.registry.resolve(&resource_type, DEFAULT_SCHEMA)?;
                let options = overridden(base, self.overrides, &resource_type);
                Ok(self.object(&resource_type, data, &options)?.into())
            }
            _ => Ok(PrimaryData::Null),
        }
    }

    /// Serialize a single, non-empty, object.
    pub(crate) fn object(
        &mut self,
        resource_type: &str,
        data: &Value,
        options: &SchemaOptions,
    ) -> Result<ResourceObject, ResolutionError> {
        let reshaped;
        let data = match (&options.before_serialize, data.as_object()) {
            (Some(f), Some(obj)) => {
                reshaped = Value::Object(f.get()(obj));
                &reshaped
            }
            _ => data,
        };
        let id = data
            .get(options.id.as_str())
            .filter(|id| is_truthy(id))
            .map(to_js_string);
        let attributes = data
            .as_object()
            .and_then(|obj| self.serializer.serialize_attributes(obj, options));
        let relationships = self.relationships(data, options)?;
        let extra_data = self.extra_data;
        Ok(ResourceObject {
            resource_type: resource_type.to_string(),
            id,
            attributes,
            relationships,
            meta: options.meta.process(data, extra_data, FallbackMode::Data),
            links: options.links.process(data, extra_data, FallbackMode::Data),
        })
    }
}

impl Serializer {
    /// Serialize resource data of a fixed type with the given options, accumulating related
    /// resources into `included`.
    pub fn serialize_resource(
        &self,
        resource_type: &str,
        data: &Value,
        options: &SchemaOptions,
        included: &mut Included,
        extra_data: &Value,
        overrides: &Overrides,
    ) -> Result<PrimaryData, ResolutionError> {
        Pass::new(self, extra_data, overrides, included).resource(resource_type, data, options)
    }

    /// Serialize resource data where the type of each resource is resolved from its data. Each
    /// resource uses the default schema for its type.
    pub fn serialize_mixed_resource(
        &self,
        dynamic: &DynamicType,
        data: &Value,
        included: &mut Included,
        extra_data: &Value,
        overrides: &Overrides,
    ) -> Result<PrimaryData, ResolutionError> {
        Pass::new(self, extra_data, overrides, included).mixed(dynamic, data)
    }
}
