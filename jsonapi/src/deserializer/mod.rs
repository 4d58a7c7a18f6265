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


#[cfg(test)]
mod tests;

use std::borrow::Cow;

use jsonapi_model::{
    Document, JsonObject, Linkage, PrimaryData, RelationshipData, ResourceObject,
};
use jsonapi_utilities::path::{omit, pick, set};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ResolutionError, SerializerError};
use crate::schema::{Relationship, SchemaOptions, DEFAULT_SCHEMA};
use crate::serializer::{empty_object, ResourceType, Serializer};

impl Serializer {
    /// Deserialize the primary data of a document with the default schema for its type.
    pub fn deserialize<'a, T>(
        &self,
        resource_type: T,
        document: &Document,
    ) -> Result<Value, SerializerError>
    where
        T: Into<ResourceType<'a>>,
    {
        self.deserialize_with_schema(resource_type, document, DEFAULT_SCHEMA)
    }

    /// Deserialize the primary data of a document into plain data. A document with no primary
    /// data (or null primary data) deserializes to an empty object. For a dynamic type, the
    /// named schema is used for every resolved type.
    pub fn deserialize_with_schema<'a, T>(
        &self,
        resource_type: T,
        document: &Document,
        schema: &str,
    ) -> Result<Value, SerializerError>
    where
        T: Into<ResourceType<'a>>,
    {
        let resource_type = resource_type.into();
        self.check_deserializable(resource_type, schema)?;
        let included = document.included.as_deref();
        match &document.data {
            None | Some(PrimaryData::Null) => Ok(empty_object()),
            Some(PrimaryData::One(resource)) => {
                self.deserialize_resource(resource_type, resource, schema, included, &[])
            }
            Some(PrimaryData::Many(resources)) => resources
                .iter()
                .map(|resource| {
                    self.deserialize_resource(resource_type, resource, schema, included, &[])
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }

    /// Deserialize with the default schema, yielding to the runtime between resources.
    pub async fn deserialize_async<'a, T>(
        &self,
        resource_type: T,
        document: &Document,
    ) -> Result<Value, SerializerError>
    where
        T: Into<ResourceType<'a>>,
    {
        self.deserialize_with_schema_async(resource_type, document, DEFAULT_SCHEMA)
            .await
    }

    /// As [`Serializer::deserialize_with_schema`] but yielding to the runtime before each
    /// resource of the primary data. The first error stops any further resources from being
    /// deserialized.
    pub async fn deserialize_with_schema_async<'a, T>(
        &self,
        resource_type: T,
        document: &Document,
        schema: &str,
    ) -> Result<Value, SerializerError>
    where
        T: Into<ResourceType<'a>>,
    {
        let resource_type = resource_type.into();
        self.check_deserializable(resource_type, schema)?;
        let included = document.included.as_deref();
        let resources = match &document.data {
            None | Some(PrimaryData::Null) => return Ok(empty_object()),
            Some(data) => data.resources(),
        };
        let mut output = Vec::with_capacity(resources.len());
        for (i, resource) in resources.iter().enumerate() {
            tokio::task::yield_now().await;
            trace!(index = i, total = resources.len(), "Deserializing element.");
            output.push(self.deserialize_resource(resource_type, resource, schema, included, &[])?);
        }
        if matches!(document.data, Some(PrimaryData::Many(_))) {
            Ok(Value::Array(output))
        } else {
            Ok(output.pop().unwrap_or_else(empty_object))
        }
    }

    /// Deserialize a document and convert the result into a typed value.
    pub fn deserialize_into<'a, T, R>(
        &self,
        resource_type: T,
        document: &Document,
    ) -> Result<R, SerializerError>
    where
        T: Into<ResourceType<'a>>,
        R: DeserializeOwned,
    {
        let value = self.deserialize(resource_type, document)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Deserialize a single resource.
    ///
    /// # Arguments
    /// * `resource_type` - The type of the resource or a dynamic type to resolve it from the
    /// resource.
    /// * `resource` - The resource to deserialize.
    /// * `schema` - The name of the schema to use.
    /// * `included` - The included resources of the document. When present, related resources
    /// are resolved from these rather than reduced to their identifiers.
    /// * `lineage` - The `type-id` identifiers of the resources currently being deserialized,
    /// further up the graph. A relationship back to one of these is reduced to its identifier.
    pub fn deserialize_resource(
        &self,
        resource_type: ResourceType<'_>,
        resource: &ResourceObject,
        schema: &str,
        included: Option<&[ResourceObject]>,
        lineage: &[String],
    ) -> Result<Value, SerializerError> {
        let resource_type: Cow<'_, str> = match resource_type {
            ResourceType::Named(name) => Cow::Borrowed(name),
            ResourceType::Dynamic(dynamic) => {
                let data = serde_json::to_value(resource)?;
                let name = dynamic
                    .resolver
                    .resolve(&data)
                    .ok_or_else(|| ResolutionError::UnresolvableType(data.to_string()))?;
                Cow::Owned(name)
            }
        };
        let options = self.registry().resolve(&resource_type, schema)?;

        let mut output = JsonObject::new();
        if let Some(id) = &resource.id {
            output.insert(options.id.clone(), Value::String(id.clone()));
        }
        if let Some(attributes) = &resource.attributes {
            output.extend(deserialize_attributes(attributes, options));
        }
        let mut output = Value::Object(output);

        if let Some(relationships) = &resource.relationships {
            for (wire_key, relationship) in relationships {
                let Some(data) = &relationship.data else {
                    continue;
                };
                let key = match options.unconvert_case {
                    Some(convention) => self.convert_key(wire_key, convention),
                    None => wire_key.clone(),
                };
                self.deserialize_relationship(&mut output, &key, data, options, included, lineage)?;
            }
        }

        if let Some(convention) = options.unconvert_case {
            output = self.convert_case(output, convention);
        }
        if let Value::Object(obj) = &mut output {
            if let Some(links) = &resource.links {
                obj.insert("links".to_string(), Value::Object(links.clone()));
            }
            if let Some(meta) = &resource.meta {
                obj.insert("meta".to_string(), Value::Object(meta.clone()));
            }
        }

        Ok(match &options.after_deserialize {
            Some(f) => f.get()(output),
            None => output,
        })
    }

    fn check_deserializable(
        &self,
        resource_type: ResourceType<'_>,
        schema: &str,
    ) -> Result<(), SerializerError> {
        match resource_type {
            ResourceType::Named(name) => {
                self.registry().resolve(name, schema)?;
            }
            ResourceType::Dynamic(dynamic) => dynamic.validate()?,
        }
        Ok(())
    }

    fn deserialize_relationship(
        &self,
        output: &mut Value,
        key: &str,
        data: &RelationshipData,
        options: &SchemaOptions,
        included: Option<&[ResourceObject]>,
        lineage: &[String],
    ) -> Result<(), SerializerError> {
        let relationship = options.relationship(key);
        let alternative_key = relationship.and_then(|r| r.alternative_key.as_deref());

        if let RelationshipData::Null = data {
            write_relationship(output, key, alternative_key, Value::Null);
            return Ok(());
        }

        if alternative_key.is_some() || included.is_none() {
            let value = map_linkages(data, |linkage| {
                Ok(Relationship::deserialize_linkage(relationship, linkage))
            })?;
            write_relationship(output, key, alternative_key, value);
        }

        if let Some(included) = included {
            let value = map_linkages(data, |linkage| {
                self.deserialize_included(linkage, relationship, included, lineage)
            })?;
            write_relationship(output, key, None, value);
        }
        Ok(())
    }

    /// Resolve a related resource from the included resources of a document. Falls back to
    /// the identifier (or the custom function of the relationship) if the resource was not
    /// included or is already being deserialized further up the graph.
    fn deserialize_included(
        &self,
        linkage: &Linkage,
        relationship: Option<&Relationship>,
        included: &[ResourceObject],
        lineage: &[String],
    ) -> Result<Value, SerializerError> {
        let identifier = linkage.identifier();
        if lineage.contains(&identifier) {
            debug!(identifier = %identifier, "Circular relationship. Using the identifier only.");
            return Ok(Relationship::deserialize_linkage(relationship, linkage));
        }
        let found = included.iter().find(|resource| {
            resource.resource_type == linkage.resource_type && resource.id == linkage.id
        });
        match found {
            Some(resource) => {
                let mut lineage = lineage.to_vec();
                lineage.push(identifier);
                let schema = relationship
                    .map(|r| r.schema.as_str())
                    .unwrap_or(DEFAULT_SCHEMA);
                self.deserialize_resource(
                    ResourceType::Named(&linkage.resource_type),
                    resource,
                    schema,
                    Some(included),
                    &lineage,
                )
            }
            None => {
                trace!(identifier = %identifier, "Related resource was not included.");
                Ok(Relationship::deserialize_linkage(relationship, linkage))
            }
        }
    }
}

/// Relationship names come from the document and are used as plain keys. Only an alternative
/// key from the schema is treated as a path.
fn write_relationship(
    output: &mut Value,
    key: &str,
    alternative_key: Option<&str>,
    value: Value,
) {
    match alternative_key {
        Some(path) => {
            set(output, path, value);
        }
        None => {
            if let Value::Object(obj) = output {
                obj.insert(key.to_string(), value);
            }
        }
    }
}

fn deserialize_attributes(attributes: &JsonObject, options: &SchemaOptions) -> JsonObject {
    let attributes = if options.whitelist_on_deserialize.is_empty() {
        Cow::Borrowed(attributes)
    } else {
        Cow::Owned(pick(attributes, &options.whitelist_on_deserialize))
    };
    if options.blacklist_on_deserialize.is_empty() {
        attributes.into_owned()
    } else {
        omit(&attributes, &options.blacklist_on_deserialize)
    }
}

fn map_linkages<F>(data: &RelationshipData, mut f: F) -> Result<Value, SerializerError>
where
    F: FnMut(&Linkage) -> Result<Value, SerializerError>,
{
    match data {
        RelationshipData::Many(linkages) => linkages
            .iter()
            .map(&mut f)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        RelationshipData::One(linkage) => f(linkage),
        RelationshipData::Null => Ok(Value::Null),
    }
}
