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

use std::collections::BTreeMap;

use jsonapi_model::{Linkage, RelationshipData, RelationshipObject};
use jsonapi_utilities::path::{self, is_empty, is_truthy, to_js_string};
use serde_json::Value;

use super::{Included, Pass, Serializer};
use crate::error::ResolutionError;
use crate::schema::{
    overridden, FallbackMode, Overrides, Relationship, RelationshipType, SchemaOptions,
};

impl<'a> Pass<'a> {
    /// Serialize every declared relationship of a resource. Relationships with no links, meta
    /// or data are left out.
    pub(crate) fn relationships(
        &mut self,
        data: &Value,
        options: &SchemaOptions,
    ) -> Result<Option<BTreeMap<String, RelationshipObject>>, ResolutionError> {
        let mut serialized = BTreeMap::new();
        for (name, relationship) in &options.relationships {
            let object = self.relationship_object(relationship, name, data)?;
            if !object.is_empty() {
                let key = match options.convert_case {
                    Some(convention) => self.serializer.convert_key(name, convention),
                    None => name.clone(),
                };
                serialized.insert(key, object);
            }
        }
        Ok(if serialized.is_empty() {
            None
        } else {
            Some(serialized)
        })
    }

    fn relationship_object(
        &mut self,
        relationship: &Relationship,
        name: &str,
        data: &Value,
    ) -> Result<RelationshipObject, ResolutionError> {
        let source_key = match &relationship.alternative_key {
            Some(alternative) if !data.get(name).is_some_and(is_truthy) => alternative.as_str(),
            _ => name,
        };
        let extra_data = self.extra_data;
        let links = relationship
            .links
            .process(data, extra_data, FallbackMode::Data);
        let meta = relationship
            .meta
            .process(data, extra_data, FallbackMode::Data);
        let linkage = self.relationship(
            &relationship.relationship_type,
            &relationship.schema,
            path::get(data, source_key),
            data,
        )?;
        Ok(RelationshipObject {
            links,
            meta,
            data: linkage,
        })
    }

    /// Serialize the linkage data of a relationship. Absent data stays absent, null and empty
    /// objects become null and arrays are serialized element by element.
    pub(crate) fn relationship(
        &mut self,
        relationship_type: &RelationshipType,
        schema: &str,
        value: Option<&Value>,
        parent: &Value,
    ) -> Result<Option<RelationshipData>, ResolutionError> {
        let Some(value) = value else {
            return Ok(None);
        };
        match value {
            Value::Null => Ok(Some(RelationshipData::Null)),
            Value::Object(_) if is_empty(value) => Ok(Some(RelationshipData::Null)),
            Value::Array(items) => {
                let mut linkages = Vec::with_capacity(items.len());
                for item in items {
                    match self.relationship(relationship_type, schema, Some(item), parent)? {
                        Some(RelationshipData::One(linkage)) => linkages.push(linkage),
                        Some(RelationshipData::Many(many)) => linkages.extend(many),
                        _ => {}
                    }
                }
                Ok(Some(RelationshipData::Many(linkages)))
            }
            _ => {
                let linkage = self.linkage(relationship_type, schema, value, parent)?;
                Ok(Some(RelationshipData::One(linkage)))
            }
        }
    }

    /// Produce the linkage for one related item. A bare identifier becomes the identifier of
    /// the linkage. An object is serialized as a resource and included in the document if it
    /// has an identifier and at least one attribute.
    fn linkage(
        &mut self,
        relationship_type: &RelationshipType,
        schema: &str,
        value: &Value,
        parent: &Value,
    ) -> Result<Linkage, ResolutionError> {
        let resource_type = relationship_type
            .resolve(value, parent)
            .ok_or_else(|| ResolutionError::UnresolvableRelationshipType(value.to_string()))?;
        let serializer = self.serializer;
        let base = serializer.registry.resolve(&resource_type, schema)?;
        let options = overridden(base, self.overrides, &resource_type);

        if value.is_object() {
            let nested = self.object(&resource_type, value, &options)?;
            let linkage = nested.linkage();
            if nested.id.is_some() && nested.has_attributes() {
                self.included.insert(nested);
            }
            Ok(linkage)
        } else {
            Ok(Linkage {
                resource_type,
                id: Some(to_js_string(value)),
                meta: None,
            })
        }
    }
}

impl Serializer {
    /// Serialize the linkage data of one relationship of `parent`, accumulating related
    /// resources into `included`.
    pub fn serialize_relationship(
        &self,
        relationship: &Relationship,
        value: Option<&Value>,
        parent: &Value,
        included: &mut Included,
        extra_data: &Value,
        overrides: &Overrides,
    ) -> Result<Option<RelationshipData>, ResolutionError> {
        Pass::new(self, extra_data, overrides, included).relationship(
            &relationship.relationship_type,
            &relationship.schema,
            value,
            parent,
        )
    }
}
