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

mod callback;
mod dynamic;
mod options;
mod overrides;
mod parse;
mod registry;
mod relationship;


use std::collections::HashSet;
use std::sync::Arc;

use jsonapi_model::JsonObject;
use jsonapi_utilities::format::CaseConvention;
use serde_json::Value;

pub use callback::{
    AfterDeserializeFn, BeforeSerializeFn, BinaryObjectFn, BinaryValueFn, Callback, LinkageFn,
    RelationshipTypeFn, TypeResolverFn, UnaryObjectFn, UnaryValueFn,
};
pub use dynamic::{DynamicType, TypeResolver};
pub use options::{FallbackMode, OptionsValue, Producer};
pub(crate) use overrides::overridden;
pub use overrides::{Overrides, SchemaOverride};
pub use registry::SchemaRegistry;
pub use relationship::{Relationship, RelationshipType};

use crate::error::ConfigError;

/// The name of the schema used when none is specified.
pub const DEFAULT_SCHEMA: &str = "default";
/// The name of the identifier field when none is specified.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Options describing how one resource type is serialized and deserialized.
#[derive(Debug, Clone)]
pub struct SchemaOptions {
    /// The field of the data that holds the identifier.
    pub id: String,
    /// Fields that are never serialized as attributes.
    pub blacklist: Vec<String>,
    /// If non-empty, only these fields may be serialized as attributes.
    pub whitelist: Vec<String>,
    /// Attributes that are dropped when deserializing.
    pub blacklist_on_deserialize: Vec<String>,
    /// If non-empty, only these attributes are kept when deserializing.
    pub whitelist_on_deserialize: Vec<String>,
    /// Links for each resource.
    pub links: OptionsValue,
    /// Meta for each resource.
    pub meta: OptionsValue,
    /// Links for the document, when this is the primary type.
    pub top_level_links: OptionsValue,
    /// Meta for the document, when this is the primary type.
    pub top_level_meta: OptionsValue,
    /// Relationships, in declaration order.
    pub relationships: Vec<(String, Relationship)>,
    /// Convention for the keys of attributes and relationships when serializing.
    pub convert_case: Option<CaseConvention>,
    /// Convention for the keys of deserialized data.
    pub unconvert_case: Option<CaseConvention>,
    /// Whether documents include the `jsonapi` version object.
    pub jsonapi_object: bool,
    pub before_serialize: Option<Callback<BeforeSerializeFn>>,
    pub after_deserialize: Option<Callback<AfterDeserializeFn>>,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        SchemaOptions {
            id: DEFAULT_ID_FIELD.to_string(),
            blacklist: vec![],
            whitelist: vec![],
            blacklist_on_deserialize: vec![],
            whitelist_on_deserialize: vec![],
            links: OptionsValue::default(),
            meta: OptionsValue::default(),
            top_level_links: OptionsValue::default(),
            top_level_meta: OptionsValue::default(),
            relationships: vec![],
            convert_case: None,
            unconvert_case: None,
            jsonapi_object: true,
            before_serialize: None,
            after_deserialize: None,
        }
    }
}

fn strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl SchemaOptions {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_blacklist<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = strings(fields);
        self
    }

    pub fn with_whitelist<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = strings(fields);
        self
    }

    pub fn with_blacklist_on_deserialize<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist_on_deserialize = strings(fields);
        self
    }

    pub fn with_whitelist_on_deserialize<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist_on_deserialize = strings(fields);
        self
    }

    pub fn with_links(mut self, links: OptionsValue) -> Self {
        self.links = links;
        self
    }

    pub fn with_meta(mut self, meta: OptionsValue) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_top_level_links(mut self, links: OptionsValue) -> Self {
        self.top_level_links = links;
        self
    }

    pub fn with_top_level_meta(mut self, meta: OptionsValue) -> Self {
        self.top_level_meta = meta;
        self
    }

    /// Declare a relationship. Declaring the same name again replaces the earlier declaration
    /// in place.
    pub fn with_relationship(
        mut self,
        name: impl Into<String>,
        relationship: Relationship,
    ) -> Self {
        let name = name.into();
        match self.relationships.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = relationship,
            None => self.relationships.push((name, relationship)),
        }
        self
    }

    pub fn with_convert_case(mut self, convention: CaseConvention) -> Self {
        self.convert_case = Some(convention);
        self
    }

    pub fn with_unconvert_case(mut self, convention: CaseConvention) -> Self {
        self.unconvert_case = Some(convention);
        self
    }

    pub fn with_jsonapi_object(mut self, enabled: bool) -> Self {
        self.jsonapi_object = enabled;
        self
    }

    pub fn with_before_serialize<F>(mut self, f: F) -> Self
    where
        F: Fn(&JsonObject) -> JsonObject + Send + Sync + 'static,
    {
        let f: Arc<BeforeSerializeFn> = Arc::new(f);
        self.before_serialize = Some(f.into());
        self
    }

    pub fn with_after_deserialize<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        let f: Arc<AfterDeserializeFn> = Arc::new(f);
        self.after_deserialize = Some(f.into());
        self
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
    }

    /// Every field that is never serialized as an attribute: the identifier, the relationships
    /// (and their alternative keys) and the blacklist.
    pub fn excluded_attributes(&self) -> Vec<&str> {
        let relationships = self.relationships.iter().map(|(name, _)| name.as_str());
        let alternatives = self
            .relationships
            .iter()
            .filter_map(|(_, r)| r.alternative_key.as_deref());
        std::iter::once(self.id.as_str())
            .chain(relationships)
            .chain(alternatives)
            .chain(self.blacklist.iter().map(String::as_str))
            .collect()
    }

    /// Check the options for problems that cannot be expressed by the types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::invalid("id", "a non-empty string"));
        }
        let mut seen = HashSet::new();
        for (name, relationship) in &self.relationships {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateRelationship(name.clone()));
            }
            if let RelationshipType::Fixed(target) = &relationship.relationship_type {
                if target.is_empty() {
                    return Err(ConfigError::MissingRelationshipOption {
                        relationship: name.clone(),
                        option: "type",
                    });
                }
            }
            if relationship.schema.is_empty() {
                return Err(ConfigError::invalid_relationship(
                    name.as_str(),
                    "schema",
                    "a non-empty string",
                ));
            }
            if matches!(relationship.alternative_key.as_deref(), Some("")) {
                return Err(ConfigError::invalid_relationship(
                    name.as_str(),
                    "alternativeKey",
                    "a non-empty string",
                ));
            }
        }
        Ok(())
    }
}
