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

use jsonapi_model::Linkage;
use serde_json::Value;

use super::callback::{Callback, LinkageFn, RelationshipTypeFn};
use super::{OptionsValue, DEFAULT_SCHEMA};

/// The type of the resources at the other end of a relationship.
#[derive(Debug, Clone)]
pub enum RelationshipType {
    Fixed(String),
    /// Computed from `(related, parent)` for each related item.
    Resolver(Callback<RelationshipTypeFn>),
}

impl RelationshipType {
    pub fn resolver<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Option<String> + Send + Sync + 'static,
    {
        let f: Arc<RelationshipTypeFn> = Arc::new(f);
        RelationshipType::Resolver(f.into())
    }

    /// Resolve the type for one related item. Empty names are treated as unresolved.
    pub fn resolve(&self, related: &Value, parent: &Value) -> Option<String> {
        match self {
            RelationshipType::Fixed(name) => Some(name.clone()),
            RelationshipType::Resolver(f) => f.get()(related, parent),
        }
        .filter(|name| !name.is_empty())
    }
}

impl From<&str> for RelationshipType {
    fn from(name: &str) -> Self {
        RelationshipType::Fixed(name.to_string())
    }
}

impl From<String> for RelationshipType {
    fn from(name: String) -> Self {
        RelationshipType::Fixed(name)
    }
}

/// Declares how a field of a resource refers to other resources.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub relationship_type: RelationshipType,
    /// The schema used for related resources.
    pub schema: String,
    /// A path to read the related identifiers from when the relationship field itself is
    /// falsy, and to write them to when deserializing.
    pub alternative_key: Option<String>,
    pub links: OptionsValue,
    pub meta: OptionsValue,
    /// Replaces the related identifier when deserializing.
    pub deserialize: Option<Callback<LinkageFn>>,
}

impl Relationship {
    pub fn new(relationship_type: impl Into<RelationshipType>) -> Self {
        Relationship {
            relationship_type: relationship_type.into(),
            schema: DEFAULT_SCHEMA.to_string(),
            alternative_key: None,
            links: OptionsValue::default(),
            meta: OptionsValue::default(),
            deserialize: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn with_alternative_key(mut self, key: impl Into<String>) -> Self {
        self.alternative_key = Some(key.into());
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

    pub fn with_deserialize<F>(mut self, f: F) -> Self
    where
        F: Fn(&Linkage) -> Value + Send + Sync + 'static,
    {
        let f: Arc<LinkageFn> = Arc::new(f);
        self.deserialize = Some(f.into());
        self
    }

    /// Deserialize one linkage item, using the custom function if there is one and the bare
    /// identifier otherwise.
    pub fn deserialize_linkage(relationship: Option<&Relationship>, linkage: &Linkage) -> Value {
        match relationship.and_then(|r| r.deserialize.as_ref()) {
            Some(f) => f.get()(linkage),
            None => linkage
                .id
                .as_ref()
                .map(|id| Value::String(id.clone()))
                .unwrap_or(Value::Null),
        }
    }
}
