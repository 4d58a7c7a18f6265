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

use serde::{Deserialize, Serialize};

use crate::serde_util::{lenient_id, present};
use crate::JsonObject;

/// A resource identifier: the content of the `data` field of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Linkage {
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Absent only when a nested resource had no identifier.
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonObject>,
}

impl Linkage {
    pub fn new<T, I>(resource_type: T, id: I) -> Self
    where
        T: Into<String>,
        I: Into<String>,
    {
        Linkage {
            resource_type: resource_type.into(),
            id: Some(id.into()),
            meta: None,
        }
    }

    /// The key that uniquely identifies the target resource in a document, `"{type}-{id}"`.
    pub fn identifier(&self) -> String {
        identifier(&self.resource_type, self.id.as_deref())
    }
}

pub(crate) fn identifier(resource_type: &str, id: Option<&str>) -> String {
    format!("{}-{}", resource_type, id.unwrap_or("undefined"))
}

/// Linkage data for a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    Many(Vec<Linkage>),
    One(Linkage),
    Null,
}

impl RelationshipData {
    /// All of the linkage items, in order.
    pub fn linkages(&self) -> &[Linkage] {
        match self {
            RelationshipData::Many(items) => items.as_slice(),
            RelationshipData::One(item) => std::slice::from_ref(item),
            RelationshipData::Null => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonObject>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<RelationshipData>,
}

impl RelationshipObject {
    /// A relationship with no links, meta or data carries no information.
    pub fn is_empty(&self) -> bool {
        self.links.is_none() && self.meta.is_none() && self.data.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<BTreeMap<String, RelationshipObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<JsonObject>,
}

impl ResourceObject {
    pub fn new<T: Into<String>>(resource_type: T, id: Option<String>) -> Self {
        ResourceObject {
            resource_type: resource_type.into(),
            id,
            ..Default::default()
        }
    }

    /// The key that uniquely identifies this resource in a document, `"{type}-{id}"`.
    pub fn identifier(&self) -> String {
        identifier(&self.resource_type, self.id.as_deref())
    }

    pub fn linkage(&self) -> Linkage {
        Linkage {
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
            meta: None,
        }
    }

    pub fn has_attributes(&self) -> bool {
        self.attributes.as_ref().is_some_and(|a| !a.is_empty())
    }
}
