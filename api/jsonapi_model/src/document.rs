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

use serde::{Deserialize, Serialize};

use crate::serde_util::present;
use crate::{JsonObject, ResourceObject};

/// The protocol version reported in the `jsonapi` member.
pub const JSONAPI_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonApiObject {
    pub version: String,
}

impl Default for JsonApiObject {
    fn default() -> Self {
        JsonApiObject {
            version: JSONAPI_VERSION.to_string(),
        }
    }
}

/// The primary data of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Many(Vec<ResourceObject>),
    One(Box<ResourceObject>),
    Null,
}

impl PrimaryData {
    pub fn is_null(&self) -> bool {
        matches!(self, PrimaryData::Null)
    }

    pub fn resources(&self) -> &[ResourceObject] {
        match self {
            PrimaryData::Many(resources) => resources.as_slice(),
            PrimaryData::One(resource) => std::slice::from_ref(resource.as_ref()),
            PrimaryData::Null => &[],
        }
    }
}

impl From<ResourceObject> for PrimaryData {
    fn from(resource: ResourceObject) -> Self {
        PrimaryData::One(Box::new(resource))
    }
}

impl From<Option<ResourceObject>> for PrimaryData {
    fn from(resource: Option<ResourceObject>) -> Self {
        resource.map(PrimaryData::from).unwrap_or(PrimaryData::Null)
    }
}

impl From<Vec<ResourceObject>> for PrimaryData {
    fn from(resources: Vec<ResourceObject>) -> Self {
        PrimaryData::Many(resources)
    }
}

/// A top level JSON:API document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<JsonApiObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<JsonObject>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<PrimaryData>,
    /// Never an empty list; a document with nothing to include omits this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
}

impl Document {
    pub fn with_data<D: Into<PrimaryData>>(data: D) -> Self {
        Document {
            data: Some(data.into()),
            ..Default::default()
        }
    }

    pub fn included(&self) -> &[ResourceObject] {
        self.included.as_deref().unwrap_or(&[])
    }
}
