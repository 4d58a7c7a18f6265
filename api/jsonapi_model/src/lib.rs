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

//! # JSON:API Document Model
//!
//! The wire representation of JSON:API documents. These types describe what is produced by
//! serialization and consumed by deserialization. They map directly to JSON with `serde`:
//! absent fields are omitted from the output and an explicit `null` is distinguished from
//! an absent field wherever the protocol gives them different meanings.

mod document;
mod error;
mod resource;
mod serde_util;

pub use document::{Document, JsonApiObject, PrimaryData, JSONAPI_VERSION};
pub use error::{ErrorDocument, ErrorObject, ErrorSource};
pub use resource::{Linkage, RelationshipData, RelationshipObject, ResourceObject};

/// A JSON object, used for attributes, links and meta.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests;
