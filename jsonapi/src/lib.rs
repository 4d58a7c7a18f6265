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


//! # JSON:API Serializer
//!
//! Converts plain JSON data into JSON:API documents and back again. Each resource type is
//! registered with one or more named schemas that describe its identifier field, which fields
//! are attributes, how its relationships are linked and which links and meta are attached.
//!
//! Serializing a resource walks its relationships, reducing related data to resource
//! identifiers and collecting any related resources into the `included` list of the document
//! (each resource appearing at most once). Deserializing a document reverses this, resolving
//! relationships against the included resources.
//!
//! Errors can also be converted into JSON:API error documents with [`serialize_error`].

mod config;
mod deserializer;
mod error;
mod error_object;
mod schema;
mod serializer;

pub use jsonapi_utilities::format::CaseConvention;
#[doc(inline)]
pub use jsonapi_model as model;

pub use config::{SerializerConfig, DEFAULT_CONVERT_CASE_CACHE_SIZE};
pub use error::{ConfigError, ErrorObjectError, ResolutionError, SerializerError};
pub use error_object::{
    serialize_error, serialize_errors, validate_error, ErrorInput, NativeError,
};
pub use schema::{
    AfterDeserializeFn, BeforeSerializeFn, BinaryObjectFn, BinaryValueFn, Callback,
    DynamicType, FallbackMode, LinkageFn, OptionsValue, Overrides, Producer, Relationship,
    RelationshipType, RelationshipTypeFn, SchemaOptions, SchemaOverride, SchemaRegistry,
    TypeResolver, TypeResolverFn, UnaryObjectFn, UnaryValueFn, DEFAULT_ID_FIELD,
    DEFAULT_SCHEMA,
};
pub use serializer::{Included, ResourceType, SerializeOptions, Serializer};
