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

use thiserror::Error;

/// An error type that is produced when the options for a schema or a dynamic type are invalid.
/// These are raised at registration (or when a dynamic type is first used) and will not go
/// away until the options are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An option had the wrong shape.
    #[error("option '{option}' must be {expected}")]
    InvalidOption {
        option: String,
        expected: &'static str,
    },
    /// A dynamic type did not specify how the type should be resolved.
    #[error("option 'type' is required")]
    MissingType,
    /// A required option was missing from a relationship.
    #[error("option '{option}' for relationship '{relationship}' is required")]
    MissingRelationshipOption {
        relationship: String,
        option: &'static str,
    },
    /// An option for a relationship had the wrong shape.
    #[error("option '{option}' for relationship '{relationship}' must be {expected}")]
    InvalidRelationshipOption {
        relationship: String,
        option: &'static str,
        expected: &'static str,
    },
    /// The same relationship was declared twice for one schema.
    #[error("relationship '{0}' is declared more than once")]
    DuplicateRelationship(String),
}

impl ConfigError {
    pub(crate) fn invalid(option: impl Into<String>, expected: &'static str) -> Self {
        ConfigError::InvalidOption {
            option: option.into(),
            expected,
        }
    }

    pub(crate) fn invalid_relationship(
        relationship: impl Into<String>,
        option: &'static str,
        expected: &'static str,
    ) -> Self {
        ConfigError::InvalidRelationshipOption {
            relationship: relationship.into(),
            option,
            expected,
        }
    }
}

/// An error type that is produced when the type or schema for some data cannot be determined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// A dynamic type produced no type for a resource. Contains the resource as JSON.
    #[error("No type can be resolved from data: {0}")]
    UnresolvableType(String),
    /// The type of a related resource could not be determined. Contains the related data as
    /// JSON.
    #[error("No type can be resolved from relationship's data: {0}")]
    UnresolvableRelationshipType(String),
    #[error("No type registered for {0}")]
    UnregisteredType(String),
    #[error("No schema {schema} registered for {resource_type}")]
    UnregisteredSchema {
        resource_type: String,
        schema: String,
    },
}

/// An error type that is produced when an error description cannot be converted into a
/// JSON:API error object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorObjectError {
    #[error("error must be an object")]
    NotAnObject,
    #[error("error 'links' property must be an object")]
    LinksNotAnObject,
    #[error("error 'links.{0}' must be a string or an object")]
    InvalidLink(String),
    #[error("'links.{0}.href' property must be a string")]
    InvalidLinkHref(String),
    #[error("'links.{0}.meta' property must be an object")]
    InvalidLinkMeta(String),
    #[error("error 'source' property must be an object")]
    SourceNotAnObject,
    #[error("error 'source.pointer' property must be a string")]
    InvalidSourcePointer,
    #[error("error 'source.parameter' property must be a string")]
    InvalidSourceParameter,
    #[error("error 'meta' property must be an object")]
    MetaNotAnObject,
}

/// Any error that can occur when serializing or deserializing a document.
#[derive(Debug, Error)]
pub enum SerializerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    /// Converting between a document and a typed value failed.
    #[error("Conversion failed: {0}")]
    Conversion(#[from] serde_json::Error),
}
