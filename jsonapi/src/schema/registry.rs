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

use std::collections::HashMap;

use tracing::debug;

use super::SchemaOptions;
use crate::error::{ConfigError, ResolutionError};

/// Named schemas for each registered type.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, HashMap<String, SchemaOptions>>,
}

impl SchemaRegistry {
    /// Validate and store a schema, replacing any existing schema with the same type and name.
    pub fn insert(
        &mut self,
        resource_type: &str,
        schema: &str,
        options: SchemaOptions,
    ) -> Result<(), ConfigError> {
        options.validate()?;
        debug!(
            resource_type,
            schema,
            relationships = options.relationships.len(),
            "Registering schema."
        );
        self.schemas
            .entry(resource_type.to_string())
            .or_default()
            .insert(schema.to_string(), options);
        Ok(())
    }

    pub fn contains_type(&self, resource_type: &str) -> bool {
        self.schemas.contains_key(resource_type)
    }

    pub fn get(&self, resource_type: &str, schema: &str) -> Option<&SchemaOptions> {
        self.schemas
            .get(resource_type)
            .and_then(|schemas| schemas.get(schema))
    }

    /// Find a schema, failing if either the type or the named schema is not registered.
    pub fn resolve(
        &self,
        resource_type: &str,
        schema: &str,
    ) -> Result<&SchemaOptions, ResolutionError> {
        let schemas = self
            .schemas
            .get(resource_type)
            .ok_or_else(|| ResolutionError::UnregisteredType(resource_type.to_string()))?;
        schemas
            .get(schema)
            .ok_or_else(|| ResolutionError::UnregisteredSchema {
                resource_type: resource_type.to_string(),
                schema: schema.to_string(),
            })
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn schema_names<'a>(&'a self, resource_type: &str) -> impl Iterator<Item = &'a str> {
        self.schemas
            .get(resource_type)
            .into_iter()
            .flat_map(|schemas| schemas.keys().map(String::as_str))
    }
}
