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

use jsonapi_utilities::path;
use serde_json::Value;

use super::callback::{Callback, TypeResolverFn};
use super::OptionsValue;
use crate::error::ConfigError;

/// How the type of a resource is read from its data.
#[derive(Debug, Clone)]
pub enum TypeResolver {
    /// A path into the data (for example `type` or `meta.kind`) holding the type name.
    Path(String),
    Resolver(Callback<TypeResolverFn>),
}

impl TypeResolver {
    pub fn resolve(&self, data: &Value) -> Option<String> {
        match self {
            TypeResolver::Path(selector) => match path::get(data, selector) {
                Some(Value::String(name)) => Some(name.clone()),
                _ => None,
            },
            TypeResolver::Resolver(f) => f.get()(data),
        }
        .filter(|name| !name.is_empty())
    }
}

/// Describes a collection of resources of mixed types, where the type of each resource is
/// resolved from its data. Each resource is then handled with the default schema registered
/// for its type.
#[derive(Debug, Clone)]
pub struct DynamicType {
    pub resolver: TypeResolver,
    pub top_level_links: OptionsValue,
    pub top_level_meta: OptionsValue,
    pub jsonapi_object: bool,
}

impl DynamicType {
    pub fn path(path: impl Into<String>) -> Self {
        DynamicType::new(TypeResolver::Path(path.into()))
    }

    pub fn resolver<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        let f: Arc<TypeResolverFn> = Arc::new(f);
        DynamicType::new(TypeResolver::Resolver(f.into()))
    }

    pub fn new(resolver: TypeResolver) -> Self {
        DynamicType {
            resolver,
            top_level_links: OptionsValue::default(),
            top_level_meta: OptionsValue::default(),
            jsonapi_object: true,
        }
    }

    pub fn with_top_level_links(mut self, links: OptionsValue) -> Self {
        self.top_level_links = links;
        self
    }

    pub fn with_top_level_meta(mut self, meta: OptionsValue) -> Self {
        self.top_level_meta = meta;
        self
    }

    pub fn with_jsonapi_object(mut self, enabled: bool) -> Self {
        self.jsonapi_object = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.resolver {
            TypeResolver::Path(path) if path.is_empty() => Err(ConfigError::MissingType),
            _ => Ok(()),
        }
    }
}
