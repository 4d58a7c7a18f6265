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

use std::num::NonZeroUsize;

use jsonapi_utilities::non_zero_usize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::schema::SchemaOptions;

pub const DEFAULT_CONVERT_CASE_CACHE_SIZE: NonZeroUsize = non_zero_usize!(5000);

const CACHE_SIZE_OPTION: &str = "convertCaseCacheSize";

/// Configuration for a [`crate::Serializer`].
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// The number of memoized key conversions kept for each case convention. If this is not
    /// set, the memo is unbounded.
    pub convert_case_cache_size: Option<NonZeroUsize>,
    /// Options that every schema starts from.
    pub defaults: SchemaOptions,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        SerializerConfig {
            convert_case_cache_size: Some(DEFAULT_CONVERT_CASE_CACHE_SIZE),
            defaults: SchemaOptions::default(),
        }
    }
}

impl SerializerConfig {
    /// Read the configuration from a JSON description. `convertCaseCacheSize` is a
    /// non-negative integer where `0` means unbounded; any other keys are read as default
    /// schema options.
    pub fn from_value(value: &Value) -> Result<SerializerConfig, ConfigError> {
        let convert_case_cache_size = match value.get(CACHE_SIZE_OPTION) {
            None => Some(DEFAULT_CONVERT_CASE_CACHE_SIZE),
            Some(size) => {
                let size = size
                    .as_u64()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| {
                        ConfigError::invalid(CACHE_SIZE_OPTION, "a non-negative integer")
                    })?;
                NonZeroUsize::new(size)
            }
        };
        Ok(SerializerConfig {
            convert_case_cache_size,
            defaults: SchemaOptions::from_value(value)?,
        })
    }
}
