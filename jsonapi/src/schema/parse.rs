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

//! Reading schemas from declarative (JSON) descriptions. Functions cannot be described in
//! JSON so the options that require them are rejected.

use std::str::FromStr;

use jsonapi_model::JsonObject;
use jsonapi_utilities::format::CaseConvention;
use jsonapi_utilities::path::to_js_string;
use serde_json::Value;

use super::{DynamicType, OptionsValue, Relationship, RelationshipType, SchemaOptions};
use crate::error::ConfigError;

const AN_ARRAY: &str = "an array";
const AN_OBJECT: &str = "an object";
const A_STRING: &str = "a string";
const A_BOOLEAN: &str = "a boolean";
const A_FUNCTION: &str = "a function";
const OBJECT_OR_FUNCTION: &str = "an object or a function";
const STRING_OR_FUNCTION: &str = "a string or a function";
const CASE_STYLES: &str = "one of 'kebab-case', 'snake_case', 'camelCase'";

fn as_object<'a>(value: &'a Value, option: &str) -> Result<&'a JsonObject, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| ConfigError::invalid(option, AN_OBJECT))
}

fn read_list(value: &Value, option: &str) -> Result<Vec<String>, ConfigError> {
    match value {
        Value::Array(items) => Ok(items.iter().map(to_js_string).collect()),
        _ => Err(ConfigError::invalid(option, AN_ARRAY)),
    }
}

fn read_options_value(value: &Value, option: &str) -> Result<OptionsValue, ConfigError> {
    match value {
        Value::Object(obj) => Ok(OptionsValue::from(obj.clone())),
        _ => Err(ConfigError::invalid(option, OBJECT_OR_FUNCTION)),
    }
}

fn read_case(value: &Value, option: &str) -> Result<Option<CaseConvention>, ConfigError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => CaseConvention::from_str(s)
            .map(Some)
            .map_err(|_| ConfigError::invalid(option, CASE_STYLES)),
        _ => Err(ConfigError::invalid(option, CASE_STYLES)),
    }
}

fn read_bool(value: &Value, option: &str) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or_else(|| ConfigError::invalid(option, A_BOOLEAN))
}

fn read_relationship(name: &str, value: &Value) -> Result<Relationship, ConfigError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ConfigError::invalid(format!("relationships.{}", name), AN_OBJECT))?;
    let relationship_type = match obj.get("type") {
        None | Some(Value::Null) => {
            return Err(ConfigError::MissingRelationshipOption {
                relationship: name.to_string(),
                option: "type",
            })
        }
        Some(Value::String(target)) => RelationshipType::Fixed(target.clone()),
        Some(_) => {
            return Err(ConfigError::invalid_relationship(
                name,
                "type",
                STRING_OR_FUNCTION,
            ))
        }
    };
    let mut relationship = Relationship::new(relationship_type);
    for (key, v) in obj {
        match key.as_str() {
            "type" => {}
            "alternativeKey" => match v {
                Value::String(alt) => relationship.alternative_key = Some(alt.clone()),
                _ => {
                    return Err(ConfigError::invalid_relationship(
                        name,
                        "alternativeKey",
                        A_STRING,
                    ))
                }
            },
            "schema" => match v {
                Value::String(schema) => relationship.schema = schema.clone(),
                _ => return Err(ConfigError::invalid_relationship(name, "schema", A_STRING)),
            },
            "links" => match v {
                Value::Object(links) => relationship.links = links.clone().into(),
                _ => {
                    return Err(ConfigError::invalid_relationship(
                        name,
                        "links",
                        OBJECT_OR_FUNCTION,
                    ))
                }
            },
            "meta" => match v {
                Value::Object(meta) => relationship.meta = meta.clone().into(),
                _ => {
                    return Err(ConfigError::invalid_relationship(
                        name,
                        "meta",
                        OBJECT_OR_FUNCTION,
                    ))
                }
            },
            "deserialize" => {
                return Err(ConfigError::invalid_relationship(
                    name,
                    "deserialize",
                    A_FUNCTION,
                ))
            }
            _ => {}
        }
    }
    Ok(relationship)
}

impl SchemaOptions {
    /// Read options from a JSON description, starting from the defaults.
    pub fn from_value(value: &Value) -> Result<SchemaOptions, ConfigError> {
        SchemaOptions::default().merge_value(value)
    }

    /// Replace each option that is present in a JSON description. As with the builder
    /// methods, a `relationships` entry replaces every existing relationship. Unrecognized
    /// keys are ignored.
    pub fn merge_value(mut self, value: &Value) -> Result<SchemaOptions, ConfigError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ConfigError::invalid("options", AN_OBJECT))?;
        for (key, v) in obj {
            let option = key.as_str();
            match option {
                "id" => match v {
                    Value::String(id) => self.id = id.clone(),
                    _ => return Err(ConfigError::invalid(option, A_STRING)),
                },
                "blacklist" => self.blacklist = read_list(v, option)?,
                "whitelist" => self.whitelist = read_list(v, option)?,
                "blacklistOnDeserialize" => self.blacklist_on_deserialize = read_list(v, option)?,
                "whitelistOnDeserialize" => self.whitelist_on_deserialize = read_list(v, option)?,
                "links" => self.links = read_options_value(v, option)?,
                "meta" => self.meta = read_options_value(v, option)?,
                "topLevelLinks" => self.top_level_links = read_options_value(v, option)?,
                "topLevelMeta" => self.top_level_meta = read_options_value(v, option)?,
                "convertCase" => self.convert_case = read_case(v, option)?,
                "unconvertCase" => self.unconvert_case = read_case(v, option)?,
                "jsonapiObject" => self.jsonapi_object = read_bool(v, option)?,
                "beforeSerialize" | "afterDeserialize" => {
                    return Err(ConfigError::invalid(option, A_FUNCTION))
                }
                "relationships" => {
                    self.relationships = as_object(v, option)?
                        .iter()
                        .map(|(name, r)| read_relationship(name, r).map(|r| (name.clone(), r)))
                        .collect::<Result<_, _>>()?;
                }
                _ => {}
            }
        }
        Ok(self)
    }
}

impl DynamicType {
    /// Read a dynamic type from a JSON description. The `type` option is the path to the type
    /// name in each resource.
    pub fn from_value(value: &Value) -> Result<DynamicType, ConfigError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ConfigError::invalid("options", AN_OBJECT))?;
        let mut dynamic = match obj.get("type") {
            None | Some(Value::Null) => return Err(ConfigError::MissingType),
            Some(Value::String(path)) => DynamicType::path(path.as_str()),
            Some(_) => return Err(ConfigError::invalid("type", STRING_OR_FUNCTION)),
        };
        for (key, v) in obj {
            let option = key.as_str();
            match option {
                "topLevelLinks" => dynamic.top_level_links = read_options_value(v, option)?,
                "topLevelMeta" => dynamic.top_level_meta = read_options_value(v, option)?,
                "jsonapiObject" => dynamic.jsonapi_object = read_bool(v, option)?,
                _ => {}
            }
        }
        dynamic.validate()?;
        Ok(dynamic)
    }
}
