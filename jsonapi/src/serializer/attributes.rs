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

use jsonapi_model::JsonObject;
use jsonapi_utilities::path::{omit, pick};

use super::Serializer;
use crate::schema::SchemaOptions;

impl Serializer {
    /// Project the data of a resource onto its attributes. Returns nothing if no attributes
    /// remain.
    pub fn serialize_attributes(
        &self,
        data: &JsonObject,
        options: &SchemaOptions,
    ) -> Option<JsonObject> {
        let excluded = options.excluded_attributes();
        let attributes = if options.whitelist.is_empty() {
            omit(data, &excluded)
        } else {
            omit(&pick(data, &options.whitelist), &excluded)
        };
        let attributes = match options.convert_case {
            Some(convention) => self.convert_object(attributes, convention),
            None => attributes,
        };
        if attributes.is_empty() {
            None
        } else {
            Some(attributes)
        }
    }
}
