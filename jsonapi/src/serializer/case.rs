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
use jsonapi_utilities::format::CaseConvention;
use serde_json::Value;

use super::Serializer;

impl Serializer {
    /// Rewrite a single key in a case convention.
    pub fn convert_key(&self, key: &str, convention: CaseConvention) -> String {
        self.converter.convert(convention, key)
    }

    /// Recursively rewrite the keys of every object in a value. Values (including strings in
    /// arrays) are left unchanged.
    pub fn convert_case(&self, value: Value, convention: CaseConvention) -> Value {
        match value {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.convert_case(item, convention))
                    .collect(),
            ),
            Value::Object(obj) => Value::Object(self.convert_object(obj, convention)),
            ow => ow,
        }
    }

    pub(crate) fn convert_object(&self, obj: JsonObject, convention: CaseConvention) -> JsonObject {
        obj.into_iter()
            .map(|(key, value)| {
                (
                    self.convert_key(&key, convention),
                    self.convert_case(value, convention),
                )
            })
            .collect()
    }
}
