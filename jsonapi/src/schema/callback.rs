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

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use jsonapi_model::{JsonObject, Linkage};
use serde_json::Value;

/// A shared, user supplied function.
pub struct Callback<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Callback<F> {
    pub fn get(&self) -> &F {
        &self.0
    }
}

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        Callback(self.0.clone())
    }
}

impl<F: ?Sized> Debug for Callback<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("<callback>")
    }
}

impl<F: ?Sized> From<Arc<F>> for Callback<F> {
    fn from(inner: Arc<F>) -> Self {
        Callback(inner)
    }
}

/// Reshapes a resource before it is serialized.
pub type BeforeSerializeFn = dyn Fn(&JsonObject) -> JsonObject + Send + Sync;
/// Replaces the result of deserializing a resource.
pub type AfterDeserializeFn = dyn Fn(Value) -> Value + Send + Sync;
/// Deserializes the linkage of one related resource.
pub type LinkageFn = dyn Fn(&Linkage) -> Value + Send + Sync;
/// Computes the type of a related resource from `(related, parent)`.
pub type RelationshipTypeFn = dyn Fn(&Value, &Value) -> Option<String> + Send + Sync;
/// Computes the type of a resource from its data.
pub type TypeResolverFn = dyn Fn(&Value) -> Option<String> + Send + Sync;
/// Computes a whole links or meta object from one argument.
pub type UnaryObjectFn = dyn Fn(&Value) -> JsonObject + Send + Sync;
/// Computes a whole links or meta object from `(data, extra_data)`.
pub type BinaryObjectFn = dyn Fn(&Value, &Value) -> JsonObject + Send + Sync;
/// Computes a single links or meta entry from one argument.
pub type UnaryValueFn = dyn Fn(&Value) -> Option<Value> + Send + Sync;
/// Computes a single links or meta entry from `(data, extra_data)`.
pub type BinaryValueFn = dyn Fn(&Value, &Value) -> Option<Value> + Send + Sync;
