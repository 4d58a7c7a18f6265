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

use jsonapi_model::ResourceObject;
use tracing::trace;

/// The related resources accumulated while serializing one document, keyed by
/// `"{type}-{id}"` and kept in the order they were first added.
#[derive(Debug, Default)]
pub struct Included {
    index: HashMap<String, usize>,
    resources: Vec<ResourceObject>,
}

impl Included {
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn get(&self, identifier: &str) -> Option<&ResourceObject> {
        self.index.get(identifier).map(|i| &self.resources[*i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceObject> {
        self.resources.iter()
    }

    /// Add a resource. If a resource with the same identifier is already present, it keeps its
    /// attributes and the relationships of the new resource are merged into it (replacing any
    /// with the same name).
    pub fn insert(&mut self, resource: ResourceObject) {
        let identifier = resource.identifier();
        match self.index.get(&identifier) {
            Some(i) => {
                let existing = &mut self.resources[*i];
                if let Some(relationships) = resource.relationships {
                    trace!(identifier = %identifier, "Merging relationships of included resource.");
                    existing
                        .relationships
                        .get_or_insert_with(Default::default)
                        .extend(relationships);
                }
            }
            None => {
                trace!(identifier = %identifier, "Including resource.");
                self.index.insert(identifier, self.resources.len());
                self.resources.push(resource);
            }
        }
    }

    /// The included resources, or nothing if there are none.
    pub fn into_resources(self) -> Option<Vec<ResourceObject>> {
        if self.resources.is_empty() {
            None
        } else {
            Some(self.resources)
        }
    }
}
