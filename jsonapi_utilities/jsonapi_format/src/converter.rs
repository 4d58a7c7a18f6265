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
use std::fmt::{Debug, Formatter};
use std::num::NonZeroUsize;

use jsonapi_lru::LruCache;
use parking_lot::Mutex;

use crate::CaseConvention;

enum Memo {
    Bounded(Mutex<LruCache<String, String>>),
    Unbounded(Mutex<HashMap<String, String>>),
}

impl Memo {
    fn new(capacity: Option<NonZeroUsize>) -> Self {
        match capacity {
            Some(n) => Memo::Bounded(Mutex::new(LruCache::new(n))),
            None => Memo::Unbounded(Mutex::new(HashMap::new())),
        }
    }

    fn get_or_insert(&self, key: &str, f: impl FnOnce(&str) -> String) -> String {
        match self {
            Memo::Bounded(cache) => {
                let mut guard = cache.lock();
                if let Some(hit) = guard.get(key) {
                    return hit.clone();
                }
                let converted = f(key);
                guard.insert(key.to_string(), converted.clone());
                converted
            }
            Memo::Unbounded(cache) => {
                let mut guard = cache.lock();
                guard
                    .entry(key.to_string())
                    .or_insert_with(|| f(key))
                    .clone()
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Memo::Bounded(cache) => cache.lock().len(),
            Memo::Unbounded(cache) => cache.lock().len(),
        }
    }
}

/// Converts keys between naming conventions, remembering recent results. There is one memo
/// for each convention and each is either bounded (least recently used entries are evicted)
/// or unbounded.
///
/// The converter is shared by reference; the memos are guarded by their own locks so
/// conversion only requires `&self`.
pub struct CaseConverter {
    capacity: Option<NonZeroUsize>,
    camel: Memo,
    kebab: Memo,
    snake: Memo,
}

impl Debug for CaseConverter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseConverter")
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl Default for CaseConverter {
    fn default() -> Self {
        CaseConverter::new(None)
    }
}

impl CaseConverter {
    /// # Arguments
    /// * `capacity` - The maximum number of memoized results for each convention. If this is
    /// not specified, the memos grow without bound.
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        CaseConverter {
            capacity,
            camel: Memo::new(capacity),
            kebab: Memo::new(capacity),
            snake: Memo::new(capacity),
        }
    }

    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    pub fn convert(&self, convention: CaseConvention, key: &str) -> String {
        self.memo(convention)
            .get_or_insert(key, |k| convention.apply(k))
    }

    /// The number of memoized results for a convention.
    pub fn memoized(&self, convention: CaseConvention) -> usize {
        self.memo(convention).len()
    }

    fn memo(&self, convention: CaseConvention) -> &Memo {
        match convention {
            CaseConvention::Camel => &self.camel,
            CaseConvention::Kebab => &self.kebab,
            CaseConvention::Snake => &self.snake,
        }
    }
}
