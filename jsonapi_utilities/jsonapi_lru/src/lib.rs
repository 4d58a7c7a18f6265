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

use slab::Slab;
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, Hash};
use std::num::NonZeroUsize;


struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Copy)]
struct Ends {
    head: usize,
    tail: usize,
}

/// A cache with a fixed capacity that evicts the least recently used entry when it is full.
/// Entries are held in a [`Slab`] and linked, by index, from most to least recently used.
pub struct LruCache<K, V, S = RandomState> {
    capacity: NonZeroUsize,
    index: HashMap<K, usize, S>,
    nodes: Slab<Node<K, V>>,
    ends: Option<Ends>,
}

impl<K: Debug, V: Debug, S> Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let contents = self
            .iter()
            .map(|(k, v)| format!("{:?} -> {:?}", k, v))
            .collect::<Vec<_>>();
        write!(
            f,
            "LruCache[capacity = {}, contents = {:?}]",
            self.capacity, contents
        )
    }
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V, RandomState> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        LruCache::with_hasher(capacity, Default::default())
    }
}

impl<K, V, S> LruCache<K, V, S> {
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the entries from most to least recently used. This does not affect the
    /// order of the entries.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            cache: self,
            current: self.ends.map(|ends| ends.head),
        }
    }

    /// Iterate over the entries from least to most recently used.
    pub fn reverse_iter(&self) -> ReverseIter<'_, K, V, S> {
        ReverseIter {
            cache: self,
            current: self.ends.map(|ends| ends.tail),
        }
    }

    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.ends.map(|ends| {
            let node = &self.nodes[ends.head];
            (&node.key, &node.value)
        })
    }

    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.ends.map(|ends| {
            let node = &self.nodes[ends.tail];
            (&node.key, &node.value)
        })
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &mut self.nodes[idx];
            (node.prev.take(), node.next.take())
        };
        if let Some(p) = prev {
            self.nodes[p].next = next;
        }
        if let Some(n) = next {
            self.nodes[n].prev = prev;
        }
        self.ends = match (self.ends, prev, next) {
            (Some(_), None, None) => None,
            (Some(Ends { tail, .. }), None, Some(n)) => Some(Ends { head: n, tail }),
            (Some(Ends { head, .. }), Some(p), None) => Some(Ends { head, tail: p }),
            (ends, _, _) => ends,
        };
    }

    fn attach_head(&mut self, idx: usize) {
        match self.ends {
            Some(Ends { head, tail }) => {
                self.nodes[idx].next = Some(head);
                self.nodes[head].prev = Some(idx);
                self.ends = Some(Ends { head: idx, tail });
            }
            None => {
                self.ends = Some(Ends {
                    head: idx,
                    tail: idx,
                });
            }
        }
    }

    fn touch(&mut self, idx: usize) {
        let is_head = matches!(self.ends, Some(Ends { head, .. }) if head == idx);
        if !is_head {
            self.detach(idx);
            self.attach_head(idx);
        }
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    pub fn with_hasher(capacity: NonZeroUsize, hasher: S) -> Self {
        LruCache {
            capacity,
            index: HashMap::with_hasher(hasher),
            nodes: Slab::with_capacity(capacity.get().min(1024)),
            ends: None,
        }
    }

    /// Insert an entry, making it the most recently used. If the key was already present, the
    /// previous entry is returned. Otherwise, if the cache was full, the evicted entry is
    /// returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(idx) = self.index.get(&key).copied() {
            self.touch(idx);
            let old = std::mem::replace(&mut self.nodes[idx].value, value);
            return Some((key, old));
        }
        let evicted = if self.nodes.len() >= self.capacity.get() {
            self.pop_lru()
        } else {
            None
        };
        let idx = self.nodes.insert(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.index.insert(key, idx);
        self.attach_head(idx);
        evicted
    }

    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_mut(key).map(|v| &*v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.get(key).copied()?;
        self.touch(idx);
        Some(&mut self.nodes[idx].value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.remove(key)?;
        self.detach(idx);
        Some(self.nodes.remove(idx).value)
    }

    /// Remove and return the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let Ends { tail, .. } = self.ends?;
        self.detach(tail);
        let Node { key, value, .. } = self.nodes.remove(tail);
        self.index.remove(&key);
        Some((key, value))
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.ends = None;
    }
}

pub struct Iter<'a, K, V, S> {
    cache: &'a LruCache<K, V, S>,
    current: Option<usize>,
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = &self.cache.nodes[idx];
        self.current = node.next;
        Some((&node.key, &node.value))
    }
}

pub struct ReverseIter<'a, K, V, S> {
    cache: &'a LruCache<K, V, S>,
    current: Option<usize>,
}

impl<'a, K, V, S> Iterator for ReverseIter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = &self.cache.nodes[idx];
        self.current = node.prev;
        Some((&node.key, &node.value))
    }
}
