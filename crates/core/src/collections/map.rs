//! Separate-chaining hash map with a fixed resize policy.
//! This module exists so keyed lookups (adjacency lists, parent links) have
//! bucket behavior that is reproducible across processes and platforms.
//! It does not own any engine semantics beyond storage.

use std::hash::{Hash, Hasher};
use std::iter;
use std::mem;

use xxhash_rust::xxh3::Xxh3;

const INITIAL_BUCKETS: usize = 19;
const LOAD_FACTOR: f64 = 0.75;

/// Chained hash map keyed by value equality. Buckets double (with a full
/// rehash) after any insert that brings `len >= LOAD_FACTOR * buckets`.
/// There is no removal; the engine never deletes entries.
///
/// Hashing goes through xxh3 rather than the std `RandomState` so the bucket
/// layout never depends on a per-process seed.
#[derive(Debug)]
pub struct ChainMap<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
}

impl<K: Eq + Hash, V> ChainMap<K, V> {
    pub fn new() -> Self {
        Self { buckets: empty_buckets(INITIAL_BUCKETS), len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts or overwrites.
    pub fn put(&mut self, key: K, value: V) {
        let idx = self.bucket_index(&key);
        if let Some(entry) = self.buckets[idx].iter_mut().find(|entry| entry.0 == key) {
            entry.1 = value;
            return;
        }
        self.buckets[idx].push((key, value));
        self.len += 1;
        self.maybe_resize();
    }

    /// Inserts only if `key` is absent; an existing value is never replaced.
    pub fn put_if_absent(&mut self, key: K, value: V) {
        let idx = self.bucket_index(&key);
        if self.buckets[idx].iter().any(|entry| entry.0 == key) {
            return;
        }
        self.buckets[idx].push((key, value));
        self.len += 1;
        self.maybe_resize();
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let idx = self.bucket_index(key);
        self.buckets[idx].iter().find(|entry| &entry.0 == key).map(|entry| &entry.1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.bucket_index(key);
        self.buckets[idx].iter_mut().find(|entry| &entry.0 == key).map(|entry| &mut entry.1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn bucket_index(&self, key: &K) -> usize {
        let mut hasher = Xxh3::new();
        key.hash(&mut hasher);
        // u64 modulo keeps the mapping non-negative without an abs step.
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    fn maybe_resize(&mut self) {
        if self.len as f64 >= LOAD_FACTOR * self.buckets.len() as f64 {
            self.resize();
        }
    }

    fn resize(&mut self) {
        let doubled = self.buckets.len() * 2;
        let old = mem::replace(&mut self.buckets, empty_buckets(doubled));
        for bucket in old {
            for (key, value) in bucket {
                let idx = self.bucket_index(&key);
                self.buckets[idx].push((key, value));
            }
        }
    }
}

impl<K: Eq + Hash, V> Default for ChainMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_buckets<K, V>(count: usize) -> Vec<Vec<(K, V)>> {
    iter::repeat_with(Vec::new).take(count).collect()
}
