//! A transient keyed store of immutable values.
//!
//! Every value entering the store is wrapped on the way in; readers share the wrapper and
//! can only ever obtain copies of what was stored.

use crate::{FreezeResult, Immutable, Replicate, RoutineCache};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Keyed store of [`Immutable`] values.
pub struct ImmutableStore<K, V: Replicate> {
    entries: HashMap<K, Arc<Immutable<V>>>,
    cache: RoutineCache,
}

impl<K: Eq + Hash, V: Replicate> ImmutableStore<K, V> {
    /// Create an empty store that wraps through the global cache.
    pub fn new() -> Self {
        Self::with_cache(RoutineCache::global())
    }

    /// Create an empty store that wraps through `cache`.
    pub fn with_cache(cache: &RoutineCache) -> Self {
        Self {
            entries: HashMap::new(),
            cache: cache.clone(),
        }
    }

    /// Wrap `value` and store it under `key`, replacing any previous entry.
    pub fn add_or_update(&mut self, key: K, value: V) -> FreezeResult<Arc<Immutable<V>>> {
        let wrapped = Arc::new(Immutable::with_cache(value, &self.cache)?);
        self.entries.insert(key, Arc::clone(&wrapped));
        Ok(wrapped)
    }

    /// Wrap and store `value` only if `key` is vacant. Returns whether it was stored.
    pub fn try_add(&mut self, key: K, value: V) -> FreezeResult<bool> {
        if self.entries.contains_key(&key) {
            return Ok(false);
        }
        self.add_or_update(key, value)?;
        Ok(true)
    }

    /// Apply `mutate` to a copy of the stored value and store the result in its place.
    ///
    /// Returns `None` when `key` is absent. Holders of the previous wrapper keep seeing the
    /// old value.
    pub fn update<F>(&mut self, key: &K, mutate: F) -> FreezeResult<Option<Arc<Immutable<V>>>>
    where
        K: Clone,
        F: FnOnce(&mut V),
    {
        let Some(current) = self.entries.get(key) else {
            return Ok(None);
        };
        let mut value = current.emit();
        mutate(&mut value);
        self.add_or_update(key.clone(), value).map(Some)
    }

    /// The wrapper stored under `key`.
    pub fn get(&self, key: &K) -> Option<Arc<Immutable<V>>> {
        self.entries.get(key).cloned()
    }

    /// Remove and return the wrapper stored under `key`.
    pub fn remove(&mut self, key: &K) -> Option<Arc<Immutable<V>>> {
        self.entries.remove(key)
    }

    /// Whether `key` has an entry.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}

impl<K: Eq + Hash, V: Replicate> Default for ImmutableStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
