//! Caching utilities for lazily computed values
//!
//! A built tree never changes, so lookup structures derived from it only
//! need computing once, and only if someone asks.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::node::NodeHash;

/// Generic cache for lazily computed values.
#[derive(Debug)]
pub(crate) struct OnceCache<T> {
    /// The cached value
    value: OnceLock<T>,
}

impl<T> OnceCache<T> {
    /// Create a new empty cache
    pub(crate) const fn new() -> Self {
        Self {
            value: OnceLock::new(),
        }
    }

    /// Get the cached value, computing it if necessary
    pub(crate) fn get_or_compute<F>(&self, compute_fn: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.value.get_or_init(compute_fn)
    }
}

impl<T> Default for OnceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for OnceCache<T> {
    fn clone(&self) -> Self {
        let cache = Self::new();
        if let Some(value) = self.value.get() {
            // A fresh cache is always empty, so the set cannot fail
            let _ = cache.value.set(value.clone());
        }
        cache
    }
}

/// Maps each distinct leaf hash to the index of its first occurrence.
pub(crate) type LeafIndex = HashMap<NodeHash, usize>;

/// Build a [`LeafIndex`] over a leaf layer.
pub(crate) fn index_leaves(leaves: &[NodeHash]) -> LeafIndex {
    let mut index = HashMap::with_capacity(leaves.len());
    for (i, leaf) in leaves.iter().enumerate() {
        index.entry(*leaf).or_insert(i);
    }
    index
}
