//! Bounded insertion-ordered cache of cloned preview fragments.
//!
//! Deliberately FIFO, not LRU: on overflow the oldest *inserted* key is
//! evicted regardless of access recency. Overwriting an existing key keeps
//! its original insertion position, matching ordered-map `set` semantics.

use crate::model::RequestId;

/// Insertion-ordered fragment cache with a hard entry bound.
///
/// The bound is small (see [`crate::sticky::MAX_CACHED_CLONES`]) so a plain
/// vector of pairs beats a map here; lookups are linear over at most six
/// entries.
#[derive(Debug, Clone)]
pub struct CloneCache<F> {
    bound: usize,
    entries: Vec<(RequestId, F)>,
}

impl<F> CloneCache<F> {
    /// Create an empty cache holding at most `bound` fragments.
    pub fn new(bound: usize) -> Self {
        Self {
            bound,
            entries: Vec::with_capacity(bound),
        }
    }

    /// Insert or overwrite the fragment for `id`, then prune to the bound.
    ///
    /// Overwriting keeps the key's original insertion position; only genuinely
    /// new keys can push the oldest entry out.
    pub fn insert(&mut self, id: RequestId, fragment: F) {
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == id) {
            slot.1 = fragment;
        } else {
            self.entries.push((id, fragment));
        }
        self.prune();
    }

    /// Look up the fragment for `id`. Lookup does not affect eviction order.
    pub fn get(&self, id: &RequestId) -> Option<&F> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, fragment)| fragment)
    }

    /// Whether a fragment is cached for `id`.
    pub fn contains(&self, id: &RequestId) -> bool {
        self.get(id).is_some()
    }

    /// Number of cached fragments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached ids in insertion order (oldest first).
    pub fn ids(&self) -> impl Iterator<Item = &RequestId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Drop all cached fragments, retaining capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn prune(&mut self) {
        while self.entries.len() > self.bound {
            self.entries.remove(0);
        }
    }
}
