//! Rollback support for optimistic mutations.
//!
//! A store applies a speculative edit to its caches before the remote
//! call resolves.  [`OptimisticContext`] captures the affected entries
//! first; when the call fails the context restores every entry to its
//! pre-mutation state, byte for byte, freshness included.

use std::hash::Hash;

use crate::cache::{Cache, Snapshot};

/// Snapshots of the entries a mutation is about to touch in one cache.
pub struct OptimisticContext<K, T> {
    cache: Cache<K, T>,
    saved: Vec<(K, Snapshot<T>)>,
}

impl<K, T> OptimisticContext<K, T>
where
    K: Eq + Hash + Clone + Send + 'static,
    T: Send + Sync + 'static,
{
    /// Capture the listed keys before the speculative edit is applied.
    pub fn capture(cache: &Cache<K, T>, keys: impl IntoIterator<Item = K>) -> Self {
        let saved = keys
            .into_iter()
            .map(|key| {
                let snapshot = cache.snapshot(&key);
                (key, snapshot)
            })
            .collect();
        Self {
            cache: cache.clone(),
            saved,
        }
    }

    /// Undo the speculative edit.  Consumes the context; call only on
    /// the failure path.
    pub fn restore(self) {
        tracing::debug!(entries = self.saved.len(), "Rolling back optimistic edit");
        for (key, snapshot) in self.saved {
            self.cache.restore(key, snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ListKey;

    #[test]
    fn restore_reverts_every_captured_key() {
        let cache: Cache<ListKey, Vec<i32>> = Cache::new();
        cache.insert(ListKey, vec![1, 2, 3]);

        let ctx = OptimisticContext::capture(&cache, [ListKey]);
        cache.update(&ListKey, |v| v.retain(|&x| x != 2));
        assert_eq!(*cache.get(&ListKey).unwrap(), vec![1, 3]);

        ctx.restore();
        assert_eq!(*cache.get(&ListKey).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn restore_removes_entries_that_did_not_exist() {
        let cache: Cache<String, i32> = Cache::new();
        let ctx = OptimisticContext::capture(&cache, ["n1".to_string()]);
        cache.insert("n1".into(), 7);

        ctx.restore();
        assert!(cache.get(&"n1".to_string()).is_none());
    }
}
