//! Priority-ordered resolver registry.
//!
//! # Responsibilities
//! - Keep resolvers sorted by priority, highest first
//! - Deduplicate by handle identity
//! - Publish immutable snapshots for lock-free reads
//!
//! # Design Decisions
//! - Readers `load` an `Arc<Vec<_>>` and never observe a half-sorted list
//! - Writers serialize on a mutex, rebuild the list and swap it in
//! - Sorting is stable, so equal priorities keep insertion order

use std::sync::{Arc, Mutex, MutexGuard};

use arc_swap::ArcSwap;

use crate::observability::metrics;
use crate::routing::resolver::ResolverHandle;

/// A resolver paired with its priority.
#[derive(Debug, Clone)]
pub struct ResolverEntry {
    pub handle: ResolverHandle,
    pub priority: i32,
}

/// Ordered collection of resolvers.
#[derive(Debug)]
pub struct ResolverRegistry {
    entries: ArcSwap<Vec<ResolverEntry>>,
    write_lock: Mutex<()>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Vec::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Insert `handle`, or update its priority if already present.
    pub fn add(&self, handle: ResolverHandle, priority: i32) {
        self.batch(&[], vec![(handle, priority)]);
    }

    /// Drop `handle`. No-op if absent.
    pub fn remove(&self, handle: &ResolverHandle) {
        self.batch(std::slice::from_ref(handle), Vec::new());
    }

    /// Insert each of `handles`. With no `priority`, new handles get 0 and
    /// handles already present keep the priority they have.
    pub fn add_many(&self, handles: Vec<ResolverHandle>, priority: Option<i32>) {
        self.apply(
            &[],
            handles.into_iter().map(|handle| (handle, priority)).collect(),
        );
    }

    /// Apply removals then additions, publishing a single snapshot.
    pub fn batch(&self, remove: &[ResolverHandle], add: Vec<(ResolverHandle, i32)>) {
        self.apply(
            remove,
            add.into_iter()
                .map(|(handle, priority)| (handle, Some(priority)))
                .collect(),
        );
    }

    fn apply(&self, remove: &[ResolverHandle], add: Vec<(ResolverHandle, Option<i32>)>) {
        let _guard = self.lock();
        let current = self.entries.load_full();
        let mut next: Vec<ResolverEntry> = current
            .iter()
            .filter(|entry| !remove.contains(&entry.handle))
            .cloned()
            .collect();
        let mut changed = next.len() != current.len();

        for (handle, priority) in add {
            match next.iter_mut().find(|entry| entry.handle == handle) {
                Some(existing) if priority.map_or(true, |p| p == existing.priority) => {}
                Some(existing) => {
                    let priority = priority.unwrap_or(existing.priority);
                    tracing::debug!(
                        resolver = handle.name(),
                        id = %handle.id(),
                        from = existing.priority,
                        to = priority,
                        "Resolver priority updated"
                    );
                    existing.priority = priority;
                    changed = true;
                }
                None => {
                    let priority = priority.unwrap_or(0);
                    tracing::debug!(
                        resolver = handle.name(),
                        id = %handle.id(),
                        priority,
                        "Resolver added"
                    );
                    next.push(ResolverEntry { handle, priority });
                    changed = true;
                }
            }
        }

        if !changed {
            return;
        }

        next.sort_by(|a, b| b.priority.cmp(&a.priority));
        metrics::record_resolver_count(next.len());
        self.entries.store(Arc::new(next));
    }

    /// Current ordering. The returned list never changes.
    pub fn snapshot(&self) -> Arc<Vec<ResolverEntry>> {
        self.entries.load_full()
    }

    pub fn contains(&self, handle: &ResolverHandle) -> bool {
        self.entries.load().iter().any(|entry| entry.handle == *handle)
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so a poisoned lock is still usable.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
