//! Thread-safe handle to a graph store
//!
//! The store itself is single-threaded. Hosts that share one graph between
//! threads go through [`SharedGraphStore`], which serialises every operation
//! behind one lock around the whole store.

use super::edge::DEFAULT_WEIGHT;
use super::node::GraphNode;
use super::store::{GraphResult, GraphStatistics, GraphStore};
use super::types::{NodeId, RelationType};
use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable, lock-protected graph store
#[derive(Debug, Clone, Default)]
pub struct SharedGraphStore {
    inner: Arc<RwLock<GraphStore>>,
}

impl SharedGraphStore {
    pub fn new(store: GraphStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run a read-only closure while holding the lock
    ///
    /// Every store operation is a single update, so a lock poisoned by a
    /// panicking writer still guards a consistent store and is recovered.
    pub fn read<R>(&self, f: impl FnOnce(&GraphStore) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run a mutating closure while holding the lock exclusively
    pub fn write<R>(&self, f: impl FnOnce(&mut GraphStore) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn add_node(&self, node: GraphNode) -> GraphResult<()> {
        self.write(|store| store.add_node(node))
    }

    pub fn add_edge(
        &self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        relation: RelationType,
    ) -> GraphResult<()> {
        self.add_weighted_edge(source, target, relation, DEFAULT_WEIGHT)
    }

    pub fn add_weighted_edge(
        &self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        relation: RelationType,
        weight: f64,
    ) -> GraphResult<()> {
        let (source, target) = (source.into(), target.into());
        self.write(|store| store.add_weighted_edge(source, target, relation, weight))
    }

    /// Copy of the node, since references cannot outlive the lock
    pub fn get_node(&self, id: impl AsRef<str>) -> GraphResult<GraphNode> {
        self.read(|store| store.get_node(id).cloned())
    }

    pub fn find_path(
        &self,
        source: impl AsRef<str>,
        target: impl AsRef<str>,
        max_depth: Option<usize>,
    ) -> GraphResult<Vec<NodeId>> {
        self.read(|store| store.find_path(source, target, max_depth))
    }

    pub fn get_stats(&self) -> GraphStatistics {
        self.read(GraphStore::get_stats)
    }

    /// Take the store back out, cloning it if other handles are still alive
    pub fn into_inner(self) -> GraphStore {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => lock.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared.read().unwrap_or_else(PoisonError::into_inner).clone(),
        }
    }
}

impl From<GraphStore> for SharedGraphStore {
    fn from(store: GraphStore) -> Self {
        Self::new(store)
    }
}
