//! Shared consistent hash ring
//!
//! `Ring` holds the current `RingSnapshot` behind an `RwLock<Arc<_>>`.
//! `reset` builds the next snapshot without holding the lock and swaps it in
//! with one assignment, so lookups see either the old ring or the new one.

use super::state::RingSnapshot;
use super::types::{RingError, RingStats};
use super::{ConsistentHash, RingConfig};
use crate::hash::{default_hash_fn, HashFn};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Consistent hash ring mapping keys to named nodes
pub struct Ring {
    /// Virtual nodes per real node
    replicas: usize,

    hash_fn: HashFn,

    /// Current ring state, replaced whole on every reset
    state: RwLock<Arc<RingSnapshot>>,
}

impl Ring {
    /// Create an empty ring
    ///
    /// `replicas` is the number of slots each node gets and must be positive.
    /// `hash_fn` defaults to CRC32 when `None`.
    pub fn new(replicas: usize, hash_fn: Option<HashFn>) -> Result<Self, RingError> {
        if replicas == 0 {
            return Err(RingError::InvalidReplicas(replicas));
        }

        let hash_fn = hash_fn.unwrap_or_else(default_hash_fn);
        let state = RingSnapshot::empty(replicas, hash_fn.clone());

        info!("Created ring with {} replicas per node", replicas);

        Ok(Ring {
            replicas,
            hash_fn,
            state: RwLock::new(Arc::new(state)),
        })
    }

    /// Create a ring from a config, populated with its initial nodes
    pub fn with_config(config: &RingConfig) -> Result<Self, RingError> {
        config.validate()?;

        let ring = Ring::new(config.replicas, Some(config.hash.to_hash_fn()))?;
        if !config.nodes.is_empty() {
            ring.reset(config.nodes.as_slice());
        }

        Ok(ring)
    }

    /// Replace the node set
    ///
    /// The whole ring is rebuilt from `nodes`; nothing carries over from the
    /// previous call. An empty list leaves an empty ring.
    pub fn reset<S: AsRef<str>>(&self, nodes: &[S]) {
        let next = RingSnapshot::build(self.replicas, self.hash_fn.clone(), nodes);

        let collisions = next.slot_count() - next.distinct_slot_count();
        if collisions > 0 {
            warn!(collisions, "slot collisions during ring reset");
        }
        debug!(
            nodes = next.node_count(),
            slots = next.slot_count(),
            "ring reset"
        );

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
    }

    /// Resolve `key` to a node, or an empty string if the ring has no nodes
    pub fn hash_key(&self, key: &str) -> String {
        self.locate(key).unwrap_or_default()
    }

    /// Resolve `key` to a node, or `None` if the ring has no nodes
    pub fn locate(&self, key: &str) -> Option<String> {
        self.snapshot().locate(key).map(str::to_string)
    }

    /// The current ring state
    ///
    /// The snapshot stays valid and unchanged across later resets.
    pub fn snapshot(&self) -> Arc<RingSnapshot> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current node names, ascending
    pub fn nodes(&self) -> Vec<String> {
        self.snapshot().nodes().map(str::to_string).collect()
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub fn node_count(&self) -> usize {
        self.snapshot().node_count()
    }

    pub fn slot_count(&self) -> usize {
        self.snapshot().slot_count()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Get statistics about the ring
    pub fn stats(&self) -> RingStats {
        let snapshot = self.snapshot();

        RingStats {
            replicas: self.replicas,
            node_count: snapshot.node_count(),
            slot_count: snapshot.slot_count(),
            distinct_slots: snapshot.distinct_slot_count(),
            collisions: snapshot.slot_count() - snapshot.distinct_slot_count(),
        }
    }
}

impl ConsistentHash for Ring {
    fn reset<S: AsRef<str>>(&self, nodes: &[S]) {
        Ring::reset(self, nodes)
    }

    fn hash_key(&self, key: &str) -> String {
        Ring::hash_key(self, key)
    }
}

impl fmt::Debug for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("replicas", &self.replicas)
            .field("state", &self.snapshot())
            .finish()
    }
}
