//! Immutable ring state
//!
//! A `RingSnapshot` is built once from a node list and never mutated. The
//! ring swaps whole snapshots, so a reader holding one always sees a
//! consistent slot sequence and owner map.

use crate::hash::HashFn;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

/// Slot -> owning node
type OwnerMap = HashMap<u32, Arc<str>, BuildHasherDefault<SipHasher13>>;

/// A fully built ring: sorted slots plus the node owning each slot
pub struct RingSnapshot {
    /// Slot positions, ascending. Colliding slots appear once per replica.
    slots: Vec<u32>,

    /// Owner of each distinct slot
    owners: OwnerMap,

    /// Distinct node names, ascending
    nodes: Vec<Arc<str>>,

    /// Virtual nodes per node
    replicas: usize,

    hash_fn: HashFn,
}

impl RingSnapshot {
    /// Create a ring with no nodes
    pub(crate) fn empty(replicas: usize, hash_fn: HashFn) -> Self {
        RingSnapshot {
            slots: Vec::new(),
            owners: OwnerMap::default(),
            nodes: Vec::new(),
            replicas,
            hash_fn,
        }
    }

    /// Build a ring from a node list
    ///
    /// Each node gets one slot per replica index `i`, at `hash_fn("{i}{node}")`.
    /// Duplicate names are collapsed. Nodes are placed in name order and the
    /// first owner of a slot keeps it, so when two slots collide the node with
    /// the smallest name wins whatever order the caller passed.
    pub(crate) fn build<S: AsRef<str>>(replicas: usize, hash_fn: HashFn, nodes: &[S]) -> Self {
        let mut names: Vec<&str> = nodes.iter().map(|node| node.as_ref()).collect();
        names.sort_unstable();
        names.dedup();

        let capacity = replicas * names.len();
        let mut slots = Vec::with_capacity(capacity);
        let mut owners = OwnerMap::with_capacity_and_hasher(capacity, Default::default());
        let mut node_names = Vec::with_capacity(names.len());

        for name in names {
            let node: Arc<str> = Arc::from(name);
            for i in 0..replicas {
                let slot = hash_fn(format!("{}{}", i, name).as_bytes());
                slots.push(slot);
                owners.entry(slot).or_insert_with(|| node.clone());
            }
            node_names.push(node);
        }

        slots.sort_unstable();

        RingSnapshot {
            slots,
            owners,
            nodes: node_names,
            replicas,
            hash_fn,
        }
    }

    /// Find the node owning `key`, or `None` if the ring is empty
    ///
    /// The owner is the node of the first slot at or after the key's hash,
    /// wrapping to the first slot past the end of the ring.
    pub fn locate(&self, key: &str) -> Option<&str> {
        if self.slots.is_empty() {
            return None;
        }

        let hash = (self.hash_fn)(key.as_bytes());
        let idx = self.slots.partition_point(|&slot| slot < hash);
        let slot = if idx == self.slots.len() {
            self.slots[0]
        } else {
            self.slots[idx]
        };

        self.owners.get(&slot).map(|node| node.as_ref())
    }

    /// Slot positions, ascending
    pub fn slots(&self) -> &[u32] {
        &self.slots
    }

    /// Owner of an exact slot position
    pub fn owner_of(&self, slot: u32) -> Option<&str> {
        self.owners.get(&slot).map(|node| node.as_ref())
    }

    /// Distinct node names, ascending
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.as_ref())
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of distinct slot positions (less than `slot_count` on collision)
    pub fn distinct_slot_count(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for RingSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingSnapshot")
            .field("replicas", &self.replicas)
            .field("nodes", &self.nodes)
            .field("slots", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hashes decimal strings to their integer value
    fn numeric_hash() -> HashFn {
        Arc::new(|data: &[u8]| {
            std::str::from_utf8(data)
                .unwrap()
                .parse::<u32>()
                .unwrap()
        })
    }

    #[test]
    fn test_build_places_replicas() {
        let snapshot = RingSnapshot::build(3, numeric_hash(), &["2", "4", "6"]);

        assert_eq!(snapshot.slots(), &[2, 4, 6, 12, 14, 16, 22, 24, 26]);
        assert_eq!(snapshot.owner_of(12), Some("2"));
        assert_eq!(snapshot.owner_of(24), Some("4"));
        assert_eq!(snapshot.node_count(), 3);
    }

    #[test]
    fn test_lower_bound_and_wraparound() {
        let snapshot = RingSnapshot::build(3, numeric_hash(), &["2", "4", "6"]);

        // Exact hit
        assert_eq!(snapshot.locate("2"), Some("2"));
        // Between slots
        assert_eq!(snapshot.locate("11"), Some("2"));
        assert_eq!(snapshot.locate("23"), Some("4"));
        // Past the last slot wraps to the first
        assert_eq!(snapshot.locate("27"), Some("2"));
        // Before the first slot
        assert_eq!(snapshot.locate("0"), Some("2"));
    }

    #[test]
    fn test_duplicate_nodes_collapsed() {
        let snapshot = RingSnapshot::build(3, numeric_hash(), &["2", "4", "2"]);

        assert_eq!(snapshot.node_count(), 2);
        assert_eq!(snapshot.slot_count(), 6);
        assert_eq!(snapshot.nodes().collect::<Vec<_>>(), vec!["2", "4"]);
    }

    #[test]
    fn test_collision_smallest_name_wins() {
        let constant: HashFn = Arc::new(|_: &[u8]| 7u32);

        let a = RingSnapshot::build(2, constant.clone(), &["b", "a", "c"]);
        let b = RingSnapshot::build(2, constant, &["c", "b", "a"]);

        assert_eq!(a.slot_count(), 6);
        assert_eq!(a.distinct_slot_count(), 1);
        assert_eq!(a.locate("anything"), Some("a"));
        assert_eq!(b.locate("anything"), Some("a"));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = RingSnapshot::empty(3, numeric_hash());

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.locate("1"), None);
        assert_eq!(snapshot.node_count(), 0);
    }

    #[test]
    fn test_slots_sorted_and_owned() {
        let nodes: Vec<String> = (0..20).map(|i| format!("shard-{}", i)).collect();
        let snapshot = RingSnapshot::build(50, crate::hash::default_hash_fn(), &nodes);

        assert_eq!(snapshot.slot_count(), 50 * 20);
        assert!(snapshot.slots().windows(2).all(|w| w[0] <= w[1]));
        assert!(snapshot.slots().iter().all(|&s| snapshot.owner_of(s).is_some()));
    }
}
