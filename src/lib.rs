//! ringhash - A consistent hash ring for routing keys to named nodes
//!
//! The ring is a passive, in-memory structure:
//! - `hash` provides the `u32` hash functions slots and keys are placed with
//! - `ring` owns the slot sequence and resolves keys, safe for concurrent use
//!
//! ```
//! use ringhash::Ring;
//!
//! let ring = Ring::new(3, None).unwrap();
//! ring.reset(&["node1", "node2", "node3"]);
//! assert_eq!(ring.hash_key("key1"), "node1");
//! ```

pub mod hash;
pub mod ring;

/// Re-export commonly used types
pub use hash::{HashAlgorithm, HashFn};
pub use ring::{ConsistentHash, Reassignment, Ring, RingConfig, RingError, RingSnapshot, RingStats};
