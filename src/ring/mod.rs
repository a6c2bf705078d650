//! Consistent hash ring module
//!
//! Maps keys to a dynamic set of named nodes. Each node owns `replicas`
//! slots on a `u32` ring and a key belongs to the node of the first slot at
//! or after its hash. Changing the node set only remaps the keys that fall
//! between moved slots.

mod diff;
mod hash_ring;
mod state;
mod types;

pub use diff::{diff, Reassignment};
pub use hash_ring::Ring;
pub use state::RingSnapshot;
pub use types::{RingError, RingStats};

use crate::hash::HashAlgorithm;
use serde::{Deserialize, Serialize};

/// Consistent hashing over a set of named nodes
pub trait ConsistentHash: Send + Sync {
    /// Replace the node set with `nodes`
    fn reset<S: AsRef<str>>(&self, nodes: &[S]);

    /// Resolve `key` to a node name, or an empty string if there are no nodes
    fn hash_key(&self, key: &str) -> String;
}

/// Ring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Slots per node; higher is smoother but costs memory and reset time
    pub replicas: usize,
    /// Hash algorithm, must match across every ring that shares a mapping
    pub hash: HashAlgorithm,
    /// Initial nodes
    pub nodes: Vec<String>,
}

impl RingConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, RingError> {
        let config: RingConfig =
            serde_json::from_str(json).map_err(|e| RingError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the config describes a buildable ring
    pub fn validate(&self) -> Result<(), RingError> {
        if self.replicas == 0 {
            return Err(RingError::InvalidReplicas(self.replicas));
        }
        Ok(())
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        RingConfig {
            replicas: 50,
            hash: HashAlgorithm::default(),
            nodes: Vec::new(),
        }
    }
}
