//! Ring error and statistics types

use serde::Serialize;
use std::fmt;

/// Errors raised when building a ring
#[derive(Debug, Clone, PartialEq)]
pub enum RingError {
    /// Replica count must be positive
    InvalidReplicas(usize),

    /// Configuration could not be parsed
    InvalidConfig(String),
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::InvalidReplicas(n) => {
                write!(f, "Invalid replica count: {} (must be > 0)", n)
            }
            RingError::InvalidConfig(msg) => write!(f, "Invalid ring config: {}", msg),
        }
    }
}

impl std::error::Error for RingError {}

/// Summary of the current ring state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RingStats {
    pub replicas: usize,
    pub node_count: usize,
    pub slot_count: usize,
    pub distinct_slots: usize,
    /// Slots that lost their position to another node's (or replica's) slot
    pub collisions: usize,
}
