//! Hash functions for placing slots and keys on the ring
//!
//! The ring only needs a deterministic `&[u8] -> u32` mapping. Any closure
//! works; the built-in algorithms below are the ones a config can name.

use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;
use std::fmt;
use std::hash::Hasher;
use std::sync::Arc;

/// A hash function mapping arbitrary bytes to a ring position
///
/// Every ring that must agree on a key mapping has to use the same function.
pub type HashFn = Arc<dyn Fn(&[u8]) -> u32 + Send + Sync>;

/// Built-in hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// CRC32 (IEEE polynomial)
    Crc32,
    /// SipHash-1-3 with zero keys, folded to 32 bits
    Sip13,
    /// xxHash64 with seed 0, folded to 32 bits
    Xxh64,
}

impl HashAlgorithm {
    /// Hash `data` with this algorithm
    pub fn hash(self, data: &[u8]) -> u32 {
        match self {
            HashAlgorithm::Crc32 => crc32(data),
            HashAlgorithm::Sip13 => sip13(data),
            HashAlgorithm::Xxh64 => xxh64(data),
        }
    }

    /// Wrap this algorithm as a shareable `HashFn`
    pub fn to_hash_fn(self) -> HashFn {
        Arc::new(move |data: &[u8]| self.hash(data))
    }
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        HashAlgorithm::Crc32
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Crc32 => write!(f, "crc32"),
            HashAlgorithm::Sip13 => write!(f, "sip13"),
            HashAlgorithm::Xxh64 => write!(f, "xxh64"),
        }
    }
}

/// The default hash function (CRC32/IEEE)
pub fn default_hash_fn() -> HashFn {
    HashAlgorithm::Crc32.to_hash_fn()
}

/// CRC32 checksum of `data`
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// SipHash-1-3 of `data`, folded to 32 bits
pub fn sip13(data: &[u8]) -> u32 {
    let mut hasher = SipHasher13::new();
    hasher.write(data);
    fold(hasher.finish())
}

/// xxHash64 of `data`, folded to 32 bits
pub fn xxh64(data: &[u8]) -> u32 {
    fold(xxhash_rust::xxh64::xxh64(data, 0))
}

/// XOR the high and low halves so every input bit reaches the result
fn fold(hash: u64) -> u32 {
    ((hash >> 32) ^ hash) as u32
}
