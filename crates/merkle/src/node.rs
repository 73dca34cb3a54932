//! Node hash implementation
//!
//! This module provides the [`NodeHash`] type, the fixed-length 32-byte
//! value stored at every position of a merkle tree: leaf hashes in layer 0,
//! interior hashes above them and the root at the top.
//!
//! Internally a node is raw bytes. At the boundary it is exchanged as a
//! lowercase hexadecimal string.
//!
//! ## Example Usage
//!
//! ```
//! use canopy_merkle::NodeHash;
//!
//! let node = NodeHash::from_hex(
//!     "0x038a33cbcf36f6fe7f270188fc4cd48087cd6dddc2120d39d5e225191676183e",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     node.to_string(),
//!     "038a33cbcf36f6fe7f270188fc4cd48087cd6dddc2120d39d5e225191676183e"
//! );
//! assert_eq!(node, node.to_hex().parse::<NodeHash>().unwrap());
//! ```

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use alloy_primitives::{B256, hex};

use crate::error::{MerkleError, Result};

/// Size of a node hash in bytes
pub const HASH_SIZE: usize = 32;

/// A 256-bit hash occupying one position of a merkle tree.
///
/// Ordering is lexicographic over the raw bytes, which is the order used
/// when sibling pairs are sorted before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeHash(pub B256);

impl NodeHash {
    /// Creates a new node from raw bytes
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(B256::new(bytes))
    }

    /// Returns the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Creates a new node from a slice, checking the length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != HASH_SIZE {
            return Err(MerkleError::invalid_length(HASH_SIZE, slice.len()));
        }
        Ok(Self(B256::from_slice(slice)))
    }

    /// Decodes a hex string, with or without a `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))?;
        Self::from_slice(&bytes)
    }

    /// Encodes as lowercase hex without a prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_slice())
    }

    /// The all-zero node, used as the root of a tree with no leaves
    pub const fn zero() -> Self {
        Self(B256::ZERO)
    }

    /// Checks if this node is zeros
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for NodeHash {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Deref for NodeHash {
    type Target = B256;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<B256> for NodeHash {
    fn from(value: B256) -> Self {
        Self(value)
    }
}

impl From<[u8; HASH_SIZE]> for NodeHash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self::new(bytes)
    }
}

impl From<NodeHash> for B256 {
    fn from(node: NodeHash) -> Self {
        node.0
    }
}

impl AsRef<[u8]> for NodeHash {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NodeHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NodeHash {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
