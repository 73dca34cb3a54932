//! Error types for the canopy-merkle crate
//!
//! Only boundary decoding (hex strings, byte slices, positions) and
//! out-of-range index lookups are errors. A leaf that is not in the tree
//! yields an empty proof and a proof that does not check out verifies to
//! `false`; neither goes through this type.
//!
//! ## Example Usage
//!
//! ```
//! use canopy_merkle::{MerkleError, NodeHash};
//!
//! match NodeHash::from_hex("abcd") {
//!     Ok(_) => unreachable!("two bytes is not a node hash"),
//!     Err(MerkleError::InvalidLength { expected, actual }) => {
//!         assert_eq!((expected, actual), (32, 2));
//!     }
//!     Err(e) => panic!("unexpected error: {e}"),
//! }
//! ```

use alloy_primitives::hex::FromHexError;
use thiserror::Error;

/// Result type for operations in the merkle crate
pub type Result<T> = std::result::Result<T, MerkleError>;

/// Main error type for the merkle crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// A hash string was not valid hexadecimal
    #[error("invalid hex encoding: {0}")]
    InvalidHex(#[from] FromHexError),

    /// A hash had the wrong number of bytes
    #[error("invalid hash length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// A leaf index past the end of the leaf layer
    #[error("leaf index {index} out of bounds for tree with {leaves} leaves")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of leaves in the tree.
        leaves: usize,
    },

    /// A proof step position that is neither `left` nor `right`
    #[error("invalid proof position: {0}")]
    InvalidPosition(String),
}

impl MerkleError {
    pub(crate) const fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidLength { expected, actual }
    }

    pub(crate) const fn index_out_of_bounds(index: usize, leaves: usize) -> Self {
        Self::IndexOutOfBounds { index, leaves }
    }

    pub(crate) fn invalid_position<S: Into<String>>(msg: S) -> Self {
        Self::InvalidPosition(msg.into())
    }
}
