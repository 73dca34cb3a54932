//! Merkle trees with inclusion proofs
//!
//! This crate builds a binary merkle tree over a list of leaf values, derives
//! its root, and produces and verifies inclusion proofs for single leaves.
//!
//! ## Key Components
//!
//! - **Hashers**: any one-way function with a 32-byte output ([`MerkleHasher`]),
//!   with SHA-256 as the default and Keccak-256 built in
//! - **Trees**: deterministic bottom-up construction from any number of leaves,
//!   odd layers included ([`MerkleTree`])
//! - **Proofs**: sibling paths that check membership of one leaf against a
//!   root without access to the tree ([`Proof`], [`verify_proof`])
//!
//! A tree and the proofs checked against it must agree on [`PairOrdering`].
//! The ordering cannot be recovered from a proof, so verifying with the wrong
//! one just returns `false`.
//!
//! ## Usage Examples
//!
//! ```
//! use canopy_merkle::{MerkleHasher, MerkleTree, OddNodePolicy, Sha256Hasher, TreeOptions};
//!
//! let options = TreeOptions::new().with_odd_node(OddNodePolicy::CarryUp);
//! let tree = MerkleTree::new(Sha256Hasher::new(), ["a", "b", "c"], options);
//!
//! let leaf = tree.hasher().hash(b"c");
//! let proof = tree.proof(&leaf);
//! assert!(tree.verify(&proof, &leaf));
//!
//! // The unpaired leaf is carried up, so only one sibling is needed
//! assert_eq!(proof.len(), 1);
//! assert_eq!(tree.depth(), 2);
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod cache;
pub mod error;
pub mod hasher;
pub mod node;
pub mod options;
pub mod proof;
pub mod tree;

// Re-export core types
pub use error::{MerkleError, Result};
pub use hasher::{
    AnyHasher, DigestHasher, FnHasher, HashAlgorithm, Keccak256Hasher, MerkleHasher,
    Sha256Hasher, combine,
};
pub use node::{HASH_SIZE, NodeHash};
pub use options::{OddNodePolicy, PairOrdering, TreeOptions};
pub use proof::{Position, Proof, ProofStep, verify, verify_proof};
pub use tree::{MerkleTree, build_tree};
