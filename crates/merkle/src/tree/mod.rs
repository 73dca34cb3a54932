//! Merkle tree construction and proof generation.
//!
//! A [`MerkleTree`] is built once from a fixed list of leaves and never
//! changes. Layer 0 holds the leaf hashes in input order (or byte order when
//! [`TreeOptions::sort_leaves`] is set). Each layer above is produced by
//! hashing adjacent pairs, so `layers[i + 1].len() == ceil(layers[i].len() / 2)`,
//! and the last layer holds the root alone. Every layer is kept so that
//! sibling lookups are possible at any depth.
//!
//! A tree with no leaves has a single empty layer and the all-zero root
//! ([`NodeHash::zero`]).

mod builder;
mod prover;

use std::fmt;

use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cache::{LeafIndex, OnceCache, index_leaves};
use crate::error::{MerkleError, Result};
use crate::hasher::{MerkleHasher, Sha256Hasher};
use crate::node::NodeHash;
use crate::options::TreeOptions;
use crate::proof::Proof;

use builder::build_layers;
use prover::generate_proof;

/// A binary merkle tree over a fixed list of leaves.
#[derive(Debug, Clone)]
pub struct MerkleTree<H = Sha256Hasher> {
    hasher: H,
    options: TreeOptions,
    layers: Vec<Vec<NodeHash>>,
    root: NodeHash,
    leaf_index: OnceCache<LeafIndex>,
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Hash each raw leaf value with `hasher` and build the tree.
    pub fn new<I, T>(hasher: H, leaves: I, options: TreeOptions) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let hashes = leaves
            .into_iter()
            .map(|leaf| hasher.hash(leaf.as_ref()))
            .collect();
        Self::build(hasher, hashes, options)
    }

    /// Build the tree from leaves that are already hashed.
    pub fn from_leaf_hashes<I>(hasher: H, leaves: I, options: TreeOptions) -> Self
    where
        I: IntoIterator<Item = NodeHash>,
    {
        Self::build(hasher, leaves.into_iter().collect(), options)
    }

    fn build(hasher: H, mut leaves: Vec<NodeHash>, options: TreeOptions) -> Self {
        if options.sort_leaves {
            leaves.sort_unstable();
        }

        let leaf_count = leaves.len();
        let layers = build_layers(&hasher, leaves, options);
        let root = layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or_else(NodeHash::zero);

        debug!(
            leaves = leaf_count,
            depth = layers.len() - 1,
            pair_ordering = %options.pair_ordering,
            odd_node = %options.odd_node,
            %root,
            "built merkle tree"
        );

        Self {
            hasher,
            options,
            layers,
            root,
            leaf_index: OnceCache::new(),
        }
    }

    /// The root hash
    #[inline]
    pub const fn root(&self) -> NodeHash {
        self.root
    }

    /// The root hash as lowercase hex
    pub fn root_hex(&self) -> String {
        self.root.to_hex()
    }

    /// Leaf hashes (layer 0)
    pub fn leaves(&self) -> &[NodeHash] {
        &self.layers[0]
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// True when the tree was built from no leaves
    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }

    /// All layers, leaves first and root last
    pub fn layers(&self) -> &[Vec<NodeHash>] {
        &self.layers
    }

    /// Number of layers above the leaves
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// The options the tree was built with
    pub const fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// The hasher the tree was built with
    pub const fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Index of the first leaf equal to `leaf`
    pub fn leaf_index(&self, leaf: &NodeHash) -> Option<usize> {
        self.leaf_index
            .get_or_compute(|| index_leaves(self.leaves()))
            .get(leaf)
            .copied()
    }

    /// Proof for the leaf hash `leaf`.
    ///
    /// A leaf that is not in the tree gets an empty proof. When the same hash
    /// occurs more than once, the first occurrence is proved.
    pub fn proof(&self, leaf: &NodeHash) -> Proof {
        match self.leaf_index(leaf) {
            Some(index) => self.proof_unchecked(index),
            None => {
                trace!(%leaf, "leaf not in tree, returning empty proof");
                Proof::default()
            }
        }
    }

    /// Proof for a raw leaf value, hashed with the tree's hasher.
    pub fn proof_for<T: AsRef<[u8]>>(&self, value: T) -> Proof {
        self.proof(&self.hasher.hash(value.as_ref()))
    }

    /// Proof for the leaf at `index`
    pub fn proof_at(&self, index: usize) -> Result<Proof> {
        if index >= self.leaf_count() {
            return Err(MerkleError::index_out_of_bounds(index, self.leaf_count()));
        }
        Ok(self.proof_unchecked(index))
    }

    /// Proofs for every leaf, in leaf order
    pub fn proofs(&self) -> Vec<Proof> {
        let odd_node = self.options.odd_node;

        #[cfg(feature = "parallel")]
        {
            (0..self.leaf_count())
                .into_par_iter()
                .map(|index| generate_proof(&self.layers, index, odd_node))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            (0..self.leaf_count())
                .map(|index| generate_proof(&self.layers, index, odd_node))
                .collect()
        }
    }

    fn proof_unchecked(&self, index: usize) -> Proof {
        let proof = generate_proof(&self.layers, index, self.options.odd_node);
        trace!(index, steps = proof.len(), "generated proof");
        proof
    }

    /// Check `proof` for the leaf hash `leaf` against this tree's root
    pub fn verify(&self, proof: &Proof, leaf: &NodeHash) -> bool {
        proof.verify(&self.hasher, leaf, &self.root, self.options.pair_ordering)
    }
}

/// Build a SHA-256 tree from raw leaf values.
pub fn build_tree<I, T>(leaves: I, options: TreeOptions) -> MerkleTree
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    MerkleTree::new(Sha256Hasher::new(), leaves, options)
}

/// Renders one line per layer, root first, hashes in hex.
impl<H> fmt::Display for MerkleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (level, layer) in self.layers.iter().enumerate().rev() {
            write!(f, "{level}:")?;
            for node in layer {
                write!(f, " {node}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
