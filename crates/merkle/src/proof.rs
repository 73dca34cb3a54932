//! Inclusion proofs and their verification.
//!
//! A [`Proof`] is the list of siblings met while walking from a leaf up to
//! the root, each tagged with the side it sits on. It holds no reference to
//! the tree: a leaf, a proof, a claimed root and the [`PairOrdering`] the
//! tree was built with are enough to check membership.
//!
//! Verification never fails with an error. A wrong leaf, a tampered step, a
//! wrong root or a mismatched ordering all produce `false`.
//!
//! ```
//! use canopy_merkle::{MerkleTree, Sha256Hasher, TreeOptions, verify_proof};
//!
//! let leaves = ["satoshi@nakamoto.com", "vitalik@buterin.ca", "gavin@wood.de", ""];
//! let options = TreeOptions::sorted();
//! let tree = MerkleTree::new(Sha256Hasher::new(), leaves, options);
//!
//! let proof = tree.proof_for("vitalik@buterin.ca");
//! assert!(verify_proof(&Sha256Hasher::new(), "vitalik@buterin.ca", &proof, &tree.root(), options.pair_ordering));
//!
//! let missing = tree.proof_for("bitalik@buterin.ca");
//! assert!(missing.is_empty());
//! assert!(!verify_proof(&Sha256Hasher::new(), "bitalik@buterin.ca", &missing, &tree.root(), options.pair_ordering));
//! ```

use std::slice;

use crate::error::{MerkleError, Result};
use crate::hasher::MerkleHasher;
use crate::node::NodeHash;
use crate::options::PairOrdering;

/// Side a sibling occupies relative to the node being proved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::EnumString, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Position {
    /// The sibling is the left child; the proved node is on the right.
    Left,
    /// The sibling is the right child; the proved node is on the left.
    Right,
}

/// One level of an inclusion proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProofStep {
    /// Hash of the sibling node
    pub sibling: NodeHash,
    /// Side of the sibling
    pub position: Position,
}

impl ProofStep {
    /// Create a new proof step
    pub const fn new(sibling: NodeHash, position: Position) -> Self {
        Self { sibling, position }
    }
}

/// An inclusion proof: sibling steps ordered from the leaf level upward.
///
/// An empty proof is what a tree hands out for a leaf it does not contain.
/// It only verifies when the leaf itself equals the root, which is the
/// single-leaf tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Proof {
    steps: Vec<ProofStep>,
}

impl Proof {
    /// Create a proof from its steps
    pub const fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    /// The steps, leaf level first
    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the proof has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over the steps
    pub fn iter(&self) -> slice::Iter<'_, ProofStep> {
        self.steps.iter()
    }

    /// Recompute the root implied by `leaf` and this proof.
    pub fn compute_root<H: MerkleHasher>(
        &self,
        hasher: &H,
        leaf: &NodeHash,
        ordering: PairOrdering,
    ) -> NodeHash {
        self.steps
            .iter()
            .fold(*leaf, |current, step| match step.position {
                Position::Left => hasher.hash_pair(ordering, &step.sibling, &current),
                Position::Right => hasher.hash_pair(ordering, &current, &step.sibling),
            })
    }

    /// Check that `leaf` and this proof lead to `root`.
    pub fn verify<H: MerkleHasher>(
        &self,
        hasher: &H,
        leaf: &NodeHash,
        root: &NodeHash,
        ordering: PairOrdering,
    ) -> bool {
        self.compute_root(hasher, leaf, ordering) == *root
    }

    /// Sibling hashes as lowercase hex, leaf level first.
    ///
    /// Positions are dropped, so this form is only sufficient for
    /// [`PairOrdering::Sorted`] trees. Use [`Self::to_positional_hex`] otherwise.
    pub fn to_hex(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.sibling.to_hex()).collect()
    }

    /// `(position, sibling hex)` pairs, leaf level first.
    pub fn to_positional_hex(&self) -> Vec<(&'static str, String)> {
        self.steps
            .iter()
            .map(|step| (step.position.into(), step.sibling.to_hex()))
            .collect()
    }

    /// Decode the output of [`Self::to_positional_hex`].
    pub fn from_positional_hex<'a, I>(steps: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        steps
            .into_iter()
            .map(|(position, sibling)| -> Result<ProofStep> {
                let position = position
                    .parse::<Position>()
                    .map_err(|_| MerkleError::invalid_position(position))?;
                Ok(ProofStep::new(NodeHash::from_hex(sibling)?, position))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Decode sibling hashes without positions (see [`Self::to_hex`]).
    ///
    /// Every step is tagged [`Position::Right`], which is only meaningful
    /// under [`PairOrdering::Sorted`].
    pub fn from_hex<I, S>(siblings: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        siblings
            .into_iter()
            .map(|s| NodeHash::from_hex(s.as_ref()).map(|n| ProofStep::new(n, Position::Right)))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }
}

impl From<Vec<ProofStep>> for Proof {
    fn from(steps: Vec<ProofStep>) -> Self {
        Self::new(steps)
    }
}

impl FromIterator<ProofStep> for Proof {
    fn from_iter<T: IntoIterator<Item = ProofStep>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Proof {
    type Item = ProofStep;
    type IntoIter = std::vec::IntoIter<ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = &'a ProofStep;
    type IntoIter = slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Check that the leaf hash `leaf` is proved by `proof` under `root`.
pub fn verify<H: MerkleHasher>(
    hasher: &H,
    leaf: &NodeHash,
    proof: &Proof,
    root: &NodeHash,
    ordering: PairOrdering,
) -> bool {
    proof.verify(hasher, leaf, root, ordering)
}

/// Hash `value` as a leaf and check it against `root` with `proof`.
pub fn verify_proof<H, T>(
    hasher: &H,
    value: T,
    proof: &Proof,
    root: &NodeHash,
    ordering: PairOrdering,
) -> bool
where
    H: MerkleHasher,
    T: AsRef<[u8]>,
{
    let leaf = hasher.hash(value.as_ref());
    proof.verify(hasher, &leaf, root, ordering)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Sha256Hasher;

    fn node(byte: u8) -> NodeHash {
        NodeHash::new([byte; 32])
    }

    #[test]
    fn test_empty_proof_checks_leaf_against_root() {
        let hasher = Sha256Hasher::new();
        let proof = Proof::default();
        assert!(proof.verify(&hasher, &node(1), &node(1), PairOrdering::Positional));
        assert!(!proof.verify(&hasher, &node(1), &node(2), PairOrdering::Positional));
    }

    #[test]
    fn test_position_decides_concatenation_order() {
        let hasher = Sha256Hasher::new();
        let (leaf, sibling) = (node(1), node(2));

        let left = Proof::new(vec![ProofStep::new(sibling, Position::Left)]);
        assert_eq!(
            left.compute_root(&hasher, &leaf, PairOrdering::Positional),
            hasher.hash_pair(PairOrdering::Positional, &sibling, &leaf)
        );

        let right = Proof::new(vec![ProofStep::new(sibling, Position::Right)]);
        assert_eq!(
            right.compute_root(&hasher, &leaf, PairOrdering::Positional),
            hasher.hash_pair(PairOrdering::Positional, &leaf, &sibling)
        );

        // Sorted ordering ignores the position
        assert_eq!(
            left.compute_root(&hasher, &leaf, PairOrdering::Sorted),
            right.compute_root(&hasher, &leaf, PairOrdering::Sorted)
        );
    }

    #[test]
    fn test_positional_hex_roundtrip() {
        let proof = Proof::new(vec![
            ProofStep::new(node(0xab), Position::Left),
            ProofStep::new(node(0x01), Position::Right),
        ]);

        let encoded = proof.to_positional_hex();
        assert_eq!(encoded[0].0, "left");
        assert_eq!(encoded[1].1, "01".repeat(32));

        let decoded =
            Proof::from_positional_hex(encoded.iter().map(|(p, s)| (*p, s.as_str()))).unwrap();
        assert_eq!(decoded, proof);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        let hex = "01".repeat(32);
        assert_eq!(
            Proof::from_positional_hex([("up", hex.as_str())]),
            Err(MerkleError::InvalidPosition("up".into()))
        );
        assert!(Proof::from_hex(["xyz"]).is_err());
        assert!(Proof::from_hex([&hex[..62]]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_shape() {
        let proof = Proof::new(vec![ProofStep::new(node(0x0f), Position::Left)]);
        let json = serde_json::to_value(&proof).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "sibling": "0f".repeat(32), "position": "left" }])
        );
        let decoded: Proof = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, proof);
    }
}
