//! Tree construction options.
//!
//! The same [`PairOrdering`] and [`OddNodePolicy`] must be used to build a
//! tree and to verify its proofs. Neither is recoverable from proof bytes, so
//! a mismatch is not detected: it simply makes verification return `false`.

/// How the two children of a node are ordered before they are hashed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[derive(strum::EnumString, strum::Display, strum::IntoStaticStr, strum::VariantNames)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PairOrdering {
    /// Left and right are fixed by index within the layer.
    #[default]
    Positional,
    /// The two children are byte-sorted, so the parent does not depend on
    /// which side each child sits.
    Sorted,
}

/// What happens to the last node of a layer with an odd number of nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[derive(strum::EnumString, strum::Display, strum::IntoStaticStr, strum::VariantNames)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OddNodePolicy {
    /// Hash the node together with itself. Proofs carry a step whose sibling
    /// is the node itself.
    #[default]
    Duplicate,
    /// Promote the node to the next layer unchanged. Proofs carry no step for
    /// that level.
    CarryUp,
}

/// Options for building a [`MerkleTree`](crate::MerkleTree).
///
/// ```
/// use canopy_merkle::{OddNodePolicy, PairOrdering, TreeOptions};
///
/// let options = TreeOptions::new()
///     .with_pair_ordering(PairOrdering::Sorted)
///     .with_odd_node(OddNodePolicy::CarryUp);
///
/// assert_eq!(options.pair_ordering, PairOrdering::Sorted);
/// assert!(!options.sort_leaves);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TreeOptions {
    /// Sibling ordering used when combining two nodes.
    pub pair_ordering: PairOrdering,
    /// Handling of the unpaired node in an odd-length layer.
    pub odd_node: OddNodePolicy,
    /// Sort the leaf hashes before building.
    pub sort_leaves: bool,
}

impl TreeOptions {
    /// Positional pairs, duplicated odd nodes, leaves in input order.
    pub const fn new() -> Self {
        Self {
            pair_ordering: PairOrdering::Positional,
            odd_node: OddNodePolicy::Duplicate,
            sort_leaves: false,
        }
    }

    /// Shorthand for sorted pair ordering with every other option at its default.
    pub const fn sorted() -> Self {
        Self::new().with_pair_ordering(PairOrdering::Sorted)
    }

    /// Set the sibling ordering
    pub const fn with_pair_ordering(mut self, pair_ordering: PairOrdering) -> Self {
        self.pair_ordering = pair_ordering;
        self
    }

    /// Set the odd node policy
    pub const fn with_odd_node(mut self, odd_node: OddNodePolicy) -> Self {
        self.odd_node = odd_node;
        self
    }

    /// Sort leaf hashes before building
    pub const fn with_sort_leaves(mut self, sort_leaves: bool) -> Self {
        self.sort_leaves = sort_leaves;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TreeOptions::default();
        assert_eq!(options, TreeOptions::new());
        assert_eq!(options.pair_ordering, PairOrdering::Positional);
        assert_eq!(options.odd_node, OddNodePolicy::Duplicate);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("sorted".parse::<PairOrdering>().unwrap(), PairOrdering::Sorted);
        assert_eq!(
            "carry-up".parse::<OddNodePolicy>().unwrap(),
            OddNodePolicy::CarryUp
        );
        assert_eq!(OddNodePolicy::Duplicate.to_string(), "duplicate");
        assert!("middle".parse::<PairOrdering>().is_err());
    }
}
