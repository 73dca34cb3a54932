//! Bottom-up layer construction.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::hasher::MerkleHasher;
use crate::node::NodeHash;
use crate::options::{OddNodePolicy, TreeOptions};

/// Layers at least this long are hashed on the rayon pool.
#[cfg(feature = "parallel")]
pub(crate) const PARALLEL_THRESHOLD: usize = 1 << 12;

/// Build every layer from `leaves` up to and including the root layer.
///
/// The result always holds at least one layer. An empty leaf list gives a
/// single empty layer.
pub(crate) fn build_layers<H: MerkleHasher>(
    hasher: &H,
    leaves: Vec<NodeHash>,
    options: TreeOptions,
) -> Vec<Vec<NodeHash>> {
    let capacity = usize::BITS as usize - leaves.len().leading_zeros() as usize + 1;
    let mut layers = Vec::with_capacity(capacity);
    layers.push(leaves);

    while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
        let next = next_layer(hasher, current, options);
        layers.push(next);
    }

    layers
}

/// Hash one layer into the layer above it.
///
/// The result has `ceil(len / 2)` nodes.
pub(crate) fn next_layer<H: MerkleHasher>(
    hasher: &H,
    layer: &[NodeHash],
    options: TreeOptions,
) -> Vec<NodeHash> {
    #[cfg(feature = "parallel")]
    if layer.len() >= PARALLEL_THRESHOLD {
        return layer
            .par_chunks(2)
            .map(|pair| parent(hasher, &pair[0], pair.get(1), options))
            .collect();
    }

    layer
        .chunks(2)
        .map(|pair| parent(hasher, &pair[0], pair.get(1), options))
        .collect()
}

#[inline(always)]
fn parent<H: MerkleHasher>(
    hasher: &H,
    left: &NodeHash,
    right: Option<&NodeHash>,
    options: TreeOptions,
) -> NodeHash {
    match (right, options.odd_node) {
        (Some(right), _) => hasher.hash_pair(options.pair_ordering, left, right),
        (None, OddNodePolicy::Duplicate) => hasher.hash_pair(options.pair_ordering, left, left),
        (None, OddNodePolicy::CarryUp) => *left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Sha256Hasher;

    fn leaves(n: usize) -> Vec<NodeHash> {
        let hasher = Sha256Hasher::new();
        (0..n).map(|i| hasher.hash(&i.to_le_bytes())).collect()
    }

    #[test]
    fn test_layer_lengths_halve_rounding_up() {
        let hasher = Sha256Hasher::new();
        for n in 1..=33 {
            let layers = build_layers(&hasher, leaves(n), TreeOptions::new());
            assert_eq!(layers.last().unwrap().len(), 1);
            for pair in layers.windows(2) {
                assert_eq!(pair[1].len(), pair[0].len().div_ceil(2), "n = {n}");
            }
        }
    }

    #[test]
    fn test_empty_and_single() {
        let hasher = Sha256Hasher::new();
        let empty = build_layers(&hasher, Vec::new(), TreeOptions::new());
        assert_eq!(empty, vec![Vec::<NodeHash>::new()]);

        let single = build_layers(&hasher, leaves(1), TreeOptions::new());
        assert_eq!(single, vec![leaves(1)]);
    }

    #[test]
    fn test_odd_node_policies() {
        let hasher = Sha256Hasher::new();
        let three = leaves(3);

        let duplicated = next_layer(&hasher, &three, TreeOptions::new());
        assert_eq!(
            duplicated[1],
            hasher.hash_pair(Default::default(), &three[2], &three[2])
        );

        let carried = next_layer(
            &hasher,
            &three,
            TreeOptions::new().with_odd_node(OddNodePolicy::CarryUp),
        );
        assert_eq!(carried[1], three[2]);
        assert_eq!(carried[0], duplicated[0]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let hasher = Sha256Hasher::new();
        let layer = leaves(PARALLEL_THRESHOLD + 1);
        let options = TreeOptions::new();

        let parallel = next_layer(&hasher, &layer, options);
        let sequential: Vec<_> = layer
            .chunks(2)
            .map(|pair| parent(&hasher, &pair[0], pair.get(1), options))
            .collect();

        assert_eq!(parallel, sequential);
    }
}
