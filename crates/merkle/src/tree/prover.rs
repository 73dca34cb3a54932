//! Proof path extraction from built layers.

use crate::node::NodeHash;
use crate::options::OddNodePolicy;
use crate::proof::{Position, Proof, ProofStep};

/// Walk from leaf `index` up to the root layer, collecting siblings.
///
/// `index` must be within layer 0. An unpaired node at the end of an odd
/// layer yields a self step under [`OddNodePolicy::Duplicate`] and nothing
/// under [`OddNodePolicy::CarryUp`], mirroring how the layer above was built.
pub(crate) fn generate_proof(
    layers: &[Vec<NodeHash>],
    mut index: usize,
    odd_node: OddNodePolicy,
) -> Proof {
    let below_root = layers.len().saturating_sub(1);
    let mut steps = Vec::with_capacity(below_root);

    for layer in &layers[..below_root] {
        let step = if index % 2 == 1 {
            Some(ProofStep::new(layer[index - 1], Position::Left))
        } else if let Some(sibling) = layer.get(index + 1) {
            Some(ProofStep::new(*sibling, Position::Right))
        } else {
            match odd_node {
                OddNodePolicy::Duplicate => Some(ProofStep::new(layer[index], Position::Right)),
                OddNodePolicy::CarryUp => None,
            }
        };

        steps.extend(step);
        index /= 2;
    }

    Proof::new(steps)
}
