//! Subcommand execution.
//!
//! Every command returns the text to print on stdout. Logging goes to stderr.

use std::fs;
use std::path::Path;

use canopy_merkle::{AnyHasher, MerkleHasher, MerkleTree, NodeHash, Proof, TreeOptions};
use eyre::{Context as _, Result};
use tracing::{debug, info, warn};

use crate::cli::{Cli, Commands, LeavesArgs};

/// Run the parsed command line.
pub(crate) fn run(cli: Cli) -> Result<String> {
    let hasher = AnyHasher::new(cli.options.hash);
    let options = cli.options.tree_options();
    debug!(hash = %cli.options.hash, ?options, "tree options");

    match cli.command {
        Commands::Root { leaves } => Ok(build_tree(hasher, &leaves, options)?.root_hex()),
        Commands::Show { leaves } => {
            let tree = build_tree(hasher, &leaves, options)?;
            Ok(tree.to_string().trim_end().to_owned())
        }
        Commands::Proof { leaf, leaves } => {
            let tree = build_tree(hasher, &leaves, options)?;
            let leaf = leaf_hash(&hasher, &leaf, leaves.prehashed)?;

            if tree.leaf_index(&leaf).is_none() {
                warn!(%leaf, "Leaf not found in tree, emitting empty proof");
            }

            let proof = tree.proof(&leaf);
            serde_json::to_string_pretty(&proof).wrap_err("Failed to encode proof")
        }
        Commands::Verify {
            leaf,
            proof,
            root,
            prehashed,
        } => {
            let leaf = leaf_hash(&hasher, &leaf, prehashed)?;
            let proof = read_proof(&proof)?;
            let root = NodeHash::from_hex(&root)
                .wrap_err_with(|| format!("Invalid root hash {root:?}"))?;

            let valid = proof.verify(&hasher, &leaf, &root, options.pair_ordering);
            info!(valid, steps = proof.len(), %root, "Verified proof");
            Ok(valid.to_string())
        }
    }
}

fn build_tree(
    hasher: AnyHasher,
    args: &LeavesArgs,
    options: TreeOptions,
) -> Result<MerkleTree<AnyHasher>> {
    let values = match &args.leaves_file {
        Some(path) => read_leaves_file(path)?,
        None => args.leaves.clone(),
    };

    let tree = if args.prehashed {
        let hashes = values
            .iter()
            .map(|value| {
                NodeHash::from_hex(value)
                    .wrap_err_with(|| format!("Invalid leaf hash {value:?}"))
            })
            .collect::<Result<Vec<_>>>()?;
        MerkleTree::from_leaf_hashes(hasher, hashes, options)
    } else {
        MerkleTree::new(hasher, &values, options)
    };

    info!(
        leaves = tree.leaf_count(),
        depth = tree.depth(),
        root = %tree.root(),
        "Built merkle tree"
    );
    Ok(tree)
}

fn read_leaves_file(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read leaves file {}", path.display()))?;
    Ok(contents.lines().map(str::to_owned).collect())
}

fn leaf_hash(hasher: &AnyHasher, leaf: &str, prehashed: bool) -> Result<NodeHash> {
    if prehashed {
        NodeHash::from_hex(leaf).wrap_err_with(|| format!("Invalid leaf hash {leaf:?}"))
    } else {
        Ok(hasher.hash(leaf.as_bytes()))
    }
}

fn read_proof(arg: &str) -> Result<Proof> {
    let json = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read proof file {path}"))?,
        None => arg.to_owned(),
    };
    serde_json::from_str(&json).wrap_err("Failed to decode proof JSON")
}
