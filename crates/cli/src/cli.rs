//! Command-line interface for the `canopy` CLI application.

use std::path::PathBuf;

use canopy_merkle::{HashAlgorithm, OddNodePolicy, PairOrdering, TreeOptions};
use clap::Parser;

/// Environment variable selecting the hash function.
pub(crate) const CANOPY_HASH: &str = "CANOPY_HASH";
/// Environment variable selecting the sibling ordering.
pub(crate) const CANOPY_PAIR_ORDERING: &str = "CANOPY_PAIR_ORDERING";
/// Environment variable selecting the odd node policy.
pub(crate) const CANOPY_ODD_NODE: &str = "CANOPY_ODD_NODE";
/// Environment variable enabling leaf sorting.
pub(crate) const CANOPY_SORT_LEAVES: &str = "CANOPY_SORT_LEAVES";

/// Command-line interface definition
#[derive(Debug, Parser)]
#[command(name = "canopy", version)]
#[command(about = "Build merkle trees, produce and verify inclusion proofs")]
pub(crate) struct Cli {
    /// Tree options shared by every subcommand
    #[command(flatten)]
    pub(crate) options: OptionsArgs,
    /// Cli subcommands
    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Tree options. Proofs must be verified with the options they were built with.
#[derive(Debug, clap::Args)]
pub(crate) struct OptionsArgs {
    /// Hash function for leaves and nodes.
    #[arg(long, global = true, env = CANOPY_HASH, default_value_t = HashAlgorithm::Sha256)]
    pub(crate) hash: HashAlgorithm,
    /// Sibling ordering: `positional` or `sorted`.
    #[arg(long, global = true, env = CANOPY_PAIR_ORDERING, default_value_t = PairOrdering::Positional)]
    pub(crate) pair_ordering: PairOrdering,
    /// Unpaired node handling: `duplicate` or `carry-up`.
    #[arg(long, global = true, env = CANOPY_ODD_NODE, default_value_t = OddNodePolicy::Duplicate)]
    pub(crate) odd_node: OddNodePolicy,
    /// Sort leaf hashes before building.
    #[arg(long, global = true, env = CANOPY_SORT_LEAVES)]
    pub(crate) sort_leaves: bool,
}

impl OptionsArgs {
    pub(crate) const fn tree_options(&self) -> TreeOptions {
        TreeOptions::new()
            .with_pair_ordering(self.pair_ordering)
            .with_odd_node(self.odd_node)
            .with_sort_leaves(self.sort_leaves)
    }
}

/// Where the leaves of a tree come from.
#[derive(Debug, clap::Args)]
pub(crate) struct LeavesArgs {
    /// Leaf values.
    #[arg(value_name = "LEAF", required_unless_present = "leaves_file")]
    pub(crate) leaves: Vec<String>,
    /// Read leaves from a file, one per line.
    #[arg(long, conflicts_with = "leaves")]
    pub(crate) leaves_file: Option<PathBuf>,
    /// Treat leaves (and `--leaf`) as hex-encoded leaf hashes instead of raw values.
    #[arg(long)]
    pub(crate) prehashed: bool,
}

/// Cli subcommands
#[derive(Debug, clap::Subcommand)]
pub(crate) enum Commands {
    /// Print the root hash of a tree
    Root {
        #[command(flatten)]
        leaves: LeavesArgs,
    },
    /// Print every layer of a tree, root first
    Show {
        #[command(flatten)]
        leaves: LeavesArgs,
    },
    /// Print the inclusion proof of one leaf as JSON.
    ///
    /// A leaf that is not in the tree gets an empty proof (`[]`).
    #[command(verbatim_doc_comment)]
    Proof {
        /// Leaf to prove.
        #[arg(long, allow_hyphen_values = true)]
        leaf: String,
        #[command(flatten)]
        leaves: LeavesArgs,
    },
    /// Check an inclusion proof against a root.
    ///
    /// Prints `true` or `false`. A proof that does not check out is not an error.
    #[command(verbatim_doc_comment)]
    Verify {
        /// Leaf the proof is for.
        #[arg(long, allow_hyphen_values = true)]
        leaf: String,
        /// Proof JSON, or `@path` to read it from a file.
        #[arg(long)]
        proof: String,
        /// Claimed root hash in hex.
        #[arg(long)]
        root: String,
        /// Treat `--leaf` as a hex-encoded leaf hash.
        #[arg(long)]
        prehashed: bool,
    },
}
