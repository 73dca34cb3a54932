//! Basic usage example for the merkle crate

use canopy_merkle::{MerkleHasher, NodeHash, Proof, Sha256Hasher, TreeOptions, build_tree, error::Result, verify_proof};

fn main() -> Result<()> {
    let leaves = ["satoshi@nakamoto.com", "vitalik@buterin.ca", "gavin@wood.de", ""];
    let options = TreeOptions::sorted();

    // Build the tree and print its layers
    let tree = build_tree(leaves, options);
    println!("Merkle tree:\n{tree}");

    // Prove one of the leaves
    let proof = tree.proof_for("vitalik@buterin.ca");
    println!("Proof for \"vitalik@buterin.ca\": {:?}", proof.to_hex());

    // Pretend the root travelled as hex and decode it on the other side
    let root = NodeHash::from_hex(&tree.root_hex())?;
    let hasher = Sha256Hasher::new();
    println!(
        "verifies: {}",
        verify_proof(&hasher, "vitalik@buterin.ca", &proof, &root, options.pair_ordering)
    );

    // Sorted trees only need the sibling hashes
    let decoded = Proof::from_hex(proof.to_hex())?;
    println!(
        "decoded proof verifies: {}",
        decoded.verify(&hasher, &hasher.hash(b"vitalik@buterin.ca"), &root, options.pair_ordering)
    );

    // A leaf outside the tree gets an empty proof that fails
    let missing = tree.proof_for("bitalik@buterin.ca");
    println!(
        "absent leaf verifies: {}",
        verify_proof(&hasher, "bitalik@buterin.ca", &missing, &root, options.pair_ordering)
    );

    Ok(())
}
