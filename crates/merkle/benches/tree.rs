#![allow(missing_docs)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{RngCore, rng};

use canopy_merkle::{
    Keccak256Hasher, MerkleHasher, MerkleTree, NodeHash, Sha256Hasher, TreeOptions, verify,
};

fn random_leaves(count: usize) -> Vec<NodeHash> {
    let hasher = Sha256Hasher::new();
    (0..count)
        .map(|_| {
            let mut data = [0u8; 64];
            rng().fill_bytes(&mut data);
            hasher.hash(&data)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_build");

    for size in [16, 1_000, 10_000, 100_000].iter() {
        let leaves = random_leaves(*size);

        group.bench_with_input(BenchmarkId::new("sha256", size), &leaves, |b, leaves| {
            b.iter(|| {
                MerkleTree::from_leaf_hashes(Sha256Hasher::new(), leaves.clone(), TreeOptions::new())
            });
        });

        group.bench_with_input(BenchmarkId::new("keccak256", size), &leaves, |b, leaves| {
            b.iter(|| MerkleTree::from_leaf_hashes(Keccak256Hasher, leaves.clone(), TreeOptions::new()));
        });
    }

    group.finish();
}

fn bench_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_proof");

    let leaves = random_leaves(10_000);
    let tree = MerkleTree::from_leaf_hashes(Sha256Hasher::new(), leaves.clone(), TreeOptions::sorted());
    let leaf = leaves[4_321];
    let proof = tree.proof(&leaf);
    let root = tree.root();

    group.bench_function("generate", |b| {
        b.iter(|| tree.proof(&leaf));
    });

    group.bench_function("generate_all", |b| {
        b.iter(|| tree.proofs());
    });

    group.bench_function("verify", |b| {
        b.iter(|| {
            verify(
                &Sha256Hasher::new(),
                &leaf,
                &proof,
                &root,
                tree.options().pair_ordering,
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_proof);
criterion_main!(benches);
