//! Order independence, pruning and MRCA properties over random trees

mod common;

use common::RandomTree;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeSet;
use treestore::{
    get_tree, BranchLengthDefault, CollapseLengths, GraphId, MrcaFinder, NodeRef, OpenStore, SqliteStore,
    TreePruner, TreeReconstructor, TreeStore,
};

const SEEDS: [u64; 5] = [1, 7, 42, 1234, 99999];

#[test]
fn test_reconstruction_independent_of_record_order() {
    for seed in SEEDS {
        let random = RandomTree::generate(60, seed);
        let expected = TreeReconstructor::default()
            .reconstruct(random.records.clone(), None)
            .unwrap()
            .canonical();

        let mut rng = StdRng::seed_from_u64(seed + 1);
        for _ in 0..5 {
            let mut shuffled = random.records.clone();
            shuffled.shuffle(&mut rng);
            let tree = TreeReconstructor::default().reconstruct(shuffled, None).unwrap();
            assert_eq!(tree.canonical(), expected, "seed {seed}");
        }
    }
}

#[test]
fn test_reversed_deep_chain_reconstructs() {
    let size = 2000;
    let mut records: Vec<_> = (1..size)
        .map(|i| {
            treestore::EdgeRecord::new(format!("n{}", i))
                .with_parent(format!("n{}", i - 1))
                .with_label(format!("t{}", i))
        })
        .collect();
    records.reverse();
    records.push(treestore::EdgeRecord::new("n0").with_label("t0"));

    let tree = TreeReconstructor::default().reconstruct(records, None).unwrap();
    assert_eq!(tree.size(), size);
    assert_eq!(tree.leaf_names(), vec![format!("t{}", size - 1)]);
}

#[test]
fn test_store_round_trip_preserves_topology() {
    let store = SqliteStore::open_in_memory().unwrap();
    for seed in SEEDS {
        let random = RandomTree::generate(40, seed);
        let original = TreeReconstructor::default().reconstruct(random.records, None).unwrap();

        let graph = GraphId::from(format!("http://example.org/round_trip_{}/", seed));
        let count = store.add_tree(&graph, &original.to_records(&graph)).unwrap();
        assert_eq!(count, original.size());

        let restored = get_tree(&store, &graph, BranchLengthDefault::Missing).unwrap();
        assert_eq!(restored.canonical(), original.canonical(), "seed {seed}");
    }
}

#[test]
fn test_prune_idempotent_and_keeps_requested_leaves() {
    for seed in SEEDS {
        let random = RandomTree::generate(50, seed);
        let tree = TreeReconstructor::default().reconstruct(random.records, None).unwrap();

        let mut leaves: Vec<String> = tree.leaf_names().into_iter().map(String::from).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        leaves.shuffle(&mut rng);
        let keep: BTreeSet<String> = leaves.iter().take(leaves.len().div_ceil(2)).cloned().collect();

        for policy in [CollapseLengths::Discard, CollapseLengths::Sum] {
            let pruner = TreePruner::new(policy);
            let once = pruner.prune(tree.clone(), &keep);
            let twice = pruner.prune(once.clone(), &keep);
            assert_eq!(once, twice, "seed {seed}");

            let kept_leaves: BTreeSet<String> = once.leaf_names().into_iter().map(String::from).collect();
            assert!(keep.is_subset(&kept_leaves), "seed {seed}");
            assert!(once.size() >= 1);
        }
    }
}

#[test]
fn test_mrca_is_nearest_common_ancestor() {
    let store = SqliteStore::open_in_memory().unwrap();
    for seed in SEEDS {
        let random = RandomTree::generate(80, seed);
        let graph = GraphId::from(format!("http://example.org/mrca_{}/", seed));
        store.add_tree(&graph, &random.records).unwrap();

        let mut rng = StdRng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (1..80).collect();
        indices.shuffle(&mut rng);
        for take in [1, 2, 3, 5, 8] {
            let picked = &indices[..take];
            let taxa: Vec<String> = picked.iter().map(|i| format!("t{}", i)).collect();
            let nodes: Vec<NodeRef> = picked.iter().map(|i| NodeRef::from(format!("n{}", i))).collect();

            let result = MrcaFinder::new(&store, &graph).find(&taxa).unwrap();
            assert!(result.dropped().is_empty(), "seed {seed}");
            assert!(
                nodes.iter().all(|n| random.is_ancestor_or_self(&result.mrca, n)),
                "seed {seed}: {} is not a common ancestor",
                result.mrca
            );
            for child in random.children(&result.mrca) {
                assert!(
                    !nodes.iter().all(|n| random.is_ancestor_or_self(&child, n)),
                    "seed {seed}: descendant {} is also a common ancestor",
                    child
                );
            }
        }
    }
}
