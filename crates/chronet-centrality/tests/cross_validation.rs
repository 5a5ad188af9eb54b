//! Cross-validation of the three centrality engines.
//!
//! The range propagation engine and the dynamic SSSP DAG share no code
//! beyond the scoring formula, so agreement on randomly generated
//! temporal graphs is strong evidence that both are right. The
//! snapshot-at-a-time BFS acts as the tie-breaking oracle.

use chronet_centrality::{
    dynamic_centrality, range_centrality, snapshot_based_centrality, SsspDag,
};
use chronet_core::{CondensedGraph, DeltaSequence, EdgeList, TemporalEdge, VertexId};
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use std::collections::HashSet;

const TOLERANCE: f64 = 1e-7;

/// Generate a random temporal graph with dense vertex and timestamp id
/// spaces.
///
/// A directed cycle with staggered interval starts guarantees both
/// density requirements (`num_vertices >= num_snapshots` keeps every
/// snapshot index in use); extra random edges provide the interesting
/// structure.
fn random_temporal_graph(
    seed: u64,
    num_vertices: u32,
    num_snapshots: u32,
    extra_edges: usize,
) -> EdgeList {
    assert!(num_vertices >= num_snapshots);
    let mut rng = XorShiftRng::seed_from_u64(seed);

    let mut pairs = HashSet::new();
    let mut edges = Vec::new();

    for i in 0..num_vertices {
        let target = (i + 1) % num_vertices;
        let start = i % num_snapshots;
        let end = rng.gen_range(start..num_snapshots);
        pairs.insert((i, target));
        edges.push(TemporalEdge::new(i, target, start, end));
    }

    while edges.len() < num_vertices as usize + extra_edges {
        let source = rng.gen_range(0..num_vertices);
        let target = rng.gen_range(0..num_vertices);
        if source == target || !pairs.insert((source, target)) {
            continue;
        }
        let start = rng.gen_range(0..num_snapshots);
        let end = rng.gen_range(start..num_snapshots);
        edges.push(TemporalEdge::new(source, target, start, end));
    }

    EdgeList::new(edges).expect("generated graph must satisfy the input contract")
}

fn assert_close(a: &[f64], b: &[f64], what: &str) {
    assert_eq!(a.len(), b.len(), "{what}: array lengths differ");
    for (t, (x, y)) in a.iter().zip(b).enumerate() {
        assert!(
            (x - y).abs() <= TOLERANCE,
            "{what}: snapshot {t} differs: {x} vs {y}"
        );
    }
}

#[test]
fn engines_agree_on_random_graphs() {
    for seed in 0..6 {
        let list = random_temporal_graph(seed, 30, 10, 90);
        let graph = CondensedGraph::build(&list);
        let deltas = DeltaSequence::build(&list);

        let mut rng = XorShiftRng::seed_from_u64(seed ^ 0xa5a5);
        for _ in 0..5 {
            let source = rng.gen_range(0..graph.num_vertices() as VertexId);

            let by_range = range_centrality(&graph, source);
            let by_replay = dynamic_centrality(&deltas, graph.num_vertices(), source);
            let by_snapshot = snapshot_based_centrality(&graph, source);

            assert_close(
                &by_range,
                &by_snapshot,
                &format!("range vs snapshot, seed {seed} source {source}"),
            );
            assert_close(
                &by_range,
                &by_replay,
                &format!("range vs dynamic, seed {seed} source {source}"),
            );
        }
    }
}

#[test]
fn engines_agree_on_sparse_graphs() {
    // Sparse graphs exercise unreachable vertices and zero-distance
    // snapshots.
    for seed in 100..104 {
        let list = random_temporal_graph(seed, 24, 8, 10);
        let graph = CondensedGraph::build(&list);
        let deltas = DeltaSequence::build(&list);

        for source in [0, 7, 23] {
            let by_range = range_centrality(&graph, source);
            let by_replay = dynamic_centrality(&deltas, graph.num_vertices(), source);

            assert_close(
                &by_range,
                &by_replay,
                &format!("range vs dynamic, seed {seed} source {source}"),
            );
            for value in &by_range {
                assert!(value.is_finite(), "centrality must never be NaN");
            }
        }
    }
}

/// From-scratch BFS levels over a plain adjacency, the oracle for the
/// incrementally repaired DAG.
fn bfs_levels(adjacency: &[HashSet<VertexId>], source: VertexId) -> Vec<Option<u32>> {
    let mut levels = vec![None; adjacency.len()];
    levels[source as usize] = Some(0);

    let mut current = vec![source];
    let mut next = Vec::new();
    let mut depth = 0u32;

    while !current.is_empty() {
        depth += 1;
        for &vertex in &current {
            for &neighbor in &adjacency[vertex as usize] {
                if levels[neighbor as usize].is_none() {
                    levels[neighbor as usize] = Some(depth);
                    next.push(neighbor);
                }
            }
        }
        std::mem::swap(&mut current, &mut next);
        next.clear();
    }

    levels
}

#[test]
fn repaired_dag_matches_bfs_at_every_snapshot() {
    for seed in 10..14 {
        let list = random_temporal_graph(seed, 20, 8, 60);
        let deltas = DeltaSequence::build(&list);
        let num_vertices = list.num_vertices();
        let source: VertexId = 3;

        // Live adjacency maintained independently of the DAG.
        let mut live: Vec<HashSet<VertexId>> = vec![HashSet::new(); num_vertices];
        for &(from, to) in deltas.insertions(0) {
            live[from as usize].insert(to);
        }

        let mut dag = SsspDag::build_initial(num_vertices, deltas.insertions(0), source);

        for t in 0..deltas.num_snapshots() {
            if t > 0 {
                for &(from, to) in deltas.insertions(t) {
                    live[from as usize].insert(to);
                    dag.insert_edge(from, to);
                }
                for &(from, to) in deltas.deletions(t) {
                    live[from as usize].remove(&to);
                    dag.delete_edge(from, to);
                }
            }

            dag.check_invariants();

            let oracle = bfs_levels(&live, source);
            for v in 0..num_vertices {
                assert_eq!(
                    dag.level(v as VertexId),
                    oracle[v],
                    "seed {seed} snapshot {t} vertex {v}"
                );
            }
        }
    }
}

#[test]
fn insert_delete_round_trip_on_random_graphs() {
    for seed in 20..24 {
        let list = random_temporal_graph(seed, 16, 6, 40);
        let deltas = DeltaSequence::build(&list);
        let num_vertices = list.num_vertices();

        let dag = SsspDag::build_initial(num_vertices, deltas.insertions(0), 0);

        let mut rng = XorShiftRng::seed_from_u64(seed);
        for _ in 0..20 {
            let from = rng.gen_range(0..num_vertices as VertexId);
            let to = rng.gen_range(0..num_vertices as VertexId);
            if from == to || dag.level(from).is_none() {
                continue;
            }
            // Only probe edges that are not already live.
            if deltas.insertions(0).contains(&(from, to)) {
                continue;
            }

            let mut probe = dag.clone();
            probe.insert_edge(from, to);
            probe.check_invariants();
            probe.delete_edge(from, to);
            probe.check_invariants();

            assert_eq!(probe, dag, "round trip of ({from}, {to}), seed {seed}");
        }
    }
}
