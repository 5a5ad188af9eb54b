//! Dynamic single-source shortest-path DAG.

use crate::score::closeness_score;
use chronet_core::VertexId;
use smallvec::SmallVec;
use std::collections::{BinaryHeap, HashSet, VecDeque};

/// The shortest-path DAG from one source, maintained under single-edge
/// insertions and deletions.
///
/// All tied shortest-path predecessors are kept, not just one: a vertex
/// whose parent dies can survive on a sibling parent without any repair
/// at all. Vertices are dense integer indices into flat arrays, so the
/// parent/child cross-references never form an ownership cycle and
/// removal is a plain index-keyed operation.
///
/// Every vertex is either unreached (`level` absent) or reached with a
/// non-empty parent set (except the source at level 0). Transitions:
/// unreached to reached on first relaxation, reached to a strictly
/// smaller level on improvement, reached to unreached when the last
/// parent is cut and no repair candidate exists.
#[derive(Debug, Clone, PartialEq)]
pub struct SsspDag {
    source: VertexId,
    level: Vec<Option<u32>>,
    parents: Vec<HashSet<VertexId>>,
    children: Vec<HashSet<VertexId>>,
    graph: Vec<HashSet<VertexId>>,
    reverse: Vec<HashSet<VertexId>>,
    total_distance: u64,
    reachable: usize,
}

/// Repair candidate ordered for a min-heap on (distance, vertex).
#[derive(Debug, Eq)]
struct Candidate {
    distance: u32,
    vertex: VertexId,
    parents: SmallVec<[VertexId; 4]>,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.vertex == other.vertex
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl SsspDag {
    /// Build the DAG by breadth-first search over an initial live edge
    /// set.
    pub fn build_initial(
        num_vertices: usize,
        live_edges: &[(VertexId, VertexId)],
        source: VertexId,
    ) -> Self {
        let mut dag = Self {
            source,
            level: vec![None; num_vertices],
            parents: vec![HashSet::new(); num_vertices],
            children: vec![HashSet::new(); num_vertices],
            graph: vec![HashSet::new(); num_vertices],
            reverse: vec![HashSet::new(); num_vertices],
            total_distance: 0,
            reachable: 0,
        };

        for &(from, to) in live_edges {
            dag.graph[from as usize].insert(to);
            dag.reverse[to as usize].insert(from);
        }

        dag.level[source as usize] = Some(0);
        dag.reachable = 1;

        let mut current = vec![source];
        let mut next = Vec::new();
        let mut depth = 0u32;

        while !current.is_empty() {
            depth += 1;

            for &vertex in &current {
                let neighbors: SmallVec<[VertexId; 8]> =
                    dag.graph[vertex as usize].iter().copied().collect();

                for neighbor in neighbors {
                    match dag.level[neighbor as usize] {
                        None => {
                            dag.level[neighbor as usize] = Some(depth);
                            dag.total_distance += u64::from(depth);
                            dag.reachable += 1;
                            dag.link(vertex, neighbor);
                            next.push(neighbor);
                        }
                        Some(d) if d == depth => {
                            dag.link(vertex, neighbor);
                        }
                        Some(_) => {}
                    }
                }
            }

            std::mem::swap(&mut current, &mut next);
            next.clear();
        }

        dag
    }

    /// Insert a live edge and repair the DAG.
    ///
    /// An edge can only shorten paths, so a forward-only breadth-first
    /// relaxation from the improved endpoint suffices; no priority queue
    /// is needed.
    pub fn insert_edge(&mut self, from: VertexId, to: VertexId) {
        self.graph[from as usize].insert(to);
        self.reverse[to as usize].insert(from);

        let Some(level_from) = self.level[from as usize] else {
            // The edge hangs off an unreached vertex; it cannot help yet.
            return;
        };
        let candidate = level_from + 1;

        match self.level[to as usize] {
            Some(level_to) if level_to < candidate => return,
            Some(level_to) if level_to == candidate => {
                // A new tie: one more shortest-path parent, nothing to
                // propagate.
                self.link(from, to);
                return;
            }
            Some(level_to) => {
                self.total_distance -= u64::from(level_to);
                self.total_distance += u64::from(candidate);
                self.level[to as usize] = Some(candidate);
                self.detach_parents(to);
                self.link(from, to);
            }
            None => {
                self.level[to as usize] = Some(candidate);
                self.total_distance += u64::from(candidate);
                self.reachable += 1;
                self.link(from, to);
            }
        }

        // `to` strictly improved; sweep the improvement forward.
        let mut current = vec![to];
        let mut next = Vec::new();
        let mut depth = candidate;

        while !current.is_empty() {
            depth += 1;

            for &vertex in &current {
                let neighbors: SmallVec<[VertexId; 8]> =
                    self.graph[vertex as usize].iter().copied().collect();

                for neighbor in neighbors {
                    match self.level[neighbor as usize] {
                        None => {
                            self.level[neighbor as usize] = Some(depth);
                            self.total_distance += u64::from(depth);
                            self.reachable += 1;
                            self.link(vertex, neighbor);
                            next.push(neighbor);
                        }
                        Some(d) if d > depth => {
                            self.total_distance -= u64::from(d);
                            self.total_distance += u64::from(depth);
                            self.level[neighbor as usize] = Some(depth);
                            self.detach_parents(neighbor);
                            self.link(vertex, neighbor);
                            next.push(neighbor);
                        }
                        Some(d) if d == depth => {
                            self.link(vertex, neighbor);
                        }
                        Some(_) => {}
                    }
                }
            }

            std::mem::swap(&mut current, &mut next);
            next.clear();
        }
    }

    /// Remove a live edge and repair the DAG.
    ///
    /// Work is bounded by the subtree that actually depended on the edge:
    /// a non-tree edge costs nothing, a tied edge costs one link, and
    /// only a vertex losing its last parent triggers the cascading cut
    /// and ball repair.
    pub fn delete_edge(&mut self, from: VertexId, to: VertexId) {
        let was_live = self.graph[from as usize].remove(&to);
        debug_assert!(was_live, "deleting edge ({from}, {to}) that is not live");
        self.reverse[to as usize].remove(&from);

        if !self.children[from as usize].contains(&to) {
            // The edge was never load-bearing.
            return;
        }

        self.parents[to as usize].remove(&from);
        self.children[from as usize].remove(&to);

        if !self.parents[to as usize].is_empty() {
            // An equally short path survives.
            return;
        }

        // `to` lost its last shortest-path parent: cut the dependent
        // subtree breadth-first. A child is cut only once all of its
        // parents have been cut.
        let mut affected = HashSet::new();
        let mut queue = VecDeque::new();

        self.cut(to);
        affected.insert(to);
        queue.push_back(to);

        while let Some(vertex) = queue.pop_front() {
            let childs: SmallVec<[VertexId; 8]> =
                self.children[vertex as usize].drain().collect();

            for child in childs {
                self.parents[child as usize].remove(&vertex);
                if self.parents[child as usize].is_empty() && self.level[child as usize].is_some() {
                    self.cut(child);
                    affected.insert(child);
                    queue.push_back(child);
                }
            }
        }

        self.repair(affected);
    }

    /// Reconnect cut vertices through their cheapest live predecessors,
    /// in increasing distance order.
    fn repair(&mut self, mut affected: HashSet<VertexId>) {
        let mut heap = BinaryHeap::new();

        for &vertex in &affected {
            let mut best = u32::MAX;
            let mut parents: SmallVec<[VertexId; 4]> = SmallVec::new();

            for &pred in &self.reverse[vertex as usize] {
                if let Some(level) = self.level[pred as usize] {
                    let candidate = level + 1;
                    if candidate < best {
                        best = candidate;
                        parents.clear();
                        parents.push(pred);
                    } else if candidate == best {
                        parents.push(pred);
                    }
                }
            }

            if best != u32::MAX {
                heap.push(Candidate {
                    distance: best,
                    vertex,
                    parents,
                });
            }
        }

        while let Some(Candidate {
            distance,
            vertex,
            parents,
        }) = heap.pop()
        {
            match self.level[vertex as usize] {
                None => {
                    self.level[vertex as usize] = Some(distance);
                    self.total_distance += u64::from(distance);
                    self.reachable += 1;
                    for &parent in &parents {
                        self.link(parent, vertex);
                    }
                }
                Some(d) if d == distance => {
                    // Finalized earlier through another path at the same
                    // distance; these predecessors are ties.
                    for &parent in &parents {
                        self.link(parent, vertex);
                    }
                    continue;
                }
                Some(d) => {
                    debug_assert!(distance > d, "repair heap popped out of order");
                    continue;
                }
            }

            affected.remove(&vertex);

            let neighbors: SmallVec<[VertexId; 8]> =
                self.graph[vertex as usize].iter().copied().collect();
            for neighbor in neighbors {
                if !affected.contains(&neighbor) {
                    continue;
                }
                let worth_pushing = match self.level[neighbor as usize] {
                    None => true,
                    Some(d) => d > distance + 1,
                };
                if worth_pushing {
                    heap.push(Candidate {
                        distance: distance + 1,
                        vertex: neighbor,
                        parents: SmallVec::from_slice(&[vertex]),
                    });
                }
            }
        }
        // Whatever is left in `affected` has no resolvable predecessor
        // and stays unreached.
    }

    /// Closeness centrality at the current instant.
    #[must_use]
    pub fn centrality(&self, num_vertices: usize) -> f64 {
        closeness_score(self.reachable, self.total_distance, num_vertices)
    }

    /// The query vertex this DAG is rooted at.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Current level of a vertex, if reached.
    pub fn level(&self, vertex: VertexId) -> Option<u32> {
        self.level[vertex as usize]
    }

    /// Current shortest-path parents of a vertex.
    pub fn parents(&self, vertex: VertexId) -> &HashSet<VertexId> {
        &self.parents[vertex as usize]
    }

    /// Number of reachable vertices, the source included.
    pub fn reachable(&self) -> usize {
        self.reachable
    }

    /// Sum of shortest-path distances to all reachable vertices.
    pub fn total_distance(&self) -> u64 {
        self.total_distance
    }

    fn link(&mut self, parent: VertexId, child: VertexId) {
        self.parents[child as usize].insert(parent);
        self.children[parent as usize].insert(child);
    }

    fn detach_parents(&mut self, child: VertexId) {
        let parents: SmallVec<[VertexId; 4]> = self.parents[child as usize].drain().collect();
        for parent in parents {
            self.children[parent as usize].remove(&child);
        }
    }

    fn cut(&mut self, vertex: VertexId) {
        let level = self.level[vertex as usize]
            .take()
            .expect("cut of an unreached vertex");
        self.total_distance -= u64::from(level);
        self.reachable -= 1;
    }

    /// Assert every structural invariant of the DAG.
    ///
    /// Intended for tests; cost is linear in vertices plus edges.
    ///
    /// # Panics
    ///
    /// Panics on any violation: a reached non-source vertex without
    /// parents, a parent not exactly one level up, a parent link over a
    /// dead edge, parents/children out of sync, or stale distance
    /// counters.
    pub fn check_invariants(&self) {
        let mut distance = 0u64;
        let mut reachable = 0usize;

        for vertex in 0..self.level.len() {
            let v = vertex as VertexId;
            match self.level[vertex] {
                Some(0) => {
                    assert_eq!(v, self.source, "only the source may sit at level 0");
                    assert!(self.parents[vertex].is_empty(), "source has parents");
                    reachable += 1;
                }
                Some(level) => {
                    assert!(
                        !self.parents[vertex].is_empty(),
                        "reached vertex {v} has no parents"
                    );
                    for &parent in &self.parents[vertex] {
                        assert_eq!(
                            self.level[parent as usize],
                            Some(level - 1),
                            "parent {parent} of {v} is not one level up"
                        );
                        assert!(
                            self.graph[parent as usize].contains(&v),
                            "parent link {parent} -> {v} has no live edge"
                        );
                        assert!(
                            self.children[parent as usize].contains(&v),
                            "children map misses {parent} -> {v}"
                        );
                    }
                    distance += u64::from(level);
                    reachable += 1;
                }
                None => {
                    assert!(
                        self.parents[vertex].is_empty(),
                        "unreached vertex {v} has parents"
                    );
                }
            }

            for &child in &self.children[vertex] {
                assert!(
                    self.parents[child as usize].contains(&v),
                    "parents map misses {v} -> {child}"
                );
            }
        }

        assert_eq!(self.total_distance, distance, "distance counter is stale");
        assert_eq!(self.reachable, reachable, "reachable counter is stale");
    }
}
