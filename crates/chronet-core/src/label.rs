//! Distance labels: piecewise-constant distance functions over time.
//!
//! A label list encodes, for one vertex, the shortest-path distance from a
//! fixed source as a function of the snapshot index. The list is kept
//! sorted by interval start with pairwise-disjoint intervals; snapshots
//! covered by no label are not yet known to be reachable.
//!
//! All operations here are pure functions over sorted label slices. The
//! propagation engine combines them per edge: [`go_through_edge`] pushes a
//! vertex's labels across an edge's validity window, [`merge_into`] folds
//! the result into the neighbour's accumulated list and reports where it
//! improved, and [`simplify`] coalesces bookkeeping splits back together.

use crate::interval::TimeInterval;
use std::fmt;

/// A shortest-path distance holding over a span of snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceLabel {
    /// Snapshots during which the distance holds.
    pub interval: TimeInterval,
    /// Unweighted hop count from the source.
    pub distance: u32,
}

impl DistanceLabel {
    /// Create a label covering `[start, end]` at the given distance.
    pub fn new(start: u32, end: u32, distance: u32) -> Self {
        Self {
            interval: TimeInterval::new(start, end),
            distance,
        }
    }
}

impl fmt::Display for DistanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{}]:{}",
            self.interval.start, self.interval.end, self.distance
        )
    }
}

/// Push every label across an edge valid during `edge`.
///
/// A label `(I, d)` reachable during `I`, traversing an edge valid during
/// `edge`, yields distance `d + 1` during `I ∩ edge`. Labels with no
/// overlap are dropped. The scan stops at the first label starting past
/// `edge.end`, so a sorted list is traversed at most once.
pub fn go_through_edge(labels: &[DistanceLabel], edge: TimeInterval) -> Vec<DistanceLabel> {
    let mut result = Vec::new();

    for label in labels {
        if label.interval.start > edge.end {
            break;
        }
        if let Some(overlap) = label.interval.intersect(&edge) {
            result.push(DistanceLabel {
                interval: overlap,
                distance: label.distance + 1,
            });
        }
    }

    result
}

/// Coalesce adjacent labels with contiguous intervals and equal distance.
///
/// One linear pass suffices: merges only ever combine a label with its
/// immediate successor. Idempotent.
pub fn simplify(labels: &mut Vec<DistanceLabel>) {
    if labels.len() < 2 {
        return;
    }

    let mut write = 0;
    for read in 1..labels.len() {
        let cur = labels[read];
        let prev = &mut labels[write];

        if prev.distance == cur.distance && prev.interval.end + 1 == cur.interval.start {
            prev.interval.end = cur.interval.end;
        } else {
            write += 1;
            labels[write] = cur;
        }
    }

    labels.truncate(write + 1);
}

/// Check the label-list invariant: sorted by start, pairwise disjoint.
pub fn is_valid(labels: &[DistanceLabel]) -> bool {
    labels
        .windows(2)
        .all(|pair| pair[1].interval.start > pair[0].interval.end)
}

/// Merge `incoming` into `existing` as a pointwise minimum, in place.
///
/// Both lists are piecewise-constant functions over snapshots; the merged
/// result takes, at every snapshot in the union of their domains, the
/// smaller of the two distances. Returns exactly the sub-intervals where
/// the merged value is strictly below `existing`'s prior value, or covers
/// a snapshot `existing` did not: the signal that improvement must keep
/// propagating to neighbours.
///
/// Runs as a single linear scan over both lists; each side's cursor is
/// either at a label boundary or mid-label, never revisiting a snapshot.
/// The returned list may contain adjacent equal-distance pieces; callers
/// [`simplify`] it as needed.
pub fn merge_into(
    existing: &mut Vec<DistanceLabel>,
    incoming: &[DistanceLabel],
) -> Vec<DistanceLabel> {
    debug_assert!(is_valid(existing), "existing label list is invalid");
    debug_assert!(is_valid(incoming), "incoming label list is invalid");

    if incoming.is_empty() {
        return Vec::new();
    }
    if existing.is_empty() {
        existing.extend_from_slice(incoming);
        return incoming.to_vec();
    }

    let mut merged = Vec::with_capacity(existing.len() + incoming.len());
    let mut updated = Vec::new();

    let mut i = 0;
    let mut j = 0;
    // Start of the not-yet-emitted remainder of each side's current label.
    let mut a_start = existing[0].interval.start;
    let mut b_start = incoming[0].interval.start;

    while i < existing.len() && j < incoming.len() {
        let a = existing[i];
        let b = incoming[j];

        if a.interval.end < b_start {
            // Existing remainder lies entirely before the incoming one.
            merged.push(DistanceLabel::new(a_start, a.interval.end, a.distance));
            i += 1;
            if i < existing.len() {
                a_start = existing[i].interval.start;
            }
        } else if b.interval.end < a_start {
            // Incoming remainder lies entirely before the existing one:
            // new coverage.
            let piece = DistanceLabel::new(b_start, b.interval.end, b.distance);
            merged.push(piece);
            updated.push(piece);
            j += 1;
            if j < incoming.len() {
                b_start = incoming[j].interval.start;
            }
        } else if a_start < b_start {
            // Existing-only prefix up to where the incoming label begins.
            merged.push(DistanceLabel::new(a_start, b_start - 1, a.distance));
            a_start = b_start;
        } else if b_start < a_start {
            let piece = DistanceLabel::new(b_start, a_start - 1, b.distance);
            merged.push(piece);
            updated.push(piece);
            b_start = a_start;
        } else {
            // Both sides cover the same prefix: take the pointwise minimum.
            let end = a.interval.end.min(b.interval.end);
            let distance = a.distance.min(b.distance);
            let piece = DistanceLabel::new(a_start, end, distance);
            merged.push(piece);
            if distance < a.distance {
                updated.push(piece);
            }

            if a.interval.end == end {
                i += 1;
                if i < existing.len() {
                    a_start = existing[i].interval.start;
                }
            } else {
                a_start = end + 1;
            }
            if b.interval.end == end {
                j += 1;
                if j < incoming.len() {
                    b_start = incoming[j].interval.start;
                }
            } else {
                b_start = end + 1;
            }
        }
    }

    while i < existing.len() {
        merged.push(DistanceLabel::new(
            a_start,
            existing[i].interval.end,
            existing[i].distance,
        ));
        i += 1;
        if i < existing.len() {
            a_start = existing[i].interval.start;
        }
    }

    while j < incoming.len() {
        let piece = DistanceLabel::new(b_start, incoming[j].interval.end, incoming[j].distance);
        merged.push(piece);
        updated.push(piece);
        j += 1;
        if j < incoming.len() {
            b_start = incoming[j].interval.start;
        }
    }

    debug_assert!(is_valid(&merged), "merge produced overlapping labels");

    *existing = merged;
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(parts: &[(u32, u32, u32)]) -> Vec<DistanceLabel> {
        parts
            .iter()
            .map(|&(start, end, distance)| DistanceLabel::new(start, end, distance))
            .collect()
    }

    #[test]
    fn test_go_through_edge_full_containment() {
        let list = labels(&[(3, 8, 1)]);
        let result = go_through_edge(&list, TimeInterval::new(0, 10));
        assert_eq!(result, labels(&[(3, 8, 2)]));
    }

    #[test]
    fn test_go_through_edge_clips_both_ends() {
        let list = labels(&[(0, 5, 10), (6, 9, 8), (10, 18, 12), (19, 20, 7)]);

        let result = go_through_edge(&list, TimeInterval::new(7, 100));
        assert_eq!(result, labels(&[(7, 9, 9), (10, 18, 13), (19, 20, 8)]));

        let result = go_through_edge(&list, TimeInterval::new(12, 19));
        assert_eq!(result, labels(&[(12, 18, 13), (19, 19, 8)]));
    }

    #[test]
    fn test_go_through_edge_single_snapshot() {
        let list = labels(&[(10, 10, 8)]);
        let result = go_through_edge(&list, TimeInterval::new(3, 10));
        assert_eq!(result, labels(&[(10, 10, 9)]));
    }

    #[test]
    fn test_go_through_edge_disjoint() {
        let list = labels(&[(0, 4, 2)]);
        assert!(go_through_edge(&list, TimeInterval::new(5, 9)).is_empty());
    }

    #[test]
    fn test_simplify_contiguous_equal_runs() {
        let mut list = labels(&[
            (0, 1, 8),
            (2, 3, 12),
            (4, 5, 12),
            (6, 6, 12),
            (7, 9, 12),
            (10, 13, 4),
        ]);
        simplify(&mut list);
        assert_eq!(list, labels(&[(0, 1, 8), (2, 9, 12), (10, 13, 4)]));
    }

    #[test]
    fn test_simplify_idempotent() {
        let mut list = labels(&[(0, 2, 1), (3, 3, 1), (5, 7, 2)]);
        simplify(&mut list);
        let once = list.clone();
        simplify(&mut list);
        assert_eq!(list, once);
        assert_eq!(list, labels(&[(0, 3, 1), (5, 7, 2)]));
    }

    #[test]
    fn test_simplify_keeps_gaps_and_distinct_distances() {
        // Gap between 3 and 5, and a distance change at 8: nothing merges
        let mut list = labels(&[(0, 3, 2), (5, 7, 2), (8, 9, 3)]);
        simplify(&mut list);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid(&labels(&[(0, 2, 1), (3, 5, 2)])));
        assert!(is_valid(&[]));
        assert!(!is_valid(&labels(&[(0, 3, 1), (3, 5, 2)])));
        assert!(!is_valid(&labels(&[(4, 6, 1), (0, 2, 2)])));
    }

    #[test]
    fn test_merge_interleaved_lists() {
        let mut existing = labels(&[(0, 2, 1), (5, 8, 2), (9, 11, 3)]);
        let incoming = labels(&[(1, 3, 3), (5, 7, 2), (8, 10, 1)]);

        let mut updated = merge_into(&mut existing, &incoming);
        simplify(&mut existing);
        simplify(&mut updated);

        assert_eq!(
            existing,
            labels(&[(0, 2, 1), (3, 3, 3), (5, 7, 2), (8, 10, 1), (11, 11, 3)])
        );
        assert_eq!(updated, labels(&[(3, 3, 3), (8, 10, 1)]));
    }

    #[test]
    fn test_merge_aligned_lists() {
        let mut existing = labels(&[(0, 5, 10), (6, 9, 8), (10, 18, 12), (19, 20, 7)]);
        let incoming = labels(&[(0, 7, 9), (8, 12, 10), (13, 15, 8), (16, 20, 100)]);

        let mut updated = merge_into(&mut existing, &incoming);
        simplify(&mut existing);
        simplify(&mut updated);

        assert_eq!(
            existing,
            labels(&[
                (0, 5, 9),
                (6, 9, 8),
                (10, 12, 10),
                (13, 15, 8),
                (16, 18, 12),
                (19, 20, 7),
            ])
        );
        assert_eq!(updated, labels(&[(0, 5, 9), (10, 12, 10), (13, 15, 8)]));
    }

    #[test]
    fn test_merge_nested_single_labels() {
        let mut existing = labels(&[(0, 9, 10)]);
        let incoming = labels(&[(0, 7, 9)]);

        let mut updated = merge_into(&mut existing, &incoming);
        simplify(&mut existing);
        simplify(&mut updated);

        assert_eq!(existing, labels(&[(0, 7, 9), (8, 9, 10)]));
        assert_eq!(updated, labels(&[(0, 7, 9)]));
    }

    #[test]
    fn test_merge_fully_disjoint_inserts_in_order() {
        let mut existing = labels(&[(10, 10, 3)]);
        let incoming = labels(&[(7, 7, 2), (8, 8, 3)]);

        let mut updated = merge_into(&mut existing, &incoming);
        simplify(&mut existing);
        simplify(&mut updated);

        assert_eq!(existing, labels(&[(7, 7, 2), (8, 8, 3), (10, 10, 3)]));
        assert_eq!(updated, labels(&[(7, 7, 2), (8, 8, 3)]));
    }

    #[test]
    fn test_merge_into_empty_existing() {
        let mut existing = Vec::new();
        let incoming = labels(&[(2, 4, 1)]);

        let updated = merge_into(&mut existing, &incoming);
        assert_eq!(existing, incoming);
        assert_eq!(updated, incoming);
    }

    #[test]
    fn test_merge_empty_incoming_is_noop() {
        let mut existing = labels(&[(2, 4, 1)]);
        let updated = merge_into(&mut existing, &[]);
        assert!(updated.is_empty());
        assert_eq!(existing, labels(&[(2, 4, 1)]));
    }

    #[test]
    fn test_merge_equal_distance_not_reported() {
        // Incoming matches existing exactly: nothing improves
        let mut existing = labels(&[(0, 4, 2)]);
        let incoming = labels(&[(1, 3, 2)]);

        let updated = merge_into(&mut existing, &incoming);
        simplify(&mut existing);

        assert_eq!(existing, labels(&[(0, 4, 2)]));
        assert!(updated.is_empty(), "tie must not re-propagate: {updated:?}");
    }
}
