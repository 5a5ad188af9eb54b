//! Normalized closeness score.

/// Closeness centrality from a reachable-set size and a distance sum.
///
/// `reachable` counts the source itself. A vertex that reaches nothing
/// (distance sum 0) scores exactly `0.0`, never `NaN`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_score(reachable: usize, total_distance: u64, num_vertices: usize) -> f64 {
    if total_distance == 0 {
        return 0.0;
    }

    let r = (reachable - 1) as f64;
    r * r / total_distance as f64 / (num_vertices - 1) as f64
}
