//! Cluster division.

use rand::Rng;

use super::ShakeMode;
use crate::model::{CellSolution, IncidenceMatrix};

/// Moves the leading `fraction` of a cluster's members (in index order)
/// into the new cluster id. `None` when the cluster cannot be split,
/// i.e. it has at most one member in this vector.
fn split_vector(
    clusters: &[usize],
    cluster: usize,
    new_id: usize,
    fraction: f64,
) -> Option<Vec<usize>> {
    let members = clusters.iter().filter(|&&c| c == cluster).count();
    if members <= 1 {
        return None;
    }
    let mut moved = (fraction * members as f64) as usize;
    let mut out = clusters.to_vec();
    for c in out.iter_mut() {
        if moved == 0 {
            break;
        }
        if *c == cluster {
            *c = new_id;
            moved -= 1;
        }
    }
    Some(out)
}

fn splittable(solution: &CellSolution, cluster: usize) -> bool {
    solution.machine_members(cluster) > 1 && solution.part_members(cluster) > 1
}

/// Splits one cluster into two, appending the new id `cluster_count + 1`.
///
/// Every cluster id is a split candidate unless it has fewer than two
/// machine members or fewer than two part members. The moved portion is
/// the leading `split_fraction` of the cluster's members in index order,
/// on both the machine and the part side.
///
/// In [`ShakeMode::Exhaustive`] the best-scoring valid split is
/// returned; in [`ShakeMode::Random`] a valid candidate cluster is
/// drawn uniformly, ignoring scores. Either way the returned solution
/// has `cluster_count + 1` clusters — a shake is committed by the
/// caller regardless of whether it scores better than the current
/// solution.
///
/// Returns `None` (observable no-op) when `cluster_count` has already
/// reached `min(machines, parts)` or no cluster can be split.
pub fn divide<R: Rng>(
    matrix: &IncidenceMatrix,
    current: &CellSolution,
    mode: ShakeMode,
    split_fraction: f64,
    rng: &mut R,
) -> Option<CellSolution> {
    if current.cluster_count >= matrix.min_dim() {
        return None;
    }
    let new_id = current.cluster_count + 1;

    let candidate = |cluster: usize| -> Option<CellSolution> {
        let machines =
            split_vector(&current.machine_clusters, cluster, new_id, split_fraction)?;
        let parts = split_vector(&current.part_clusters, cluster, new_id, split_fraction)?;
        Some(CellSolution::evaluated(matrix, machines, parts, new_id))
    };

    match mode {
        ShakeMode::Exhaustive => {
            let mut best: Option<CellSolution> = None;
            for cluster in 1..=current.cluster_count {
                if let Some(split) = candidate(cluster) {
                    if best.as_ref().map_or(true, |b| split.score > b.score) {
                        best = Some(split);
                    }
                }
            }
            best
        }
        ShakeMode::Random => {
            let valid: Vec<usize> = (1..=current.cluster_count)
                .filter(|&c| splittable(current, c))
                .collect();
            if valid.is_empty() {
                return None;
            }
            candidate(valid[rng.random_range(0..valid.len())])
        }
    }
}
