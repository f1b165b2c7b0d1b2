//! Initial solution builders.
//!
//! Two constructive strategies seed the search:
//!
//! - [`round_robin`]: spreads machines and parts over `2 + min_dim/2`
//!   clusters in index order. Cheap, blind to the matrix content.
//! - [`greedy`]: founds clusters from the most compatible machine pairs,
//!   attaches leftover machines by summed compatibility, then assigns
//!   each part to the cluster holding the most of its one-entries.
//!   The preferred strategy.

use log::warn;

use crate::model::{CellSolution, IncidenceMatrix};

/// Which constructive builder seeds the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialStrategy {
    /// Index-order spread over `2 + min_dim/2` clusters.
    RoundRobin,
    /// Compatibility-driven constructive builder.
    ///
    /// `target_clusters` is the number of clusters to found; `0` picks
    /// `2 + min_dim/2` capped at the matrix's smaller dimension.
    Greedy {
        /// Requested cluster count, `0` = automatic.
        target_clusters: usize,
    },
}

impl Default for InitialStrategy {
    fn default() -> Self {
        Self::Greedy { target_clusters: 0 }
    }
}

/// Builds an initial solution with the given strategy.
pub fn build(matrix: &IncidenceMatrix, strategy: InitialStrategy) -> CellSolution {
    match strategy {
        InitialStrategy::RoundRobin => round_robin(matrix),
        InitialStrategy::Greedy { target_clusters } => greedy(matrix, target_clusters),
    }
}

fn default_cluster_count(matrix: &IncidenceMatrix) -> usize {
    2 + matrix.min_dim() / 2
}

/// Round-robin builder.
///
/// Machines take cluster ids `1..=k` cyclically in index order, then
/// parts independently, with `k = 2 + min_dim/2`. The reported cluster
/// count is the highest id actually used.
pub fn round_robin(matrix: &IncidenceMatrix) -> CellSolution {
    let k = default_cluster_count(matrix);
    let machine_clusters: Vec<usize> = (0..matrix.machines()).map(|i| i % k + 1).collect();
    let part_clusters: Vec<usize> = (0..matrix.parts()).map(|j| j % k + 1).collect();
    let cluster_count = k.min(matrix.machines().max(matrix.parts()));
    CellSolution::evaluated(matrix, machine_clusters, part_clusters, cluster_count)
}

/// Greedy compatibility builder.
///
/// Every unordered machine pair is scored by [`IncidenceMatrix::row_agreement`].
/// Pairs are consumed from the most compatible down; whenever both
/// machines of a pair are still unclustered, a new cluster is founded
/// holding exactly that pair, until `target_clusters` clusters exist or
/// the pairs run out. Leftover machines join the cluster with the
/// highest summed compatibility to its members; parts go to the cluster
/// holding the most machines with a one in their column. Both
/// tie-breaks favor the lowest cluster id.
///
/// A `target_clusters` above the matrix's smaller dimension is clamped
/// to it (with a warning); `0` selects `2 + min_dim/2`, likewise capped.
pub fn greedy(matrix: &IncidenceMatrix, target_clusters: usize) -> CellSolution {
    let min_dim = matrix.min_dim();
    let target = if target_clusters == 0 {
        default_cluster_count(matrix).min(min_dim)
    } else if target_clusters > min_dim {
        warn!(
            "greedy builder: target cluster count {target_clusters} exceeds \
             min(machines, parts) = {min_dim}, clamping"
        );
        min_dim
    } else {
        target_clusters
    };

    let machines = matrix.machines();

    // Unordered machine pairs sorted by compatibility, best last.
    let mut pairs: Vec<(f64, usize, usize)> = (0..machines)
        .flat_map(|i| (i + 1..machines).map(move |j| (matrix.row_agreement(i, j), i, j)))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Found clusters from still-unclustered pairs; 0 marks unclustered.
    let mut machine_clusters = vec![0usize; machines];
    let mut cluster_count = 0;
    for &(_, i, j) in pairs.iter().rev() {
        if cluster_count >= target {
            break;
        }
        if machine_clusters[i] == 0 && machine_clusters[j] == 0 {
            cluster_count += 1;
            machine_clusters[i] = cluster_count;
            machine_clusters[j] = cluster_count;
        }
    }
    if cluster_count == 0 {
        // No pair could be founded (single machine, or target 0 on a
        // degenerate matrix); everything lands in one cluster.
        cluster_count = 1;
    }

    // Attach leftover machines to the most compatible cluster.
    for m in 0..machines {
        if machine_clusters[m] != 0 {
            continue;
        }
        let mut best_cluster = 1;
        let mut best_sum = f64::NEG_INFINITY;
        for c in 1..=cluster_count {
            let sum: f64 = (0..machines)
                .filter(|&o| machine_clusters[o] == c)
                .map(|o| matrix.row_agreement(m, o))
                .sum();
            if sum > best_sum {
                best_sum = sum;
                best_cluster = c;
            }
        }
        machine_clusters[m] = best_cluster;
    }

    // Each part follows the cluster holding most of its one-entries.
    let part_clusters: Vec<usize> = (0..matrix.parts())
        .map(|j| {
            let mut best_cluster = 1;
            let mut best_count = 0;
            for c in 1..=cluster_count {
                let count = (0..machines)
                    .filter(|&m| machine_clusters[m] == c && matrix.at(m, j))
                    .count();
                if count > best_count {
                    best_count = count;
                    best_cluster = c;
                }
            }
            best_cluster
        })
        .collect();

    CellSolution::evaluated(matrix, machine_clusters, part_clusters, cluster_count)
}
