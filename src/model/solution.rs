//! Cell-formation solution: an assignment pair plus its cached score.

use std::fmt;

use super::efficacy::grouping_efficacy;
use super::matrix::IncidenceMatrix;

/// A complete clustering of machines and parts into cells.
///
/// Cluster ids are 1-based and contiguous in `[1, cluster_count]`; both
/// vectors are always fully populated. `score` caches the grouping
/// efficacy of the pair against the matrix it was evaluated on.
///
/// Trial moves clone the solution, mutate the clone, and either promote
/// it (the clone replaces the live solution) or drop it; the live
/// solution is only ever replaced wholesale, never partially mutated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSolution {
    /// Cluster id per machine, 1-based.
    pub machine_clusters: Vec<usize>,
    /// Cluster id per part, 1-based.
    pub part_clusters: Vec<usize>,
    /// Number of active clusters.
    pub cluster_count: usize,
    /// Cached grouping efficacy of this assignment pair.
    pub score: f64,
}

impl CellSolution {
    /// Builds a solution and evaluates its score against `matrix`.
    pub fn evaluated(
        matrix: &IncidenceMatrix,
        machine_clusters: Vec<usize>,
        part_clusters: Vec<usize>,
        cluster_count: usize,
    ) -> Self {
        let score = grouping_efficacy(matrix, &machine_clusters, &part_clusters);
        Self {
            machine_clusters,
            part_clusters,
            cluster_count,
            score,
        }
    }

    /// Number of machines assigned to the given cluster.
    pub fn machine_members(&self, cluster: usize) -> usize {
        self.machine_clusters.iter().filter(|&&c| c == cluster).count()
    }

    /// Number of parts assigned to the given cluster.
    pub fn part_members(&self, cluster: usize) -> usize {
        self.part_clusters.iter().filter(|&&c| c == cluster).count()
    }
}

impl fmt::Display for CellSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Machines: (")?;
        for (i, c) in self.machine_clusters.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")\nParts: (")?;
        for (j, c) in self.part_clusters.iter().enumerate() {
            if j > 0 {
                write!(f, " ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")\nScore: {}", self.score)
    }
}
