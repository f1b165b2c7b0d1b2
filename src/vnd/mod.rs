//! Variable Neighborhood Descent over pairwise-swap neighborhoods.
//!
//! Two neighborhoods are searched with best-improvement (steepest
//! ascent) semantics: swapping a pair of entries in the part vector
//! (neighborhood 0) or in the machine vector (neighborhood 1). Any
//! improvement restarts the descent at neighborhood 0; the descent ends
//! when both neighborhoods fail in sequence, leaving the solution
//! locally optimal under both swap neighborhoods.
//!
//! # Reference
//!
//! Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//! Principles and applications", *EJOR* 130(3), 449-467.

use crate::model::{grouping_efficacy, CellSolution, IncidenceMatrix};

/// Best-improvement search over all unordered position swaps.
///
/// Evaluates every swap `(i, j)`, `i < j`, on a scratch copy and
/// returns the best-scoring one, provided it strictly beats
/// `current_score`. The scan order makes ties deterministic: the first
/// maximal swap wins.
fn best_swap<F>(vector: &[usize], current_score: f64, eval: F) -> Option<(usize, usize, f64)>
where
    F: Fn(&[usize]) -> f64,
{
    let n = vector.len();
    let mut scratch = vector.to_vec();
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..n.saturating_sub(1) {
        for j in i + 1..n {
            scratch.swap(i, j);
            let score = eval(&scratch);
            scratch.swap(i, j);
            if score > best.map_or(current_score, |(_, _, s)| s) {
                best = Some((i, j, score));
            }
        }
    }
    best
}

/// Best-improvement swap pass over the part vector; the machine vector
/// is held fixed. Commits the winning swap and score, if any.
pub fn permute_parts(matrix: &IncidenceMatrix, solution: &mut CellSolution) -> bool {
    let found = best_swap(&solution.part_clusters, solution.score, |parts| {
        grouping_efficacy(matrix, &solution.machine_clusters, parts)
    });
    match found {
        Some((i, j, score)) => {
            solution.part_clusters.swap(i, j);
            solution.score = score;
            true
        }
        None => false,
    }
}

/// Best-improvement swap pass over the machine vector; the part vector
/// is held fixed.
pub fn permute_machines(matrix: &IncidenceMatrix, solution: &mut CellSolution) -> bool {
    let found = best_swap(&solution.machine_clusters, solution.score, |machines| {
        grouping_efficacy(matrix, machines, &solution.part_clusters)
    });
    match found {
        Some((i, j, score)) => {
            solution.machine_clusters.swap(i, j);
            solution.score = score;
            true
        }
        None => false,
    }
}

/// Runs the descent to a local optimum of both swap neighborhoods.
///
/// Returns whether the score improved over the entry score. The score
/// never decreases: each pass commits only strict improvements, so a
/// failed neighborhood leaves the solution untouched.
pub fn descend(matrix: &IncidenceMatrix, solution: &mut CellSolution) -> bool {
    let entry_score = solution.score;
    let mut neighborhood = 0;
    while neighborhood < 2 {
        let improved = match neighborhood {
            0 => permute_parts(matrix, solution),
            _ => permute_machines(matrix, solution),
        };
        if improved {
            neighborhood = 0;
        } else {
            neighborhood += 1;
        }
    }
    solution.score > entry_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block_matrix() -> IncidenceMatrix {
        IncidenceMatrix::from_rows(&[
            vec![true, true, false, false],
            vec![true, true, false, false],
            vec![false, false, true, true],
            vec![false, false, true, true],
        ])
    }

    #[test]
    fn test_optimum_is_left_alone() {
        // 2x2 identity at score 1.0: no swap can improve, nothing moves.
        let m = IncidenceMatrix::from_rows(&[vec![true, false], vec![false, true]]);
        let mut s = CellSolution::evaluated(&m, vec![1, 2], vec![1, 2], 2);
        let before = s.clone();
        assert!(!descend(&m, &mut s));
        assert_eq!(s, before);
    }

    #[test]
    fn test_descend_repairs_scrambled_parts() {
        let m = block_matrix();
        let mut s = CellSolution::evaluated(&m, vec![1, 1, 2, 2], vec![2, 1, 1, 2], 2);
        assert!(descend(&m, &mut s));
        assert_eq!(s.score, 1.0);
        assert_eq!(s.part_clusters, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_descend_repairs_scrambled_machines() {
        let m = block_matrix();
        let mut s = CellSolution::evaluated(&m, vec![1, 2, 1, 2], vec![1, 1, 2, 2], 2);
        assert!(descend(&m, &mut s));
        assert_eq!(s.score, 1.0);
        assert_eq!(s.machine_clusters, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_descend_is_idempotent() {
        let m = block_matrix();
        let mut s = CellSolution::evaluated(&m, vec![1, 2, 1, 2], vec![2, 1, 2, 1], 2);
        descend(&m, &mut s);
        let settled = s.clone();
        // A second descent starts at a local optimum and must not move.
        assert!(!descend(&m, &mut s));
        assert_eq!(s, settled);
    }

    #[test]
    fn test_single_entity_vectors() {
        // No swap pairs exist; the descent terminates immediately.
        let m = IncidenceMatrix::from_rows(&[vec![true]]);
        let mut s = CellSolution::evaluated(&m, vec![1], vec![1], 1);
        assert!(!descend(&m, &mut s));
        assert_eq!(s.score, 1.0);
    }

    proptest! {
        #[test]
        fn prop_descend_never_decreases_score(
            (machines, parts) in (1usize..5, 1usize..5),
            seed_rows in proptest::collection::vec(any::<u16>(), 1..5)
        ) {
            // Deterministic pseudo-random matrix and assignment from the
            // seed rows, sized independently of the seed length.
            let rows: Vec<Vec<bool>> = (0..machines)
                .map(|i| {
                    (0..parts)
                        .map(|j| {
                            let v = seed_rows[(i * parts + j) % seed_rows.len()];
                            (v >> (j % 16)) & 1 == 1
                        })
                        .collect()
                })
                .collect();
            let m = IncidenceMatrix::from_rows(&rows);
            let k = m.min_dim();
            let mc: Vec<usize> = (0..machines).map(|i| i % k + 1).collect();
            let pc: Vec<usize> = (0..parts).map(|j| (j + 1) % k + 1).collect();
            let mut s = CellSolution::evaluated(&m, mc, pc, k);
            let entry = s.score;

            descend(&m, &mut s);

            prop_assert!(s.score >= entry, "descent decreased {entry} -> {}", s.score);
            prop_assert!((0.0..=1.0).contains(&s.score));
        }
    }
}
