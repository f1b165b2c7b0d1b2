//! VNS execution engine.
//!
//! # Algorithm (Basic variant)
//!
//! 1. Build an initial solution, apply the descent
//! 2. Set k = 0
//! 3. While k < k_max (= 2):
//!    a. **Shaking**: restructure the clustering — k=0 merges two
//!    clusters, k=1 divides one
//!    b. **Descent**: apply VND to the shaken solution
//!    c. **Move or not**: if the candidate scores strictly higher,
//!    promote it and reset k = 0; otherwise drop it and set k = k + 1
//! 4. Return the best solution found
//!
//! A shaking operator that cannot act (too few clusters to merge, no
//! splittable cluster) counts as a non-improving attempt, so the loop
//! still advances k and terminates.
//!
//! The Smart variant evaluates both shaking operators every round and
//! promotes the better post-descent candidate, stopping when neither
//! beats the incumbent.
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{VnsConfig, VnsVariant};
use crate::initial;
use crate::model::{CellSolution, IncidenceMatrix};
use crate::shaking::{divide, merge};
use crate::vnd;

/// Number of shaking neighborhoods in the Basic loop.
const K_MAX: usize = 2;

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult {
    /// Best solution found.
    pub best: CellSolution,
    /// Score of the best solution.
    pub best_score: f64,
    /// Total shaking attempts executed.
    pub shakes: usize,
    /// Shake index after which the best solution was promoted
    /// (0 = the initial descent was never beaten).
    pub best_shake: usize,
    /// Best score after the initial descent and after each shake round.
    pub score_history: Vec<f64>,
    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Cell-formation VNS runner.
pub struct VnsRunner;

struct SearchState {
    solution: CellSolution,
    shakes: usize,
    best_shake: usize,
    score_history: Vec<f64>,
    cancelled: bool,
}

impl SearchState {
    fn out_of_budget(&self, config: &VnsConfig) -> bool {
        config.max_shakes > 0 && self.shakes >= config.max_shakes
    }

    fn check_cancelled(&mut self, cancel: &Option<Arc<AtomicBool>>) -> bool {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                self.cancelled = true;
            }
        }
        self.cancelled
    }
}

impl VnsRunner {
    /// Executes the configured VNS on the given matrix.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn run(matrix: &IncidenceMatrix, config: &VnsConfig) -> VnsResult {
        Self::run_with_cancel(matrix, config, None)
    }

    /// Runs the VNS with an optional cancellation token.
    ///
    /// Cancellation is checked before every shaking attempt; the result
    /// carries the best solution reached so far with `cancelled` set.
    pub fn run_with_cancel(
        matrix: &IncidenceMatrix,
        config: &VnsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> VnsResult {
        config.validate().expect("invalid VnsConfig");

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(42));

        let mut solution = initial::build(matrix, config.initial);
        vnd::descend(matrix, &mut solution);
        debug!(
            "initial descent: {} clusters, score {}",
            solution.cluster_count, solution.score
        );

        let mut state = SearchState {
            score_history: vec![solution.score],
            solution,
            shakes: 0,
            best_shake: 0,
            cancelled: false,
        };

        match config.variant {
            VnsVariant::Basic => Self::run_basic(matrix, config, &mut state, &mut rng, &cancel),
            VnsVariant::Smart => Self::run_smart(matrix, config, &mut state, &mut rng, &cancel),
        }

        VnsResult {
            best_score: state.solution.score,
            best: state.solution,
            shakes: state.shakes,
            best_shake: state.best_shake,
            score_history: state.score_history,
            cancelled: state.cancelled,
        }
    }

    fn run_basic<R: Rng>(
        matrix: &IncidenceMatrix,
        config: &VnsConfig,
        state: &mut SearchState,
        rng: &mut R,
        cancel: &Option<Arc<AtomicBool>>,
    ) {
        let mut k = 0;
        while k < K_MAX {
            if state.out_of_budget(config) || state.check_cancelled(cancel) {
                break;
            }

            let shaken = match k {
                0 => merge(matrix, &state.solution, config.shake_mode, rng),
                _ => divide(
                    matrix,
                    &state.solution,
                    config.shake_mode,
                    config.split_fraction,
                    rng,
                ),
            };
            state.shakes += 1;

            match shaken {
                Some(mut candidate) => {
                    vnd::descend(matrix, &mut candidate);
                    if candidate.score > state.solution.score {
                        debug!(
                            "shake {}: k={k} improved {} -> {} ({} clusters)",
                            state.shakes, state.solution.score, candidate.score,
                            candidate.cluster_count
                        );
                        state.solution = candidate;
                        state.best_shake = state.shakes;
                        k = 0;
                    } else {
                        k += 1;
                    }
                }
                // The operator could not restructure anything; treat it
                // as a non-improving attempt so the loop advances.
                None => k += 1,
            }
            state.score_history.push(state.solution.score);
        }
    }

    fn run_smart<R: Rng>(
        matrix: &IncidenceMatrix,
        config: &VnsConfig,
        state: &mut SearchState,
        rng: &mut R,
        cancel: &Option<Arc<AtomicBool>>,
    ) {
        loop {
            if state.out_of_budget(config) || state.check_cancelled(cancel) {
                break;
            }

            let descended = |shaken: Option<CellSolution>| {
                shaken.map(|mut candidate| {
                    vnd::descend(matrix, &mut candidate);
                    candidate
                })
            };
            let merged = descended(merge(matrix, &state.solution, config.shake_mode, rng));
            let divided = descended(divide(
                matrix,
                &state.solution,
                config.shake_mode,
                config.split_fraction,
                rng,
            ));
            state.shakes += 1;

            let candidate = match (merged, divided) {
                (Some(m), Some(d)) => Some(if d.score > m.score { d } else { m }),
                (Some(m), None) => Some(m),
                (None, Some(d)) => Some(d),
                (None, None) => None,
            };

            match candidate {
                Some(c) if c.score > state.solution.score => {
                    debug!(
                        "shake {}: smart round improved {} -> {} ({} clusters)",
                        state.shakes, state.solution.score, c.score, c.cluster_count
                    );
                    state.solution = c;
                    state.best_shake = state.shakes;
                    state.score_history.push(state.solution.score);
                }
                _ => {
                    state.score_history.push(state.solution.score);
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial::InitialStrategy;
    use crate::shaking::ShakeMode;

    fn identity2() -> IncidenceMatrix {
        IncidenceMatrix::from_rows(&[vec![true, false], vec![false, true]])
    }

    fn block_matrix() -> IncidenceMatrix {
        IncidenceMatrix::from_rows(&[
            vec![true, true, false, false],
            vec![true, true, false, false],
            vec![false, false, true, true],
            vec![false, false, true, true],
        ])
    }

    #[test]
    fn test_identity2_stays_optimal() {
        // Round-robin already lands on the optimum; the orchestrator
        // must terminate without moving away from it.
        let config = VnsConfig::default().with_initial(InitialStrategy::RoundRobin);
        let result = VnsRunner::run(&identity2(), &config);
        assert_eq!(result.best_score, 1.0);
        assert_eq!(result.best.machine_clusters, vec![1, 2]);
        assert_eq!(result.best.part_clusters, vec![1, 2]);
        assert_eq!(result.best_shake, 0);
    }

    #[test]
    fn test_all_ones_is_degenerate_optimum() {
        let m = IncidenceMatrix::from_rows(&[
            vec![true, true, true],
            vec![true, true, true],
            vec![true, true, true],
        ]);
        let result = VnsRunner::run(&m, &VnsConfig::default());
        assert_eq!(result.best_score, 1.0);
    }

    #[test]
    fn test_basic_reaches_block_optimum_from_round_robin() {
        // Round-robin scatters the 4x4 two-block matrix over four
        // singleton cells at score 0.5; two merge shakes recover the
        // block structure.
        let config = VnsConfig::default().with_initial(InitialStrategy::RoundRobin);
        let result = VnsRunner::run(&block_matrix(), &config);
        assert_eq!(result.best_score, 1.0);
        assert_eq!(result.best.cluster_count, 2);
        assert!(result.best_shake > 0);
    }

    #[test]
    fn test_smart_reaches_block_optimum_from_round_robin() {
        let config = VnsConfig::default()
            .with_initial(InitialStrategy::RoundRobin)
            .with_variant(VnsVariant::Smart);
        let result = VnsRunner::run(&block_matrix(), &config);
        assert_eq!(result.best_score, 1.0);
        assert_eq!(result.best.cluster_count, 2);
    }

    #[test]
    fn test_score_history_is_non_decreasing() {
        let config = VnsConfig::default().with_initial(InitialStrategy::RoundRobin);
        let result = VnsRunner::run(&block_matrix(), &config);
        for window in result.score_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "score history decreased: {} -> {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_shake_budget_is_honored() {
        let config = VnsConfig::default()
            .with_initial(InitialStrategy::RoundRobin)
            .with_max_shakes(1);
        let result = VnsRunner::run(&block_matrix(), &config);
        assert_eq!(result.shakes, 1);
    }

    #[test]
    fn test_random_shaking_is_seed_reproducible() {
        let config = VnsConfig::default()
            .with_initial(InitialStrategy::RoundRobin)
            .with_shake_mode(ShakeMode::Random)
            .with_max_shakes(20)
            .with_seed(7);
        let a = VnsRunner::run(&block_matrix(), &config);
        let b = VnsRunner::run(&block_matrix(), &config);
        assert_eq!(a.best, b.best);
        assert_eq!(a.score_history, b.score_history);
        assert_eq!(a.shakes, b.shakes);
    }

    #[test]
    fn test_cancellation_returns_descended_initial() {
        let cancel = Arc::new(AtomicBool::new(true));
        let config = VnsConfig::default().with_initial(InitialStrategy::RoundRobin);
        let result =
            VnsRunner::run_with_cancel(&block_matrix(), &config, Some(Arc::clone(&cancel)));
        assert!(result.cancelled);
        assert_eq!(result.shakes, 0);
        // The initial build plus descent still produced a valid solution.
        assert!(result.best_score > 0.0);
    }

    #[test]
    fn test_result_tracks_best_score() {
        let result = VnsRunner::run(&block_matrix(), &VnsConfig::default());
        assert_eq!(result.best_score, result.best.score);
        assert_eq!(result.best_score, *result.score_history.last().unwrap());
    }

    #[test]
    #[should_panic(expected = "invalid VnsConfig")]
    fn test_invalid_config_panics() {
        let config = VnsConfig::default().with_split_fraction(2.0);
        VnsRunner::run(&identity2(), &config);
    }
}
