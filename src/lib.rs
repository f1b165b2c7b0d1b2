//! Machine-part cell formation via Variable Neighborhood Search.
//!
//! Solves the group-technology cell-formation problem: given a binary
//! machine×part incidence matrix, assign every machine and every part
//! to a cell so that **grouping efficacy** — in-cell ones divided by
//! total ones plus in-cell zeroes — is maximized. The search combines
//! a greedy constructive builder, best-improvement swap descent over
//! the machine and part assignment vectors, and two structural shaking
//! operators that change the number of cells.
//!
//! # Modules
//!
//! - **`model`**: the incidence matrix, the solution representation,
//!   and the grouping-efficacy objective.
//! - **`io`**: problem-file parsing and three-line result persistence.
//! - **`initial`**: round-robin and greedy constructive builders.
//! - **`vnd`**: Variable Neighborhood Descent over pairwise swaps.
//! - **`shaking`**: cluster division and merging, exhaustive or seeded
//!   random.
//! - **`vns`**: the orchestrating search loop, its configuration, and
//!   its result type.
//!
//! # Example
//!
//! ```
//! use u_cellform::model::IncidenceMatrix;
//! use u_cellform::vns::{VnsConfig, VnsRunner};
//!
//! let matrix = IncidenceMatrix::from_rows(&[
//!     vec![true, false],
//!     vec![false, true],
//! ]);
//! let result = VnsRunner::run(&matrix, &VnsConfig::default().with_seed(42));
//! assert_eq!(result.best_score, 1.0);
//! ```
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Kumar, C. S. & Chandrasekharan, M. P. (1990). "Grouping efficacy:
//!   a quantitative criterion for goodness of block diagonal forms of
//!   binary matrices in group technology", *IJPR* 28(2), 233-243.

pub mod initial;
pub mod io;
pub mod model;
pub mod shaking;
pub mod vnd;
pub mod vns;
