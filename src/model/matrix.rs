//! Binary machine×part incidence matrix.

use std::fmt;

/// Immutable boolean incidence matrix.
///
/// Rows are machines, columns are parts. `matrix[i][j] == true` means
/// machine `i` processes part `j`. The total number of one-entries is
/// computed once at construction and reused by the scorer on every
/// evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncidenceMatrix {
    machines: usize,
    parts: usize,
    /// Row-major cell storage, `machines * parts` entries.
    cells: Vec<bool>,
    ones_total: usize,
}

impl IncidenceMatrix {
    /// Builds a matrix from row vectors.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty or any row's length differs from the
    /// first row's.
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        assert!(!rows.is_empty(), "matrix must have at least one machine");
        let parts = rows[0].len();
        assert!(parts > 0, "matrix must have at least one part");

        let mut cells = Vec::with_capacity(rows.len() * parts);
        for row in rows {
            assert_eq!(row.len(), parts, "all rows must have equal length");
            cells.extend_from_slice(row);
        }
        let ones_total = cells.iter().filter(|&&c| c).count();

        Self {
            machines: rows.len(),
            parts,
            cells,
            ones_total,
        }
    }

    /// Builds an all-zero matrix and sets the given 1-entries.
    ///
    /// Duplicate coordinates are set once; the matrix is boolean and
    /// `ones_total` counts distinct one-cells.
    ///
    /// # Panics
    ///
    /// Panics if `machines` or `parts` is zero, or any coordinate is out
    /// of range.
    pub fn from_ones(machines: usize, parts: usize, ones: &[(usize, usize)]) -> Self {
        assert!(machines > 0, "matrix must have at least one machine");
        assert!(parts > 0, "matrix must have at least one part");

        let mut cells = vec![false; machines * parts];
        for &(i, j) in ones {
            assert!(i < machines && j < parts, "one-entry ({i}, {j}) out of range");
            cells[i * parts + j] = true;
        }
        let ones_total = cells.iter().filter(|&&c| c).count();

        Self {
            machines,
            parts,
            cells,
            ones_total,
        }
    }

    /// Number of machines (rows).
    pub fn machines(&self) -> usize {
        self.machines
    }

    /// Number of parts (columns).
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// Total number of one-entries.
    pub fn ones_total(&self) -> usize {
        self.ones_total
    }

    /// The smaller of the two dimensions, an upper bound on how many
    /// cells a solution can use.
    pub fn min_dim(&self) -> usize {
        self.machines.min(self.parts)
    }

    /// Cell lookup.
    #[inline]
    pub fn at(&self, machine: usize, part: usize) -> bool {
        debug_assert!(machine < self.machines && part < self.parts);
        self.cells[machine * self.parts + part]
    }

    /// Fraction of part columns where both machine rows carry a one.
    ///
    /// Symmetric in its arguments; used by the greedy initial builder as
    /// a pairwise machine-compatibility measure.
    pub fn row_agreement(&self, a: usize, b: usize) -> f64 {
        let both = (0..self.parts)
            .filter(|&j| self.at(a, j) && self.at(b, j))
            .count();
        both as f64 / self.parts as f64
    }
}

impl fmt::Display for IncidenceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Shape: {}x{}, ones: {}",
            self.machines, self.parts, self.ones_total
        )?;
        for i in 0..self.machines {
            for j in 0..self.parts {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", u8::from(self.at(i, j)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
