//! Problem input and result persistence.
//!
//! # Problem format
//!
//! The first line carries two integers, `machines parts`. Every further
//! line lists the one-entries of one machine row: a 1-based machine
//! index followed by the 1-based part indices it processes. Machines
//! without a line have all-zero rows.
//!
//! ```text
//! 2 2
//! 1 1
//! 2 2
//! ```
//!
//! # Result format
//!
//! Line 1: machine cluster ids, space-separated. Line 2: part cluster
//! ids. Line 3: the score. Scores are written in Rust's shortest
//! round-trippable `f64` form, so a persisted solution reloads with the
//! identical arrays, cluster count, and bit-identical score.

use std::fs;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::model::{CellSolution, IncidenceMatrix};

/// Error raised by problem parsing and result persistence.
#[derive(Debug, Error)]
pub enum DataError {
    /// Underlying file-system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed content at a specific 1-based line.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl DataError {
    fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// Result alias for data-access operations.
pub type Result<T> = std::result::Result<T, DataError>;

fn parse_token<T: std::str::FromStr>(token: &str, line: usize, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| DataError::syntax(line, format!("invalid {what} '{token}'")))
}

/// Parses a problem description into an incidence matrix.
pub fn parse_problem(text: &str) -> Result<IncidenceMatrix> {
    let mut lines = text.lines().enumerate().map(|(n, l)| (n + 1, l.trim()));

    let (line_no, header) = lines
        .next()
        .ok_or_else(|| DataError::syntax(1, "empty input"))?;
    let tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(DataError::syntax(
            line_no,
            format!("expected 'machines parts', got {} token(s)", tokens.len()),
        ));
    }
    let machines: usize = parse_token(tokens[0], line_no, "machine count")?;
    let parts: usize = parse_token(tokens[1], line_no, "part count")?;
    if machines == 0 || parts == 0 {
        return Err(DataError::syntax(line_no, "matrix dimensions must be positive"));
    }

    let mut ones = Vec::new();
    for (line_no, line) in lines {
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        let machine: usize = parse_token(first, line_no, "machine index")?;
        if machine == 0 || machine > machines {
            return Err(DataError::syntax(
                line_no,
                format!("machine index {machine} out of range 1..={machines}"),
            ));
        }
        for token in tokens {
            let part: usize = parse_token(token, line_no, "part index")?;
            if part == 0 || part > parts {
                return Err(DataError::syntax(
                    line_no,
                    format!("part index {part} out of range 1..={parts}"),
                ));
            }
            ones.push((machine - 1, part - 1));
        }
    }

    Ok(IncidenceMatrix::from_ones(machines, parts, &ones))
}

/// Reads and parses a problem file.
pub fn read_problem(path: impl AsRef<Path>) -> Result<IncidenceMatrix> {
    parse_problem(&fs::read_to_string(path)?)
}

fn join_ids(ids: &[usize]) -> String {
    ids.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a solution in the three-line result format.
pub fn format_solution(solution: &CellSolution) -> String {
    format!(
        "{}\n{}\n{}\n",
        join_ids(&solution.machine_clusters),
        join_ids(&solution.part_clusters),
        solution.score
    )
}

/// Writes a solution to a file in the three-line result format.
pub fn save_solution(path: impl AsRef<Path>, solution: &CellSolution) -> Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(format_solution(solution).as_bytes())?;
    Ok(())
}

/// Parses a persisted solution.
///
/// The cluster count is not stored in the file; it is recovered as the
/// maximum id over both vectors.
pub fn parse_solution(text: &str) -> Result<CellSolution> {
    let mut lines = text.lines().enumerate().map(|(n, l)| (n + 1, l.trim()));
    let mut next_line = |what: &str| {
        lines
            .next()
            .ok_or_else(|| DataError::syntax(0, format!("missing {what} line")))
    };

    let parse_ids = |line_no: usize, line: &str, what: &str| -> Result<Vec<usize>> {
        let ids = line
            .split_whitespace()
            .map(|t| parse_token::<usize>(t, line_no, what))
            .collect::<Result<Vec<usize>>>()?;
        if ids.is_empty() {
            return Err(DataError::syntax(line_no, format!("empty {what} line")));
        }
        if ids.contains(&0) {
            return Err(DataError::syntax(line_no, "cluster ids are 1-based"));
        }
        Ok(ids)
    };

    let (line_no, line) = next_line("machine clusters")?;
    let machine_clusters = parse_ids(line_no, line, "machine cluster id")?;
    let (line_no, line) = next_line("part clusters")?;
    let part_clusters = parse_ids(line_no, line, "part cluster id")?;
    let (line_no, line) = next_line("score")?;
    let score: f64 = parse_token(line, line_no, "score")?;

    let cluster_count = machine_clusters
        .iter()
        .chain(part_clusters.iter())
        .copied()
        .max()
        .unwrap_or(1);

    Ok(CellSolution {
        machine_clusters,
        part_clusters,
        cluster_count,
        score,
    })
}

/// Reads and parses a persisted solution file.
pub fn load_solution(path: impl AsRef<Path>) -> Result<CellSolution> {
    parse_solution(&fs::read_to_string(path)?)
}
