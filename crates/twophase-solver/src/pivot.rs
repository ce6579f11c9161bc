use log::{trace, warn};

use crate::error::SolveError;
use crate::tableau::Tableau;

/// Ratio used in place of `entry / 0.0` during the ratio test
pub const RATIO_SENTINEL: f64 = 1.0e100;

/// Pivots a tableau to optimality with Dantzig's column rule.
#[derive(Debug, Clone, Copy)]
pub struct PivotEngine {
    max_iterations: usize,
    tolerance: f64,
}

impl PivotEngine {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Pivots until row 0 has no negative entry left.
    pub fn run(&self, mut tableau: Tableau) -> Result<Tableau, SolveError> {
        for iteration in 0..self.max_iterations {
            let Some(col) = self.pivot_column(&tableau) else {
                trace!("optimal after {} pivots", iteration);
                return Ok(tableau);
            };
            let Some(row) = self.pivot_row(&tableau, col) else {
                trace!("column {} has no positive entry, unbounded", col);
                return Err(SolveError::Unbounded);
            };
            trace!(
                "pivot {}: row {} col {} (element {})",
                iteration,
                row,
                col,
                tableau.get(row, col)
            );
            tableau.pivot(row, col);
        }

        if self.pivot_column(&tableau).is_none() {
            return Ok(tableau);
        }
        warn!("pivot limit of {} reached before optimality", self.max_iterations);
        Err(SolveError::IterationLimitExceeded {
            limit: self.max_iterations,
        })
    }

    /// Column with the most negative objective entry, first one on ties
    pub fn pivot_column(&self, tableau: &Tableau) -> Option<usize> {
        let objective = &tableau.objective_row()[..tableau.rhs_column()];

        let mut min_val = -self.tolerance;
        let mut min_col = None;
        for (j, &v) in objective.iter().enumerate() {
            if v < min_val {
                min_val = v;
                min_col = Some(j);
            }
        }
        min_col
    }

    /// Ratio test on `col`; `None` means the objective is unbounded along it.
    ///
    /// Only rows with a positive entry qualify. Among those the row with the
    /// largest `entry / rhs` wins, the top-most one on ties.
    pub fn pivot_row(&self, tableau: &Tableau, col: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for i in 1..tableau.num_rows() {
            let entry = tableau.get(i, col);
            if entry <= self.tolerance {
                continue;
            }
            let ratio = self.ratio(entry, tableau.rhs(i));
            match best {
                Some((_, best_ratio)) if ratio <= best_ratio => {}
                _ => best = Some((i, ratio)),
            }
        }

        best.map(|(i, _)| i)
    }

    fn ratio(&self, entry: f64, rhs: f64) -> f64 {
        if rhs.abs() <= self.tolerance {
            RATIO_SENTINEL
        } else {
            entry / rhs
        }
    }
}
