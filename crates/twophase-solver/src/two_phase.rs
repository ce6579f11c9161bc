use log::{debug, warn};

use crate::error::SolveError;
use crate::pivot::PivotEngine;
use crate::tableau::Tableau;

/// Two-phase simplex over a single artificial variable `x0`.
///
/// Phase 1 minimizes `x0` on the tableau where every constraint row carries a
/// `-x0` term; phase 2 restores the original objective once `x0` is gone.
#[derive(Debug, Clone, Copy)]
pub struct TwoPhaseSolver {
    engine: PivotEngine,
    tolerance: f64,
}

impl TwoPhaseSolver {
    pub fn new(engine: PivotEngine, tolerance: f64) -> Self {
        Self { engine, tolerance }
    }

    pub fn solve(&self, tableau: Tableau) -> Result<Tableau, SolveError> {
        let objective = tableau.objective_row().to_vec();

        let auxiliary = self.phase_one(tableau)?;
        let phase_two = self.restore_objective(auxiliary, objective);

        debug!("phase 2 on {} columns", phase_two.num_columns());
        self.engine.run(phase_two)
    }

    /// Builds the auxiliary problem `min x0`, seeds it and pivots it to
    /// optimality. Returns the optimal auxiliary tableau, `x0` column included.
    fn phase_one(&self, tableau: Tableau) -> Result<Tableau, SolveError> {
        let mut auxiliary = Self::auxiliary(tableau);
        let x0 = auxiliary.rhs_column() - 1;

        if let Some(row) = self.most_negative_rhs(&auxiliary) {
            debug!("phase 1 seed pivot on row {}", row);
            auxiliary.pivot(row, x0);
        }

        let auxiliary = match self.engine.run(auxiliary) {
            Ok(t) => t,
            Err(SolveError::Unbounded) => {
                warn!("auxiliary problem reported unbounded");
                return Err(SolveError::Infeasible);
            }
            Err(e) => return Err(e),
        };

        let value = -auxiliary.rhs(0);
        if value.abs() > self.tolerance {
            debug!("phase 1 optimum x0 = {}, infeasible", value);
            return Err(SolveError::Infeasible);
        }

        Ok(self.drive_out(auxiliary, x0))
    }

    /// Appends `x0` with `-1` in every constraint row and sets row 0 to `x0`.
    fn auxiliary(tableau: Tableau) -> Tableau {
        let mut auxiliary = tableau.with_column_before_rhs(0.0, -1.0);
        let mut objective = vec![0.0; auxiliary.num_columns()];
        objective[auxiliary.rhs_column() - 1] = 1.0;
        auxiliary.set_objective(objective);
        auxiliary
    }

    /// Constraint row with the most negative RHS, if any RHS is negative
    fn most_negative_rhs(&self, tableau: &Tableau) -> Option<usize> {
        let mut min_val = -self.tolerance;
        let mut min_row = None;
        for i in 1..tableau.num_rows() {
            let rhs = tableau.rhs(i);
            if rhs < min_val {
                min_val = rhs;
                min_row = Some(i);
            }
        }
        min_row
    }

    /// Pivots a degenerate basic `x0` out on the first non-zero entry of its row.
    fn drive_out(&self, mut tableau: Tableau, x0: usize) -> Tableau {
        let Some(row) = tableau.basic_row(x0) else {
            return tableau;
        };
        let replacement = (0..x0).find(|&j| tableau.get(row, j).abs() > self.tolerance);
        if let Some(col) = replacement {
            debug!("x0 basic at zero in row {}, replacing with column {}", row, col);
            tableau.pivot(row, col);
        }
        tableau
    }

    /// Drops `x0` and rewrites row 0 as `objective` with every basic column
    /// eliminated.
    fn restore_objective(&self, auxiliary: Tableau, objective: Vec<f64>) -> Tableau {
        let x0 = auxiliary.rhs_column() - 1;
        let mut tableau = auxiliary.without_column(x0);

        let mut row = objective;
        for (i, basic) in tableau.basis().iter().enumerate() {
            let Some(col) = *basic else { continue };
            let cost = row[col];
            if cost.abs() <= self.tolerance {
                continue;
            }
            for (v, a) in row.iter_mut().zip(&tableau.rows()[i + 1]) {
                *v -= cost * a;
            }
        }

        tableau.set_objective(row);
        tableau
    }
}
