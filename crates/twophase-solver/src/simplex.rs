use log::debug;

use crate::error::SolveError;
use crate::pivot::PivotEngine;
use crate::problem::{Direction, Problem, VariableSign};
use crate::solution::Solution;
use crate::standard_form::StandardForm;
use crate::tableau::Tableau;
use crate::two_phase::TwoPhaseSolver;

/// Simplex solver for linear programming problems
#[derive(Debug, Clone)]
pub struct Solver {
    /// Maximum pivots per phase before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Path {
    Auto,
    TwoPhase,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve the LP problem, using the two-phase method only when the
    /// all-slack basis is infeasible
    pub fn solve(&self, problem: &Problem) -> Result<Solution, SolveError> {
        self.solve_via(problem, Path::Auto)
    }

    /// Solve the LP problem, always going through phase 1
    pub fn solve_two_phase(&self, problem: &Problem) -> Result<Solution, SolveError> {
        self.solve_via(problem, Path::TwoPhase)
    }

    fn solve_via(&self, problem: &Problem, path: Path) -> Result<Solution, SolveError> {
        problem.validate()?;

        let StandardForm {
            tableau,
            free_variables,
        } = StandardForm::build(problem);
        let tableau = self.seat_equality_rows(tableau)?;

        let engine = PivotEngine::new(self.max_iterations, self.tolerance);
        let tableau = if path == Path::Auto && !tableau.has_negative_rhs(self.tolerance) {
            debug!("initial basis feasible, single-phase simplex");
            engine.run(tableau)?
        } else {
            debug!("initial basis infeasible, two-phase simplex");
            TwoPhaseSolver::new(engine, self.tolerance).solve(tableau)?
        };

        // Basic columns take their row's RHS, the rest stay at zero
        let mut values = vec![0.0; tableau.rhs_column()];
        for (i, basic) in tableau.basis().iter().enumerate() {
            if let Some(col) = *basic {
                values[col] = tableau.rhs(i + 1);
            }
        }
        let mut values = free_variables.recombine(values);
        values.truncate(problem.num_variables());
        for (v, sign) in values.iter_mut().zip(&problem.variable_signs) {
            if *sign == VariableSign::NonPositive {
                *v = -*v;
            }
        }

        let objective_value = match problem.direction {
            Direction::Minimize => -tableau.rhs(0),
            Direction::Maximize => tableau.rhs(0),
        };
        // normalize -0.0
        let objective_value = objective_value + 0.0;

        debug!("optimal objective {}", objective_value);

        Ok(Solution {
            values,
            objective_value,
            tableau,
        })
    }

    /// Gives every equality row a basic column by pivoting on its
    /// largest-magnitude non-basic entry.
    fn seat_equality_rows(&self, mut tableau: Tableau) -> Result<Tableau, SolveError> {
        for row in 1..tableau.num_rows() {
            if tableau.basis()[row - 1].is_some() {
                continue;
            }

            let mut best: Option<(usize, f64)> = None;
            for col in 0..tableau.rhs_column() {
                if tableau.basic_row(col).is_some() {
                    continue;
                }
                let magnitude = tableau.get(row, col).abs();
                if magnitude > self.tolerance && best.is_none_or(|(_, m)| magnitude > m) {
                    best = Some((col, magnitude));
                }
            }

            match best {
                Some((col, _)) => {
                    debug!("seating equality row {} on column {}", row, col);
                    tableau.pivot(row, col);
                }
                // 0 = b
                None if tableau.rhs(row).abs() > self.tolerance => {
                    return Err(SolveError::Infeasible);
                }
                None => {}
            }
        }
        Ok(tableau)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ComparisonSign;

    #[test]
    fn test_simple_maximization() {
        // Maximize: 3x + 2y
        // Subject to:
        //   x + y <= 4
        //   x <= 3
        //   y <= 3
        //   x, y >= 0
        // Optimal: x=3, y=1, obj=11
        let problem = Problem::new(Direction::Maximize, vec![3.0, 2.0])
            .with_constraint(vec![1.0, 1.0], ComparisonSign::Le, 4.0)
            .with_constraint(vec![1.0, 0.0], ComparisonSign::Le, 3.0)
            .with_constraint(vec![0.0, 1.0], ComparisonSign::Le, 3.0);

        let solution = Solver::new().solve(&problem).unwrap();

        assert!((solution.values[0] - 3.0).abs() < 1e-6, "x = {} (expected 3)", solution.values[0]);
        assert!((solution.values[1] - 1.0).abs() < 1e-6, "y = {} (expected 1)", solution.values[1]);
        assert!((solution.objective_value - 11.0).abs() < 1e-6, "obj = {} (expected 11)", solution.objective_value);
    }

    #[test]
    fn test_minimization_with_ge() {
        // Minimize: 2x + 3y
        // Subject to:
        //   x + y >= 4
        //   x <= 3
        //   y <= 3
        //   x, y >= 0
        // Optimal: x=3, y=1, obj=9
        let problem = Problem::new(Direction::Minimize, vec![2.0, 3.0])
            .with_constraint(vec![1.0, 1.0], ComparisonSign::Ge, 4.0)
            .with_constraint(vec![1.0, 0.0], ComparisonSign::Le, 3.0)
            .with_constraint(vec![0.0, 1.0], ComparisonSign::Le, 3.0);

        let solution = Solver::new().solve(&problem).unwrap();

        assert!((solution.values[0] - 3.0).abs() < 1e-6, "x = {} (expected 3)", solution.values[0]);
        assert!((solution.values[1] - 1.0).abs() < 1e-6, "y = {} (expected 1)", solution.values[1]);
        assert!((solution.objective_value - 9.0).abs() < 1e-6, "obj = {} (expected 9)", solution.objective_value);
    }

    #[test]
    fn test_infeasible() {
        // x >= 5
        // x <= 3
        let problem = Problem::new(Direction::Minimize, vec![1.0])
            .with_constraint(vec![1.0], ComparisonSign::Ge, 5.0)
            .with_constraint(vec![1.0], ComparisonSign::Le, 3.0);

        assert_eq!(Solver::new().solve(&problem), Err(SolveError::Infeasible));
    }

    #[test]
    fn test_equality_row() {
        // Minimize x + y subject to x + y = 2
        let problem = Problem::new(Direction::Minimize, vec![1.0, 1.0])
            .with_constraint(vec![1.0, 1.0], ComparisonSign::Eq, 2.0);

        let solution = Solver::new().solve(&problem).unwrap();

        assert!((solution.objective_value - 2.0).abs() < 1e-9);
        assert!(solution.is_feasible_for(&problem, 1e-9));
    }

    #[test]
    fn test_empty_equality_row() {
        let problem = Problem::new(Direction::Minimize, vec![1.0])
            .with_constraint(vec![0.0], ComparisonSign::Eq, 1.0);
        assert_eq!(Solver::new().solve(&problem), Err(SolveError::Infeasible));

        let problem = Problem::new(Direction::Minimize, vec![1.0])
            .with_constraint(vec![0.0], ComparisonSign::Eq, 0.0);
        let solution = Solver::new().solve(&problem).unwrap();
        assert_eq!(solution.values, vec![0.0]);
    }

    #[test]
    fn test_non_positive_variable() {
        // Minimize x subject to x >= -4, x <= 0
        let problem = Problem::new(Direction::Minimize, vec![1.0])
            .with_constraint(vec![1.0], ComparisonSign::Ge, -4.0)
            .with_variable_sign(0, VariableSign::NonPositive);

        let solution = Solver::new().solve(&problem).unwrap();

        assert!((solution.values[0] + 4.0).abs() < 1e-9, "x = {}", solution.values[0]);
        assert!((solution.objective_value + 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_problem() {
        let problem = Problem::new(Direction::Minimize, vec![1.0, 1.0])
            .with_constraint(vec![1.0], ComparisonSign::Le, 1.0);
        assert!(matches!(
            Solver::new().solve(&problem),
            Err(SolveError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_unconstrained_minimum() {
        let problem = Problem::new(Direction::Minimize, vec![1.0, 2.0]);
        let solution = Solver::new().solve(&problem).unwrap();
        assert_eq!(solution.values, vec![0.0, 0.0]);
        assert_eq!(solution.objective_value, 0.0);

        let problem = Problem::new(Direction::Maximize, vec![1.0]);
        assert_eq!(Solver::new().solve(&problem), Err(SolveError::Unbounded));
    }
}
