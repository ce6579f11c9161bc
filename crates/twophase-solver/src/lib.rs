mod error;
mod pivot;
mod problem;
mod simplex;
mod solution;
mod standard_form;
mod tableau;
mod two_phase;

pub use error::{ProblemError, SolveError};
pub use pivot::{PivotEngine, RATIO_SENTINEL};
pub use problem::{ComparisonSign, Constraint, Direction, Problem, VariableSign};
pub use simplex::Solver;
pub use solution::{ConstraintViolation, Solution, ViolationSubject};
pub use standard_form::{FreeVariableMap, StandardForm};
pub use tableau::Tableau;
pub use two_phase::TwoPhaseSolver;
