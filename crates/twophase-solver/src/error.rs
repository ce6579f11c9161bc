use thiserror::Error;

/// Terminal outcomes of a solve that did not produce an optimum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Objective is unbounded over the feasible region")]
    Unbounded,
    #[error("No point satisfies every constraint")]
    Infeasible,
    #[error("Pivot iteration limit of {limit} exceeded")]
    IterationLimitExceeded { limit: usize },
    #[error(transparent)]
    InvalidProblem(#[from] ProblemError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("Expected {expected} variable signs, found {found}")]
    SignCount { expected: usize, found: usize },
    #[error("Constraint {constraint} has {found} coefficients, expected {expected}")]
    ConstraintLength {
        constraint: usize,
        expected: usize,
        found: usize,
    },
    #[error("Non-finite value in {0}")]
    NonFinite(String),
}
