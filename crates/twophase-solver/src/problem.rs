use crate::error::ProblemError;

/// Represents a general linear programming problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Whether to minimize or maximize
    pub direction: Direction,
    /// Objective function coefficients, one per variable
    pub objective: Vec<f64>,
    /// Constraints
    pub constraints: Vec<Constraint>,
    /// Sign restriction for each variable
    pub variable_signs: Vec<VariableSign>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub sign: ComparisonSign,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSign {
    /// Less than or equal (<=)
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    Le,
    /// Greater than or equal (>=)
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    Ge,
    /// Equal (=)
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Eq,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableSign {
    /// x >= 0
    #[default]
    NonNegative,
    /// x <= 0
    NonPositive,
    /// Unrestricted
    Free,
}

impl Problem {
    /// Creates a problem with no constraints where every variable is non-negative.
    pub fn new(direction: Direction, objective: Vec<f64>) -> Self {
        let n = objective.len();
        Self {
            direction,
            objective,
            constraints: Vec::new(),
            variable_signs: vec![VariableSign::NonNegative; n],
        }
    }

    pub fn add_constraint(&mut self, coefficients: Vec<f64>, sign: ComparisonSign, rhs: f64) {
        self.constraints.push(Constraint {
            coefficients,
            sign,
            rhs,
        });
    }

    /// Builder-style variant of [`Problem::add_constraint`].
    pub fn with_constraint(mut self, coefficients: Vec<f64>, sign: ComparisonSign, rhs: f64) -> Self {
        self.add_constraint(coefficients, sign, rhs);
        self
    }

    pub fn set_variable_sign(&mut self, index: usize, sign: VariableSign) {
        if let Some(slot) = self.variable_signs.get_mut(index) {
            *slot = sign;
        }
    }

    pub fn with_variable_sign(mut self, index: usize, sign: VariableSign) -> Self {
        self.set_variable_sign(index, sign);
        self
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_free_variables(&self) -> usize {
        self.variable_signs
            .iter()
            .filter(|&&s| s == VariableSign::Free)
            .count()
    }

    /// Checks that every vector has the right length and every number is finite.
    pub fn validate(&self) -> Result<(), ProblemError> {
        let n = self.num_variables();

        if self.variable_signs.len() != n {
            return Err(ProblemError::SignCount {
                expected: n,
                found: self.variable_signs.len(),
            });
        }

        if let Some(j) = self.objective.iter().position(|c| !c.is_finite()) {
            return Err(ProblemError::NonFinite(format!("objective coefficient {}", j)));
        }

        for (i, c) in self.constraints.iter().enumerate() {
            if c.coefficients.len() != n {
                return Err(ProblemError::ConstraintLength {
                    constraint: i,
                    expected: n,
                    found: c.coefficients.len(),
                });
            }
            if let Some(j) = c.coefficients.iter().position(|v| !v.is_finite()) {
                return Err(ProblemError::NonFinite(format!(
                    "coefficient {} of constraint {}",
                    j, i
                )));
            }
            if !c.rhs.is_finite() {
                return Err(ProblemError::NonFinite(format!("right-hand side of constraint {}", i)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_non_negative() {
        let problem = Problem::new(Direction::Minimize, vec![1.0, 2.0, 3.0]);
        assert_eq!(problem.variable_signs, vec![VariableSign::NonNegative; 3]);
        assert_eq!(problem.num_constraints(), 0);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_validate_constraint_length() {
        let problem = Problem::new(Direction::Minimize, vec![1.0, 2.0])
            .with_constraint(vec![1.0, 1.0], ComparisonSign::Le, 4.0)
            .with_constraint(vec![1.0], ComparisonSign::Ge, 1.0);

        assert_eq!(
            problem.validate(),
            Err(ProblemError::ConstraintLength {
                constraint: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_validate_sign_count() {
        let mut problem = Problem::new(Direction::Maximize, vec![1.0, 2.0]);
        problem.variable_signs.pop();
        assert_eq!(
            problem.validate(),
            Err(ProblemError::SignCount { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_validate_non_finite() {
        let problem = Problem::new(Direction::Maximize, vec![1.0])
            .with_constraint(vec![1.0], ComparisonSign::Le, f64::NAN);
        assert!(matches!(problem.validate(), Err(ProblemError::NonFinite(_))));
    }

    #[test]
    fn test_set_variable_sign_out_of_range_is_ignored() {
        let problem = Problem::new(Direction::Minimize, vec![1.0])
            .with_variable_sign(0, VariableSign::Free)
            .with_variable_sign(5, VariableSign::NonPositive);
        assert_eq!(problem.variable_signs, vec![VariableSign::Free]);
        assert_eq!(problem.num_free_variables(), 1);
    }
}
