use crate::problem::{ComparisonSign, Problem, VariableSign};
use crate::tableau::Tableau;

/// The result of solving an LP problem to optimality
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Optimal values for each original variable
    pub values: Vec<f64>,
    /// Optimal objective value, in the problem's own direction
    pub objective_value: f64,
    /// Final tableau
    pub tableau: Tableau,
}

/// Information about a violated constraint or sign restriction
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    /// What was violated
    pub subject: ViolationSubject,
    /// Required value (constraint RHS, or 0 for a sign restriction)
    pub required: f64,
    /// Actual value achieved
    pub actual: f64,
    /// How much the constraint is violated by
    pub violation_amount: f64,
    /// Human-readable description of what's wrong
    pub description: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationSubject {
    /// Constraint index
    Constraint(usize),
    /// Variable index, for a broken sign restriction
    Variable(usize),
}

impl Solution {
    /// Objective of `problem` evaluated at these values
    pub fn evaluate(&self, problem: &Problem) -> f64 {
        dot(&problem.objective, &self.values)
    }

    /// Substitutes the values back into the original constraints and variable
    /// signs, returning every violation worst first.
    pub fn violations(&self, problem: &Problem, tolerance: f64) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();

        for (i, c) in problem.constraints.iter().enumerate() {
            let lhs = dot(&c.coefficients, &self.values);

            let violation = match c.sign {
                ComparisonSign::Le if lhs > c.rhs + tolerance => {
                    let amt = lhs - c.rhs;
                    Some((amt, format!("constraint {} exceeds maximum of {:.4} by {:.4}", i, c.rhs, amt)))
                }
                ComparisonSign::Ge if lhs < c.rhs - tolerance => {
                    let amt = c.rhs - lhs;
                    Some((amt, format!("constraint {} is below minimum of {:.4} by {:.4}", i, c.rhs, amt)))
                }
                ComparisonSign::Eq if (lhs - c.rhs).abs() > tolerance => Some((
                    (lhs - c.rhs).abs(),
                    format!("constraint {} requires exactly {:.4} but got {:.4}", i, c.rhs, lhs),
                )),
                _ => None,
            };

            if let Some((violation_amount, description)) = violation {
                violations.push(ConstraintViolation {
                    subject: ViolationSubject::Constraint(i),
                    required: c.rhs,
                    actual: lhs,
                    violation_amount,
                    description,
                });
            }
        }

        for (i, (&v, sign)) in self.values.iter().zip(&problem.variable_signs).enumerate() {
            let broken = match sign {
                VariableSign::NonNegative if v < -tolerance => Some(">="),
                VariableSign::NonPositive if v > tolerance => Some("<="),
                _ => None,
            };
            if let Some(op) = broken {
                violations.push(ConstraintViolation {
                    subject: ViolationSubject::Variable(i),
                    required: 0.0,
                    actual: v,
                    violation_amount: v.abs(),
                    description: format!("variable x{} must be {} 0 but got {:.4}", i + 1, op, v),
                });
            }
        }

        violations.sort_by(|a, b| {
            b.violation_amount
                .partial_cmp(&a.violation_amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        violations
    }

    pub fn is_feasible_for(&self, problem: &Problem, tolerance: f64) -> bool {
        self.violations(problem, tolerance).is_empty()
    }
}

fn dot(coefficients: &[f64], values: &[f64]) -> f64 {
    coefficients.iter().zip(values).map(|(c, v)| c * v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Direction;

    fn solution(values: Vec<f64>) -> Solution {
        Solution {
            values,
            objective_value: 0.0,
            tableau: Tableau::new(vec![vec![0.0]], vec![]),
        }
    }

    #[test]
    fn test_violations_sorted_worst_first() {
        let problem = Problem::new(Direction::Minimize, vec![1.0, 1.0])
            .with_constraint(vec![1.0, 1.0], ComparisonSign::Le, 1.0)
            .with_constraint(vec![1.0, 0.0], ComparisonSign::Ge, 5.0)
            .with_constraint(vec![0.0, 1.0], ComparisonSign::Eq, 1.0);

        let v = solution(vec![2.0, 1.0]).violations(&problem, 1e-9);

        assert_eq!(v.len(), 2);
        assert_eq!(v[0].subject, ViolationSubject::Constraint(1));
        assert!((v[0].violation_amount - 3.0).abs() < 1e-12);
        assert_eq!(v[1].subject, ViolationSubject::Constraint(0));
        assert!((v[1].actual - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_feasible_point() {
        let problem = Problem::new(Direction::Maximize, vec![3.0, 2.0])
            .with_constraint(vec![1.0, 1.0], ComparisonSign::Le, 4.0)
            .with_constraint(vec![1.0, 3.0], ComparisonSign::Le, 6.0);

        let s = solution(vec![4.0, 0.0]);
        assert!(s.is_feasible_for(&problem, 1e-9));
        assert!((s.evaluate(&problem) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_sign_restrictions_are_checked() {
        let problem = Problem::new(Direction::Minimize, vec![1.0, 1.0, 1.0])
            .with_variable_sign(0, VariableSign::NonPositive)
            .with_variable_sign(2, VariableSign::Free);

        let v = solution(vec![5.0, -2.0, -7.0]).violations(&problem, 1e-9);

        assert_eq!(v.len(), 2);
        assert_eq!(v[0].subject, ViolationSubject::Variable(0));
        assert!((v[0].violation_amount - 5.0).abs() < 1e-12);
        assert_eq!(v[0].description, "variable x1 must be <= 0 but got 5.0000");
        assert_eq!(v[1].subject, ViolationSubject::Variable(1));
        assert!(v[1].description.contains(">= 0"));
        assert!(!solution(vec![5.0, -2.0, -7.0]).is_feasible_for(&problem, 1e-9));
        assert!(solution(vec![-1.0, 0.0, -7.0]).is_feasible_for(&problem, 1e-9));
    }
}
