use crate::problem::{ComparisonSign, Direction, Problem, VariableSign};
use crate::tableau::Tableau;

/// Positions of split free variables in working-column space.
///
/// Each entry `i` stands for `x = x_i^+ - x_i^-`, the negative part living in
/// working column `i + 1`. Positions are increasing.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeVariableMap {
    positions: Vec<usize>,
}

impl FreeVariableMap {
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Folds every `(x^+, x^-)` pair of `values` back into a single value.
    ///
    /// Removals use the positions captured at build time, shifted by the
    /// number of columns already removed.
    pub fn recombine(&self, mut values: Vec<f64>) -> Vec<f64> {
        for &p in &self.positions {
            values[p] -= values[p + 1];
        }
        for (removed, &p) in self.positions.iter().enumerate() {
            values.remove(p + 1 - removed);
        }
        values
    }
}

/// Canonical minimization form of a [`Problem`]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StandardForm {
    pub tableau: Tableau,
    pub free_variables: FreeVariableMap,
}

/// Working-column layout: `[x (free ones split)][slack_1..slack_m][RHS]`.
struct ColumnLayout {
    /// Working column of each original variable
    columns: Vec<usize>,
    slack_start: usize,
    total: usize,
}

impl ColumnLayout {
    fn of(problem: &Problem) -> Self {
        let mut columns = Vec::with_capacity(problem.num_variables());
        let mut next = 0;
        for sign in &problem.variable_signs {
            columns.push(next);
            next += if *sign == VariableSign::Free { 2 } else { 1 };
        }
        let slack_start = next;
        Self {
            columns,
            slack_start,
            total: slack_start + problem.num_constraints() + 1,
        }
    }

    /// Writes `coefs` into `row` under the sign substitutions.
    fn fill(&self, row: &mut [f64], coefs: &[f64], signs: &[VariableSign], scale: f64) {
        for (i, (&c, sign)) in coefs.iter().zip(signs).enumerate() {
            let col = self.columns[i];
            let c = scale * c;
            match sign {
                VariableSign::NonNegative => row[col] = c,
                VariableSign::NonPositive => row[col] = -c,
                VariableSign::Free => {
                    row[col] = c;
                    row[col + 1] = -c;
                }
            }
        }
    }
}

impl StandardForm {
    /// Converts `problem` into a minimization tableau over non-negative
    /// variables.
    ///
    /// Maximization negates the objective, `>=` rows are negated, every
    /// non-equality row gets a +1 slack, non-positive columns are negated and
    /// free columns are split. The initial basis is the slack of each
    /// non-equality row; equality rows start without one.
    ///
    /// The problem is expected to have passed [`Problem::validate`].
    pub fn build(problem: &Problem) -> Self {
        let layout = ColumnLayout::of(problem);
        let signs = &problem.variable_signs;
        let n_constraints = problem.num_constraints();

        let mut data = vec![vec![0.0; layout.total]; n_constraints + 1];
        let mut basis = vec![None; n_constraints];

        let direction = match problem.direction {
            Direction::Maximize => -1.0,
            Direction::Minimize => 1.0,
        };
        layout.fill(&mut data[0], &problem.objective, signs, direction);

        for (i, c) in problem.constraints.iter().enumerate() {
            let row = &mut data[i + 1];
            let scale = if c.sign == ComparisonSign::Ge { -1.0 } else { 1.0 };
            layout.fill(row, &c.coefficients, signs, scale);
            row[layout.total - 1] = scale * c.rhs;

            if c.sign != ComparisonSign::Eq {
                let slack = layout.slack_start + i;
                row[slack] = 1.0;
                basis[i] = Some(slack);
            }
        }

        let free_variables = FreeVariableMap {
            positions: signs
                .iter()
                .zip(&layout.columns)
                .filter(|(s, _)| **s == VariableSign::Free)
                .map(|(_, &col)| col)
                .collect(),
        };

        log::debug!(
            "standard form: {} rows x {} columns, {} free splits",
            n_constraints + 1,
            layout.total,
            free_variables.len()
        );

        Self {
            tableau: Tableau::new(data, basis),
            free_variables,
        }
    }
}
