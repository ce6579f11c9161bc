use std::fmt;

/// Dense simplex tableau.
///
/// Row 0 is the objective row, rows `1..=m` are the constraint rows and the
/// last column holds the right-hand side. The RHS of row 0 is the negated
/// objective value of the current basic solution.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    data: Vec<Vec<f64>>,
    /// Working column that is basic in each constraint row
    basis: Vec<Option<usize>>,
}

impl Tableau {
    pub(crate) fn new(data: Vec<Vec<f64>>, basis: Vec<Option<usize>>) -> Self {
        debug_assert_eq!(data.len(), basis.len() + 1);
        debug_assert!(data.iter().all(|r| r.len() == data[0].len()));
        Self { data, basis }
    }

    /// Number of rows, objective row included
    pub fn num_rows(&self) -> usize {
        self.data.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.data.len().saturating_sub(1)
    }

    /// Number of columns, RHS included
    pub fn num_columns(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    pub fn rhs_column(&self) -> usize {
        self.num_columns().saturating_sub(1)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn rhs(&self, row: usize) -> f64 {
        self.data[row][self.rhs_column()]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn objective_row(&self) -> &[f64] {
        &self.data[0]
    }

    pub fn basis(&self) -> &[Option<usize>] {
        &self.basis
    }

    /// Constraint row in which `col` is basic
    pub fn basic_row(&self, col: usize) -> Option<usize> {
        self.basis.iter().position(|&b| b == Some(col)).map(|i| i + 1)
    }

    pub fn has_negative_rhs(&self, tolerance: f64) -> bool {
        (1..self.num_rows()).any(|i| self.rhs(i) < -tolerance)
    }

    /// Gauss-Jordan step on `(row, col)`; `row` must be a constraint row and
    /// the pivot element must be non-zero.
    pub(crate) fn pivot(&mut self, row: usize, col: usize) {
        debug_assert!(row >= 1, "row 0 is the objective row");
        let pivot_val = self.data[row][col];
        debug_assert!(pivot_val != 0.0, "zero pivot element at ({}, {})", row, col);
        for v in self.data[row].iter_mut() {
            *v /= pivot_val;
        }

        let pivot_row = self.data[row].clone();
        for (i, r) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = r[col];
            if factor == 0.0 {
                continue;
            }
            for (v, p) in r.iter_mut().zip(&pivot_row) {
                *v -= factor * p;
            }
        }

        self.basis[row - 1] = Some(col);
    }

    /// Replaces the objective row. `row` must match the column count.
    pub(crate) fn set_objective(&mut self, row: Vec<f64>) {
        debug_assert_eq!(row.len(), self.num_columns());
        self.data[0] = row;
    }

    /// Returns a tableau with one extra column inserted just before the RHS.
    pub(crate) fn with_column_before_rhs(self, objective: f64, constraint: f64) -> Self {
        let rhs = self.rhs_column();
        let data = self
            .data
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.insert(rhs, if i == 0 { objective } else { constraint });
                r
            })
            .collect();
        Self {
            data,
            basis: self.basis,
        }
    }

    /// Returns a tableau with `col` removed; basis entries past it shift left.
    pub(crate) fn without_column(self, col: usize) -> Self {
        let data = self
            .data
            .into_iter()
            .map(|mut r| {
                r.remove(col);
                r
            })
            .collect();
        let basis = self
            .basis
            .into_iter()
            .map(|b| match b {
                Some(c) if c == col => None,
                Some(c) if c > col => Some(c - 1),
                other => other,
            })
            .collect();
        Self { data, basis }
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rhs = self.rhs_column();
        for (i, row) in self.data.iter().enumerate() {
            let label = match i {
                0 => "z".to_string(),
                _ => match self.basis[i - 1] {
                    Some(c) => format!("x{}", c + 1),
                    None => "-".to_string(),
                },
            };
            write!(f, "{:>5} |", label)?;
            for (j, v) in row.iter().enumerate() {
                if j == rhs {
                    write!(f, " |")?;
                }
                // avoid printing -0.0000
                let v = if v.abs() < 5e-5 { 0.0 } else { *v };
                write!(f, " {:>10.4}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
