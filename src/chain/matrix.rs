use crate::error::{ModelError, ROW_SUM_TOLERANCE, Result};

/// An immutable row-stochastic table of non-negative weights.
///
/// Rows are indexed by source state, columns by destination (or emitted
/// observation). Every row sums to one within [`ROW_SUM_TOLERANCE`]; the
/// check runs once in [`StochasticMatrix::from_entries`] and the table is
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct StochasticMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl StochasticMatrix {
    /// Builds a `rows x cols` table from `(row, col, weight)` entries.
    ///
    /// Cells start at zero. A repeated `(row, col)` overwrites the earlier
    /// weight rather than adding to it.
    pub fn from_entries<I>(rows: usize, cols: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut cells = vec![0.0; rows * cols];
        for (row, col, weight) in entries {
            if row >= rows || col >= cols {
                return Err(ModelError::CellOutOfRange {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(ModelError::NegativeWeight { row, col, weight });
            }
            cells[row * cols + col] = weight;
        }

        let matrix = Self { rows, cols, cells };
        matrix.validate()?;
        Ok(matrix)
    }

    fn validate(&self) -> Result<()> {
        for row in 0..self.rows {
            let sum: f64 = self.row(row).iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(ModelError::Validation { row, sum });
            }
        }
        Ok(())
    }

    pub fn is_row_stochastic(&self) -> bool {
        self.validate().is_ok()
    }

    /// The weight vector of `index`, suitable for sampling.
    pub fn row(&self, index: usize) -> &[f64] {
        &self.cells[index * self.cols..(index + 1) * self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major copy of the table, one `Vec` per row.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_reads_rows() {
        let m = StochasticMatrix::from_entries(
            2,
            2,
            vec![(0, 0, 0.5), (0, 1, 0.5), (1, 0, 0.4), (1, 1, 0.6)],
        )
        .unwrap();
        assert_eq!(m.row(0), &[0.5, 0.5]);
        assert_eq!(m.row(1), &[0.4, 0.6]);
        assert_eq!(m.get(1, 1), 0.6);
        assert!(m.is_row_stochastic());
    }

    #[test]
    fn rejects_row_not_summing_to_one() {
        let err = StochasticMatrix::from_entries(2, 2, vec![(0, 0, 1.0), (1, 0, 0.3), (1, 1, 0.3)])
            .unwrap_err();
        assert!(matches!(err, ModelError::Validation { row: 1, .. }));
    }

    #[test]
    fn empty_row_fails_validation() {
        let err = StochasticMatrix::from_entries(2, 2, vec![(0, 1, 1.0)]).unwrap_err();
        assert_eq!(err, ModelError::Validation { row: 1, sum: 0.0 });
    }

    #[test]
    fn later_entries_overwrite() {
        let m = StochasticMatrix::from_entries(1, 2, vec![(0, 0, 0.9), (0, 0, 0.5), (0, 1, 0.5)])
            .unwrap();
        assert_eq!(m.row(0), &[0.5, 0.5]);
    }

    #[test]
    fn tolerates_floating_point_rounding() {
        // 0.1 + 0.2 + 0.7 != 1.0 exactly in binary floating point
        let m = StochasticMatrix::from_entries(1, 3, vec![(0, 0, 0.1), (0, 1, 0.2), (0, 2, 0.7)]);
        assert!(m.is_ok());
    }

    #[test]
    fn rejects_negative_weight() {
        let err = StochasticMatrix::from_entries(1, 2, vec![(0, 0, 1.5), (0, 1, -0.5)]).unwrap_err();
        assert_eq!(
            err,
            ModelError::NegativeWeight { row: 0, col: 1, weight: -0.5 }
        );
    }

    #[test]
    fn rejects_cell_outside_table() {
        let err = StochasticMatrix::from_entries(1, 1, vec![(0, 0, 1.0), (3, 0, 0.0)]).unwrap_err();
        assert_eq!(
            err,
            ModelError::CellOutOfRange { row: 3, col: 0, rows: 1, cols: 1 }
        );
        let err = StochasticMatrix::from_entries(2, 2, vec![(0, 2, 1.0)]).unwrap_err();
        assert!(matches!(err, ModelError::CellOutOfRange { col: 2, .. }));
    }

    #[test]
    fn rectangular_emission_table() {
        let m = StochasticMatrix::from_entries(
            2,
            3,
            vec![
                (0, 0, 0.5),
                (0, 1, 0.4),
                (0, 2, 0.1),
                (1, 0, 0.2),
                (1, 1, 0.4),
                (1, 2, 0.4),
            ],
        )
        .unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        for row in m.to_rows() {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }
}
