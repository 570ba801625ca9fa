//! Local-cost grid types with validation guarantees.

use crate::error::InputError;

/// Owned, validated local-cost grid. Guaranteed non-empty with all finite
/// values, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CostGrid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostGrid {
    /// Create a new grid from row-major data, validating the shape and that
    /// every value is finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`InputError::EmptyGrid`] | `rows` or `cols` is zero |
    /// | [`InputError::ShapeMismatch`] | `data.len() != rows * cols` |
    /// | [`InputError::NonFiniteCost`] | Any value is NaN or infinite |
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, InputError> {
        if rows == 0 || cols == 0 {
            return Err(InputError::EmptyGrid);
        }
        if data.len() != rows * cols {
            return Err(InputError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(InputError::NonFiniteCost {
                row: pos / cols,
                col: pos % cols,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a new grid from nested row vectors.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CostGrid::new`]; ragged rows surface as
    /// [`InputError::ShapeMismatch`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, InputError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(InputError::EmptyGrid);
        }
        let data: Vec<f64> = rows.into_iter().flatten().collect();
        Self::new(n_rows, n_cols, data)
    }

    /// Borrow this grid as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> CostGridView<'_> {
        CostGridView {
            rows: self.rows,
            cols: self.cols,
            data: &self.data,
        }
    }

    /// Return the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Consume and return the row-major data.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }
}

/// Borrowed, validated view into a local-cost grid. Zero-copy reference.
#[derive(Debug, Clone, Copy)]
pub struct CostGridView<'a> {
    rows: usize,
    cols: usize,
    data: &'a [f64],
}

impl<'a> CostGridView<'a> {
    /// Create a new view over row-major data, validating the shape and that
    /// every value is finite.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CostGrid::new`].
    pub fn new(rows: usize, cols: usize, data: &'a [f64]) -> Result<Self, InputError> {
        if rows == 0 || cols == 0 {
            return Err(InputError::EmptyGrid);
        }
        if data.len() != rows * cols {
            return Err(InputError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(InputError::NonFiniteCost {
                row: pos / cols,
                col: pos % cols,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Return the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Return the local cost at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            col < self.cols,
            "column index {col} out of bounds for grid with {} columns",
            self.cols
        );
        self.data[row * self.cols + col]
    }

    /// Return the underlying row-major slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(
            CostGrid::new(0, 3, vec![]),
            Err(InputError::EmptyGrid)
        ));
        assert!(matches!(
            CostGrid::from_rows(vec![]),
            Err(InputError::EmptyGrid)
        ));
        assert!(matches!(
            CostGrid::from_rows(vec![vec![]]),
            Err(InputError::EmptyGrid)
        ));
    }

    #[test]
    fn rejects_shape_mismatch() {
        let result = CostGrid::new(2, 2, vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            result,
            Err(InputError::ShapeMismatch {
                rows: 2,
                cols: 2,
                len: 3
            })
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = CostGrid::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(InputError::ShapeMismatch { .. })));
    }

    #[test]
    fn rejects_nan_with_position() {
        let result = CostGrid::new(2, 2, vec![1.0, 2.0, f64::NAN, 4.0]);
        assert!(matches!(
            result,
            Err(InputError::NonFiniteCost { row: 1, col: 0 })
        ));
    }

    #[test]
    fn rejects_infinity() {
        let result = CostGrid::new(1, 2, vec![1.0, f64::INFINITY]);
        assert!(matches!(
            result,
            Err(InputError::NonFiniteCost { row: 0, col: 1 })
        ));
    }

    #[test]
    fn accepts_valid_grid() {
        let grid = CostGrid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.as_view().get(1, 0), 3.0);
    }

    #[test]
    fn view_validates_like_owned() {
        assert!(CostGridView::new(1, 1, &[]).is_err());
        assert!(CostGridView::new(1, 2, &[1.0, f64::NAN]).is_err());
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = CostGridView::new(2, 3, &data).unwrap();
        assert_eq!(view.get(1, 2), 6.0);
    }

    #[test]
    fn as_view_roundtrip() {
        let grid = CostGrid::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(grid.as_view().as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(grid.into_inner(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "column index")]
    fn view_get_panics_out_of_bounds() {
        let data = [1.0, 2.0];
        let view = CostGridView::new(1, 2, &data).unwrap();
        let _ = view.get(0, 2);
    }
}
