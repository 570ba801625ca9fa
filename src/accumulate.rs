//! Cumulative-cost accumulation over a local-cost grid.

use tracing::instrument;

use crate::backend::Backend;
use crate::config::Penalty;
use crate::direction::Direction;
use crate::grid::CostGridView;
use crate::matrix::Matrix;

/// Immutable accumulation configuration. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    penalty: Penalty,
    backend: Backend,
}

/// Output of one accumulation pass: the cumulative-cost grid and the
/// traceback grid, always the same shape as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulation {
    /// `costs[(r, c)]` is the minimum total cost of any admissible path
    /// from the origin to `(r, c)`.
    pub costs: Matrix<f64>,
    /// Per-cell direction the cheapest path arrived from.
    pub traceback: Matrix<Direction>,
}

impl Accumulator {
    /// Create an accumulator with the default backend.
    #[must_use]
    pub fn new(penalty: Penalty) -> Self {
        Self {
            penalty,
            backend: Backend::default(),
        }
    }

    /// Select the accumulation backend.
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Return the non-diagonal step penalty.
    #[must_use]
    pub fn penalty(&self) -> Penalty {
        self.penalty
    }

    /// Return the selected backend.
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Compute the cumulative-cost and traceback grids for a local-cost grid.
    ///
    /// The recurrence: `costs[(0, 0)] = local[(0, 0)]`; the first row and
    /// column accumulate from their single reachable neighbor with the
    /// penalty added; every interior cell takes the cheapest of its
    /// diagonal, penalized-horizontal, and penalized-vertical predecessors
    /// plus its own local cost. Ties prefer diagonal over horizontal over
    /// vertical.
    #[must_use]
    #[instrument(skip(costs), fields(rows = costs.rows(), cols = costs.cols()))]
    pub fn accumulate(&self, costs: CostGridView<'_>) -> Accumulation {
        self.accumulate_raw(costs.rows(), costs.cols(), costs.as_slice())
    }

    /// Accumulate over an unvalidated working matrix. The path finder uses
    /// this for its padded grid, which deliberately contains infinite
    /// sentinel costs and negative gutter seeds.
    pub(crate) fn accumulate_matrix(&self, grid: &Matrix<f64>) -> Accumulation {
        self.accumulate_raw(grid.rows(), grid.cols(), grid.as_slice())
    }

    fn accumulate_raw(&self, rows: usize, cols: usize, local: &[f64]) -> Accumulation {
        match self.backend {
            Backend::Reference => reference_kernel(rows, cols, local, self.penalty.value()),
            Backend::Flat => flat_kernel(rows, cols, local, self.penalty.value()),
        }
    }
}

/// Reference kernel: seed the first row and column as running cumulative
/// sums, then fill the interior row by row with three named candidates.
fn reference_kernel(rows: usize, cols: usize, local: &[f64], penalty: f64) -> Accumulation {
    let mut costs = Matrix::from_elem(rows, cols, 0.0_f64);
    let mut traceback = Matrix::from_elem(rows, cols, Direction::Diagonal);

    costs[(0, 0)] = local[0];
    // first row: reachable only from the left
    for c in 1..cols {
        costs[(0, c)] = costs[(0, c - 1)] + penalty + local[c];
        traceback[(0, c)] = Direction::Horizontal;
    }
    // first column: reachable only from above
    for r in 1..rows {
        costs[(r, 0)] = costs[(r - 1, 0)] + penalty + local[r * cols];
        traceback[(r, 0)] = Direction::Vertical;
    }

    for r in 1..rows {
        for c in 1..cols {
            let diagonal = costs[(r - 1, c - 1)];
            let horizontal = costs[(r, c - 1)] + penalty;
            let vertical = costs[(r - 1, c)] + penalty;

            // Ordered comparison: ties keep the earlier candidate, so
            // diagonal beats horizontal beats vertical.
            let mut best = diagonal;
            let mut dir = Direction::Diagonal;
            if horizontal < best {
                best = horizontal;
                dir = Direction::Horizontal;
            }
            if vertical < best {
                best = vertical;
                dir = Direction::Vertical;
            }

            costs[(r, c)] = best + local[r * cols + c];
            traceback[(r, c)] = dir;
        }
    }

    Accumulation { costs, traceback }
}

/// Flat kernel: one uniform pass over a flat buffer. Out-of-range
/// predecessors read as infinite cost, so the border cells fall out of the
/// same candidate comparison as the interior. The candidate arithmetic and
/// ordering match the reference kernel exactly, so the two backends agree
/// bit for bit.
fn flat_kernel(rows: usize, cols: usize, local: &[f64], penalty: f64) -> Accumulation {
    let mut costs = vec![0.0_f64; rows * cols];
    let mut dirs = vec![Direction::Diagonal; rows * cols];

    for r in 0..rows {
        let base = r * cols;
        for c in 0..cols {
            let idx = base + c;
            if r == 0 && c == 0 {
                costs[idx] = local[idx];
                continue;
            }

            let diagonal = if r > 0 && c > 0 {
                costs[idx - cols - 1]
            } else {
                f64::INFINITY
            };
            let horizontal = if c > 0 {
                costs[idx - 1] + penalty
            } else {
                f64::INFINITY
            };
            let vertical = if r > 0 {
                costs[idx - cols] + penalty
            } else {
                f64::INFINITY
            };

            let mut best = diagonal;
            let mut dir = Direction::Diagonal;
            if horizontal < best {
                best = horizontal;
                dir = Direction::Horizontal;
            }
            if vertical < best {
                best = vertical;
                dir = Direction::Vertical;
            }

            costs[idx] = best + local[idx];
            dirs[idx] = dir;
        }
    }

    Accumulation {
        costs: Matrix::from_raw(rows, cols, costs),
        traceback: Matrix::from_raw(rows, cols, dirs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CostGrid;

    fn grid(rows: Vec<Vec<f64>>) -> CostGrid {
        CostGrid::from_rows(rows).expect("valid test grid")
    }

    fn accumulate(rows: Vec<Vec<f64>>, penalty: f64, backend: Backend) -> Accumulation {
        let grid = grid(rows);
        Accumulator::new(Penalty::new(penalty).unwrap())
            .with_backend(backend)
            .accumulate(grid.as_view())
    }

    #[test]
    fn single_cell_is_base_case() {
        let result = accumulate(vec![vec![3.5]], 1.0, Backend::Flat);
        assert_eq!(result.costs.as_slice(), &[3.5]);
        assert_eq!(result.traceback[(0, 0)], Direction::Diagonal);
    }

    #[test]
    fn unit_square_prefers_diagonal_on_tie() {
        // D = [[1, 2], [2, 2]]; the interior tie resolves to diagonal.
        let result = accumulate(vec![vec![1.0, 1.0], vec![1.0, 1.0]], 0.0, Backend::Flat);
        assert_eq!(result.costs.as_slice(), &[1.0, 2.0, 2.0, 2.0]);
        assert_eq!(result.traceback[(0, 0)], Direction::Diagonal);
        assert_eq!(result.traceback[(0, 1)], Direction::Horizontal);
        assert_eq!(result.traceback[(1, 0)], Direction::Vertical);
        assert_eq!(result.traceback[(1, 1)], Direction::Diagonal);
    }

    #[test]
    fn unit_square_with_penalty() {
        // D[0,1] = 1 + 0.5 + 1 = 2.5, D[1,0] likewise,
        // D[1,1] = min(1, 2.5 + 0.5, 2.5 + 0.5) + 1 = 2.
        let result = accumulate(vec![vec![1.0, 1.0], vec![1.0, 1.0]], 0.5, Backend::Flat);
        let expected = [1.0, 2.5, 2.5, 2.0];
        for (got, exp) in result.costs.as_slice().iter().zip(expected.iter()) {
            assert!((got - exp).abs() < 1e-10, "got {got}, expected {exp}");
        }
        assert_eq!(result.traceback[(1, 1)], Direction::Diagonal);
    }

    #[test]
    fn first_row_and_column_accumulate_with_penalty() {
        let result = accumulate(
            vec![
                vec![0.1, 0.2, 0.3],
                vec![0.4, 0.0, 0.0],
                vec![0.5, 0.0, 0.0],
            ],
            1.0,
            Backend::Flat,
        );
        assert!((result.costs[(0, 1)] - 1.3).abs() < 1e-10);
        assert!((result.costs[(0, 2)] - 2.6).abs() < 1e-10);
        assert!((result.costs[(1, 0)] - 1.5).abs() < 1e-10);
        assert!((result.costs[(2, 0)] - 3.0).abs() < 1e-10);
        assert_eq!(result.traceback[(0, 2)], Direction::Horizontal);
        assert_eq!(result.traceback[(2, 0)], Direction::Vertical);
    }

    #[test]
    fn tie_between_horizontal_and_vertical_prefers_horizontal() {
        // At (2, 2) the diagonal predecessor costs 5 while both non-diagonal
        // predecessors cost 0, so the tie is between horizontal and vertical.
        let result = accumulate(
            vec![
                vec![0.0, 0.0, 0.0],
                vec![0.0, 5.0, 0.0],
                vec![0.0, 0.0, 0.0],
            ],
            0.0,
            Backend::Flat,
        );
        assert_eq!(result.traceback[(2, 2)], Direction::Horizontal);
    }

    #[test]
    fn costs_never_drop_below_local_cost() {
        let rows = vec![
            vec![0.3, 1.2, 0.7, 0.1],
            vec![0.9, 0.4, 2.0, 0.6],
            vec![0.2, 1.5, 0.8, 0.5],
        ];
        let result = accumulate(rows.clone(), 0.25, Backend::Flat);
        for (r, row) in rows.iter().enumerate() {
            for (c, &local) in row.iter().enumerate() {
                assert!(
                    result.costs[(r, c)] >= local - 1e-12,
                    "D[{r},{c}] = {} < local {local}",
                    result.costs[(r, c)]
                );
            }
        }
    }

    #[test]
    fn backends_agree_on_small_grid() {
        let rows = vec![vec![0.5, 0.3, 0.8], vec![0.2, 0.1, 0.4], vec![0.7, 0.6, 0.2]];
        let reference = accumulate(rows.clone(), 0.2, Backend::Reference);
        let flat = accumulate(rows, 0.2, Backend::Flat);
        assert_eq!(reference, flat);
    }

    #[test]
    fn accessors_report_configuration() {
        let accumulator =
            Accumulator::new(Penalty::new(0.7).unwrap()).with_backend(Backend::Reference);
        assert_eq!(accumulator.penalty().value(), 0.7);
        assert_eq!(accumulator.backend(), Backend::Reference);
    }
}
