//! Best-path search: gutter padding, endpoint selection, and backtracking.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::accumulate::{Accumulation, Accumulator};
use crate::backend::Backend;
use crate::config::{Gutter, Penalty};
use crate::direction::Direction;
use crate::grid::{CostGrid, CostGridView};
use crate::matrix::Matrix;
use crate::path::{AlignmentPath, PathStep};

/// Immutable path-search configuration. Thread-safe and copyable.
///
/// Defaults: zero penalty, zero gutter (corner-to-corner), default backend.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathFinder {
    penalty: Penalty,
    gutter: Gutter,
    backend: Backend,
}

/// Result of a best-path search: the path itself plus the cumulative-cost
/// and traceback grids aligned to the caller's index space.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Path cells in start-to-end order.
    pub path: AlignmentPath,
    /// Cumulative-cost grid, same shape as the input.
    pub costs: Matrix<f64>,
    /// Traceback grid, same shape as the input.
    pub traceback: Matrix<Direction>,
}

impl Alignment {
    /// Grid cell where the path ends.
    #[must_use]
    pub fn endpoint(&self) -> PathStep {
        *self
            .path
            .steps()
            .last()
            .expect("alignment path always holds at least the endpoint")
    }

    /// Cumulative cost at the path endpoint.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        let end = self.endpoint();
        self.costs[(end.row, end.col)]
    }
}

impl PathFinder {
    /// Create a path finder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the non-diagonal step penalty.
    #[must_use]
    pub fn with_penalty(mut self, penalty: Penalty) -> Self {
        self.penalty = penalty;
        self
    }

    /// Set the gutter tolerance fraction.
    #[must_use]
    pub fn with_gutter(mut self, gutter: Gutter) -> Self {
        self.gutter = gutter;
        self
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

    /// Return the gutter tolerance fraction.
    #[must_use]
    pub fn gutter(&self) -> Gutter {
        self.gutter
    }

    /// Return the selected backend.
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Find the minimum-cost path through a local-cost grid.
    ///
    /// The grid is embedded in a padded working grid whose border carries an
    /// infinite-cost sentinel, so paths can only enter through the seeded
    /// origin cells. With a non-zero gutter the endpoint is the cheapest
    /// cell within the tolerance windows on the last row and last column;
    /// otherwise it is the far corner. The returned cost and traceback
    /// grids have the border stripped and line up with the input indices.
    #[must_use]
    #[instrument(skip(local), fields(rows = local.rows(), cols = local.cols()))]
    pub fn find(&self, local: CostGridView<'_>) -> Alignment {
        let rows = local.rows();
        let cols = local.cols();
        let penalty = self.penalty.value();

        let mut padded = Matrix::from_elem(rows + 1, cols + 1, f64::INFINITY);
        padded[(0, 0)] = 0.0;

        // Gutter seeds: starting k cells along an edge is charged the
        // pro-rated cost of the k non-diagonal steps it skipped, hence the
        // negative penalty. With a zero gutter only the corner is seeded.
        let colgutter = self.gutter.window(cols);
        let rowgutter = self.gutter.window(rows);
        for k in 0..colgutter {
            padded[(0, k)] = -penalty * k as f64;
        }
        for k in 0..rowgutter {
            padded[(k, 0)] = -penalty * k as f64;
        }

        for r in 0..rows {
            for c in 0..cols {
                padded[(r + 1, c + 1)] = local.get(r, c);
            }
        }

        let accumulator = Accumulator::new(self.penalty).with_backend(self.backend);
        let Accumulation { costs, traceback } = accumulator.accumulate_matrix(&padded);

        // Strip the sentinel border; what remains lines up with the input.
        let costs = costs.crop_border();
        let traceback = traceback.crop_border();

        let endpoint = self.select_endpoint(&costs, rowgutter, colgutter);
        debug!(row = endpoint.row, col = endpoint.col, "selected path endpoint");
        let path = backtrack(&traceback, endpoint);

        Alignment {
            path,
            costs,
            traceback,
        }
    }

    /// Find paths through a batch of independent grids.
    ///
    /// Results are identical to calling [`find`][PathFinder::find] on each
    /// grid in order; the work is parallelized across grids with rayon.
    #[must_use]
    #[instrument(skip(self, grids), fields(n = grids.len()))]
    pub fn find_batch(&self, grids: &[CostGrid]) -> Vec<Alignment> {
        grids
            .par_iter()
            .map(|grid| self.find(grid.as_view()))
            .collect()
    }

    /// Pick the endpoint: the far corner when the gutter is zero, otherwise
    /// the cheapest cell across the last-row and last-column tolerance
    /// windows. Each window scan keeps its first minimum, and the window
    /// comparison is strict, so an exact tie between the two windows falls
    /// to the column-edge endpoint.
    fn select_endpoint(&self, costs: &Matrix<f64>, rowgutter: usize, colgutter: usize) -> PathStep {
        let rows = costs.rows();
        let cols = costs.cols();

        if self.gutter.value() == 0.0 {
            return PathStep {
                row: rows - 1,
                col: cols - 1,
            };
        }

        let mut best_col = cols - colgutter;
        for c in cols - colgutter..cols {
            if costs[(rows - 1, c)] < costs[(rows - 1, best_col)] {
                best_col = c;
            }
        }
        let mut best_row = rows - rowgutter;
        for r in rows - rowgutter..rows {
            if costs[(r, cols - 1)] < costs[(best_row, cols - 1)] {
                best_row = r;
            }
        }

        if costs[(rows - 1, best_col)] < costs[(best_row, cols - 1)] {
            PathStep {
                row: rows - 1,
                col: best_col,
            }
        } else {
            PathStep {
                row: best_row,
                col: cols - 1,
            }
        }
    }
}

/// Walk the traceback from the endpoint toward the origin, collecting cells.
/// Stops when the recorded predecessor would leave the grid; the origin cell
/// carries the diagonal terminal marker, so the walk never dereferences a
/// predecessor for it.
fn backtrack(traceback: &Matrix<Direction>, end: PathStep) -> AlignmentPath {
    let mut row = end.row;
    let mut col = end.col;
    let mut steps = vec![PathStep { row, col }];

    loop {
        match traceback[(row, col)] {
            Direction::Diagonal => {
                if row == 0 || col == 0 {
                    break;
                }
                row -= 1;
                col -= 1;
            }
            Direction::Horizontal => {
                if col == 0 {
                    break;
                }
                col -= 1;
            }
            Direction::Vertical => {
                if row == 0 {
                    break;
                }
                row -= 1;
            }
        }
        steps.push(PathStep { row, col });
    }

    steps.reverse();
    AlignmentPath::new(steps)
}
