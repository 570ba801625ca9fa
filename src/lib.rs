//! Minimum-cost alignment paths over local-cost grids.
//!
//! Pure math library — zero I/O. Given an R×C matrix of pairwise local costs,
//! computes the dynamic-time-warping cumulative-cost grid and per-cell
//! traceback directions, then recovers the optimal alignment path by
//! backtracking. Non-diagonal steps carry a configurable penalty, and a
//! "gutter" tolerance window lets paths start and end part-way along the
//! grid edges instead of at the exact corners.

mod accumulate;
mod backend;
mod config;
mod direction;
mod error;
mod finder;
mod grid;
mod matrix;
mod path;

pub use accumulate::{Accumulation, Accumulator};
pub use backend::Backend;
pub use config::{Gutter, Penalty};
pub use direction::Direction;
pub use error::{ConfigError, InputError};
pub use finder::{Alignment, PathFinder};
pub use grid::{CostGrid, CostGridView};
pub use matrix::Matrix;
pub use path::{AlignmentPath, PathStep};
