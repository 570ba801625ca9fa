//! Error types for input validation and path-finder configuration.

/// Errors from local-cost grid and gutter validation.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Returned when a grid has zero rows or zero columns.
    #[error("local-cost grid must have at least one row and one column")]
    EmptyGrid,

    /// Returned when the flat data length disagrees with the declared shape.
    #[error("data length {len} does not match a {rows}x{cols} grid")]
    ShapeMismatch {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
        /// Actual number of elements supplied.
        len: usize,
    },

    /// Returned when a grid contains NaN, infinity, or negative infinity.
    #[error("local-cost grid contains non-finite value at ({row}, {col})")]
    NonFiniteCost {
        /// Row of the first non-finite value found.
        row: usize,
        /// Column of the first non-finite value found.
        col: usize,
    },

    /// Returned when a gutter fraction lies outside `[0, 1]`.
    #[error("gutter must lie within [0, 1], got {gutter}")]
    GutterOutOfRange {
        /// The rejected value.
        gutter: f64,
    },
}

/// Errors from path-finder configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Returned when a step penalty is negative or non-finite.
    #[error("penalty must be finite and non-negative, got {penalty}")]
    InvalidPenalty {
        /// The rejected value.
        penalty: f64,
    },
}
