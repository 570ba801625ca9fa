//! Validated scalar configuration: step penalty and gutter fraction.

use crate::error::{ConfigError, InputError};

/// Additional cost charged for every non-diagonal step.
///
/// Validated at construction: finite and non-negative. A negative penalty
/// would reward insertions and deletions, which has no defined semantics
/// here, so it is rejected rather than silently computed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Penalty(f64);

impl Penalty {
    /// Zero penalty: non-diagonal steps cost only their local cost.
    pub const ZERO: Self = Self(0.0);

    /// Create a new penalty.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ConfigError::InvalidPenalty`] | `value` is negative, NaN, or infinite |
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidPenalty { penalty: value });
        }
        Ok(Self(value))
    }

    /// Return the raw penalty value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Fraction of an edge's length within which a path may start or end,
/// instead of requiring the exact corner.
///
/// Validated at construction: must lie within `[0, 1]`. Out-of-range values
/// are rejected, not clamped. Zero degenerates to the classic fixed-corner
/// alignment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gutter(f64);

impl Gutter {
    /// No tolerance: the path must span corner to corner.
    pub const ZERO: Self = Self(0.0);

    /// Create a new gutter fraction.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`InputError::GutterOutOfRange`] | `value` is NaN or outside `[0, 1]` |
    pub fn new(value: f64) -> Result<Self, InputError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(InputError::GutterOutOfRange { gutter: value });
        }
        Ok(Self(value))
    }

    /// Return the raw gutter fraction.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Number of cells the tolerance window spans along an edge of
    /// `edge_len` cells: `max(1, round(gutter * edge_len))`, rounding
    /// ties to even. Always at least one cell, so a zero gutter still
    /// seeds the single corner cell.
    #[must_use]
    pub fn window(self, edge_len: usize) -> usize {
        (self.0 * edge_len as f64).round_ties_even().max(1.0) as usize
    }
}
