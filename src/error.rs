use thiserror::Error;

/// Errors produced while building or interpolating rigid transforms.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InterpolationError {
    /// The matrix is neither 3x4 nor 4x4.
    #[error("expected a 3x4 or 4x4 matrix, got {rows}x{cols}")]
    Shape { rows: usize, cols: usize },

    /// The bottom-right entry of a 4x4 transform is zero or not finite.
    #[error("homogeneous scale {0} cannot be normalized")]
    DegenerateHomogeneousScale(f64),

    /// Both reference timestamps are equal.
    #[error("reference timestamps coincide at {0}")]
    DegenerateTimeInterval(f64),
}
