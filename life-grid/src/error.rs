use thiserror::Error;

/// Errors raised while populating a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A seed coordinate fell outside the grid.
    #[error("cell {row}, {col} is outside the {width}x{height} grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        width: u32,
        height: u32,
    },

    /// A random seeding density outside `[0, 1]`.
    #[error("invalid seed density {0}, expected a probability in [0, 1]")]
    InvalidDensity(f64),
}
