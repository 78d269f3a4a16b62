use thiserror::Error;

// MAZE ERROR
// ================================================================================================

/// Errors returned by the public maze operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Both grid dimensions must be at least one cell.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// The requested rank does not fall in `[0, count)` for the grid.
    #[error("maze index is out of range for the grid")]
    IndexOutOfRange,
}
