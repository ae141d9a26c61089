use thiserror::Error;

use crate::Point;

/// Convenient result alias for stepstar.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a graph or starting a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The weight matrix is not rectangular.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A search endpoint lies outside the grid.
    #[error("point {point} is outside the {width}x{height} grid")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },
}
