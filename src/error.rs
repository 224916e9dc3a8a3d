//! Error types for cave generation

use thiserror::Error;

/// Errors raised by the grid and the generation pass.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CaveError {
    /// A coordinate outside `[0, width) x [0, height)` was used to index the grid.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    Bounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// The configuration cannot drive a generation pass.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, CaveError>;
