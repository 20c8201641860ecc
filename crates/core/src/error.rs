//! Error module - out-of-contract inputs to the engine
//!
//! Normal gameplay failures (blocked moves, blocked spawn, a piece landing) are plain
//! `bool` returns and never show up here.

use thiserror::Error;

/// Broad class of an [`EngineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsupported order, level, or rotation index
    Configuration,
    /// A degenerate argument such as zero colours or a non-square shape
    InvalidArgument,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no known polyomino count for order {order}")]
    UnsupportedOrder { order: usize },

    #[error(
        "generation for order {order} gave up after {attempts} attempts with {found} of {target} shapes"
    )]
    GenerationExhausted {
        order: usize,
        attempts: usize,
        found: usize,
        target: usize,
    },

    #[error("rotation index {index} is outside 0..=3")]
    RotationOutOfRange { index: usize },

    #[error("level {level} is outside {min}..={max}")]
    UnsupportedLevel { level: u32, min: u32, max: u32 },

    #[error("cannot generate zero colours")]
    NoColours,

    #[error("shape rows must form a square grid, got {rows} rows with a row of {cols} cells")]
    NotSquare { rows: usize, cols: usize },

    #[error("shape has no cells")]
    EmptyShape,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::UnsupportedOrder { .. }
            | EngineError::GenerationExhausted { .. }
            | EngineError::RotationOutOfRange { .. }
            | EngineError::UnsupportedLevel { .. } => ErrorKind::Configuration,
            EngineError::NoColours | EngineError::NotSquare { .. } | EngineError::EmptyShape => {
                ErrorKind::InvalidArgument
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
