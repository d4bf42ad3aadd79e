//! Configuration-time errors.

use thiserror::Error;

use crate::view::ViewBounds;

#[derive(Debug, Error)]
pub enum Error {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("iteration cutoff must be at least 1")]
    InvalidMaxIter,

    #[error("view bounds must be finite with min < max on both axes, got {0:?}")]
    InvalidBounds(ViewBounds),

    #[error("unknown instruction set `{0}`, expected reference, vector4 or vector16")]
    UnknownInstructionSet(String),

    #[error("unknown palette `{0}`, expected polynomial or banded")]
    UnknownPalette(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
