use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum KDTreeError {
    /// A point's dimension disagrees with the dimension of the index.
    #[error("Dimension inconsistent: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An axis selector was queried before it was given a non-empty candidate set.
    #[error("Axis selector has dimension zero, call set with candidates first")]
    UnsetSelector,

    /// A selector name that is reserved but not implemented.
    #[error("Axis selector {0:?} is unavailable")]
    UnsupportedSelector(String),

    /// Failure opening, reading or writing a model file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Model data that does not decode as a tree.
    #[error("Corrupt model data: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, KDTreeError>;
