use thiserror::Error;

/// Tolerance used when checking that a stochastic row sums to one.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    #[error("row {row} sums to {sum}, expected 1")]
    Validation { row: usize, sum: f64 },

    #[error("invalid weight {weight} at ({row}, {col})")]
    NegativeWeight { row: usize, col: usize, weight: f64 },

    #[error("cell ({row}, {col}) outside a {rows}x{cols} table")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("cannot sample from an empty or all-zero distribution")]
    EmptyDistribution,

    #[error("invalid sampling weight {weight} at index {index}")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("{items} items but {weights} weights")]
    LengthMismatch { items: usize, weights: usize },

    #[error("no context ends with \"{suffix}\"")]
    NoMatchingContext { suffix: String },

    #[error("Word {word} not in text")]
    UnknownVocabulary { word: String },

    #[error("unknown state '{name}'")]
    UnknownState { name: String },

    #[error("context size must be >= 1, got {0}")]
    InvalidContextSize(usize),

    #[error("diagnostic failed: {0}")]
    Diagnostic(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
