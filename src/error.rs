use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanriError>;

#[derive(Debug, Error)]
pub enum KanriError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Invalid column ID format: {0}")]
    InvalidColumnId(String),

    #[error("Invalid card ID format: {0}")]
    InvalidCardId(String),

    #[error("Index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Board invariant violated: {0}")]
    InvariantViolation(String),
}
