use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScorecardError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScorecardError {
    #[error("Cannot add perspective: limit reached ({limit})")]
    CapacityExceeded { limit: usize },

    #[error("Perspective not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Seed error: {0}")]
    Seed(String),
}
