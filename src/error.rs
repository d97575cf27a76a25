use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrossoverError {
    #[error("Shape Mismatch: segment lengths differ ({left} vs {right})")]
    ShapeMismatch { left: usize, right: usize },

    #[error("Invalid Rate: {0}")]
    InvalidRate(String),

    #[error("Invalid Subportions: {0}")]
    InvalidSubportions(String),
}

pub type GwResult<T> = Result<T, CrossoverError>;
