//! Error definitions for preprocessing
use thiserror::Error;
pub type Result<T> = std::result::Result<T, PreprocessingError>;

#[derive(Error, Debug, Clone)]
pub enum PreprocessingError {
    #[error("scaler has not been fitted")]
    NotFitted,
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error("column {column} is constant and cannot be scaled")]
    ConstantColumn { column: usize },
    #[error("spread of column {column} is not finite")]
    NonFiniteSpread { column: usize },
    #[error("expected {expected} columns, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("minimum value for MinMax scaler cannot be greater than or equal to the maximum")]
    FlippedFeatureRange,
    #[error("feature range bounds and their distance have to be finite")]
    InvalidFeatureRange,
}

impl From<tabscale::Error> for PreprocessingError {
    fn from(err: tabscale::Error) -> Self {
        match err {
            tabscale::Error::NotEnoughSamples => PreprocessingError::NotEnoughSamples,
        }
    }
}
