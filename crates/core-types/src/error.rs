use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Invalid range: min {min} is greater than max {max}")]
    InvertedRange { min: f64, max: f64 },
}
