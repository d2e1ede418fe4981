use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("At least one metric weight is required to compute a composite score")]
    NoWeights,

    #[error("Weight for metric '{metric}' must be finite and non-negative, got {weight}")]
    InvalidWeight { metric: String, weight: f64 },
}
