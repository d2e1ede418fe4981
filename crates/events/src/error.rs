use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventsError {
    #[error("Failed to deserialize event payload: {0}")]
    Deserialization(#[from] serde_json::Error),
}
