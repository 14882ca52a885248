use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to decode profile JSON: {0}")]
    Decode(serde_json::Error),

    #[error("invalid profile payload: expected a JSON object, got {0}")]
    UnexpectedType(&'static str),

    #[error("profile analysis failed: {0}")]
    Internal(String),
}
