use thiserror::Error;

/// Errors that can occur during Shirabe core operations.
#[derive(Debug, Error)]
pub enum ShirabeError {
    /// The weight artifact could not be read or does not satisfy the model
    /// contract (label table, dimensions). Fatal: decoding with a mismatched
    /// artifact would silently corrupt every prediction.
    #[error("failed to load model weights: {0}")]
    ModelLoad(String),

    /// A regex pattern failed to compile (should not happen with the static
    /// patterns defined in the heuristic parser).
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    /// The decoder was handed score matrices with inconsistent dimensions.
    #[error("decode error: {0}")]
    Decode(String),

    /// I/O failure while reading a weight artifact from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The weight artifact is not valid JSON.
    #[error("artifact deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Shirabe operations.
pub type Result<T> = std::result::Result<T, ShirabeError>;
