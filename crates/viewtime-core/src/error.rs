use thiserror::Error;

/// All errors produced by the viewtime pipelines.
#[derive(Error, Debug)]
pub enum ViewtimeError {
    /// The uploaded payload could not be decoded or has an unsupported shape
    /// (e.g. a ZIP archive without a JSON member, undecodable bytes).
    #[error("Unsupported or malformed payload: {0}")]
    Format(String),

    /// Parsing succeeded but produced zero usable watch events.
    #[error("No valid watch events found in the uploaded file")]
    EmptyResult,

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// The persistence gateway rejected or failed an operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The external video-metadata API returned a non-success result.
    #[error("Video API error: {0}")]
    Api(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pass-through for raw I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the viewtime crates.
pub type Result<T> = std::result::Result<T, ViewtimeError>;
