use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatrixProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: String, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,

    #[error("Unexpected response shape: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Missing environment variable {0}")]
    MissingApiKey(&'static str),
}

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Some addresses could not be geocoded: {}", .addresses.join("; "))]
    Unresolved { addresses: Vec<String> },

    #[error(transparent)]
    Provider(#[from] MatrixProviderError),
}
