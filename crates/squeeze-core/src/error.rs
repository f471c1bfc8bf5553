/// Failures inside a compressor backend.
#[derive(Debug, thiserror::Error)]
pub enum CompressError {
    #[error("request to compression service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("compression service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed compression response: {0}")]
    MalformedResponse(String),
}

/// Anything that can go wrong between reading stdin and building a response.
///
/// Every variant is recovered by emitting a fallback response; none of them
/// reach the process exit code.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("invalid input JSON: {0}")]
    Input(#[from] serde_json::Error),

    #[error("request must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("field '{field}' must be a string, got {found}")]
    InvalidField {
        field: &'static str,
        found: &'static str,
    },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Compress(#[from] CompressError),
}
