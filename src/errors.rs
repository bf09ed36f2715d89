use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

// Failures that can surface from a render. Data lookups never produce one of these:
// missing keys, partials and dotted paths all degrade to "".
#[derive(Debug, Error)]
pub enum RenderError {
    // A rendering unit broke its contract (its code failed internally)
    #[error("render error: {0}")]
    Code(String),

    // A program tree or partial argument could not be used as given
    #[error("program error: {0}")]
    Program(String),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for results that use `RenderError` as the error type
pub type Result<T> = std::result::Result<T, RenderError>;
