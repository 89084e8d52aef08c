//! Error types for the diligence pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, DiligenceError>;

#[derive(Error, Debug)]
pub enum DiligenceError {

    // =============================
    // Fatal Categories
    // =============================

    /// Missing or unusable credentials; raised lazily at call time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or empty tabular data, negative numeric arguments.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing input file or benchmarks file.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The language model returned something that is not the expected JSON.
    #[error("Upstream parse error: {0}")]
    UpstreamParse(String),

    /// HTTP failure, bad status, or missing content field upstream.
    #[error("Upstream error: {0}")]
    Upstream(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiligenceError {
    /// Process exit code for the console flow, one per category.
    pub fn exit_code(&self) -> i32 {
        match self {
            DiligenceError::NotFound(_) => 2,
            DiligenceError::InvalidInput(_) => 3,
            DiligenceError::Config(_) => 4,
            DiligenceError::UpstreamParse(_) => 5,
            DiligenceError::Upstream(_) => 6,
            DiligenceError::Io(_) => 1,
        }
    }
}
