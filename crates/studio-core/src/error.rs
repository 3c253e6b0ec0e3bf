//! Error types for studio-core

use thiserror::Error;

/// Main error type for studio-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("LLM API key is not configured (set OPENAI_API_KEY or LLM_API_KEY)")]
    MissingCredential,

    #[error("query is empty")]
    EmptyQuery,

    #[error("completion service error: {0}")]
    Completion(String),

    #[error("search unavailable: {0}")]
    SearchUnavailable(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for studio-core
pub type Result<T> = std::result::Result<T, Error>;
