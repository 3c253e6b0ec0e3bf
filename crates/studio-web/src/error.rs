//! Error types for studio-web

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, WebError>;
