//! Error types for order-price

use crate::expr::ExprError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// order-price errors
///
/// The calculation itself never fails. These cover the edges around it:
/// expression input, configuration files and serialization.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid order total expression: {0}")]
    Expression(#[from] ExprError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
