//! Error types for token rendering.

use thiserror::Error;

/// Result type alias for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors that can occur while loading inputs for rendering.
///
/// Scanning, resolving, rendering and checking never fail; these errors only
/// come from parsing user-supplied tokens, overrides and context files.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid token path: {0:?}")]
    InvalidToken(String),

    #[error("Invalid override {0:?}: expected key=value")]
    InvalidOverride(String),

    #[error("Invalid context: {0}")]
    InvalidContext(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
