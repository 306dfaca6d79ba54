//! JSON encoder/decoder error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
