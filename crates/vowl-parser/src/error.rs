use thiserror::Error;

/// Errors produced while reading a VOWL JSON payload.
///
/// Only a payload that is not JSON at all fails the parse. Records that are
/// individually broken (dangling domain/range ids, unknown element types)
/// are skipped with a warning so a partial schema still renders.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ParseError>;
