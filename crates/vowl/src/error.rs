//! Error types for engine operations.

use std::io;

use thiserror::Error;

use vowl_parser::ParseError;

/// The main error type for engine operations.
///
/// Data-level problems never surface here: a malformed payload handed to a
/// running [`Graph`](crate::Graph) degrades to an empty diagram instead.
/// These variants cover the surrounding plumbing, such as reading a payload
/// file or writing an export.
#[derive(Debug, Error)]
pub enum VowlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("graph error: {0}")]
    Graph(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("export error: {0}")]
    Export(String),
}
