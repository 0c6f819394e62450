//! Error adapter for converting [`VowlError`] to miette diagnostics.
//!
//! The engine's errors carry no source spans (a payload is either JSON or
//! it is not), so the adapter only maps variants to diagnostic codes and
//! help text for miette's graphical report handler.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use vowl::VowlError;

/// Adapter wrapping a [`VowlError`] for rich CLI error formatting.
pub struct ErrorAdapter<'a>(pub &'a VowlError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            VowlError::Io(_) => "vowl::io",
            VowlError::Parse(_) => "vowl::parse",
            VowlError::Graph(_) => "vowl::graph",
            VowlError::Layout(_) => "vowl::layout",
            VowlError::Export(_) => "vowl::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            VowlError::Io(_) => "check that the input path exists and is readable",
            VowlError::Parse(_) => "the input must be a VOWL JSON payload",
            VowlError::Graph(_) | VowlError::Layout(_) => return None,
            VowlError::Export(_) => "check that the output path is writable",
        };
        Some(Box::new(help))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_reports_code() {
        let err = VowlError::Graph("boom".to_string());
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "vowl::graph");
        assert!(adapter.help().is_none());
    }
}
