//! Parser for the VOWL JSON schema payload.
//!
//! The payload splits every element across two arrays: `class`/`property`
//! carry ids and types, `classAttribute`/`propertyAttribute` carry labels,
//! domain/range references, cardinalities and inverse pairings. [`parse`]
//! joins the halves and elaborates them into flat [`ClassRecord`] and
//! [`PropertyRecord`] lists ready for the visualization engine.
//!
//! The parser is deliberately lenient: only a payload that is not JSON at
//! all is an error. Individually broken records are dropped with a warning
//! so a partial schema still produces a diagram.

mod error;
mod parser;

#[cfg(test)]
mod parser_tests;

pub use error::{ParseError, Result};
pub use parser::{ClassRecord, OntologyData, PropertyRecord, parse};
