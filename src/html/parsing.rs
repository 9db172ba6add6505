//! Template parsing
//!
//!     Turns template source into a [NodeList](crate::html::ast::NodeList). The grammar is a
//!     loose HTML dialect with a subset of Twig control tags mixed in; malformed markup is
//!     accepted where it can be kept as text, and rejected with a [ParseError] otherwise.
//!
//! Structure
//!
//!     - `cursor`: byte cursor with lookahead, whitespace skipping and line recovery
//!     - `attempt`: the three-way outcome of an alternative (parsed, no match, error)
//!     - `parser`: the recursive-descent parser
//!     - `error`: fatal parse errors
//!
//! Leniency
//!
//!     A few malformed inputs are accepted rather than rejected: an unterminated quoted
//!     attribute value (it runs to end of input), a closing tag that matches no open element
//!     (kept as text) and an element still open at end of input. These are logged through
//!     `tracing` when they happen.

pub mod attempt;
pub mod cursor;
pub mod error;
pub mod parser;

pub use attempt::{Attempt, AttemptResult};
pub use error::ParseError;
pub use parser::{Parser, Stop};

use crate::html::ast::NodeList;

/// Parse a template into its node list.
pub fn parse(source: &str) -> Result<NodeList, ParseError> {
    Parser::new(source).parse_document()
}
