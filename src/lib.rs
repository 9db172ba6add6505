//! # twig-html
//!
//! A parser and canonical formatter for HTML templates interleaved with Twig control tags.
//!
//! File Layout
//!
//!     The library lives under [html]: the AST, the parser, the output formats, the rule
//!     boundary used by migration fixers and the shared configuration loader. The contract
//!     is text in, AST out, and back to canonical text:
//!
//!     src/html
//!       ├── ast        Node model and traversal
//!       ├── parsing    Cursor and recursive-descent parser
//!       ├── formats    Canonical text ("dump") and JSON output
//!       ├── fixing     Check/fix boundary consumed by rule modules
//!       ├── config     Formatting configuration loading
//!       └── testing    Fixture loader and fluent AST assertions
//!
//! For testing guidelines, see the [testing module](html::testing).

pub mod html;

pub use html::ast::{Attribute, AttributeEntry, Node, NodeList};
pub use html::formats::dump::{dump, dump_nodes, FormattingRules, IndentStyle};
pub use html::format_source;
pub use html::parsing::{parse, ParseError};
