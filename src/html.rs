//! Main module for twig-html library functionality

pub mod ast;
pub mod config;
pub mod fixing;
pub mod formats;
pub mod parsing;
pub mod testing;

use formats::dump::{dump_nodes, FormattingRules};
use parsing::ParseError;

/// Parse `source` and render it back in canonical form.
pub fn format_source(source: &str, rules: &FormattingRules) -> Result<String, ParseError> {
    let nodes = parsing::parse(source)?;
    Ok(dump_nodes(&nodes, 0, rules))
}
