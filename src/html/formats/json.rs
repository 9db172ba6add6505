//! JSON rendering of the AST
//!
//! Debug and snapshot output only; the canonical text format is [dump](super::dump).

use crate::html::ast::Node;

pub fn to_json(nodes: &[Node]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(nodes)
}

pub fn to_json_value(nodes: &[Node]) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(nodes)
}
