//! Output formats
//!
//! - `dump`: the canonical template text, used for round trips and by rule fixes
//! - `json`: serde_json rendering of the node tree, for debugging and snapshots

pub mod dump;
pub mod json;

pub use dump::{dump, dump_attribute, dump_nodes, FormattingRules, IndentStyle};
pub use json::to_json;
