//! Rule boundary
//!
//!     Migration rules live outside this crate. Each one implements [Fixer]: a read-only
//!     `check` that reports [Finding]s, and a `fix` that rewrites the tree in place. Rules find
//!     their targets with [traverse](crate::html::ast::traverse) (or
//!     [visit_elements](crate::html::ast::visit_elements) when checking) and replace tags,
//!     attribute lists and child lists directly.
//!
//!     The string helpers run one rule over template source and are what rule tests use.

use crate::html::ast::{Node, NodeList};
use crate::html::formats::dump::{dump_nodes, FormattingRules};
use crate::html::parsing::{parse, ParseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// One problem reported by a rule's check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub message: String,
    pub severity: Severity,
    /// Stable rule identifier, usually the deprecated tag name
    pub identifier: String,
    pub line: usize,
}

impl Finding {
    pub fn error(identifier: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            identifier: identifier.into(),
            line,
        }
    }

    pub fn warning(identifier: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
            identifier: identifier.into(),
            line,
        }
    }
}

#[derive(Debug, Error)]
pub enum FixError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{identifier}: {message}")]
    Rule { identifier: String, message: String },
}

pub trait Fixer {
    fn check(&self, nodes: &[Node]) -> Vec<Finding>;

    fn fix(&self, nodes: &mut NodeList) -> Result<(), FixError>;
}

/// Parse `source`, apply `fixer` and render the result.
pub fn run_fixer_on_string<F>(
    fixer: &F,
    source: &str,
    rules: &FormattingRules,
) -> Result<String, FixError>
where
    F: Fixer + ?Sized,
{
    let mut nodes = parse(source)?;
    fixer.fix(&mut nodes)?;
    Ok(dump_nodes(&nodes, 0, rules))
}

/// Parse `source` and collect `fixer`'s findings.
pub fn run_checker_on_string<F>(fixer: &F, source: &str) -> Result<Vec<Finding>, ParseError>
where
    F: Fixer + ?Sized,
{
    let nodes = parse(source)?;
    Ok(fixer.check(&nodes))
}

/// Findings of every fixer, in fixer order.
pub fn check_all(fixers: &[&dyn Fixer], nodes: &[Node]) -> Vec<Finding> {
    fixers
        .iter()
        .flat_map(|fixer| {
            let findings = fixer.check(nodes);
            debug!(findings = findings.len(), "ran check");
            findings
        })
        .collect()
}

/// Apply every fixer in order, stopping at the first failure.
pub fn fix_all(fixers: &[&dyn Fixer], nodes: &mut NodeList) -> Result<(), FixError> {
    for fixer in fixers {
        fixer.fix(nodes)?;
    }
    Ok(())
}
