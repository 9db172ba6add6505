//! Fixture files for formatting tests
//!
//! A fixture lives in `tests/fixtures/<name>.twig` and holds the template input, a line with
//! exactly `-----`, and the expected canonical output. One trailing newline after the
//! expected output is ignored, so files can end in a newline as editors like.

use crate::html::ast::NodeList;
use crate::html::formats::dump::{dump_nodes, FormattingRules};
use crate::html::parsing::{parse, ParseError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SEPARATOR: &str = "-----";

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture: {0}")]
    Io(#[from] io::Error),

    #[error("fixture {0} has no '-----' separator line")]
    MissingSeparator(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub name: String,
    pub input: String,
    pub expected: String,
}

/// `tests/fixtures` of this crate
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

impl Fixture {
    /// Split fixture text into input and expected output.
    pub fn from_content(name: &str, content: &str) -> Result<Self, FixtureError> {
        let marker = format!("\n{SEPARATOR}\n");
        let (input, expected) = if let Some(rest) = content.strip_prefix(&marker[1..]) {
            ("", rest)
        } else {
            let idx = content
                .find(&marker)
                .ok_or_else(|| FixtureError::MissingSeparator(name.to_string()))?;
            (&content[..idx], &content[idx + marker.len()..])
        };
        let expected = expected.strip_suffix('\n').unwrap_or(expected);
        Ok(Self {
            name: name.to_string(),
            input: input.to_string(),
            expected: expected.to_string(),
        })
    }

    pub fn read(path: &Path) -> Result<Self, FixtureError> {
        let content = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_content(&name, &content)
    }

    /// Load `tests/fixtures/<name>.twig`, panicking if it is missing or malformed.
    pub fn load(name: &str) -> Self {
        let path = fixtures_dir().join(format!("{name}.twig"));
        Self::read(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
    }

    /// Every fixture in `tests/fixtures`, sorted by name
    pub fn all() -> Vec<Self> {
        let dir = fixtures_dir();
        let entries = fs::read_dir(&dir)
            .unwrap_or_else(|e| panic!("Failed to list {}: {}", dir.display(), e));
        let mut fixtures: Vec<Self> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "twig"))
            .map(|path| {
                Self::read(&path)
                    .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
            })
            .collect();
        fixtures.sort_by(|a, b| a.name.cmp(&b.name));
        fixtures
    }

    pub fn parse(&self) -> Result<NodeList, ParseError> {
        parse(&self.input)
    }

    /// Canonical rendering of the input
    pub fn format(&self, rules: &FormattingRules) -> Result<String, ParseError> {
        Ok(dump_nodes(&self.parse()?, 0, rules))
    }
}
