//! Formatting configuration
//!
//! Settings resolve in three layers, later ones winning:
//!
//! 1. `defaults/twig-html.default.toml`, compiled into the library (four-space indent)
//! 2. the project's `.twig-html.toml` next to the templates, see [Loader::with_project_dir],
//!    or any explicit TOML file
//! 3. single-key overrides such as `formatting.indent_style = "tab"` from a caller's flags
//!
//! The result is a [TwigHtmlConfig]; the serializer only ever sees the [FormattingRules]
//! derived from it, passed explicitly.

use crate::html::formats::dump::{FormattingRules, IndentStyle};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../../defaults/twig-html.default.toml");

/// File name of the per-project configuration
pub const PROJECT_FILE: &str = ".twig-html.toml";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TwigHtmlConfig {
    pub formatting: FormattingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    pub indent_style: IndentStyle,
    pub indent_size: usize,
}

impl From<&FormattingConfig> for FormattingRules {
    fn from(config: &FormattingConfig) -> Self {
        match config.indent_style {
            IndentStyle::Spaces => FormattingRules::spaces(config.indent_size),
            IndentStyle::Tab => FormattingRules::tabs(),
        }
    }
}

impl TwigHtmlConfig {
    pub fn formatting_rules(&self) -> FormattingRules {
        FormattingRules::from(&self.formatting)
    }
}

/// Builds a [TwigHtmlConfig] from the embedded defaults plus project files and overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded formatting defaults.
    pub fn new() -> Self {
        Self {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    /// Layer an explicit TOML file; a missing file fails at [Loader::build].
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a TOML file only when it exists.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Layer `dir/.twig-html.toml` when the project has one.
    pub fn with_project_dir(self, dir: impl AsRef<Path>) -> Self {
        self.layer(&dir.as_ref().join(PROJECT_FILE), false)
    }

    /// Override one dotted key, e.g. `formatting.indent_size`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<TwigHtmlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<TwigHtmlConfig, ConfigError> {
    Loader::new().build()
}

/// Defaults with the project's `.twig-html.toml` applied, if `dir` has one.
pub fn load_for_project(dir: impl AsRef<Path>) -> Result<TwigHtmlConfig, ConfigError> {
    Loader::new().with_project_dir(dir).build()
}
