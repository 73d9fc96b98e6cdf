//! Configuration for the ftc-dsl CLI.
//!
//! Loads config from, in increasing precedence:
//! 1. Global: ~/.config/ftc-dsl/config.toml
//! 2. Per-project: .ftc-dsl/config.toml
//! 3. The file passed with `--config`
//!
//! Example config.toml:
//! ```toml
//! [transpile]
//! default_group = "Competition"
//! indent_width = 2
//!
//! [output]
//! extension = "java"
//! ```

use anyhow::{Context, Result, bail};
use ftc_dsl::TranspileOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "java";

/// `[transpile]` section.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TranspileConfig {
    /// Group for OpMode decorators that don't name one.
    pub default_group: Option<String>,
    /// Spaces per indentation level in the generated Java.
    pub indent_width: Option<usize>,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Extension given to the output file when none is named.
    pub extension: Option<String>,
}

/// Root configuration structure.
///
/// Fields are optional so a later layer only overrides what it sets.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FtcConfig {
    pub transpile: TranspileConfig,
    pub output: OutputConfig,
}

impl FtcConfig {
    /// Load the global, project and explicit layers for a project root.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        Self::load_layers(Self::global_config_path().as_deref(), root, explicit)
    }

    fn load_layers(global: Option<&Path>, root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global) = global {
            if let Some(layer) = Self::load_optional(global)? {
                config = config.merge(layer);
            }
        }

        let project_path = root.join(".ftc-dsl").join("config.toml");
        if let Some(layer) = Self::load_optional(&project_path)? {
            config = config.merge(layer);
        }

        // An explicitly named file must exist.
        if let Some(path) = explicit {
            config = config.merge(Self::load_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("ftc-dsl").join("config.toml"))
    }

    fn load_optional(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        Self::load_file(path).map(Some)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Values set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            transpile: TranspileConfig {
                default_group: other.transpile.default_group.or(self.transpile.default_group),
                indent_width: other.transpile.indent_width.or(self.transpile.indent_width),
            },
            output: OutputConfig {
                extension: other.output.extension.or(self.output.extension),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.transpile.indent_width == Some(0) {
            bail!("transpile.indent_width must be at least 1");
        }
        if let Some(ext) = &self.output.extension {
            if ext.is_empty() || ext.contains(['/', '\\']) {
                bail!("output.extension must be a bare extension, got {:?}", ext);
            }
        }
        Ok(())
    }

    pub fn options(&self) -> TranspileOptions {
        let mut options = TranspileOptions::default();
        if let Some(group) = &self.transpile.default_group {
            options.default_group = group.clone();
        }
        if let Some(width) = self.transpile.indent_width {
            options.indent_width = width;
        }
        options
    }

    pub fn extension(&self) -> &str {
        self.output
            .extension
            .as_deref()
            .map(|ext| ext.trim_start_matches('.'))
            .unwrap_or(DEFAULT_EXTENSION)
    }
}
