//! End-to-end entry points.

use crate::error::ReadError;
use crate::input::read_unit;
use crate::output::{JavaWriter, import_block};
use std::fmt::Display;

pub const DEFAULT_GROUP: &str = "Linear Opmode";
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Knobs for one transpilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileOptions {
    /// Group used when an OpMode decorator does not name one.
    pub default_group: String,
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            default_group: DEFAULT_GROUP.to_string(),
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// Transpile with default options. Never fails: unreadable input yields
/// the fallback text from [`fallback_output`].
pub fn transpile(source: &str) -> String {
    transpile_with(source, &TranspileOptions::default())
}

/// Like [`transpile`], with explicit options.
pub fn transpile_with(source: &str, options: &TranspileOptions) -> String {
    match try_transpile(source, options) {
        Ok(java) => java,
        Err(err) => {
            tracing::warn!(error = %err, "transpilation failed, emitting fallback");
            fallback_output(source, &err)
        }
    }
}

/// Transpile, reporting why the unit could not be read.
pub fn try_transpile(source: &str, options: &TranspileOptions) -> Result<String, ReadError> {
    let unit = read_unit(source)?;
    tracing::debug!(unit = %unit.name, "read unit");

    let mut out = import_block();
    out.push_str(&JavaWriter::emit(&unit, options));
    Ok(out)
}

/// Error comment followed by the input, verbatim, in a block comment.
///
/// The input is not escaped, so a `*/` inside it ends the comment early.
pub fn fallback_output(source: &str, error: &dyn Display) -> String {
    format!(
        "// Transpilation error: {}\n// Original source:\n/*\n{}\n*/",
        error, source
    )
}
