//! Searching files for the printed form of a value.

use crate::config::PrintOptions;
use crate::inspect::inspect;
use std::path::Path;
use toolbelt_util::{find_in_file, Result, SourceLocation, Value};

/// The text [`find_value_in_file`] looks for: strings verbatim, everything
/// else as the uncolored inspector output.
pub fn search_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => inspect(other, &PrintOptions::default()),
    }
}

/// Find every line of `file` containing the printed form of `value`.
///
/// Containers too wide for one line render across several lines and so
/// never match.
pub fn find_value_in_file(file: impl AsRef<Path>, value: &Value) -> Result<Vec<SourceLocation>> {
    find_in_file(file, &search_text(value))
}
