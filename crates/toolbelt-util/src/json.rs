//! JSON dumps.
//!
//! Values are written tab-indented. [`Value`](crate::Value) patterns are
//! written as their source text since JSON has no pattern type.

use crate::path;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Serialize `value` to tab-indented JSON.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `value` as JSON to `path` (after `~` expansion).
///
/// Parent directories are created. Returns the absolute path written.
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<PathBuf> {
    let target = path::absolute(path)?;
    let content = to_json_string(value)?;

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, content)?;

    info!(path = %target.display(), "Wrote JSON");
    Ok(target)
}

/// Read a JSON file (after `~` expansion).
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let target = path::expand_home(path);
    debug!(path = %target.display(), "Reading JSON");
    let content = std::fs::read_to_string(&target)?;
    Ok(serde_json::from_str(&content)?)
}
