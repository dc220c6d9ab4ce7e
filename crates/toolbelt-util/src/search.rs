//! Text search in source files.

use crate::location::SourceLocation;
use crate::{path, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Find every line of `file` containing `needle`.
///
/// Returns the matching `path:line` locations, lines counted from 1. Lines
/// that are not valid UTF-8 are matched on their lossy decoding.
pub fn find_in_file(file: impl AsRef<Path>, needle: &str) -> Result<Vec<SourceLocation>> {
    let path = path::expand_home(file);
    let reader = BufReader::new(File::open(&path)?);

    let mut found = Vec::new();
    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        if String::from_utf8_lossy(&line).contains(needle) {
            found.push(SourceLocation::new(&path, index as u32 + 1));
        }
    }
    Ok(found)
}
