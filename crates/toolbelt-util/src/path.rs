//! Path utilities.
//!
//! This module provides home-directory expansion and absolute path
//! resolution for the file helpers.

use std::path::{Component, Path, PathBuf};

/// Environment variable holding the user's home directory.
#[cfg(windows)]
pub const HOME_ENV: &str = "USERPROFILE";
/// Environment variable holding the user's home directory.
#[cfg(not(windows))]
pub const HOME_ENV: &str = "HOME";

/// Resolve the current user's home directory.
///
/// Reads [`HOME_ENV`] first and falls back to the platform lookup.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV)
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Replace a leading `~` with the home directory.
///
/// Only `~` on its own or followed by a separator is expanded; `~user` and
/// paths without a tilde are returned unchanged, as is everything when no
/// home directory can be resolved.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match home_dir() {
            Some(home) if components.as_path().as_os_str().is_empty() => home,
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Expand `~` and make the path absolute against the current directory.
pub fn absolute(path: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let expanded = expand_home(path);
    if expanded.is_absolute() {
        Ok(normalize(&expanded))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(expanded)))
    }
}

/// Normalize a path by removing `.` and `..` components.
///
/// Unlike `canonicalize`, this doesn't require the path to exist.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::CurDir => {}
            _ => {
                result.push(component);
            }
        }
    }

    result
}
