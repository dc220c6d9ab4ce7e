//! Console output for toolbelt.
//!
//! This crate provides:
//! - A structural pretty-printer for runtime values ([`inspect`])
//! - A printer that joins short values on one line and labels diagnostics
//! - Output destinations with scoped redirection to files
//! - Named counters and timers
//! - JSON files and value search that report in console form
//!
//! The free functions and macros write through [`Printer::global`]; tests
//! and embedders that want their own streams build a [`Printer`] over a
//! [`Console`] of their choosing.

pub mod config;
pub mod inspect;
pub mod printer;
pub mod profile;
pub mod search;
pub mod sink;
pub mod style;

pub use config::{ConsoleConfig, PrintOptions};
pub use inspect::inspect;
pub use printer::{Label, Printer};
pub use profile::{
    count, count_end, count_end_all, count_end_all_with, count_end_with, time, time_end,
    time_end_with, time_scope, Profiler, TimeScope,
};
pub use search::find_value_in_file;
pub use sink::{Console, RedirectGuard, Stream};
pub use toolbelt_util::Value;

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Print values to the global console.
pub fn print(values: &[Value]) {
    Printer::global().print(values);
}

/// Print values after a label to the global console.
pub fn print_labeled(label: &Label, values: &[Value]) {
    Printer::global().print_labeled(label, values);
}

/// Run `op` with the global console's stdout sent to `path`.
///
/// See [`Printer::redirect_to_file`].
pub fn redirect_to_file<T, E, F>(path: impl AsRef<Path>, op: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: From<toolbelt_util::Error>,
{
    Printer::global().redirect_to_file(path, op)
}

/// Write `value` as JSON to `path` and report the path on the global
/// console. See [`Printer::write_json`].
pub fn write_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
) -> toolbelt_util::Result<PathBuf> {
    Printer::global().write_json(path, value)
}

/// Print any values convertible into [`Value`].
///
/// ```rust,ignore
/// print_values!("loaded", 3, "rules from", path.display().to_string());
/// ```
#[macro_export]
macro_rules! print_values {
    ($($value:expr),* $(,)?) => {
        $crate::print(&[$($crate::Value::from($value)),*])
    };
}

/// Print values after an `Error:` label.
#[macro_export]
macro_rules! print_error {
    ($($value:expr),* $(,)?) => {
        $crate::print_labeled(&$crate::Label::Error, &[$($crate::Value::from($value)),*])
    };
}

/// Print values after a `Warning:` label.
#[macro_export]
macro_rules! print_warning {
    ($($value:expr),* $(,)?) => {
        $crate::print_labeled(&$crate::Label::Warning, &[$($crate::Value::from($value)),*])
    };
}

/// Print values after a `Success:` label.
#[macro_export]
macro_rules! print_success {
    ($($value:expr),* $(,)?) => {
        $crate::print_labeled(&$crate::Label::Success, &[$($crate::Value::from($value)),*])
    };
}
