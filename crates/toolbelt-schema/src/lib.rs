//! Option-schema validation for toolbelt.
//!
//! [`Schema`] declares the allowed properties of an options object,
//! [`ill_formed_opts`] checks a candidate and reports the first problem,
//! and [`check`]/[`check_eq`] are non-panicking assertions that report the
//! same way.

pub mod check;
pub mod schema;
pub mod validate;

pub use check::{check, check_eq, check_eq_with, check_with};
pub use schema::{Rule, Schema};
pub use validate::{ill_formed_opts, ill_formed_opts_with, Violation, OPTIONS_PROPERTY};
