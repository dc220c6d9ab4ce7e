//! Shared utilities for toolbelt.
//!
//! This crate provides the pieces the other toolbelt crates build on:
//! - Dynamically typed runtime values with strict equality
//! - Error handling patterns
//! - Logging setup with tracing
//! - Call-site lookup from the stack
//! - Home-directory expansion and JSON dumps
//! - Text search in files
//! - Case conversion, shallow slice equality and float cleanup

pub mod error;
pub mod json;
pub mod location;
pub mod log;
pub mod path;
pub mod search;
pub mod strings;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use json::{read_json, to_json_string, write_json};
pub use location::{call_site, CallSite, SourceLocation};
pub use path::{absolute, expand_home, home_dir};
pub use search::find_in_file;
pub use strings::{arrays_equal, camel_to_kebab_case, clean_number, kebab_to_camel_case};
pub use value::{format_number, Object, TypeTag, Value};
