//! Testing utilities for toolbelt.
//!
//! Assertion helpers with readable failure output, shared by the unit and
//! integration tests of every crate in the workspace.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use toolbelt_test_utils::assertions::assert_lines_equal;
//!
//! let lines = printer.format_lines(&values);
//! assert_lines_equal(&lines, &["a b", "{ x: 1 }"]);
//! ```

pub mod assertions;

pub use assertions::{
    assert_file_contains, assert_file_equals, assert_lines_equal, assert_strings_equal,
};
