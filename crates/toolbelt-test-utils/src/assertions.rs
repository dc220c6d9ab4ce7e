//! Custom assertion helpers for common test patterns.
//!
//! Provides macros and functions for making test assertions more readable
//! and providing better error messages.

use std::path::Path;

fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e))
}

/// Assert that a file contains specific text.
///
/// # Example
///
/// ```rust
/// use toolbelt_test_utils::assertions::assert_file_contains;
/// use std::fs;
/// use tempfile::TempDir;
///
/// let dir = TempDir::new().unwrap();
/// let path = dir.path().join("out.log");
/// fs::write(&path, "line 1\nline 2\n").unwrap();
///
/// assert_file_contains(&path, "line 2");
/// ```
pub fn assert_file_contains(path: &Path, expected: &str) {
    let content = read(path);
    assert!(
        content.contains(expected),
        "File {} does not contain expected text.\nExpected to find: {}\nActual content:\n{}",
        path.display(),
        expected,
        content
    );
}

/// Assert that a file's content equals expected text exactly.
pub fn assert_file_equals(path: &Path, expected: &str) {
    assert_strings_equal(&read(path), expected);
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_strings_equal(actual: &str, expected: &str) {
    if actual != expected {
        let diff = similar::TextDiff::from_lines(expected, actual);
        let mut output = String::new();

        for change in diff.iter_all_changes() {
            let sign = match change.tag() {
                similar::ChangeTag::Delete => "-",
                similar::ChangeTag::Insert => "+",
                similar::ChangeTag::Equal => " ",
            };
            output.push_str(&format!("{}{}", sign, change));
            if change.missing_newline() {
                output.push('\n');
            }
        }

        panic!("Strings are not equal.\nDiff:\n{}", output);
    }
}

/// Assert that formatted output lines match, diffing the joined text.
pub fn assert_lines_equal<S: AsRef<str>>(actual: &[S], expected: &[&str]) {
    let actual: Vec<&str> = actual.iter().map(AsRef::as_ref).collect();
    assert_strings_equal(&actual.join("\n"), &expected.join("\n"));
}

/// Assert that a result is Ok and extract the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Assert that a result is Err and extract the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(value) => panic!("{}: {:?}", $msg, value),
            Err(e) => e,
        }
    };
}

/// Assert that a string contains a substring (with better error messages).
#[macro_export]
macro_rules! assert_str_contains {
    ($haystack:expr, $needle:expr) => {
        if !$haystack.contains($needle) {
            panic!(
                "String does not contain expected substring.\nExpected to find: {}\nIn string:\n{}",
                $needle, $haystack
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_assert_file_contains() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.log");
        fs::write(&path, "first\nsecond\n").unwrap();

        assert_file_contains(&path, "second");
        assert_file_equals(&path, "first\nsecond\n");
    }

    #[test]
    #[should_panic(expected = "Strings are not equal")]
    fn test_assert_strings_equal_reports_diff() {
        assert_strings_equal("a\nb", "a\nc");
    }

    #[test]
    fn test_assert_lines_equal() {
        let lines = vec!["a b".to_string(), "c".to_string()];
        assert_lines_equal(&lines, &["a b", "c"]);
    }

    #[test]
    fn test_assert_ok_and_err_macros() {
        let ok: Result<i32, &str> = Ok(42);
        assert_eq!(assert_ok!(ok), 42);
        let err: Result<i32, &str> = Err("boom");
        assert_eq!(assert_err!(err), "boom");
    }

    #[test]
    fn test_assert_str_contains_macro() {
        assert_str_contains!("label: 3", "3");
    }
}
