//! String, slice and number helpers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static KEBAB_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new("-([a-z])").expect("valid regex"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Z]").expect("valid regex"));

/// Shallow equality: the same slice, or the same length with every element
/// pairwise equal. For [`Value`](crate::Value) elements this is strict
/// equality, so nested containers only match when they are the same instance.
pub fn arrays_equal<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// Round to 13 fractional digits to drop binary floating point noise,
/// e.g. `0.1 * 0.2` becomes `0.02`.
pub fn clean_number(n: f64) -> f64 {
    if !n.is_finite() {
        return n;
    }
    format!("{:.13}", n).parse().unwrap_or(n)
}

/// `foo-bar-baz` -> `fooBarBaz`.
pub fn kebab_to_camel_case(s: &str) -> String {
    KEBAB_SEGMENT
        .replace_all(s, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

/// `fooBarBaz` -> `foo-bar-baz`.
pub fn camel_to_kebab_case(s: &str) -> String {
    UPPERCASE
        .replace_all(s, |caps: &Captures| format!("-{}", caps[0].to_lowercase()))
        .into_owned()
}
