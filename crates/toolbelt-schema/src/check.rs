//! Boolean assertions that report instead of panicking.

use crate::validate::report;
use toolbelt_console::{inspect, Printer};
use toolbelt_util::{SourceLocation, Value};
use tracing::debug;

/// Returns `condition`. When it is false an `Error:` diagnostic with
/// `message` and the caller's location goes to the global console.
#[track_caller]
pub fn check(condition: bool, message: &str) -> bool {
    check_with(Printer::global(), condition, message)
}

/// [`check`] writing through `printer`.
#[track_caller]
pub fn check_with(printer: &Printer, condition: bool, message: &str) -> bool {
    if !condition {
        let location = SourceLocation::caller();
        debug!(message, %location, "Check failed");
        report(printer, &[Value::from(message)], &location);
    }
    condition
}

/// Whether `actual` strictly equals `expected`. On mismatch both are
/// printed with the caller's location.
#[track_caller]
pub fn check_eq(actual: &Value, expected: &Value, what: &str) -> bool {
    check_eq_with(Printer::global(), actual, expected, what)
}

/// [`check_eq`] writing through `printer`.
#[track_caller]
pub fn check_eq_with(printer: &Printer, actual: &Value, expected: &Value, what: &str) -> bool {
    if actual == expected {
        return true;
    }
    let location = SourceLocation::caller();
    debug!(what, %location, "Equality check failed");
    let options = printer.options();
    report(
        printer,
        &[
            Value::from(format!("{} mismatch: expected", what)),
            Value::from(inspect(expected, options)),
            Value::from("got"),
            Value::from(inspect(actual, options)),
        ],
        &location,
    );
    false
}
