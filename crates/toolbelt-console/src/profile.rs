//! Named counters and timers.
//!
//! [`Profiler`] holds the tables and returns plain data. The free functions
//! ([`count`], [`time_end`], ...) work on a process-wide profiler and print
//! their results through [`Printer::global`]; the `*_with` variants take the
//! printer and profiler explicitly.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolbelt_console::profile;
//!
//! for n in 0..100 {
//!     profile::count(if n % 2 == 0 { "even" } else { "odd" });
//! }
//! profile::count_end_all(); // even: 50, odd: 50
//!
//! profile::time("load");
//! load_everything();
//! profile::time_end("load")?; // load: 12.345ms
//! ```

use crate::printer::Printer;
use crate::sink::Stream;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use toolbelt_util::{Error, Result};
use tracing::{debug, warn};

static GLOBAL: Lazy<Mutex<Profiler>> = Lazy::new(|| Mutex::new(Profiler::new()));

/// Counter and timer tables.
#[derive(Debug, Default)]
pub struct Profiler {
    /// In order of first increment.
    counters: Vec<(String, u64)>,
    timers: HashMap<String, Instant>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment `label`, creating it at 1. Returns the new value.
    pub fn count(&mut self, label: &str) -> u64 {
        match self.counters.iter_mut().find(|(l, _)| l == label) {
            Some((_, value)) => {
                *value += 1;
                *value
            }
            None => {
                self.counters.push((label.to_string(), 1));
                1
            }
        }
    }

    /// Current value of `label`; zero when absent.
    pub fn counter(&self, label: &str) -> u64 {
        self.counters
            .iter()
            .find_map(|(l, v)| (l == label).then_some(*v))
            .unwrap_or(0)
    }

    /// Remove `label` and return its value; zero when absent.
    pub fn count_end(&mut self, label: &str) -> u64 {
        match self.counters.iter().position(|(l, _)| l == label) {
            Some(index) => self.counters.remove(index).1,
            None => 0,
        }
    }

    /// Remove and return every counter, in order of first increment.
    pub fn count_end_all(&mut self) -> Vec<(String, u64)> {
        std::mem::take(&mut self.counters)
    }

    /// Start (or restart) the timer `label`.
    pub fn time(&mut self, label: &str) {
        self.timers.insert(label.to_string(), Instant::now());
    }

    /// Time elapsed since `label` was started. The timer keeps running.
    pub fn time_end(&self, label: &str) -> Result<Duration> {
        self.timers
            .get(label)
            .map(Instant::elapsed)
            .ok_or_else(|| Error::unknown_label(label))
    }

    /// Forget every counter and timer.
    pub fn reset(&mut self) {
        self.counters.clear();
        self.timers.clear();
    }
}

/// `label: value`
pub fn format_count(label: &str, value: u64) -> String {
    format!("{}: {}", label, value)
}

/// `label: 1.234ms`
pub fn format_time(label: &str, elapsed: Duration) -> String {
    let millis = elapsed.as_secs() as f64 * 1000.0 + f64::from(elapsed.subsec_nanos()) / 1e6;
    format!("{}: {:.3}ms", label, millis)
}

/// The process-wide profiler.
pub fn global() -> MutexGuard<'static, Profiler> {
    GLOBAL.lock().unwrap_or_else(|e| {
        warn!("Profiler lock was poisoned, recovering");
        e.into_inner()
    })
}

/// Print `label: value` for `label` through `printer` and remove it. A
/// counter that was never incremented prints as zero.
pub fn count_end_with(printer: &Printer, profiler: &mut Profiler, label: &str) -> u64 {
    let value = profiler.count_end(label);
    printer.write_lines(Stream::Out, &[format_count(label, value)]);
    value
}

/// Print every counter through `printer`, in order of first increment, and
/// clear them. Prints nothing when there are none.
pub fn count_end_all_with(printer: &Printer, profiler: &mut Profiler) -> Vec<(String, u64)> {
    let counters = profiler.count_end_all();
    if !counters.is_empty() {
        let lines: Vec<String> = counters
            .iter()
            .map(|(label, value)| format_count(label, *value))
            .collect();
        printer.write_lines(Stream::Out, &lines);
    }
    counters
}

/// Print `label: N.NNNms` for the timer `label` through `printer`.
pub fn time_end_with(printer: &Printer, profiler: &Profiler, label: &str) -> Result<Duration> {
    let elapsed = profiler.time_end(label)?;
    printer.write_lines(Stream::Out, &[format_time(label, elapsed)]);
    Ok(elapsed)
}

/// Increment the global counter `label`.
pub fn count(label: &str) {
    global().count(label);
}

/// Print `label: value` for the global counter and remove it.
pub fn count_end(label: &str) -> u64 {
    let mut profiler = global();
    count_end_with(Printer::global(), &mut profiler, label)
}

/// Print and clear every global counter.
pub fn count_end_all() -> Vec<(String, u64)> {
    let mut profiler = global();
    count_end_all_with(Printer::global(), &mut profiler)
}

/// Start the global timer `label`.
pub fn time(label: &str) {
    debug!(label, "Timer started");
    global().time(label);
}

/// Print the time elapsed on the global timer `label`.
pub fn time_end(label: &str) -> Result<Duration> {
    let profiler = global();
    time_end_with(Printer::global(), &profiler, label)
}

/// Start the global timer `label` and print its elapsed time when the
/// returned guard drops.
pub fn time_scope(label: impl Into<String>) -> TimeScope {
    let label = label.into();
    time(&label);
    TimeScope { label }
}

/// RAII guard returned by [`time_scope`].
pub struct TimeScope {
    label: String,
}

impl TimeScope {
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for TimeScope {
    fn drop(&mut self) {
        match time_end(&self.label) {
            Ok(elapsed) => debug!(
                label = %self.label,
                duration_ms = elapsed.as_millis() as u64,
                "Timer scope ended"
            ),
            // Someone reset the global profiler while the scope was open.
            Err(e) => warn!(label = %self.label, error = %e, "Timer scope lost its start time"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrintOptions;
    use crate::sink::Console;
    use regex::Regex;
    use std::sync::Arc;
    use std::thread::sleep;
    use toolbelt_util::ErrorKind;

    fn printer() -> Printer {
        Printer::new(PrintOptions::default(), Arc::new(Console::buffered()))
    }

    #[test]
    fn count_end_prints_zero_for_untouched_labels() {
        let printer = printer();
        let mut profiler = Profiler::new();
        profiler.count("hits");

        assert_eq!(count_end_with(&printer, &mut profiler, "misses"), 0);
        assert_eq!(count_end_with(&printer, &mut profiler, "hits"), 1);
        assert_eq!(printer.console().captured(Stream::Out), "misses: 0\nhits: 1\n");
    }

    #[test]
    fn count_end_all_prints_in_first_increment_order() {
        let printer = printer();
        let mut profiler = Profiler::new();
        for n in 0..100 {
            profiler.count(if n % 2 == 0 { "even" } else { "odd" });
        }

        count_end_all_with(&printer, &mut profiler);
        assert_eq!(printer.console().captured(Stream::Out), "even: 50\nodd: 50\n");

        assert!(count_end_all_with(&printer, &mut profiler).is_empty());
        assert_eq!(printer.console().captured(Stream::Out), "even: 50\nodd: 50\n");
    }

    #[test]
    fn time_end_prints_milliseconds() {
        let printer = printer();
        let mut profiler = Profiler::new();

        let err = time_end_with(&printer, &profiler, "load").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownLabel);
        assert_eq!(printer.console().captured(Stream::Out), "");

        profiler.time("load");
        time_end_with(&printer, &profiler, "load").unwrap();
        let out = printer.console().captured(Stream::Out);
        let line = Regex::new(r"^load: \d+\.\d{3}ms\n$").unwrap();
        assert!(line.is_match(&out), "unexpected output {:?}", out);
    }

    #[test]
    fn counters_report_in_first_increment_order() {
        let mut profiler = Profiler::new();
        for n in 0..100 {
            profiler.count(if n % 2 == 0 { "even" } else { "odd" });
        }

        assert_eq!(profiler.counter("never"), 0);
        assert_eq!(
            profiler.count_end_all(),
            vec![("even".to_string(), 50), ("odd".to_string(), 50)]
        );
        assert!(profiler.count_end_all().is_empty());
        assert_eq!(profiler.counter("even"), 0);
    }

    #[test]
    fn count_end_reads_and_resets() {
        let mut profiler = Profiler::new();
        profiler.count("hits");
        profiler.count("hits");

        assert_eq!(profiler.count_end("hits"), 2);
        assert_eq!(profiler.count_end("hits"), 0);
        assert_eq!(profiler.count("hits"), 1);
    }

    #[test]
    fn time_end_without_start_is_unknown_label() {
        let profiler = Profiler::new();
        let err = profiler.time_end("x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownLabel);
    }

    #[test]
    fn time_end_samples_against_the_same_start() {
        let mut profiler = Profiler::new();
        profiler.time("x");
        let first = profiler.time_end("x").unwrap();
        sleep(Duration::from_millis(2));
        let second = profiler.time_end("x").unwrap();
        assert!(second >= first);
        assert!(second >= Duration::from_millis(2));
    }

    #[test]
    fn restarting_a_timer_moves_its_start() {
        let mut profiler = Profiler::new();
        profiler.time("x");
        sleep(Duration::from_millis(5));
        let before = profiler.time_end("x").unwrap();
        profiler.time("x");
        assert!(profiler.time_end("x").unwrap() < before);
    }

    #[test]
    fn reset_forgets_timers() {
        let mut profiler = Profiler::new();
        profiler.time("x");
        profiler.count("c");
        profiler.reset();
        assert!(profiler.time_end("x").is_err());
        assert_eq!(profiler.counter("c"), 0);
    }

    #[test]
    fn format_time_uses_three_decimals() {
        assert_eq!(
            format_time("load", Duration::new(1, 234_567_000)),
            "load: 1234.567ms"
        );
        assert_eq!(format_time("fast", Duration::from_micros(5)), "fast: 0.005ms");
        assert_eq!(format_count("even", 50), "even: 50");
    }

    #[test]
    fn global_functions_share_state() {
        count("profile-test-global");
        count("profile-test-global");
        assert_eq!(count_end("profile-test-global"), 2);
        assert_eq!(count_end("profile-test-global"), 0);

        assert!(time_end("profile-test-timer").is_err());
        time("profile-test-timer");
        assert!(time_end("profile-test-timer").is_ok());

        let scope = time_scope("profile-test-scope");
        assert_eq!(scope.label(), "profile-test-scope");
        drop(scope);
        assert!(global().time_end("profile-test-scope").is_ok());
    }
}
