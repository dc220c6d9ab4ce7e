//! Call-site lookup.
//!
//! [`call_site`] walks the resolved call stack and reports a `path:line`
//! location. Results depend on debug info being present; without it every
//! lookup returns `None`.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolbelt_util::location::{call_site, CallSite};
//!
//! fn warn_deprecated() {
//!     // Reports the line in the *caller's* file that invoked warn_deprecated.
//!     if let Some(at) = call_site(CallSite::DistinctCaller) {
//!         eprintln!("deprecated call at {at}");
//!     }
//! }
//! ```

use backtrace::Backtrace;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which frame [`call_site`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    /// The line that called [`call_site`].
    Immediate,
    /// The nearest frame whose file differs from the file that called
    /// [`call_site`].
    DistinctCaller,
}

/// A `path:line` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    file: PathBuf,
    line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The location of the caller, from compiler-provided metadata.
    ///
    /// Functions marked `#[track_caller]` pass their own caller through.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line())
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.file.display().to_string();
        let path = path.trim_matches(|c| c == '(' || c == ')');
        write!(f, "{}:{}", path, self.line)
    }
}

fn is_own_frame(file: &Path) -> bool {
    file.ends_with(file!())
}

/// Report a location from the current call stack.
///
/// Frames belonging to the stack capture and to this function are dropped,
/// then frames without a file and line are skipped. Returns `None` when no
/// qualifying frame remains.
#[inline(never)]
pub fn call_site(mode: CallSite) -> Option<SourceLocation> {
    let trace = Backtrace::new();
    let mut frames = trace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(|symbol| Some((symbol.filename()?, symbol.lineno()?)))
        .skip_while(|(file, _)| !is_own_frame(file))
        .skip_while(|(file, _)| is_own_frame(file));

    let (first_file, first_line) = frames.next()?;
    match mode {
        CallSite::Immediate => Some(SourceLocation::new(first_file, first_line)),
        CallSite::DistinctCaller => frames
            .find(|(file, _)| *file != first_file)
            .map(|(file, line)| SourceLocation::new(file, line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_path_colon_line() {
        let loc = SourceLocation::new("src/main.rs", 12);
        assert_eq!(loc.to_string(), "src/main.rs:12");
    }

    #[test]
    fn display_strips_parentheses() {
        let loc = SourceLocation::new("(/srv/app/lib.rs)", 7);
        assert_eq!(loc.to_string(), "/srv/app/lib.rs:7");
    }

    #[test]
    fn caller_uses_compiler_location() {
        let expected = line!() + 1;
        let loc = SourceLocation::caller();
        assert_eq!(loc.line(), expected);
        assert!(loc.file().ends_with("location.rs"));
    }

    #[test]
    fn lookups_from_this_file_skip_its_frames() {
        // Every frame from this file counts as the inspector's own, so the
        // first qualifying frame is outside it (the test harness) if any.
        if let Some(loc) = call_site(CallSite::Immediate) {
            assert!(!is_own_frame(loc.file()));
        }
    }
}
