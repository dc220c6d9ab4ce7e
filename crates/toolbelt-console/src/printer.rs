//! Printing values to a [`Console`].

use crate::config::{ConsoleConfig, PrintOptions};
use crate::inspect::inspect;
use crate::sink::{Console, Stream};
use crate::style::{paint, visible_width, Role};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use toolbelt_util::{Error, Result, Value};
use tracing::warn;

static GLOBAL: Lazy<Printer> =
    Lazy::new(|| Printer::new(ConsoleConfig::from_env().print_options(), Console::global()));

/// A label put in front of the first printed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Error,
    Warning,
    Success,
    Info,
    /// Any other text, printed to stdout with the info color.
    Custom(String),
}

impl Label {
    pub fn text(&self) -> &str {
        match self {
            Label::Error => "Error:",
            Label::Warning => "Warning:",
            Label::Success => "Success:",
            Label::Info => "Info:",
            Label::Custom(text) => text,
        }
    }

    fn role(&self) -> Role {
        match self {
            Label::Error => Role::Error,
            Label::Warning => Role::Warning,
            Label::Success => Role::Success,
            Label::Info | Label::Custom(_) => Role::Info,
        }
    }

    /// Errors and warnings go to stderr.
    pub fn stream(&self) -> Stream {
        match self {
            Label::Error | Label::Warning => Stream::Err,
            _ => Stream::Out,
        }
    }

    /// The label text, colored without its trailing colon.
    pub fn render(&self, colors: bool) -> String {
        let text = self.text();
        match text.strip_suffix(':') {
            Some(word) => format!("{}:", paint(word, self.role(), colors)),
            None => paint(text, self.role(), colors),
        }
    }
}

/// Formats values and writes them to a console.
#[derive(Clone)]
pub struct Printer {
    options: PrintOptions,
    console: Arc<Console>,
}

impl Printer {
    pub fn new(options: PrintOptions, console: Arc<Console>) -> Self {
        Self { options, console }
    }

    /// The process-wide printer: options from the environment, writing to
    /// [`Console::global`].
    pub fn global() -> &'static Printer {
        &GLOBAL
    }

    pub fn options(&self) -> &PrintOptions {
        &self.options
    }

    pub fn console(&self) -> &Arc<Console> {
        &self.console
    }

    /// Strings verbatim, everything else through the inspector.
    pub fn render(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => inspect(other, &self.options),
        }
    }

    /// Lay out `values` as output lines.
    ///
    /// Single-line renderings share a line, separated by a space, while the
    /// visible width stays within the break length. Any rendering containing
    /// a newline counts as multi-line and always stands on its own lines,
    /// including a verbatim string with line breaks.
    pub fn format_lines(&self, values: &[Value]) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut joinable = false;

        for value in values {
            let text = self.render(value);

            if text.contains('\n') {
                lines.extend(text.lines().map(str::to_string));
                joinable = false;
                continue;
            }

            if joinable {
                if let Some(last) = lines.last_mut() {
                    if visible_width(last) + 1 + visible_width(&text) <= self.options.break_length {
                        last.push(' ');
                        last.push_str(&text);
                        continue;
                    }
                }
            }

            lines.push(text);
            joinable = true;
        }

        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    /// [`Printer::format_lines`] with `label` in front of the first line.
    pub fn format_labeled(&self, label: &Label, values: &[Value]) -> Vec<String> {
        let mut lines = self.format_lines(values);
        let label = label.render(self.options.colors);
        if let Some(first) = lines.first_mut() {
            *first = if first.is_empty() {
                label
            } else {
                format!("{} {}", label, first)
            };
        }
        lines
    }

    /// Write already formatted lines. Write failures are logged, not
    /// returned.
    pub fn write_lines(&self, stream: Stream, lines: &[String]) {
        if let Err(e) = self.console.write_lines(stream, lines) {
            warn!(error = %e, "Failed to write console output");
        }
    }

    pub fn print(&self, values: &[Value]) {
        self.write_lines(Stream::Out, &self.format_lines(values));
    }

    pub fn print_labeled(&self, label: &Label, values: &[Value]) {
        self.write_lines(label.stream(), &self.format_labeled(label, values));
    }

    pub fn error(&self, values: &[Value]) {
        self.print_labeled(&Label::Error, values);
    }

    pub fn warning(&self, values: &[Value]) {
        self.print_labeled(&Label::Warning, values);
    }

    pub fn success(&self, values: &[Value]) {
        self.print_labeled(&Label::Success, values);
    }

    pub fn info(&self, values: &[Value]) {
        self.print_labeled(&Label::Info, values);
    }

    /// Run `op` with stdout sent to `path`.
    ///
    /// The previous destination is restored before this returns or unwinds,
    /// including when `op` fails; its error is passed through unchanged. On
    /// success the absolute target path is reported on the restored stream.
    ///
    /// Only output written through this printer's [`Console`] is captured;
    /// `println!` and other direct writes to the process stdout still reach
    /// the terminal.
    pub fn redirect_to_file<T, E, F>(
        &self,
        path: impl AsRef<Path>,
        op: F,
    ) -> std::result::Result<T, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let guard = self.console.redirect(path)?;
        let target = guard.path().to_path_buf();
        let result = op();
        drop(guard);

        let value = result?;
        self.success(&[Value::from(format!(
            "output written to {}",
            target.display()
        ))]);
        Ok(value)
    }

    /// Write `value` as tab-indented JSON to `path` and report the absolute
    /// path written.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
    ) -> Result<PathBuf> {
        let written = toolbelt_util::write_json(path, value)?;
        self.success(&[Value::from(format!("JSON written to {}", written.display()))]);
        Ok(written)
    }
}
