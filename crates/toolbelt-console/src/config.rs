//! Printer configuration.
//!
//! [`PrintOptions`] is what the printer and inspector consume.
//! [`ConsoleConfig`] is the user-facing form: it deserializes from JSON and
//! can be read from the environment.

use serde::Deserialize;
use std::io::IsTerminal;

/// Default nesting depth shown before containers collapse to placeholders.
pub const DEFAULT_DEPTH: usize = 2;

/// Default line budget for joining values and keeping containers on one line.
pub const DEFAULT_BREAK_LENGTH: usize = 80;

/// Options for rendering values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Maximum nesting depth; `None` recurses without bound.
    pub depth: Option<usize>,
    /// Whether to emit ANSI colors.
    pub colors: bool,
    /// Line width budget.
    pub break_length: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            depth: Some(DEFAULT_DEPTH),
            colors: false,
            break_length: DEFAULT_BREAK_LENGTH,
        }
    }
}

impl PrintOptions {
    /// Unbounded depth.
    pub fn verbose() -> Self {
        Self {
            depth: None,
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth: Option<usize>) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_break_length(mut self, break_length: usize) -> Self {
        self.break_length = break_length;
        self
    }
}

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Nesting depth shown in normal mode.
    pub depth: usize,
    /// Ignore `depth` and show everything.
    pub verbose: bool,
    /// Force colors on or off; `None` colors when stdout is a terminal.
    pub colors: Option<bool>,
    /// Line width budget.
    pub break_length: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            verbose: false,
            colors: None,
            break_length: DEFAULT_BREAK_LENGTH,
        }
    }
}

impl ConsoleConfig {
    /// Read `TOOLBELT_DEPTH`, `TOOLBELT_VERBOSE` and `NO_COLOR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(depth) = lookup("TOOLBELT_DEPTH").and_then(|v| v.trim().parse().ok()) {
            config.depth = depth;
        }
        if let Some(verbose) = lookup("TOOLBELT_VERBOSE") {
            config.verbose = matches!(verbose.trim(), "1" | "true" | "yes");
        }
        // https://no-color.org: present and non-empty disables color
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.colors = Some(false);
        }

        config
    }

    /// Resolve into printer options.
    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            depth: (!self.verbose).then_some(self.depth),
            colors: self
                .colors
                .unwrap_or_else(|| std::io::stdout().is_terminal()),
            break_length: self.break_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let options = PrintOptions::default();
        assert_eq!(options.depth, Some(2));
        assert_eq!(options.break_length, 80);
        assert_eq!(PrintOptions::verbose().depth, None);
    }

    #[test]
    fn test_from_lookup_reads_variables() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            ("TOOLBELT_DEPTH", "4"),
            ("NO_COLOR", "1"),
        ]));
        assert_eq!(config.depth, 4);
        assert_eq!(config.colors, Some(false));

        let options = config.print_options();
        assert_eq!(options.depth, Some(4));
        assert!(!options.colors);
    }

    #[test]
    fn test_verbose_unbounds_depth() {
        let config = ConsoleConfig::from_lookup(lookup(&[("TOOLBELT_VERBOSE", "true")]));
        assert_eq!(config.print_options().depth, None);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            ("TOOLBELT_DEPTH", "deep"),
            ("NO_COLOR", ""),
        ]));
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ConsoleConfig =
            serde_json::from_str(r#"{ "verbose": true, "colors": true }"#).unwrap();
        assert!(config.verbose);
        assert_eq!(config.colors, Some(true));
        assert_eq!(config.break_length, 80);
    }
}
