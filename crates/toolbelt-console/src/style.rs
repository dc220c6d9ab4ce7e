//! Terminal colors.
//!
//! Colors are applied with crossterm's ANSI styling. Widths are measured on
//! the text with escape sequences removed.

use crossterm::style::{style, Color, Stylize};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("valid regex"));

/// What a piece of output represents; decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Undefined,
    Null,
    Number,
    Boolean,
    String,
    Regex,
    /// Functions and depth placeholders such as `[Object]`.
    Special,
    Error,
    Warning,
    Success,
    Info,
}

impl Role {
    fn color(self) -> Color {
        match self {
            Role::Undefined => Color::DarkGrey,
            Role::Null => Color::White,
            Role::Number | Role::Boolean | Role::Warning => Color::Yellow,
            Role::String | Role::Success => Color::Green,
            Role::Regex | Role::Error => Color::Red,
            Role::Special | Role::Info => Color::Cyan,
        }
    }
}

/// Color `text` for `role`, or return it unchanged when colors are off.
pub fn paint(text: &str, role: Role, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    match role {
        Role::Null => style(text).bold().to_string(),
        Role::Error | Role::Warning | Role::Success => {
            style(text).with(role.color()).bold().to_string()
        }
        _ => style(text).with(role.color()).to_string(),
    }
}

/// Remove ANSI escape sequences.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

/// Display width of `text`, ignoring escape sequences.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).width()
}
