//! Structural pretty-printing of [`Value`]s.
//!
//! Output follows the familiar script-console shape:
//!
//! ```text
//! { name: 'lint', limits: [ 1, 2 ], nested: { deeper: [Object] } }
//! ```
//!
//! Containers that do not fit in the break length, or that hold a multi-line
//! entry, are laid out one entry per line with two-space indentation.

use crate::config::PrintOptions;
use crate::style::{paint, visible_width, Role};
use once_cell::sync::Lazy;
use regex::Regex;
use toolbelt_util::value::{format_number, Object, Value};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex"));

/// Render `value` with `options`.
pub fn inspect(value: &Value, options: &PrintOptions) -> String {
    Inspector { options }.format(value, 0, 0)
}

struct Inspector<'a> {
    options: &'a PrintOptions,
}

impl Inspector<'_> {
    fn paint(&self, text: &str, role: Role) -> String {
        paint(text, role, self.options.colors)
    }

    fn too_deep(&self, level: usize) -> bool {
        self.options.depth.is_some_and(|depth| level > depth)
    }

    fn format(&self, value: &Value, level: usize, indent: usize) -> String {
        match value {
            Value::Undefined => self.paint("undefined", Role::Undefined),
            Value::Null => self.paint("null", Role::Null),
            Value::Bool(b) => self.paint(&b.to_string(), Role::Boolean),
            Value::Number(n) => self.paint(&format_number(*n), Role::Number),
            Value::String(s) => self.paint(&quote(s), Role::String),
            Value::Regex(re) => self.paint(&format!("/{}/", re.as_str()), Role::Regex),
            Value::Function(name) if name.is_empty() => {
                self.paint("[Function (anonymous)]", Role::Special)
            }
            Value::Function(name) => self.paint(&format!("[Function: {}]", name), Role::Special),
            Value::Array(items) => {
                if items.is_empty() {
                    return "[]".to_string();
                }
                if self.too_deep(level) {
                    return self.paint("[Array]", Role::Special);
                }

                let entries: Vec<String> = items
                    .iter()
                    .map(|item| self.format(item, level + 1, indent + 2))
                    .collect();

                self.reduce("", "[", "]", &entries, indent)
            }
            Value::Object(obj) => {
                let prefix = obj.class().map(|c| format!("{} ", c)).unwrap_or_default();
                if obj.is_empty() {
                    return format!("{}{{}}", prefix);
                }
                if self.too_deep(level) {
                    let name = obj.class().unwrap_or("Object");
                    return self.paint(&format!("[{}]", name), Role::Special);
                }

                let entries = self.format_entries(obj, level, indent);

                self.reduce(&prefix, "{", "}", &entries, indent)
            }
        }
    }

    fn format_entries(&self, obj: &Object, level: usize, indent: usize) -> Vec<String> {
        obj.iter()
            .map(|(key, value)| {
                let key = if IDENTIFIER.is_match(key) {
                    key.to_string()
                } else {
                    self.paint(&quote(key), Role::String)
                };
                format!("{}: {}", key, self.format(value, level + 1, indent + 2))
            })
            .collect()
    }

    /// Join entries on one line when they fit, one per line otherwise.
    fn reduce(
        &self,
        prefix: &str,
        open: &str,
        close: &str,
        entries: &[String],
        indent: usize,
    ) -> String {
        let multiline_entry = entries.iter().any(|e| e.contains('\n'));
        let width = indent
            + prefix.len()
            + open.len()
            + close.len()
            + 2
            + entries.iter().map(|e| visible_width(e)).sum::<usize>()
            + 2 * (entries.len() - 1);

        if !multiline_entry && width <= self.options.break_length {
            return format!("{}{} {} {}", prefix, open, entries.join(", "), close);
        }

        let pad = " ".repeat(indent);
        let inner = format!(",\n{}  ", pad);
        format!(
            "{}{}\n{}  {}\n{}{}",
            prefix,
            open,
            pad,
            entries.join(&inner),
            pad,
            close
        )
    }
}

/// Single-quote a string, escaping what would break the quoting.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::strip_ansi;
    use regex::Regex as Pattern;
    use toolbelt_util::Object;

    fn plain(value: &Value) -> String {
        inspect(value, &PrintOptions::default())
    }

    #[test]
    fn primitives() {
        assert_eq!(plain(&Value::Undefined), "undefined");
        assert_eq!(plain(&Value::Null), "null");
        assert_eq!(plain(&Value::from(true)), "true");
        assert_eq!(plain(&Value::from(1.5)), "1.5");
        assert_eq!(plain(&Value::from("it's")), r"'it\'s'");
        assert_eq!(plain(&Value::from(Pattern::new("a+").unwrap())), "/a+/");
        assert_eq!(plain(&Value::function("handler")), "[Function: handler]");
        assert_eq!(plain(&Value::function("")), "[Function (anonymous)]");
    }

    #[test]
    fn containers_on_one_line() {
        let value = Value::object([
            ("name", Value::from("lint")),
            ("max-width", Value::from(80)),
            ("tags", Value::array(["a", "b"])),
        ]);
        assert_eq!(
            plain(&value),
            "{ name: 'lint', 'max-width': 80, tags: [ 'a', 'b' ] }"
        );
        assert_eq!(plain(&Value::array(Vec::<Value>::new())), "[]");
        assert_eq!(plain(&Value::object(Vec::<(String, Value)>::new())), "{}");
    }

    #[test]
    fn class_names_prefix_objects() {
        let point: Value = Object::instance("Point").with("x", 1).with("y", 2).into();
        assert_eq!(plain(&point), "Point { x: 1, y: 2 }");
        assert_eq!(plain(&Object::instance("Empty").into()), "Empty {}");
    }

    #[test]
    fn depth_limit_collapses_containers() {
        let value = Value::object([(
            "a",
            Value::object([("b", Value::object([("c", Value::object([("d", 1)]))]))]),
        )]);
        assert_eq!(plain(&value), "{ a: { b: { c: [Object] } } }");

        let verbose = inspect(&value, &PrintOptions::verbose());
        assert_eq!(verbose, "{ a: { b: { c: { d: 1 } } } }");

        let shallow = inspect(&value, &PrintOptions::default().with_depth(Some(0)));
        assert_eq!(shallow, "{ a: [Object] }");

        let nested_array = Value::array([Value::array([Value::array([Value::array([1])])])]);
        assert_eq!(plain(&nested_array), "[ [ [ [Array] ] ] ]");
    }

    #[test]
    fn long_containers_break_across_lines() {
        let value = Value::object([
            ("description", Value::from("x".repeat(40))),
            ("summary", Value::from("y".repeat(40))),
        ]);
        let expected = format!(
            "{{\n  description: '{}',\n  summary: '{}'\n}}",
            "x".repeat(40),
            "y".repeat(40)
        );
        assert_eq!(plain(&value), expected);
    }

    #[test]
    fn multiline_entries_force_outer_break() {
        let inner = Value::object([
            ("description", Value::from("x".repeat(40))),
            ("summary", Value::from("y".repeat(40))),
        ]);
        let value = Value::array([inner]);
        let rendered = plain(&value);
        assert!(rendered.starts_with("[\n  {\n    description: "));
        assert!(rendered.ends_with("\n  }\n]"));
    }

    #[test]
    fn colors_do_not_change_layout() {
        let value = Value::object([("n", Value::from(1)), ("s", Value::from("x"))]);
        let colored = inspect(&value, &PrintOptions::default().with_colors(true));
        assert_eq!(strip_ansi(&colored), plain(&value));
    }
}
