//! Validating option objects against a [`Schema`].

use crate::schema::{Rule, Schema};
use thiserror::Error;
use toolbelt_console::{inspect, Label, PrintOptions, Printer, Stream};
use toolbelt_util::{Object, SourceLocation, TypeTag, Value};
use tracing::debug;

/// Property name reported when the candidate is not an object at all.
pub const OPTIONS_PROPERTY: &str = "<options>";

/// The first way a candidate failed its schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("missing required property '{property}'")]
    MissingProperty { property: String },

    #[error("unrecognized property '{property}'")]
    UnrecognizedProperty { property: String, value: Value },

    #[error("undefined value for property '{property}'")]
    UndefinedValue { property: String, value: Value },

    #[error("unrecognized value for property '{property}'")]
    UnrecognizedValue {
        property: String,
        value: Value,
        allowed: Vec<Value>,
    },

    #[error("property '{property}' should be of type {expected}, got {actual}")]
    WrongType {
        property: String,
        expected: TypeTag,
        actual: TypeTag,
        value: Value,
    },

    #[error("element {index} of property '{property}' should be of type {expected}, got {actual}")]
    WrongElementType {
        property: String,
        index: usize,
        expected: TypeTag,
        actual: TypeTag,
        value: Value,
    },
}

impl Violation {
    /// The offending property.
    pub fn property(&self) -> &str {
        match self {
            Violation::MissingProperty { property }
            | Violation::UnrecognizedProperty { property, .. }
            | Violation::UndefinedValue { property, .. }
            | Violation::UnrecognizedValue { property, .. }
            | Violation::WrongType { property, .. }
            | Violation::WrongElementType { property, .. } => property,
        }
    }

    /// The offending value. For element type failures this is the element.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Violation::MissingProperty { .. } => None,
            Violation::UnrecognizedProperty { value, .. }
            | Violation::UndefinedValue { value, .. }
            | Violation::UnrecognizedValue { value, .. }
            | Violation::WrongType { value, .. }
            | Violation::WrongElementType { value, .. } => Some(value),
        }
    }

    /// Message and inspected values, ready for the printer.
    fn diagnostic(&self, options: &PrintOptions) -> Vec<Value> {
        let mut values = vec![Value::from(self.to_string())];
        if let Some(value) = self.value() {
            values.push(Value::from(inspect(value, options)));
        }
        if let Violation::UnrecognizedValue { allowed, .. } = self {
            values.push(Value::from("expected one of"));
            values.push(Value::from(inspect(
                &Value::array(allowed.iter().cloned()),
                options,
            )));
        }
        values
    }
}

impl Schema {
    /// Check `candidate`, stopping at the first violation.
    ///
    /// Required properties are checked first (declaration order), then
    /// undeclared properties, then each value in candidate order.
    pub fn check(&self, candidate: &Object) -> Result<(), Violation> {
        if let Some(missing) = self.required().find(|name| !candidate.contains_key(name)) {
            return Err(Violation::MissingProperty {
                property: missing.to_string(),
            });
        }

        if let Some((name, value)) = candidate.iter().find(|(name, _)| self.get(name).is_none()) {
            return Err(Violation::UnrecognizedProperty {
                property: name.to_string(),
                value: value.clone(),
            });
        }

        for (name, value) in candidate.iter() {
            if let Some(rule) = self.get(name) {
                check_property(name, rule, value)?;
            }
        }
        Ok(())
    }

    /// [`Schema::check`] for a value that may not be an object.
    pub fn check_value(&self, candidate: &Value) -> Result<(), Violation> {
        match candidate.as_object() {
            Some(object) => self.check(object),
            None => Err(Violation::WrongType {
                property: OPTIONS_PROPERTY.to_string(),
                expected: TypeTag::Object,
                actual: candidate.type_tag(),
                value: candidate.clone(),
            }),
        }
    }
}

fn is_undefined(value: &Value) -> bool {
    match value {
        Value::Undefined => true,
        Value::Array(items) => items.is_empty() || items.iter().any(Value::is_undefined),
        _ => false,
    }
}

fn check_property(name: &str, rule: &Rule, value: &Value) -> Result<(), Violation> {
    if is_undefined(value) {
        return Err(Violation::UndefinedValue {
            property: name.to_string(),
            value: value.clone(),
        });
    }

    let expected = match rule {
        Rule::OneOf(allowed) => {
            if allowed.contains(value) {
                return Ok(());
            }
            return Err(Violation::UnrecognizedValue {
                property: name.to_string(),
                value: value.clone(),
                allowed: allowed.clone(),
            });
        }
        Rule::Type(ty) | Rule::Descriptor { ty, .. } => ty,
    };

    let actual = value.type_tag();
    if actual != *expected {
        return Err(Violation::WrongType {
            property: name.to_string(),
            expected: expected.clone(),
            actual,
            value: value.clone(),
        });
    }

    if let (Some(element), Some(items)) = (rule.element_type(), value.as_array()) {
        for (index, item) in items.iter().enumerate() {
            let actual = item.type_tag();
            if actual != *element {
                return Err(Violation::WrongElementType {
                    property: name.to_string(),
                    index,
                    expected: element.clone(),
                    actual,
                    value: item.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Whether `candidate` fails `schema`.
///
/// On failure an `Error:` diagnostic naming the violation, the value
/// involved and the caller's location goes to the global console's error
/// stream. Returns `true` when the options are ill-formed.
#[track_caller]
pub fn ill_formed_opts(schema: &Schema, candidate: &Value) -> bool {
    ill_formed_opts_with(Printer::global(), schema, candidate)
}

/// [`ill_formed_opts`] writing through `printer`.
#[track_caller]
pub fn ill_formed_opts_with(printer: &Printer, schema: &Schema, candidate: &Value) -> bool {
    match schema.check_value(candidate) {
        Ok(()) => false,
        Err(violation) => {
            let location = SourceLocation::caller();
            debug!(property = violation.property(), %location, "Options rejected");
            report(printer, &violation.diagnostic(printer.options()), &location);
            true
        }
    }
}

/// Write an `Error:` diagnostic followed by an `at file:line` line.
pub(crate) fn report(printer: &Printer, values: &[Value], location: &SourceLocation) {
    let mut lines = printer.format_labeled(&Label::Error, values);
    lines.push(format!("    at {}", location));
    printer.write_lines(Stream::Err, &lines);
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::sync::Arc;
    use toolbelt_console::Console;

    fn schema() -> Schema {
        Schema::new()
            .rule("name", TypeTag::String)
            .rule("retries", Rule::of(TypeTag::Number).optional())
            .rule("tags", Rule::array_of(TypeTag::String).optional())
            .rule("mode", Rule::one_of(["fast", "safe"]))
    }

    fn base() -> Object {
        Object::new().with("name", "job").with("mode", "fast")
    }

    #[test]
    fn accepts_well_formed_options() {
        assert_eq!(schema().check(&base()), Ok(()));
        let full = base()
            .with("retries", 3)
            .with("tags", Value::array(["a", "b"]));
        assert_eq!(schema().check(&full), Ok(()));
    }

    #[test]
    fn missing_required_property() {
        let err = schema().check(&Object::new().with("mode", "safe")).unwrap_err();
        assert_eq!(
            err,
            Violation::MissingProperty {
                property: "name".into()
            }
        );
        assert_eq!(err.to_string(), "missing required property 'name'");
    }

    #[test]
    fn missing_is_reported_before_unrecognized() {
        let candidate = Object::new().with("bogus", 1).with("mode", "fast");
        let err = schema().check(&candidate).unwrap_err();
        assert_eq!(err.property(), "name");
    }

    #[test]
    fn unrecognized_property() {
        let err = schema().check(&base().with("colour", "red")).unwrap_err();
        assert!(matches!(err, Violation::UnrecognizedProperty { ref property, .. } if property == "colour"));
    }

    #[test]
    fn undefined_values_count_as_present_but_fail() {
        let candidate = base().with("retries", Value::Undefined);
        let err = schema().check(&candidate).unwrap_err();
        assert!(matches!(err, Violation::UndefinedValue { ref property, .. } if property == "retries"));

        let required_undefined = Object::new()
            .with("name", Value::Undefined)
            .with("mode", "fast");
        assert_eq!(schema().check(&required_undefined).unwrap_err().property(), "name");
    }

    #[test]
    fn empty_or_holey_arrays_are_undefined() {
        let empty = base().with("tags", Value::array(Vec::<Value>::new()));
        assert!(matches!(schema().check(&empty), Err(Violation::UndefinedValue { .. })));

        let holey = base().with("tags", Value::array([Value::from("a"), Value::Undefined]));
        assert!(matches!(schema().check(&holey), Err(Violation::UndefinedValue { .. })));
    }

    #[test]
    fn literal_sets_use_strict_equality() {
        let err = schema().check(&base().with("mode", "slow")).unwrap_err();
        match err {
            Violation::UnrecognizedValue { value, allowed, .. } => {
                assert_eq!(value, Value::from("slow"));
                assert_eq!(allowed, vec![Value::from("fast"), Value::from("safe")]);
            }
            other => panic!("unexpected violation: {other:?}"),
        }

        let shared = Value::array([1, 2]);
        let schema = Schema::new().rule("pick", Rule::one_of([shared.clone()]));
        assert_eq!(schema.check(&Object::new().with("pick", shared)), Ok(()));
        let lookalike = Object::new().with("pick", Value::array([1, 2]));
        assert!(matches!(
            schema.check(&lookalike),
            Err(Violation::UnrecognizedValue { .. })
        ));
    }

    #[test]
    fn types_match_exactly() {
        let err = schema().check(&base().with("retries", "3")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "property 'retries' should be of type number, got string"
        );

        let schema = Schema::new().rule("opts", TypeTag::Object);
        let instance = Object::new().with("opts", Object::instance("Config"));
        assert!(matches!(
            schema.check(&instance),
            Err(Violation::WrongType { actual: TypeTag::Instance(ref c), .. }) if c == "Config"
        ));
        let array = Object::new().with("opts", Value::array([1]));
        assert!(schema.check(&array).is_err());
    }

    #[test]
    fn element_types_are_checked_in_order() {
        let candidate = base().with("tags", Value::array([Value::from("a"), Value::from(2), Value::Null]));
        let err = schema().check(&candidate).unwrap_err();
        assert_eq!(
            err,
            Violation::WrongElementType {
                property: "tags".into(),
                index: 1,
                expected: TypeTag::String,
                actual: TypeTag::Number,
                value: Value::from(2),
            }
        );
    }

    #[test]
    fn regexes_are_their_own_type() {
        let schema = Schema::new().rule("pattern", TypeTag::Regex);
        let ok = Object::new().with("pattern", Regex::new("^a+$").unwrap());
        assert_eq!(schema.check(&ok), Ok(()));
        let err = schema
            .check(&Object::new().with("pattern", "^a+$"))
            .unwrap_err();
        assert!(matches!(err, Violation::WrongType { .. }));
    }

    #[test]
    fn non_object_candidates_are_wrong_type() {
        let err = schema().check_value(&Value::from(5)).unwrap_err();
        assert_eq!(err.property(), OPTIONS_PROPERTY);
        assert_eq!(schema().check_value(&Value::from(base())), Ok(()));
    }

    #[test]
    fn ill_formed_opts_reports_to_stderr() {
        let printer = Printer::new(PrintOptions::default(), Arc::new(Console::buffered()));
        let good = Value::from(base());
        assert!(!ill_formed_opts_with(&printer, &schema(), &good));
        assert_eq!(printer.console().captured(Stream::Err), "");

        let bad = Value::from(base().with("retries", "3"));
        let line = line!() + 1;
        assert!(ill_formed_opts_with(&printer, &schema(), &bad));

        let err = printer.console().captured(Stream::Err);
        assert!(err.starts_with("Error: property 'retries' should be of type number, got string '3'\n"));
        assert!(err.ends_with(&format!("validate.rs:{}\n", line)));
        assert_eq!(printer.console().captured(Stream::Out), "");
    }
}
