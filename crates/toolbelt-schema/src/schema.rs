//! Declarative option shapes.
//!
//! A [`Schema`] maps property names to [`Rule`]s:
//!
//! ```rust,ignore
//! use toolbelt_schema::{Rule, Schema};
//! use toolbelt_util::TypeTag;
//!
//! let schema = Schema::new()
//!     .rule("name", Rule::of(TypeTag::String))
//!     .rule("tags", Rule::array_of(TypeTag::String).optional())
//!     .rule("mode", Rule::one_of(["fast", "safe"]));
//! ```

use toolbelt_util::{TypeTag, Value};

/// How one property is validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// A required property of exactly this type.
    Type(TypeTag),
    /// A typed property that may be optional and may constrain the element
    /// type of array values.
    Descriptor {
        ty: TypeTag,
        optional: bool,
        element: Option<TypeTag>,
    },
    /// A required property whose value must be one of these (strict
    /// equality).
    OneOf(Vec<Value>),
}

impl Rule {
    pub fn of(ty: TypeTag) -> Self {
        Rule::Type(ty)
    }

    /// An array whose elements all have type `element`.
    pub fn array_of(element: TypeTag) -> Self {
        Rule::Descriptor {
            ty: TypeTag::Array,
            optional: false,
            element: Some(element),
        }
    }

    pub fn one_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Rule::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Mark a typed rule optional. Literal sets are always required and are
    /// returned unchanged.
    pub fn optional(self) -> Self {
        match self {
            Rule::Type(ty) => Rule::Descriptor {
                ty,
                optional: true,
                element: None,
            },
            Rule::Descriptor { ty, element, .. } => Rule::Descriptor {
                ty,
                optional: true,
                element,
            },
            one_of @ Rule::OneOf(_) => one_of,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Rule::Descriptor { optional: true, .. })
    }

    /// The declared type, if this is not a literal set.
    pub fn expected_type(&self) -> Option<&TypeTag> {
        match self {
            Rule::Type(ty) | Rule::Descriptor { ty, .. } => Some(ty),
            Rule::OneOf(_) => None,
        }
    }

    pub fn element_type(&self) -> Option<&TypeTag> {
        match self {
            Rule::Descriptor { element, .. } => element.as_ref(),
            _ => None,
        }
    }
}

impl From<TypeTag> for Rule {
    fn from(ty: TypeTag) -> Self {
        Rule::Type(ty)
    }
}

/// Property name to rule, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    rules: Vec<(String, Rule)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rule for `name`.
    pub fn rule(mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        let name = name.into();
        let rule = rule.into();
        match self.rules.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = rule,
            None => self.rules.push((name, rule)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find_map(|(n, rule)| (n == name).then_some(rule))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(n, rule)| (n.as_str(), rule))
    }

    /// Names of the properties that must be present.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, rule)| !rule.is_optional())
            .map(|(name, _)| name)
    }
}
