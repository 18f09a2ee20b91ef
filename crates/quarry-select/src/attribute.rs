//! [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
//!
//! An [`AttributePredicate`] is a boolean test over one attribute of a node.
//! It can be built directly from an operator symbol and evaluated on its own,
//! or appear inside a compound selector as `[name op value]`.

use std::fmt::{self, Write};

use crate::tree::SelectorTree;

/// How an attribute value is compared against the predicate's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOperator {
    /// `[attr]` - the attribute is present; the value is ignored.
    Exists,

    /// `[attr=value]` - the attribute is present and exactly `value`.
    Equals,

    /// `[attr~=value]` - one of the whitespace-separated words is `value`.
    ///
    /// Example: `[class~="active"]` matches `<div class="btn active">`
    Includes,

    /// `[attr|=value]` - exactly `value`, or `value` immediately followed by `-`.
    ///
    /// Example: `[lang|="en"]` matches `<p lang="en">` and `<p lang="en-US">`
    DashMatch,

    /// `[attr^=value]` - the attribute starts with `value`.
    PrefixMatch,

    /// `[attr$=value]` - the attribute ends with `value`.
    SuffixMatch,

    /// `[attr*=value]` - the attribute contains `value` as a substring.
    SubstringMatch,
}

impl AttributeOperator {
    /// Map an operator symbol to its operator.
    ///
    /// Accepts the bare symbol (`~`) as well as the written form (`~=`).
    /// Unknown symbols, including the empty string, fall back to
    /// [`AttributeOperator::Exists`].
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "=" => Self::Equals,
            "~" | "~=" => Self::Includes,
            "|" | "|=" => Self::DashMatch,
            "^" | "^=" => Self::PrefixMatch,
            "$" | "$=" => Self::SuffixMatch,
            "*" | "*=" => Self::SubstringMatch,
            _ => Self::Exists,
        }
    }

    /// The operator as written inside brackets (`""` for [`Self::Exists`]).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Exists => "",
            Self::Equals => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::PrefixMatch => "^=",
            Self::SuffixMatch => "$=",
            Self::SubstringMatch => "*=",
        }
    }
}

/// A test over a single named attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePredicate {
    /// Attribute name, compared exactly.
    pub name: String,
    /// Comparison to perform.
    pub operator: AttributeOperator,
    /// Right-hand side of the comparison. Unused by [`AttributeOperator::Exists`].
    pub value: String,
}

impl AttributePredicate {
    /// Build a predicate from its parts.
    pub fn new(
        operator: AttributeOperator,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            operator,
            value: value.into(),
        }
    }

    /// Build a presence test, `[name]`.
    pub fn exists(name: impl Into<String>) -> Self {
        Self::new(AttributeOperator::Exists, name, String::new())
    }

    /// Evaluate the predicate against an attribute value (`None` if absent).
    ///
    /// Only [`AttributeOperator::Exists`] and [`AttributeOperator::Equals`]
    /// distinguish an absent attribute from an empty one; the other
    /// operators compare against `""` when the attribute is missing.
    #[must_use]
    pub fn evaluate(&self, actual: Option<&str>) -> bool {
        let value = self.value.as_str();
        match self.operator {
            AttributeOperator::Exists => actual.is_some(),
            AttributeOperator::Equals => actual == Some(value),
            AttributeOperator::Includes => actual
                .unwrap_or_default()
                .split_ascii_whitespace()
                .any(|word| word == value),
            AttributeOperator::DashMatch => {
                let actual = actual.unwrap_or_default();
                actual == value
                    || actual
                        .strip_prefix(value)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            AttributeOperator::PrefixMatch => actual.unwrap_or_default().starts_with(value),
            AttributeOperator::SuffixMatch => actual.unwrap_or_default().ends_with(value),
            AttributeOperator::SubstringMatch => actual.unwrap_or_default().contains(value),
        }
    }

    /// Evaluate the predicate against a node. Non-element nodes never match.
    pub fn matches<T: SelectorTree + ?Sized>(&self, tree: &T, node: T::Node) -> bool {
        tree.is_element(node) && self.evaluate(tree.attribute(node, &self.name))
    }
}

impl fmt::Display for AttributePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator == AttributeOperator::Exists {
            return write!(f, "[{}]", self.name);
        }
        let quote = if self.value.contains('"') { '\'' } else { '"' };
        write!(f, "[{}{}{quote}", self.name, self.operator.symbol())?;
        // Escape the enclosing quote and backslashes
        for c in self.value.chars() {
            if c == quote || c == '\\' {
                f.write_char('\\')?;
            }
            f.write_char(c)?;
        }
        write!(f, "{quote}]")
    }
}
