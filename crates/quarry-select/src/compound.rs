//! [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
//!
//! "A compound selector is a sequence of simple selectors that are not
//! separated by a combinator, and represents a set of simultaneous
//! conditions on a single element."

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::attribute::AttributePredicate;
use crate::tree::SelectorTree;

/// The type part of a compound selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagName {
    /// No tag written, or `*`: any element.
    #[default]
    Any,
    /// An exact, case-sensitive tag name.
    Named(String),
}

impl TagName {
    /// Whether an element with tag `tag` satisfies this part.
    #[must_use]
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Named(name) => name == tag,
        }
    }
}

/// One selector fragment without combinators, e.g. `div#main.active[lang]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    /// Required tag, or [`TagName::Any`].
    pub tag: TagName,
    /// Required `id` attribute value.
    pub id: Option<String>,
    /// Classes that must all be present in the `class` attribute.
    pub classes: BTreeSet<String>,
    /// Attribute predicates that must all hold.
    pub attributes: Vec<AttributePredicate>,
}

impl CompoundSelector {
    /// Compound that matches elements with the given tag.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            tag: TagName::Named(name.into()),
            ..Self::default()
        }
    }

    /// Whether every condition holds for `node`.
    ///
    /// Missing `id` and `class` attributes count as empty strings, so a
    /// compound that requires either never matches an element without it.
    pub fn matches<T: SelectorTree + ?Sized>(&self, tree: &T, node: T::Node) -> bool {
        let Some(tag) = tree.tag_name(node) else {
            return false;
        };
        if !self.tag.matches(tag) {
            return false;
        }

        if let Some(id) = &self.id {
            if tree.attribute(node, "id").unwrap_or_default() != id {
                return false;
            }
        }

        if !self.classes.is_empty() {
            let present: HashSet<&str> = tree
                .attribute(node, "class")
                .unwrap_or_default()
                .split_ascii_whitespace()
                .collect();
            if !self.classes.iter().all(|class| present.contains(class.as_str())) {
                return false;
            }
        }

        self.attributes
            .iter()
            .all(|predicate| predicate.evaluate(tree.attribute(node, &predicate.name)))
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            TagName::Named(name) => f.write_str(name)?,
            TagName::Any => {
                if self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty() {
                    f.write_str("*")?;
                }
            }
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for predicate in &self.attributes {
            write!(f, "{predicate}")?;
        }
        Ok(())
    }
}
