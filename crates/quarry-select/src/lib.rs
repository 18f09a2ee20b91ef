//! CSS selector queries over in-memory document trees.
//!
//! # Scope
//!
//! This crate implements a `querySelectorAll`-style query:
//! - **Selector Tokenizer** - forward scan of a selector string into compound
//!   selectors and combinators
//! - **Compound Selectors** - tag (or `*`), one `#id`, any number of
//!   `.class`es, and `[attr op value]` predicates
//! - **Combinators** - descendant (whitespace), child (`>`), next-sibling
//!   (`+`) and subsequent-sibling (`~`)
//! - **Tree Adapter** - the [`SelectorTree`] trait, implemented for
//!   [`quarry_dom::DomTree`] and implementable for any other tree
//!
//! ```
//! use quarry_dom::{DomTree, ElementData, NodeId};
//! use quarry_select::Select;
//!
//! let mut tree = DomTree::new();
//! let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));
//! let p = tree.append_element(div, ElementData::new("p"));
//!
//! assert_eq!(tree.select("div > p").unwrap(), vec![p]);
//! ```
//!
//! # Not Supported
//!
//! - Pseudo-classes and pseudo-elements (parsed, warned about, ignored)
//! - Selector lists (`a, b`)
//! - Specificity and cascade
//! - Checking every combinator against the subject itself. Each combinator
//!   relates the compounds on either side of it, as in `querySelectorAll`:
//!   `div#main > section p` matches a `p` anywhere inside a `section` that
//!   is a child of `div#main`, although the `p` is not a child of it.

/// Attribute predicates (`[attr]`, `[attr=v]`, `[attr~=v]`, ...).
pub mod attribute;
/// Compound selectors and their per-node filter.
pub mod compound;
/// Selector errors.
pub mod error;
/// `tree.select(...)` extension trait.
pub mod ext;
/// Parsed selectors and the context-narrowing matcher.
pub mod matcher;
/// Forward selector tokenizer.
pub mod tokenizer;
/// Tree capability trait and its `DomTree` implementation.
pub mod tree;

pub use attribute::{AttributeOperator, AttributePredicate};
pub use compound::{CompoundSelector, TagName};
pub use error::SelectorError;
pub use ext::Select;
pub use matcher::{Combinator, Selector, select};
pub use tokenizer::{SelectorToken, SelectorTokenizer};
pub use tree::SelectorTree;
