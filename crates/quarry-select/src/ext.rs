//! Method-call syntax for selector queries.
//!
//! Importing [`Select`] gives every [`SelectorTree`] a `select` method;
//! without the import the tree type is untouched. Nothing is registered
//! globally.

use crate::error::SelectorError;
use crate::matcher::Selector;
use crate::tree::SelectorTree;

/// Selector queries as methods on a tree.
pub trait Select: SelectorTree {
    /// Every element in the tree matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] if the selector is malformed.
    fn select(&self, selector: &str) -> Result<Vec<Self::Node>, SelectorError> {
        crate::select(self, self.root(), selector)
    }

    /// Every element below `node` matching `selector`, in document order.
    ///
    /// Combinators may still look above `node`: `div p` selected from inside
    /// a `div` finds that subtree's `p` elements.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] if the selector is malformed.
    fn select_from(
        &self,
        node: Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, SelectorError> {
        crate::select(self, node, selector)
    }

    /// The first element in document order matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] if the selector is malformed.
    fn select_first(&self, selector: &str) -> Result<Option<Self::Node>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(self.root())
            .find(|&node| selector.matches(self, node)))
    }
}

impl<T: SelectorTree + ?Sized> Select for T {}
