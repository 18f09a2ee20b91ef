//! The capabilities a tree must offer to be queried.
//!
//! Selectors never own or mutate nodes. They only ask the tree for tag
//! names, attributes and neighbours, and collect node handles. A handle's
//! equality is node identity.

use std::fmt::Debug;
use std::iter;

use quarry_dom::{DomTree, NodeId};

/// A read-only tree that selectors can be evaluated against.
///
/// Implementors provide the navigation primitives; the search helpers
/// (`descendants`, `find_all`, `find_ancestor`, `find_previous_sibling`) are
/// derived from them.
pub trait SelectorTree {
    /// Handle to a node. Two handles are equal iff they denote the same node.
    type Node: Copy + Eq + Debug;

    /// The document (or fragment) root.
    fn root(&self) -> Self::Node;

    /// Tag name of an element, `None` for every other kind of node.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    /// Value of the named attribute, `None` if absent or not an element.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Parent node.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// First child node of any kind.
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Next sibling node of any kind.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Previous sibling node of any kind.
    fn previous_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether the node is an element.
    fn is_element(&self, node: Self::Node) -> bool {
        self.tag_name(node).is_some()
    }

    /// All nodes below `node` in document order, `node` itself excluded.
    fn descendants(&self, node: Self::Node) -> Descendants<'_, Self> {
        Descendants {
            tree: self,
            root: node,
            next: self.first_child(node),
        }
    }

    /// Ancestors of `node`, nearest first.
    fn ancestors(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        iter::successors(self.parent(node), move |&n| self.parent(n))
    }

    /// Preceding siblings of `node` of any kind, nearest first.
    fn preceding_siblings(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        iter::successors(self.previous_sibling(node), move |&n| self.previous_sibling(n))
    }

    /// Every descendant element of `node` accepted by `filter`, in document order.
    fn find_all<F>(&self, node: Self::Node, mut filter: F) -> Vec<Self::Node>
    where
        F: FnMut(Self::Node) -> bool,
    {
        self.descendants(node)
            .filter(|&n| self.is_element(n) && filter(n))
            .collect()
    }

    /// Nearest ancestor element accepted by `filter`.
    fn find_ancestor<F>(&self, node: Self::Node, mut filter: F) -> Option<Self::Node>
    where
        F: FnMut(Self::Node) -> bool,
    {
        self.ancestors(node)
            .find(|&n| self.is_element(n) && filter(n))
    }

    /// Nearest preceding sibling element accepted by `filter`.
    fn find_previous_sibling<F>(&self, node: Self::Node, mut filter: F) -> Option<Self::Node>
    where
        F: FnMut(Self::Node) -> bool,
    {
        self.preceding_siblings(node)
            .find(|&n| self.is_element(n) && filter(n))
    }

    /// The immediately preceding element, skipping text and comments.
    fn previous_element_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        self.find_previous_sibling(node, |_| true)
    }
}

/// Pre-order iterator over the subtree below a node.
///
/// Walks with parent and sibling links only, so it allocates nothing.
pub struct Descendants<'a, T: SelectorTree + ?Sized> {
    tree: &'a T,
    root: T::Node,
    next: Option<T::Node>,
}

impl<T: SelectorTree + ?Sized> Descendants<'_, T> {
    fn advance(&self, from: T::Node) -> Option<T::Node> {
        if let Some(child) = self.tree.first_child(from) {
            return Some(child);
        }
        let mut node = from;
        while node != self.root {
            if let Some(sibling) = self.tree.next_sibling(node) {
                return Some(sibling);
            }
            node = self.tree.parent(node)?;
        }
        None
    }
}

impl<T: SelectorTree + ?Sized> Iterator for Descendants<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.advance(current);
        Some(current)
    }
}

impl SelectorTree for DomTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.as_element(node).map(|e| e.tag_name.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.as_element(node)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        Self::first_child(self, node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        Self::next_sibling(self, node)
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.prev_sibling(node)
    }
}
