//! Document tree queried by quarry selectors.
//!
//! This crate provides an arena-based tree modeled on the
//! [DOM Living Standard](https://dom.spec.whatwg.org/) node concepts.
//!
//! # Design
//!
//! Every node lives in one `Vec` and refers to its relatives through
//! [`NodeId`] indices. A `NodeId` is the node's identity: two elements with
//! identical tag and attributes are still different nodes.
//!
//! Trees are built either by hand ([`DomTree::alloc`] plus
//! [`DomTree::append_child`]) or from a JSON description
//! ([`DomTree::from_json_str`], see the [`json`] module).

use std::collections::{HashMap, HashSet};

pub mod json;

pub use json::DomError;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// A node plus the indices of its parent, children and adjacent siblings.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub node_type: NodeType,

    /// Parent node, `None` for the document and for detached nodes.
    pub parent: Option<NodeId>,

    /// Children in document order.
    pub children: Vec<NodeId>,

    /// The node immediately after this one in its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately before this one in its parent's children.
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// The node kinds a document is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The tree root. Never matched by a selector.
    Document,
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// Character data.
    Text(String),
    /// A comment.
    Comment(String),
}

/// Tag name and attributes of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// The element's local name, stored as written.
    pub tag_name: String,
    /// The element's attributes.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with no attributes.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(name.into(), value.into());
        self
    }

    /// Returns the element's `id` attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Returns the set of class names from the `class` attribute.
    ///
    /// [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        self.attrs
            .get("class")
            .map(|list| list.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Arena-based tree with O(1) node access and traversal.
///
/// The document node sits at [`NodeId::ROOT`]; everything else is allocated
/// after it and linked in with [`DomTree::append_child`].
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the tree, the document node included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: every tree, including `DomTree::default()`, holds its
    /// document node. Provided to pair with [`DomTree::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node and return its ID.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(node_type));
        id
    }

    /// Allocate an element and append it under `parent` in one step.
    pub fn append_element(&mut self, parent: NodeId, element: ElementData) -> NodeId {
        let id = self.alloc(NodeType::Element(element));
        self.append_child(parent, id);
        id
    }

    /// Allocate a text node and append it under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let id = self.alloc(NodeType::Text(text.into()));
        self.append_child(parent, id);
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent` and links it to the
    /// previous last child.
    ///
    /// # Panics
    ///
    /// Panics if either ID was not allocated by this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings, nearest first.
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}
