//! Loading a [`DomTree`] from a JSON description.
//!
//! The format is a nested node description:
//!
//! ```json
//! [
//!   { "tag": "div", "attrs": { "id": "main", "class": "a b" }, "children": [
//!       { "tag": "p", "children": [ { "text": "hello" } ] },
//!       { "comment": "note" }
//!   ] }
//! ]
//! ```
//!
//! The top level is either one node or an array of nodes; all of them become
//! children of the document node.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::{DomTree, ElementData, NodeId, NodeType};

/// Errors produced while loading a tree.
#[derive(Debug, Error)]
pub enum DomError {
    /// The input was not valid JSON or did not have the node shape.
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An element description had an empty `tag`.
    #[error("element at {path} has an empty tag name")]
    EmptyTagName {
        /// Child-index path of the offending element, e.g. `/0/2`.
        path: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonNode {
    Element {
        tag: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<JsonNode>,
    },
    Text {
        text: String,
    },
    Comment {
        comment: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Many(Vec<JsonNode>),
    One(JsonNode),
}

impl DomTree {
    /// Build a tree from its JSON description.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Json`] if the input is not a node description and
    /// [`DomError::EmptyTagName`] for elements without a tag.
    pub fn from_json_str(input: &str) -> Result<Self, DomError> {
        let parsed: JsonDocument = serde_json::from_str(input)?;
        let top_level = match parsed {
            JsonDocument::Many(nodes) => nodes,
            JsonDocument::One(node) => vec![node],
        };

        let mut tree = Self::new();
        let mut path = String::new();
        for (index, node) in top_level.into_iter().enumerate() {
            tree.insert_node(NodeId::ROOT, node, &mut path, index)?;
        }
        Ok(tree)
    }

    fn insert_node(
        &mut self,
        parent: NodeId,
        node: JsonNode,
        path: &mut String,
        index: usize,
    ) -> Result<(), DomError> {
        let path_len = path.len();
        path.push('/');
        path.push_str(&index.to_string());

        match node {
            JsonNode::Element {
                tag,
                attrs,
                children,
            } => {
                if tag.is_empty() {
                    return Err(DomError::EmptyTagName { path: path.clone() });
                }
                let element = ElementData {
                    tag_name: tag,
                    attrs: attrs.into_iter().collect(),
                };
                let id = self.append_element(parent, element);
                for (child_index, child) in children.into_iter().enumerate() {
                    self.insert_node(id, child, path, child_index)?;
                }
            }
            JsonNode::Text { text } => {
                let _ = self.append_text(parent, text);
            }
            JsonNode::Comment { comment } => {
                let id = self.alloc(NodeType::Comment(comment));
                self.append_child(parent, id);
            }
        }

        path.truncate(path_len);
        Ok(())
    }
}
