//! Formatting of matched nodes.

use std::fmt::Write;

use owo_colors::OwoColorize;
use quarry_dom::{DomTree, NodeId};

/// Renders matches as `/html[1]/body[1]/p[2]  <p#intro.lead>`.
pub struct Printer<'a> {
    tree: &'a DomTree,
    color: bool,
}

impl<'a> Printer<'a> {
    /// Printer over `tree`; `color` enables ANSI styling.
    pub const fn new(tree: &'a DomTree, color: bool) -> Self {
        Self { tree, color }
    }

    /// Path and summary of an element, one line.
    pub fn describe(&self, node: NodeId) -> String {
        let path = self.path(node);
        let summary = self.summary(node);
        if self.color {
            format!("{}  {}", path.dimmed(), summary.cyan())
        } else {
            format!("{path}  {summary}")
        }
    }

    /// Tag-and-position path from the document, e.g. `/html[1]/body[1]/p[2]`.
    ///
    /// Positions count earlier siblings with the same tag, starting at 1.
    pub fn path(&self, node: NodeId) -> String {
        let mut steps: Vec<NodeId> = self.tree.ancestors(node).collect();
        steps.reverse();
        steps.push(node);

        let mut path = String::new();
        for id in steps {
            let Some(element) = self.tree.as_element(id) else {
                continue;
            };
            let position = 1 + self
                .tree
                .preceding_siblings(id)
                .filter(|&s| {
                    self.tree
                        .as_element(s)
                        .is_some_and(|e| e.tag_name == element.tag_name)
                })
                .count();
            let _ = write!(path, "/{}[{position}]", element.tag_name);
        }
        path
    }

    /// `<tag#id.class1.class2>` with classes in attribute order.
    pub fn summary(&self, node: NodeId) -> String {
        let Some(element) = self.tree.as_element(node) else {
            return String::from("<?>");
        };
        let mut summary = format!("<{}", element.tag_name);
        if let Some(id) = element.id() {
            let _ = write!(summary, "#{id}");
        }
        if let Some(classes) = element.attrs.get("class") {
            for class in classes.split_ascii_whitespace() {
                let _ = write!(summary, ".{class}");
            }
        }
        summary.push('>');
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_dom::ElementData;

    #[test]
    fn test_describe_without_color() {
        let mut tree = DomTree::new();
        let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
        let _first = tree.append_element(html, ElementData::new("p"));
        let _div = tree.append_element(html, ElementData::new("div"));
        let second = tree.append_element(
            html,
            ElementData::new("p")
                .with_attr("id", "intro")
                .with_attr("class", "lead  big"),
        );

        let printer = Printer::new(&tree, false);
        assert_eq!(printer.path(second), "/html[1]/p[2]");
        assert_eq!(printer.summary(second), "<p#intro.lead.big>");
        assert_eq!(printer.describe(second), "/html[1]/p[2]  <p#intro.lead.big>");
    }

    #[test]
    fn test_colored_output_keeps_text() {
        let mut tree = DomTree::new();
        let a = tree.append_element(NodeId::ROOT, ElementData::new("a"));
        let line = Printer::new(&tree, true).describe(a);
        assert!(line.contains("/a[1]"));
        assert!(line.contains("<a>"));
        assert!(line.contains('\x1b'));
    }
}
