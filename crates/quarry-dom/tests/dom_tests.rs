//! Tests for tree construction, navigation and JSON loading.

use quarry_dom::{DomError, DomTree, ElementData, NodeId, NodeType};

fn tag_of(tree: &DomTree, id: NodeId) -> &str {
    tree.as_element(id).map_or("", |e| e.tag_name.as_str())
}

// ========== construction ==========

#[test]
fn test_new_tree_has_only_document() {
    let tree = DomTree::new();
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
    assert_eq!(tree.root(), NodeId::ROOT);
    assert!(matches!(
        tree.get(NodeId::ROOT).map(|n| &n.node_type),
        Some(NodeType::Document)
    ));
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_default_tree_is_never_empty() {
    let tree = DomTree::default();
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
}

#[test]
fn test_append_links_siblings() {
    let mut tree = DomTree::new();
    let ul = tree.append_element(NodeId::ROOT, ElementData::new("ul"));
    let a = tree.append_element(ul, ElementData::new("li"));
    let text = tree.append_text(ul, " ");
    let b = tree.append_element(ul, ElementData::new("li"));

    assert_eq!(tree.children(ul), &[a, text, b]);
    assert_eq!(tree.first_child(ul), Some(a));
    assert_eq!(tree.last_child(ul), Some(b));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(text));
    assert_eq!(tree.prev_sibling(b), Some(text));
    assert_eq!(tree.next_sibling(b), None);
    assert_eq!(tree.parent(b), Some(ul));
    assert_eq!(tree.as_text(text), Some(" "));
}

#[test]
fn test_ancestors_walk_to_document() {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
    let body = tree.append_element(html, ElementData::new("body"));
    let p = tree.append_element(body, ElementData::new("p"));

    let ancestors: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(ancestors, vec![body, html, NodeId::ROOT]);
    assert_eq!(tree.ancestors(NodeId::ROOT).count(), 0);
}

#[test]
fn test_preceding_siblings_nearest_first() {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));
    let a = tree.append_element(div, ElementData::new("a"));
    let b = tree.append_element(div, ElementData::new("b"));
    let c = tree.append_element(div, ElementData::new("c"));

    let preceding: Vec<NodeId> = tree.preceding_siblings(c).collect();
    assert_eq!(preceding, vec![b, a]);
}

#[test]
fn test_element_id_and_classes() {
    let element = ElementData::new("div")
        .with_attr("id", "main")
        .with_attr("class", "  bar foo\tbaz ");
    assert_eq!(element.id(), Some("main"));
    let classes = element.classes();
    assert_eq!(classes.len(), 3);
    assert!(classes.contains("foo"));
    assert!(classes.contains("bar"));
    assert!(classes.contains("baz"));

    let plain = ElementData::new("span");
    assert_eq!(plain.id(), None);
    assert!(plain.classes().is_empty());
}

// ========== JSON loading ==========

#[test]
fn test_from_json_nested_document() {
    let tree = DomTree::from_json_str(
        r#"[
            { "tag": "div", "attrs": { "id": "main", "class": "a b" }, "children": [
                { "tag": "p", "children": [ { "text": "hello" } ] },
                { "comment": "note" },
                { "tag": "p" }
            ] }
        ]"#,
    )
    .unwrap();

    let top = tree.children(NodeId::ROOT);
    assert_eq!(top.len(), 1);
    let div = top[0];
    assert_eq!(tag_of(&tree, div), "div");
    assert_eq!(tree.as_element(div).unwrap().id(), Some("main"));

    let kids = tree.children(div);
    assert_eq!(kids.len(), 3);
    assert_eq!(tag_of(&tree, kids[0]), "p");
    assert_eq!(tree.as_text(tree.children(kids[0])[0]), Some("hello"));
    assert!(matches!(
        tree.get(kids[1]).map(|n| &n.node_type),
        Some(NodeType::Comment(c)) if c == "note"
    ));
    assert_eq!(tree.prev_sibling(kids[2]), Some(kids[1]));
}

#[test]
fn test_from_json_single_top_level_node() {
    let tree = DomTree::from_json_str(r#"{ "tag": "html" }"#).unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tag_of(&tree, tree.children(NodeId::ROOT)[0]), "html");
}

#[test]
fn test_from_json_rejects_empty_tag() {
    let err = DomTree::from_json_str(r#"[{ "tag": "a", "children": [ { "tag": "" } ] }]"#)
        .unwrap_err();
    match err {
        DomError::EmptyTagName { path } => assert_eq!(path, "/0/0"),
        DomError::Json(e) => panic!("expected EmptyTagName, got {e}"),
    }
}

#[test]
fn test_from_json_rejects_garbage() {
    assert!(matches!(
        DomTree::from_json_str("{ not json"),
        Err(DomError::Json(_))
    ));
    assert!(matches!(
        DomTree::from_json_str(r#"{ "unknown": 1 }"#),
        Err(DomError::Json(_))
    ));
}
