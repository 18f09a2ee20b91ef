//! Integration tests for selecting nodes from a tree.

use quarry_dom::{DomTree, ElementData, NodeId};
use quarry_select::{Select, Selector, SelectorError, SelectorTree, select};

/// Document used by most tests:
///
/// ```text
/// html#html
///   body#body
///     div#main.container
///       p#p1.intro.lead
///       " "
///       p#p2
///       section#sec
///         p#p3
///       span#s1
///       p#p4
///     p#p5
/// ```
fn fixture() -> DomTree {
    DomTree::from_json_str(
        r#"{ "tag": "html", "attrs": { "id": "html" }, "children": [
            { "tag": "body", "attrs": { "id": "body" }, "children": [
                { "tag": "div", "attrs": { "id": "main", "class": "container" }, "children": [
                    { "tag": "p", "attrs": { "id": "p1", "class": "intro lead" } },
                    { "text": " " },
                    { "tag": "p", "attrs": { "id": "p2" } },
                    { "tag": "section", "attrs": { "id": "sec" }, "children": [
                        { "tag": "p", "attrs": { "id": "p3" } }
                    ] },
                    { "tag": "span", "attrs": { "id": "s1" } },
                    { "tag": "p", "attrs": { "id": "p4" } }
                ] },
                { "tag": "p", "attrs": { "id": "p5" } }
            ] }
        ] }"#,
    )
    .unwrap()
}

/// The `id` attribute of each node, for readable assertions.
fn ids<'a>(tree: &'a DomTree, nodes: &[NodeId]) -> Vec<&'a str> {
    nodes
        .iter()
        .map(|&n| tree.attribute(n, "id").unwrap_or("?"))
        .collect()
}

fn query<'a>(tree: &'a DomTree, selector: &str) -> Vec<&'a str> {
    let found = tree.select(selector).unwrap();
    ids(tree, &found)
}

// ========== compound selectors ==========

#[test]
fn test_tag_selector_returns_all_in_document_order() {
    let tree = DomTree::from_json_str(r#"{ "tag": "a", "children": [ { "tag": "b" }, { "tag": "b" } ] }"#)
        .unwrap();
    let a = tree.children(NodeId::ROOT)[0];
    let found = tree.select("b").unwrap();
    assert_eq!(found, tree.children(a).to_vec());
}

#[test]
fn test_tag_selector_over_fixture() {
    let tree = fixture();
    assert_eq!(query(&tree, "p"), vec!["p1", "p2", "p3", "p4", "p5"]);
    assert_eq!(query(&tree, "section"), vec!["sec"]);
    assert!(query(&tree, "table").is_empty());
}

#[test]
fn test_tag_match_is_case_sensitive() {
    let tree = fixture();
    assert!(query(&tree, "P").is_empty());
}

#[test]
fn test_id_selector() {
    let tree = fixture();
    assert_eq!(query(&tree, "div#main"), vec!["main"]);
    assert_eq!(query(&tree, "#p3"), vec!["p3"]);
    // Right id, wrong tag
    assert!(query(&tree, "span#main").is_empty());
    // Absent id is an empty result, not an error
    assert!(query(&tree, "div#missing").is_empty());
}

#[test]
fn test_multiple_classes_are_a_subset_test() {
    let mut tree = DomTree::new();
    let both = tree.append_element(
        NodeId::ROOT,
        ElementData::new("div").with_attr("class", "bar foo baz"),
    );
    let _only_foo = tree.append_element(NodeId::ROOT, ElementData::new("div").with_attr("class", "foo"));
    let _span = tree.append_element(NodeId::ROOT, ElementData::new("span").with_attr("class", "foo bar"));
    let _prefix = tree.append_element(NodeId::ROOT, ElementData::new("div").with_attr("class", "foobar"));

    assert_eq!(tree.select("div.foo.bar").unwrap(), vec![both]);
    assert_eq!(tree.select("div.bar.foo").unwrap(), vec![both]);
    // Repeating a class changes nothing
    assert_eq!(tree.select("div.foo.foo.bar").unwrap(), vec![both]);
}

#[test]
fn test_class_without_tag() {
    let tree = fixture();
    assert_eq!(query(&tree, ".lead"), vec!["p1"]);
    assert_eq!(query(&tree, ".intro.lead"), vec!["p1"]);
    assert_eq!(query(&tree, ".container"), vec!["main"]);
}

#[test]
fn test_universal_selector() {
    let tree = fixture();
    assert_eq!(
        query(&tree, "*"),
        vec!["html", "body", "main", "p1", "p2", "sec", "p3", "s1", "p4", "p5"]
    );
    assert_eq!(query(&tree, "section > *"), vec!["p3"]);
    assert_eq!(query(&tree, "*#s1"), vec!["s1"]);
}

#[test]
fn test_attribute_predicates_in_compound() {
    let mut tree = DomTree::new();
    let secure = tree.append_element(
        NodeId::ROOT,
        ElementData::new("a").with_attr("href", "https://example.com"),
    );
    let plain = tree.append_element(
        NodeId::ROOT,
        ElementData::new("a").with_attr("href", "http://example.com/logo.png"),
    );
    let bare = tree.append_element(NodeId::ROOT, ElementData::new("a"));

    assert_eq!(tree.select("a[href]").unwrap(), vec![secure, plain]);
    assert_eq!(tree.select(r#"a[href^="https"]"#).unwrap(), vec![secure]);
    assert_eq!(tree.select("a[href$='.png']").unwrap(), vec![plain]);
    assert_eq!(tree.select("[href*=example]").unwrap(), vec![secure, plain]);
    assert_eq!(
        tree.select("a[ href = \"https://example.com\" ]").unwrap(),
        vec![secure]
    );
    assert!(tree.select("a[title]").unwrap().is_empty());
    assert!(!tree.select("a").unwrap().is_empty());
    assert!(tree.select("a").unwrap().contains(&bare));
}

#[test]
fn test_pseudo_classes_are_ignored() {
    let tree = fixture();
    assert_eq!(query(&tree, "section p:first-child"), vec!["p3"]);
    assert_eq!(query(&tree, "p:nth-child(2n + 1)"), query(&tree, "p"));
    assert_eq!(query(&tree, "span::before"), vec!["s1"]);
}

#[test]
fn test_text_and_document_nodes_never_match() {
    let tree = fixture();
    let all = tree.select("*").unwrap();
    assert!(!all.contains(&NodeId::ROOT));
    assert!(all.iter().all(|&n| tree.as_element(n).is_some()));
}

// ========== combinators ==========

#[test]
fn test_child_combinator() {
    let tree = fixture();
    assert_eq!(query(&tree, "div > p"), vec!["p1", "p2", "p4"]);
    assert_eq!(query(&tree, "body > p"), vec!["p5"]);
    assert_eq!(query(&tree, "section>p"), vec!["p3"]);
}

#[test]
fn test_descendant_is_superset_of_child() {
    let tree = fixture();
    let child = query(&tree, "div > p");
    let descendant = query(&tree, "div p");
    assert_eq!(descendant, vec!["p1", "p2", "p3", "p4"]);
    assert!(child.iter().all(|id| descendant.contains(id)));
    assert!(descendant.len() > child.len());
}

#[test]
fn test_adjacent_sibling_skips_text_nodes() {
    let tree = fixture();
    // p1 and p2 are separated by a whitespace text node
    assert_eq!(query(&tree, "p + p"), vec!["p2"]);
    assert_eq!(query(&tree, "span + p"), vec!["p4"]);
    assert_eq!(query(&tree, "div + p"), vec!["p5"]);
    // section is followed by span, not p
    assert!(query(&tree, "section + p").is_empty());
}

#[test]
fn test_subsequent_sibling_combinator() {
    let tree = fixture();
    assert_eq!(query(&tree, "p ~ span"), vec!["s1"]);
    assert_eq!(query(&tree, "p ~ p"), vec!["p2", "p4"]);
    assert_eq!(query(&tree, "section ~ p"), vec!["p4"]);
    assert!(query(&tree, "span ~ section").is_empty());
}

#[test]
fn test_chained_combinators() {
    let tree = fixture();
    assert_eq!(query(&tree, "body > div > p"), vec!["p1", "p2", "p4"]);
    assert_eq!(query(&tree, "html p"), vec!["p1", "p2", "p3", "p4", "p5"]);
    assert_eq!(query(&tree, "div section > p"), vec!["p3"]);
    assert_eq!(query(&tree, "div#main > section p"), vec!["p3"]);
    assert_eq!(query(&tree, "body > div p + p"), vec!["p2"]);
    assert!(query(&tree, "html > div p").is_empty());
}

#[test]
fn test_chain_relates_to_matched_ancestor_not_subject() {
    // a > b c must find the outer b, whose parent is the a
    let tree = DomTree::from_json_str(
        r#"{ "tag": "a", "attrs": { "id": "a1" }, "children": [
            { "tag": "b", "attrs": { "id": "outer" }, "children": [
                { "tag": "b", "attrs": { "id": "inner" }, "children": [
                    { "tag": "c", "attrs": { "id": "c1" } }
                ] }
            ] }
        ] }"#,
    )
    .unwrap();
    assert_eq!(query(&tree, "a > b c"), vec!["c1"]);
    assert_eq!(query(&tree, "a > b > c"), Vec::<&str>::new());
    assert_eq!(query(&tree, "b > b > c"), vec!["c1"]);
}

#[test]
fn test_whitespace_around_selector_and_combinators() {
    let tree = fixture();
    assert_eq!(query(&tree, "  div   >\tp  "), vec!["p1", "p2", "p4"]);
    assert_eq!(query(&tree, "div\n p"), query(&tree, "div p"));
}

// ========== errors ==========

#[test]
fn test_empty_selector_is_malformed() {
    let tree = fixture();
    assert!(matches!(
        tree.select(""),
        Err(SelectorError::MalformedSelector { .. })
    ));
    assert!(matches!(
        tree.select("   "),
        Err(SelectorError::MalformedSelector { .. })
    ));
}

#[test]
fn test_two_ids_is_ambiguous() {
    let tree = fixture();
    assert_eq!(
        tree.select("div#a#b"),
        Err(SelectorError::AmbiguousId {
            compound: "div#a#b".to_string()
        })
    );
    // Errors abort the whole query, even when other parts are fine
    assert!(matches!(
        tree.select("div#a#b > p"),
        Err(SelectorError::AmbiguousId { .. })
    ));
}

#[test]
fn test_two_tags_is_an_error() {
    let tree = fixture();
    assert!(matches!(
        tree.select("*div"),
        Err(SelectorError::MultipleTags { .. })
    ));
}

#[test]
fn test_dangling_combinators_are_malformed() {
    let tree = fixture();
    for selector in ["div >", "> p", "div > > p", "div >> p", "div +~ p", "div > "] {
        assert!(
            matches!(
                tree.select(selector),
                Err(SelectorError::MalformedSelector { .. })
            ),
            "{selector:?} should be malformed"
        );
    }
}

// ========== reuse and entry points ==========

#[test]
fn test_selection_is_idempotent() {
    let tree = fixture();
    let first = tree.select("div p").unwrap();
    let second = tree.select("div p").unwrap();
    assert_eq!(first, second);

    let selector = Selector::parse("p ~ p").unwrap();
    assert_eq!(
        selector.select(&tree, NodeId::ROOT),
        selector.select(&tree, NodeId::ROOT)
    );
}

#[test]
fn test_free_function_with_subtree_root() {
    let tree = fixture();
    let section = tree.select("section").unwrap()[0];
    let found = select(&tree, section, "p").unwrap();
    assert_eq!(ids(&tree, &found), vec!["p3"]);

    // Combinators may look above the query root
    let found = select(&tree, section, "div p").unwrap();
    assert_eq!(ids(&tree, &found), vec!["p3"]);
}

#[test]
fn test_select_from_and_select_first() {
    let tree = fixture();
    let main = tree.select_first("#main").unwrap().unwrap();
    assert!(tree.select_from(main, "> p").is_err());

    let found = tree.select_from(main, "p").unwrap();
    assert_eq!(ids(&tree, &found), vec!["p1", "p2", "p3", "p4"]);

    let first = tree.select_first("div p").unwrap();
    assert_eq!(first.map(|n| tree.attribute(n, "id")), Some(Some("p1")));
    assert_eq!(tree.select_first("table").unwrap(), None);
}

#[test]
fn test_selector_matches_single_node() {
    let tree = fixture();
    let selector: Selector = "div > p".parse().unwrap();
    let p3 = tree.select_first("#p3").unwrap().unwrap();
    let p4 = tree.select_first("#p4").unwrap().unwrap();
    assert!(selector.matches(&tree, p4));
    assert!(!selector.matches(&tree, p3));
    assert!(!selector.matches(&tree, NodeId::ROOT));
}
