//! Tests for tree traversal: descendants, ancestors, and sibling iteration.

use arbor_dom::{DomTree, NodeId};

/// Build a small document:
///
/// ```text
/// root
/// └── html
///     ├── head
///     │   └── title
///     └── body
///         ├── div
///         │   └── p
///         └── footer
/// ```
fn build_sample(tree: &mut DomTree) -> [NodeId; 7] {
    let html = tree.create_element("html");
    let head = tree.create_element("head");
    let title = tree.create_element("title");
    let body = tree.create_element("body");
    let div = tree.create_element("div");
    let p = tree.create_element("p");
    let footer = tree.create_element("footer");

    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, head);
    tree.append_child(head, title);
    tree.append_child(html, body);
    tree.append_child(body, div);
    tree.append_child(div, p);
    tree.append_child(body, footer);

    [html, head, title, body, div, p, footer]
}

// ========== descendants ==========

#[test]
fn test_descendants_preorder() {
    let mut tree = DomTree::new();
    let [html, head, title, body, div, p, footer] = build_sample(&mut tree);

    let order: Vec<NodeId> = tree.descendants(html).collect();
    assert_eq!(order, vec![head, title, body, div, p, footer]);
}

#[test]
fn test_descendants_excludes_start_node() {
    let mut tree = DomTree::new();
    let [html, ..] = build_sample(&mut tree);

    assert!(tree.descendants(html).all(|id| id != html));
}

#[test]
fn test_descendants_of_leaf_is_empty() {
    let mut tree = DomTree::new();
    let [_, _, title, ..] = build_sample(&mut tree);

    assert_eq!(tree.descendants(title).count(), 0);
}

#[test]
fn test_descendants_of_subtree() {
    let mut tree = DomTree::new();
    let [_, _, _, body, div, p, footer] = build_sample(&mut tree);

    let order: Vec<NodeId> = tree.descendants(body).collect();
    assert_eq!(order, vec![div, p, footer]);
}

// ========== ancestors ==========

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = DomTree::new();
    let [html, _, _, body, div, p, _] = build_sample(&mut tree);

    let chain: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(chain, vec![div, body, html, NodeId::ROOT]);
}

#[test]
fn test_ancestors_of_root_is_empty() {
    let tree = DomTree::new();
    assert_eq!(tree.ancestors(NodeId::ROOT).count(), 0);
}

// ========== is_descendant_of ==========

#[test]
fn test_is_descendant_of_deep() {
    let mut tree = DomTree::new();
    let [html, _, _, body, _, p, _] = build_sample(&mut tree);

    assert!(tree.is_descendant_of(p, body));
    assert!(tree.is_descendant_of(p, html));
    assert!(tree.is_descendant_of(p, NodeId::ROOT));
}

#[test]
fn test_is_descendant_of_unrelated() {
    let mut tree = DomTree::new();
    let [_, head, _, _, _, p, footer] = build_sample(&mut tree);

    assert!(!tree.is_descendant_of(p, head));
    assert!(!tree.is_descendant_of(p, footer));
    // A node is not its own descendant
    assert!(!tree.is_descendant_of(p, p));
}

// ========== preceding siblings ==========

#[test]
fn test_preceding_siblings_in_reverse_order() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("ul");
    tree.append_child(NodeId::ROOT, parent);

    let a = tree.create_element("li");
    let b = tree.create_element("li");
    let c = tree.create_element("li");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    let before_c: Vec<NodeId> = tree.preceding_siblings(c).collect();
    assert_eq!(before_c, vec![b, a]);

    assert_eq!(tree.preceding_siblings(a).count(), 0);
}
