//! Tests for DOM tree mutation methods: append_child, remove_child,
//! insert_before, move_children.

use arbor_dom::{DomTree, NodeId};

// ========== append_child re-attachment ==========

#[test]
fn test_append_child_moves_attached_node() {
    let mut tree = DomTree::new();
    let host_a = tree.create_element("div");
    let host_b = tree.create_element("section");
    tree.append_child(NodeId::ROOT, host_a);
    tree.append_child(NodeId::ROOT, host_b);

    let moved = tree.create_element("p");
    let sibling = tree.create_element("span");
    tree.append_child(host_a, moved);
    tree.append_child(host_a, sibling);

    tree.append_child(host_b, moved);

    // The old parent keeps only the sibling, with a clean chain
    assert_eq!(tree.children(host_a), &[sibling]);
    assert_eq!(tree.prev_sibling(sibling), None);
    assert_eq!(tree.next_sibling(sibling), None);

    assert_eq!(tree.children(host_b), &[moved]);
    assert_eq!(tree.parent(moved), Some(host_b));
    assert_eq!(tree.prev_sibling(moved), None);
    assert_eq!(tree.next_sibling(moved), None);
}

#[test]
fn test_append_child_same_parent_moves_to_end() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("ul");
    tree.append_child(NodeId::ROOT, parent);

    let a = tree.create_element("a");
    let b = tree.create_element("b");
    tree.append_child(parent, a);
    tree.append_child(parent, b);

    tree.append_child(parent, a);

    assert_eq!(tree.children(parent), &[b, a]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), Some(a));
    assert_eq!(tree.prev_sibling(a), Some(b));
    assert_eq!(tree.next_sibling(a), None);
}

#[test]
fn test_append_child_reattached_node_traversed_once() {
    let mut tree = DomTree::new();
    let host_a = tree.create_element("div");
    let host_b = tree.create_element("section");
    tree.append_child(NodeId::ROOT, host_a);
    tree.append_child(NodeId::ROOT, host_b);

    let moved = tree.create_element("p");
    tree.append_child(host_a, moved);
    tree.append_child(host_b, moved);

    let visits = tree
        .descendants(NodeId::ROOT)
        .filter(|&id| id == moved)
        .count();
    assert_eq!(visits, 1);
}

#[test]
fn test_append_child_into_own_subtree_is_noop() {
    let mut tree = DomTree::new();
    let outer = tree.create_element("div");
    let inner = tree.create_element("p");
    tree.append_child(NodeId::ROOT, outer);
    tree.append_child(outer, inner);

    tree.append_child(inner, outer);
    tree.append_child(outer, outer);

    assert_eq!(tree.parent(outer), Some(NodeId::ROOT));
    assert_eq!(tree.children(outer), &[inner]);
    assert_eq!(tree.children(inner).len(), 0);
    // Traversal still terminates: outer then inner, nothing twice
    assert_eq!(tree.descendants(NodeId::ROOT).count(), 2);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    tree.append_child(NodeId::ROOT, parent);

    let child = tree.create_element("p");
    tree.append_child(parent, child);

    assert_eq!(tree.children(parent).len(), 1);

    tree.remove_child(parent, child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_first_of_three() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    tree.append_child(NodeId::ROOT, parent);

    let a = tree.create_element("a");
    let b = tree.create_element("b");
    let c = tree.create_element("c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, a);

    // b is now first child, c is second
    assert_eq!(tree.children(parent), &[b, c]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    tree.append_child(NodeId::ROOT, parent);

    let a = tree.create_element("a");
    let b = tree.create_element("b");
    let c = tree.create_element("c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    // a and c are siblings now
    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_last_of_three() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    tree.append_child(NodeId::ROOT, parent);

    let a = tree.create_element("a");
    let b = tree.create_element("b");
    let c = tree.create_element("c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, c);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_child_not_a_child_is_noop() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    let other = tree.create_element("span");
    tree.append_child(NodeId::ROOT, parent);
    tree.append_child(NodeId::ROOT, other);

    let child = tree.create_element("p");
    tree.append_child(parent, child);

    // child belongs to parent, not other; nothing should change
    tree.remove_child(other, child);

    assert_eq!(tree.children(parent), &[child]);
    assert_eq!(tree.parent(child), Some(parent));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    tree.append_child(NodeId::ROOT, parent);

    let existing = tree.create_element("b");
    tree.append_child(parent, existing);

    let new_child = tree.create_element("a");
    tree.insert_before(parent, new_child, existing);

    // new_child should be first, existing second
    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    tree.append_child(NodeId::ROOT, parent);

    let a = tree.create_element("a");
    let c = tree.create_element("c");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = tree.create_element("b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_before_missing_reference_appends() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    tree.append_child(NodeId::ROOT, parent);

    let a = tree.create_element("a");
    tree.append_child(parent, a);

    // stranger is not a child of parent, so this is the "before null" case
    let stranger = tree.create_element("s");
    let b = tree.create_element("b");
    tree.insert_before(parent, b, stranger);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
}

#[test]
fn test_insert_before_moves_attached_node() {
    let mut tree = DomTree::new();
    let host_a = tree.create_element("div");
    let host_b = tree.create_element("section");
    tree.append_child(NodeId::ROOT, host_a);
    tree.append_child(NodeId::ROOT, host_b);

    let moved = tree.create_element("p");
    tree.append_child(host_a, moved);
    let anchor = tree.create_element("hr");
    tree.append_child(host_b, anchor);

    tree.insert_before(host_b, moved, anchor);

    assert_eq!(tree.children(host_a).len(), 0);
    assert_eq!(tree.children(host_b), &[moved, anchor]);
    assert_eq!(tree.parent(moved), Some(host_b));
    assert_eq!(tree.next_sibling(moved), Some(anchor));
    assert_eq!(tree.prev_sibling(anchor), Some(moved));
}

// ========== move_children ==========

#[test]
fn test_move_children_basic() {
    let mut tree = DomTree::new();
    let from = tree.create_element("div");
    let to = tree.create_element("span");
    tree.append_child(NodeId::ROOT, from);
    tree.append_child(NodeId::ROOT, to);

    let a = tree.create_element("a");
    let b = tree.create_element("b");
    tree.append_child(from, a);
    tree.append_child(from, b);

    tree.move_children(from, to);

    // from should be empty
    assert_eq!(tree.children(from).len(), 0);
    // to should have both children
    assert_eq!(tree.children(to), &[a, b]);
    assert_eq!(tree.parent(a), Some(to));
    assert_eq!(tree.parent(b), Some(to));
}

#[test]
fn test_move_children_appends_to_existing() {
    let mut tree = DomTree::new();
    let from = tree.create_element("div");
    let to = tree.create_element("span");
    tree.append_child(NodeId::ROOT, from);
    tree.append_child(NodeId::ROOT, to);

    let existing = tree.create_element("x");
    tree.append_child(to, existing);

    let moved = tree.create_element("y");
    tree.append_child(from, moved);

    tree.move_children(from, to);

    assert_eq!(tree.children(to), &[existing, moved]);
    // Sibling links between existing and moved
    assert_eq!(tree.next_sibling(existing), Some(moved));
    assert_eq!(tree.prev_sibling(moved), Some(existing));
}

#[test]
fn test_move_children_empty_source() {
    let mut tree = DomTree::new();
    let from = tree.create_element("div");
    let to = tree.create_element("span");
    tree.append_child(NodeId::ROOT, from);
    tree.append_child(NodeId::ROOT, to);

    // Moving no children should be a no-op
    tree.move_children(from, to);

    assert_eq!(tree.children(from).len(), 0);
    assert_eq!(tree.children(to).len(), 0);
}

#[test]
fn test_move_children_flushes_fragment() {
    let mut tree = DomTree::new();
    let fragment = tree.create_fragment();

    let a = tree.create_element("a");
    let text = tree.create_text_node("hello".to_string());
    tree.append_child(fragment, a);
    tree.append_child(fragment, text);

    let target = tree.create_element("div");
    tree.append_child(NodeId::ROOT, target);

    tree.move_children(fragment, target);

    // The fragment itself stays behind, empty and detached
    assert_eq!(tree.children(fragment).len(), 0);
    assert_eq!(tree.parent(fragment), None);
    assert_eq!(tree.children(target), &[a, text]);
    assert_eq!(tree.parent(a), Some(target));
    assert_eq!(tree.parent(text), Some(target));
}
