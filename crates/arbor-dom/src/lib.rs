//! Headless DOM tree for the arbor builder.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), without any rendering
//! or script surface. It is the target tree that the materializer in
//! `arbor-build` constructs into, and is usable entirely server-side.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Nodes are never reclaimed; removal only detaches a subtree from
//! its parent, leaving it addressable for re-insertion.

use std::collections::{HashMap, HashSet};

pub mod event;

pub use event::{Event, EventHandler, EventListener};

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Map of directly-assigned property names to values for an element.
pub type PropertiesMap = HashMap<String, PropValue>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// A `NodeId` is `Copy` and stays valid for the life of its tree: the arena
/// never reclaims nodes, so an id held across mutations keeps naming the
/// same node. Ids from one tree mean nothing in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node every tree starts with, always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// Relationships are stored as arena indices in both directions, so walking
/// up, down, or sideways is O(1) and never borrows more than one node.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.2 Node tree](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.2 Node tree](https://dom.spec.whatwg.org/#concept-tree-child)
    /// Child ids in tree order. The sibling links below mirror this list.
    pub children: Vec<NodeId>,

    /// [§ 4.2 Node tree](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    /// Id of the sibling immediately after this node under the same parent.
    pub next_sibling: Option<NodeId>,

    /// [§ 4.2 Node tree](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    /// Id of the sibling immediately before this node under the same parent.
    pub prev_sibling: Option<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    /// "The document... serves as an entry point into the content."
    Document,
    /// [§ 4.7 Interface DocumentFragment](https://dom.spec.whatwg.org/#interface-documentfragment)
    /// "A DocumentFragment node... can be used as a lightweight Document."
    ///
    /// The materializer allocates one of these as the host container when it
    /// is invoked without an explicit target.
    Fragment,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    ///
    /// Text data is always literal character data; markup placed here is
    /// never reinterpreted as structure.
    Text(String),
    /// [§ 4.12 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    /// "Comment nodes are known as comments."
    Comment(String),
}

/// A directly-assigned node property value.
///
/// Properties model the direct-assignment surface of DOM bindings (fields set
/// on the node object itself), as opposed to attributes, which are the
/// string-valued markup surface. Only scalar values are representable here;
/// structured values are not assignable as properties.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// A string property, e.g. `value` on a form control.
    String(String),
    /// An integer property, e.g. `tabIndex`.
    Int(i64),
    /// A floating-point property.
    Float(f64),
    /// A boolean property, e.g. `checked`.
    Bool(bool),
    /// An explicit null assignment.
    Null,
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// - "Elements have an associated namespace, namespace prefix, local name, custom element state,
///    custom element definition, is value."
/// - "When an element is created, its local name is always given."
///
/// NOTE: We only store tag_name (local name), attrs, direct properties, and
/// event listeners. Full spec compliance would require namespace handling,
/// custom elements, etc.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
    /// Directly-assigned properties, distinct from attributes.
    pub props: PropertiesMap,
    /// [§ 2.7 Interface EventTarget](https://dom.spec.whatwg.org/#interface-eventtarget)
    /// "Each EventTarget object has an associated event listener list."
    ///
    /// Registration order is preserved; registration is additive.
    pub listeners: Vec<EventListener>,
}

impl ElementData {
    /// Create element data for a tag with no attributes, properties, or
    /// listeners.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        ElementData {
            tag_name: tag_name.to_string(),
            attrs: AttributesMap::new(),
            props: PropertiesMap::new(),
            listeners: Vec::new(),
        }
    }

    /// The element's `id` attribute value, if present.
    ///
    /// [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes)
    /// "The id attribute specifies its element's unique identifier (ID)."
    pub fn id(&self) -> Option<&String> {
        self.attrs.get("id")
    }

    /// The set of class names from the `class` attribute.
    ///
    /// [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes)
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens."
    ///
    /// Splitting is on runs of ASCII whitespace, so doubled separators never
    /// produce an empty class name.
    pub fn classes(&self) -> HashSet<&str> {
        self.attrs
            .get("class")
            .map(|classlist| classlist.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// All nodes live in one contiguous vector and refer to each other by
/// [`NodeId`] index, which gives:
/// - O(1) access to any node and O(1) parent/sibling steps
/// - no borrowing issues (indices instead of references)
/// - detached subtrees (e.g. freshly materialized fragments) that live in
///   the same arena until attached
#[derive(Debug, Clone)]
pub struct DomTree {
    /// Every node ever allocated, attached or not, indexed by NodeId.
    /// The Document node is always at index 0 (NodeId::ROOT).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only its document node.
    pub fn new() -> Self {
        DomTree {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
                next_sibling: None,
                prev_sibling: None,
            }],
        }
    }

    /// Id of the document node.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Borrow a node, or None if `id` was never allocated here.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutably borrow a node, or None if `id` was never allocated here.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Total number of nodes allocated in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes (a freshly created tree never does;
    /// it always has its document node).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether an ID refers to a node in this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Push a new node into the arena and return its id.
    /// The node starts out detached; link it with [`DomTree::append_child`]
    /// or [`DomTree::insert_before`].
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.5 createElement](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// "Creates an element with the given local name."
    ///
    /// The element is detached; attach it with [`DomTree::append_child`].
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(tag_name)))
    }

    /// [§ 4.5 createTextNode](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    ///
    /// "Creates a Text node with the given data."
    pub fn create_text_node(&mut self, data: String) -> NodeId {
        self.alloc(NodeType::Text(data))
    }

    /// [§ 4.5 createDocumentFragment](https://dom.spec.whatwg.org/#dom-document-createdocumentfragment)
    ///
    /// "Creates a DocumentFragment node."
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeType::Fragment)
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`, updating all
    /// relationships. An attached `child` is moved, not copied: pre-insert
    /// adopts the node ("If node's parent is non-null, then remove node",
    /// [Adopt](https://dom.spec.whatwg.org/#concept-node-adopt)), so a node
    /// never sits in two child lists. Appending a node to itself or into its
    /// own subtree would close a cycle; the standard rejects it ("If node is
    /// a host-including inclusive ancestor of parent, then throw a
    /// `HierarchyRequestError`") and here the call does nothing.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.is_descendant_of(parent, child) {
            return;
        }
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.remove_child(old_parent, child);
        }

        // Remember the old last child so the sibling chain can be extended
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].next_sibling = None;

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        } else {
            self.nodes[child.0].prev_sibling = None;
        }
    }

    /// [§ 4.2.2 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// "To pre-insert a node into a parent before a child..."
    ///
    /// Inserts `child` into `parent` immediately before `reference`. If
    /// `reference` is not a child of `parent`, `child` is appended instead
    /// (the "before null" case). An attached `child` is moved out of its old
    /// position first; inserting a node into its own subtree does nothing,
    /// as in [`DomTree::append_child`].
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        if parent == child || self.is_descendant_of(parent, child) {
            return;
        }
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.remove_child(old_parent, child);
        }

        let Some(position) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == reference)
        else {
            self.append_child(parent, child);
            return;
        };

        self.nodes[parent.0].children.insert(position, child);
        self.nodes[child.0].parent = Some(parent);

        // Link to the preceding sibling, if any
        let before = if position > 0 {
            Some(self.nodes[parent.0].children[position - 1])
        } else {
            None
        };
        self.nodes[child.0].prev_sibling = before;
        if let Some(prev_id) = before {
            self.nodes[prev_id.0].next_sibling = Some(child);
        }

        // Link to the reference node
        self.nodes[child.0].next_sibling = Some(reference);
        self.nodes[reference.0].prev_sibling = Some(child);
    }

    /// [§ 4.2.2 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// "To remove a node... remove node from its parent's children."
    ///
    /// Detaches `child` from `parent`, relinking the surrounding siblings.
    /// The node remains allocated in the arena and may be re-attached later.
    /// Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(position) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == child)
        else {
            return;
        };

        let _ = self.nodes[parent.0].children.remove(position);

        let before = self.nodes[child.0].prev_sibling;
        let after = self.nodes[child.0].next_sibling;
        if let Some(prev_id) = before {
            self.nodes[prev_id.0].next_sibling = after;
        }
        if let Some(next_id) = after {
            self.nodes[next_id.0].prev_sibling = before;
        }

        self.nodes[child.0].parent = None;
        self.nodes[child.0].prev_sibling = None;
        self.nodes[child.0].next_sibling = None;
    }

    /// Move every child of `from` to the end of `to`'s child list, in order.
    ///
    /// This is the fragment-flush operation: call sites that materialized
    /// into a fresh fragment use it to transplant the result into their real
    /// destination, mirroring how appending a DocumentFragment moves its
    /// children rather than the fragment itself
    /// ([§ 4.2.2 Insert](https://dom.spec.whatwg.org/#concept-node-insert),
    /// "If node is a DocumentFragment node, queue a tree mutation record...
    /// with nodes set to node's children").
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let moved = std::mem::take(&mut self.nodes[from.0].children);
        for &child in &moved {
            // Clear stale links from the old sibling chain before re-appending
            self.nodes[child.0].parent = None;
            self.nodes[child.0].prev_sibling = None;
            self.nodes[child.0].next_sibling = None;
        }
        for child in moved {
            self.append_child(to, child);
        }
    }

    /// Parent of a node. None for the document, for detached nodes, and for
    /// unknown ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Child list of a node, in tree order. Empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// First child of a node, if it has any.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Last child of a node, if it has any.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Next sibling in the parent's child list.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.next_sibling)
    }

    /// Previous sibling in the parent's child list.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.prev_sibling)
    }

    /// [§ 4.2 Node tree](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings, nearest first.
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// [§ 4.2.6 Tree order](https://dom.spec.whatwg.org/#concept-tree-order)
    ///
    /// "Tree order is preorder, depth-first traversal."
    ///
    /// Iterate over every descendant of a node in document order. The start
    /// node itself is not yielded.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        DescendantIterator { tree: self, stack }
    }

    /// Element data of the node, if it is an element.
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|node| match &node.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Mutable element data of the node, if it is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|node| match &mut node.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Character data of the node, if it is a text node.
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|node| match &node.node_type {
            NodeType::Text(data) => Some(data.as_str()),
            _ => None,
        })
    }

    /// [§ 4.9 setAttribute](https://dom.spec.whatwg.org/#dom-element-setattribute)
    ///
    /// "Sets the value of element's first attribute whose qualified name is
    /// qualifiedName to value" — or appends a new attribute.
    ///
    /// Returns false if `id` is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        match self.as_element_mut(id) {
            Some(data) => {
                let _ = data.attrs.insert(name.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    /// [§ 4.9 getAttribute](https://dom.spec.whatwg.org/#dom-element-getattribute)
    ///
    /// "Returns element's first attribute whose qualified name is
    /// qualifiedName, and null otherwise."
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id)
            .and_then(|data| data.attrs.get(name).map(String::as_str))
    }

    /// Assign a property directly onto an element, overwriting any previous
    /// assignment under the same name. No coercion is performed on the value.
    ///
    /// Returns false if `id` is not an element.
    pub fn set_property(&mut self, id: NodeId, name: &str, value: PropValue) -> bool {
        match self.as_element_mut(id) {
            Some(data) => {
                let _ = data.props.insert(name.to_string(), value);
                true
            }
            None => false,
        }
    }

    /// Read back a directly-assigned property, if any.
    pub fn property(&self, id: NodeId, name: &str) -> Option<&PropValue> {
        self.as_element(id).and_then(|data| data.props.get(name))
    }

    /// [§ 2.7 addEventListener](https://dom.spec.whatwg.org/#dom-eventtarget-addeventlistener)
    ///
    /// "Appends an event listener for events whose type attribute value is
    /// type."
    ///
    /// Registration is additive: existing listeners for the same event type
    /// are never overwritten. Returns false if `id` is not an element.
    pub fn add_event_listener(&mut self, id: NodeId, event_type: &str, handler: EventHandler) -> bool {
        match self.as_element_mut(id) {
            Some(data) => {
                data.listeners.push(EventListener {
                    event_type: event_type.to_string(),
                    handler,
                });
                true
            }
            None => false,
        }
    }

    /// [§ 2.9 Dispatching events](https://dom.spec.whatwg.org/#dispatching-events)
    ///
    /// Invoke every handler registered on `id` for `event_type`, in
    /// registration order, passing an [`Event`] naming the type and target.
    /// Delivery is target-only: no capture or bubble phases.
    ///
    /// Returns the number of handlers invoked (0 for non-elements or when no
    /// listener matches).
    pub fn dispatch_event(&self, id: NodeId, event_type: &str) -> usize {
        let Some(data) = self.as_element(id) else {
            return 0;
        };
        // Clone the matching handlers first so a handler that re-enters the
        // tree immutably cannot observe a partially-iterated listener list.
        let handlers: Vec<EventHandler> = data
            .listeners
            .iter()
            .filter(|listener| listener.event_type == event_type)
            .map(|listener| listener.handler.clone())
            .collect();

        let event = Event {
            event_type: event_type.to_string(),
            target: id,
        };
        for handler in &handlers {
            handler.call(&event);
        }
        handlers.len()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node, parent first.
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

/// Iterator over preceding siblings of a node, nearest first.
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

/// Iterator over all descendants of a node in document order.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Push children in reverse so the first child is popped next,
        // yielding preorder depth-first traversal.
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
