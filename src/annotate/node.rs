//! Node - minimal render-target tree
//!
//! The annotation engine rewrites a rendered content tree in place: element
//! nodes carry a tag and a class list, text nodes carry literal text. Trees
//! cross the JS boundary as JSON (`NodeSpec`), the same hydrate-with-JSON
//! pattern the rest of the crate uses for records and statistics.
//!
//! Nodes are cheap handles (`Rc<RefCell<..>>`) with parent back-links, so
//! detaching, re-parenting, and in-place content replacement all work the way
//! the corresponding DOM operations do. Everything here is single-threaded.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Shared handle to one tree node. Cloning the handle does not clone the node.
#[derive(Clone)]
pub struct Node {
    inner: Rc<RefCell<NodeData>>,
}

#[derive(Debug)]
enum NodeKind {
    Text(String),
    Element { tag: String, classes: Vec<String> },
}

struct NodeData {
    kind: NodeKind,
    children: Vec<Node>,
    parent: Weak<RefCell<NodeData>>,
    /// Click-listener flag; armed and cleared through `ClickBinding`.
    listening: bool,
}

impl Node {
    /// Create a detached text node.
    pub fn text(content: impl Into<String>) -> Node {
        Node::from_kind(NodeKind::Text(content.into()))
    }

    /// Create a detached element node with no classes or children.
    pub fn element(tag: impl Into<String>) -> Node {
        Node::from_kind(NodeKind::Element {
            tag: tag.into(),
            classes: Vec::new(),
        })
    }

    fn from_kind(kind: NodeKind) -> Node {
        Node {
            inner: Rc::new(RefCell::new(NodeData {
                kind,
                children: Vec::new(),
                parent: Weak::new(),
                listening: false,
            })),
        }
    }

    /// Identity comparison: two handles to the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn is_element(&self) -> bool {
        matches!(self.inner.borrow().kind, NodeKind::Element { .. })
    }

    /// Element tag, `None` for text nodes.
    pub fn tag(&self) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// Literal content of a text node, `None` for elements.
    pub fn text_content(&self) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Text(text) => Some(text.clone()),
            NodeKind::Element { .. } => None,
        }
    }

    // -------------------- classes --------------------

    pub fn classes(&self) -> Vec<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element { classes, .. } => classes.clone(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        match &self.inner.borrow().kind {
            NodeKind::Element { classes, .. } => classes.iter().any(|c| c == class),
            NodeKind::Text(_) => false,
        }
    }

    /// Add a class if absent, classList-style. No-op on text nodes.
    pub fn add_class(&self, class: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.inner.borrow_mut().kind {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }
    }

    /// Remove a class if present. No-op on text nodes.
    pub fn remove_class(&self, class: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.inner.borrow_mut().kind {
            classes.retain(|c| c != class);
        }
    }

    // -------------------- tree structure --------------------

    pub fn parent(&self) -> Option<Node> {
        self.inner.borrow().parent.upgrade().map(|inner| Node { inner })
    }

    pub fn children(&self) -> Vec<Node> {
        self.inner.borrow().children.clone()
    }

    /// Append `child`, detaching it from any previous parent first.
    pub fn append_child(&self, child: &Node) {
        child.detach();
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(child.clone());
    }

    /// Remove this node from its parent's child list, if attached.
    pub fn detach(&self) {
        let parent = self.parent();
        if let Some(parent) = parent {
            parent
                .inner
                .borrow_mut()
                .children
                .retain(|c| !c.ptr_eq(self));
        }
        self.inner.borrow_mut().parent = Weak::new();
    }

    /// Replace the entire content of this node with `new_children`, in order.
    pub fn replace_children(&self, new_children: Vec<Node>) {
        let old = std::mem::take(&mut self.inner.borrow_mut().children);
        for child in old {
            child.inner.borrow_mut().parent = Weak::new();
        }
        for child in new_children {
            self.append_child(&child);
        }
    }

    /// True when `ancestor` appears on this node's parent chain.
    pub fn has_ancestor(&self, ancestor: &Node) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.ptr_eq(ancestor) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// All descendants in document (pre-)order, excluding this node.
    pub fn descendants(&self) -> Vec<Node> {
        let mut out = Vec::new();
        for child in self.children() {
            out.push(child.clone());
            out.extend(child.descendants());
        }
        out
    }

    /// Concatenated text of all descendant text nodes, in document order.
    pub fn inner_text(&self) -> String {
        match &self.inner.borrow().kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element { .. } => {
                self.children().iter().map(Node::inner_text).collect()
            }
        }
    }

    // -------------------- interaction flag --------------------

    pub fn set_listening(&self, listening: bool) {
        self.inner.borrow_mut().listening = listening;
    }

    pub fn is_listening(&self) -> bool {
        self.inner.borrow().listening
    }

    // -------------------- serde boundary --------------------

    /// Build a tree from its serialized form.
    pub fn from_spec(spec: &NodeSpec) -> Node {
        match &spec.tag {
            Some(tag) => {
                let node = Node::element(tag.clone());
                for class in &spec.classes {
                    node.add_class(class);
                }
                for child in &spec.children {
                    node.append_child(&Node::from_spec(child));
                }
                node
            }
            None => Node::text(spec.text.clone().unwrap_or_default()),
        }
    }

    /// Serialize this subtree.
    pub fn to_spec(&self) -> NodeSpec {
        match &self.inner.borrow().kind {
            NodeKind::Text(text) => NodeSpec {
                tag: None,
                text: Some(text.clone()),
                classes: Vec::new(),
                children: Vec::new(),
            },
            NodeKind::Element { tag, classes } => NodeSpec {
                tag: Some(tag.clone()),
                text: None,
                classes: classes.clone(),
                children: self.children().iter().map(Node::to_spec).collect(),
            },
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({:?})", self.to_spec())
    }
}

/// Serialized node tree: `tag: None` means a text node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// Shorthand for a text-node spec.
    pub fn text(content: impl Into<String>) -> NodeSpec {
        NodeSpec {
            text: Some(content.into()),
            ..NodeSpec::default()
        }
    }

    /// Shorthand for an element spec with children.
    pub fn element(tag: impl Into<String>, children: Vec<NodeSpec>) -> NodeSpec {
        NodeSpec {
            tag: Some(tag.into()),
            children,
            ..NodeSpec::default()
        }
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_parent_link() {
        let parent = Node::element("div");
        let child = Node::text("hola");
        parent.append_child(&child);

        assert_eq!(parent.children().len(), 1);
        assert!(child.parent().expect("attached").ptr_eq(&parent));
    }

    #[test]
    fn test_detach_removes_from_parent() {
        let parent = Node::element("div");
        let child = Node::text("hola");
        parent.append_child(&child);

        child.detach();
        assert!(parent.children().is_empty());
        assert!(child.parent().is_none());

        // Detaching twice is safe.
        child.detach();
    }

    #[test]
    fn test_reparenting_moves_node() {
        let first = Node::element("div");
        let second = Node::element("div");
        let child = Node::text("x");

        first.append_child(&child);
        second.append_child(&child);

        assert!(first.children().is_empty());
        assert!(child.parent().expect("attached").ptr_eq(&second));
    }

    #[test]
    fn test_inner_text_concatenates_in_document_order() {
        let p = Node::element("p");
        let span = Node::element("span");
        span.append_child(&Node::text("dos"));
        p.append_child(&Node::text("uno "));
        p.append_child(&span);
        p.append_child(&Node::text(" tres"));

        assert_eq!(p.inner_text(), "uno dos tres");
    }

    #[test]
    fn test_replace_children_clears_old_parents() {
        let p = Node::element("p");
        let old = Node::text("old");
        p.append_child(&old);

        p.replace_children(vec![Node::text("a"), Node::text("b")]);

        assert!(old.parent().is_none());
        assert_eq!(p.inner_text(), "ab");
    }

    #[test]
    fn test_class_list_semantics() {
        let span = Node::element("span");
        span.add_class("L2");
        span.add_class("L2");
        span.add_class("unverified");

        assert_eq!(span.classes(), vec!["L2", "unverified"]);

        span.remove_class("unverified");
        assert!(!span.has_class("unverified"));
        span.remove_class("unverified");
    }

    #[test]
    fn test_has_ancestor() {
        let root = Node::element("div");
        let article = Node::element("article");
        let p = Node::element("p");
        root.append_child(&article);
        article.append_child(&p);

        assert!(p.has_ancestor(&root));
        assert!(p.has_ancestor(&article));
        assert!(!article.has_ancestor(&p));
    }

    #[test]
    fn test_spec_round_trip() {
        let spec = NodeSpec::element(
            "p",
            vec![
                NodeSpec::text("uno "),
                NodeSpec {
                    tag: Some("span".into()),
                    classes: vec!["L2".into(), "known".into()],
                    children: vec![NodeSpec::text("dos")],
                    ..NodeSpec::default()
                },
            ],
        );

        let node = Node::from_spec(&spec);
        assert_eq!(node.to_spec(), spec);
        assert_eq!(node.inner_text(), "uno dos");
    }

    #[test]
    fn test_spec_json_shape() {
        let spec = NodeSpec::element("p", vec![NodeSpec::text("hola")]);
        let json = serde_json::to_string(&spec).expect("serializes");
        assert_eq!(json, r#"{"tag":"p","children":[{"text":"hola"}]}"#);

        let back: NodeSpec = serde_json::from_str(&json).expect("parses");
        assert_eq!(back, spec);
    }
}
