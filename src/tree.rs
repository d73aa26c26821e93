//! In-memory SLON document tree.
//!
//! A [`Document`] owns every block as a [`Node`] in a flat arena and hands out
//! [`NodeId`] handles. Ownership runs strictly from the root down through each
//! node's `children`; the `parent` link is only a lookup handle, so the tree
//! never forms reference cycles.
//!
//! ## Building a tree
//!
//! ```rust
//! use slon::Document;
//!
//! let mut doc = Document::with_root();
//! let root = doc.root().unwrap();
//! doc[root].set("title", "users");
//!
//! let alice = doc.add_child(root);
//! doc[alice].set("name", "user1");
//! let bob = doc.add_child(root);
//! doc[bob].set("name", "user2");
//!
//! assert_eq!(doc.find_child(root, "name", "user2"), Some(bob));
//! assert_eq!(doc[bob].parent(), Some(root));
//! ```

use crate::{Entries, Error, Result};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Handle to a node inside a [`Document`].
///
/// Handles are only meaningful for the document that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the document's arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One brace-delimited block: ordered pairs plus ordered child blocks.
#[derive(Debug, Clone, Default)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    entries: Entries,
}

impl Node {
    /// Enclosing block, `None` for the root and for detached nodes.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Child at `index`, or `None` when out of range.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied()
    }

    #[must_use]
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut Entries {
        &mut self.entries
    }

    /// Sets a pair. An existing key keeps its position and gets the new value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter()
    }

    /// Number of key/value pairs (children are not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a value stored as `"true"` or `"false"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for any other text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slon::Document;
    ///
    /// let mut doc = Document::with_root();
    /// let root = doc.root().unwrap();
    /// doc[root].set_bool("enabled", true);
    ///
    /// assert_eq!(doc[root].get("enabled"), Some("true"));
    /// assert_eq!(doc[root].get_bool("enabled").unwrap(), Some(true));
    /// assert_eq!(doc[root].get_bool("missing").unwrap(), None);
    /// ```
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(other) => Err(Error::invalid_value(key, "boolean", other)),
        }
    }

    /// Reads a value stored as a decimal integer.
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        self.get_parsed(key, "integer")
    }

    /// Reads a value stored as a decimal floating-point number.
    pub fn get_f64(&self, key: &str) -> Result<Option<f64>> {
        self.get_parsed(key, "float")
    }

    fn get_parsed<T: FromStr>(&self, key: &str, expected: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|_| Error::invalid_value(key, expected, raw))
            })
            .transpose()
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) -> Option<String> {
        self.set(key, if value { "true" } else { "false" })
    }

    pub fn set_i64(&mut self, key: impl Into<String>, value: i64) -> Option<String> {
        self.set(key, value.to_string())
    }

    pub fn set_f64(&mut self, key: impl Into<String>, value: f64) -> Option<String> {
        self.set(key, value.to_string())
    }
}

/// A SLON document: an arena of nodes plus the designated root.
///
/// A freshly parsed document has a root unless the input contained no `{`.
/// Nodes can also be created detached with [`Document::new_node`] and wired in
/// later with [`Document::attach_child`].
///
/// Equality is structural: two documents are equal when the trees hanging off
/// their roots have the same pairs and children in the same order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Document {
    /// Creates an empty document without a root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding a single empty root block.
    #[must_use]
    pub fn with_root() -> Self {
        let mut doc = Document::new();
        let root = doc.new_node();
        doc.root = Some(root);
        doc
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The root node itself, if there is one.
    #[must_use]
    pub fn root_node(&self) -> Option<&Node> {
        self.root.map(|id| &self[id])
    }

    /// Makes `id` the document root, replacing the current one.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or is attached under another node.
    pub fn set_root(&mut self, id: NodeId) -> Result<()> {
        let node = self
            .node(id)
            .ok_or_else(|| Error::invalid_attach("unknown node"))?;
        if node.parent.is_some() {
            return Err(Error::invalid_attach("root must not have a parent"));
        }
        self.root = Some(id);
        Ok(())
    }

    /// Creates a detached, empty node.
    pub fn new_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::default());
        id
    }

    /// Creates a node and appends it to `parent`'s children.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "unknown parent {:?}", parent);
        let child = self.new_node();
        self.link(parent, child);
        child
    }

    /// Appends a detached node to `parent`'s children and sets its parent link.
    ///
    /// # Errors
    ///
    /// Fails if either handle is unknown, if `child` already has a parent or is
    /// the root, or if `child` is `parent` or one of its ancestors.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.node(parent).is_none() {
            return Err(Error::invalid_attach("unknown parent node"));
        }
        let node = self
            .node(child)
            .ok_or_else(|| Error::invalid_attach("unknown child node"))?;
        if node.parent.is_some() {
            return Err(Error::invalid_attach("node already has a parent"));
        }
        if self.root == Some(child) {
            return Err(Error::invalid_attach("the root cannot become a child"));
        }
        if parent == child || self.ancestors(parent).any(|id| id == child) {
            return Err(Error::invalid_attach("node cannot be attached below itself"));
        }
        self.link(parent, child);
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Child of `parent` at `index`; `None` if either is out of range.
    #[must_use]
    pub fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.node(parent)?.child(index)
    }

    /// First child of `parent` whose `key` is set to `value`.
    ///
    /// Children that lack `key` never match.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let doc = slon::from_str(r#"{ { id="1" } { name="user1" } }"#).unwrap();
    /// let root = doc.root().unwrap();
    ///
    /// assert_eq!(doc.find_child(root, "name", "user1"), doc.child(root, 1));
    /// assert_eq!(doc.find_child(root, "name", "user2"), None);
    /// ```
    #[must_use]
    pub fn find_child(&self, parent: NodeId, key: &str, value: &str) -> Option<NodeId> {
        self.node(parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self[child].get(key) == Some(value))
    }

    /// Walks from `id`'s parent up to the top of its tree.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.node(id).and_then(Node::parent);
        std::iter::from_fn(move || {
            let id = current?;
            current = self[id].parent;
            Some(id)
        })
    }

    /// Pre-order walk of the whole tree, starting at the root.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Pre-order walk of the subtree rooted at `id` (including `id`).
    pub fn descendants_of(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.node(id).map(|_| id).into_iter().collect(),
        }
    }

    /// Number of nodes in the arena, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parser hook: creates a node whose parent link is set but which is not
    /// yet listed among the parent's children.
    pub(crate) fn open_node(&mut self, parent: Option<NodeId>) -> NodeId {
        let id = self.new_node();
        self.nodes[id.0].parent = parent;
        id
    }

    /// Parser hook: appends a finished node to its parent's children.
    pub(crate) fn close_node(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id.0].parent?;
        self.nodes[parent.0].children.push(id);
        Some(parent)
    }

    pub(crate) fn set_root_unchecked(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Drops every node that is not reachable from the root and renumbers the
    /// rest in pre-order.
    pub(crate) fn prune(&mut self) {
        let order: Vec<NodeId> = self.descendants().collect();
        if order.len() == self.nodes.len() && order.iter().enumerate().all(|(i, id)| id.0 == i) {
            return;
        }

        let mut remap = vec![None; self.nodes.len()];
        for (new, old) in order.iter().enumerate() {
            remap[old.0] = Some(NodeId(new));
        }

        let mut old_nodes: Vec<Option<Node>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        for old in &order {
            if let Some(mut node) = old_nodes[old.0].take() {
                node.parent = node.parent.and_then(|p| remap[p.0]);
                node.children = node.children.iter().filter_map(|c| remap[c.0]).collect();
                self.nodes.push(node);
            }
        }
        self.root = self.root.and_then(|r| remap[r.0]);
    }
}

impl Index<NodeId> for Document {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Document {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        match (self.root, other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                let mut stack = vec![(a, b)];
                while let Some((a, b)) = stack.pop() {
                    let (left, right) = (&self[a], &other[b]);
                    if left.entries != right.entries || left.children.len() != right.children.len()
                    {
                        return false;
                    }
                    stack.extend(left.children.iter().copied().zip(right.children.iter().copied()));
                }
                true
            }
            _ => false,
        }
    }
}

/// Pre-order iterator over node handles, driven by an explicit stack.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.doc[id].children.iter().rev().copied());
        Some(id)
    }
}
