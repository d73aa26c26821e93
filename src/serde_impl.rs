//! Serde support for [`Document`].
//!
//! A document maps to its root block, and every block maps to a struct with
//! two fields:
//!
//! ```json
//! { "entries": { "name": "demo" }, "children": [ { "entries": {}, "children": [] } ] }
//! ```
//!
//! A document without a root maps to `null`. This lets SLON trees travel
//! through any serde format, e.g. JSON:
//!
//! ```rust
//! let doc = slon::from_str(r#"{ name="demo" { id="1" } }"#).unwrap();
//! let json = serde_json::to_string(&doc).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"entries":{"name":"demo"},"children":[{"entries":{"id":"1"},"children":[]}]}"#
//! );
//!
//! let back: slon::Document = serde_json::from_str(&json).unwrap();
//! assert_eq!(back, doc);
//! ```
//!
//! The serde data model is nested, so serializing recurses once per block.
//! Documents nested deeper than [`MAX_SERDE_DEPTH`] are refused with a
//! serializer error instead of exhausting the stack.

use crate::tree::{Document, NodeId};
use crate::Entries;
use serde::ser::{Error as _, SerializeSeq, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deepest block nesting handed to a serde serializer; the root is depth 1.
pub const MAX_SERDE_DEPTH: usize = 128;

struct NodeView<'a> {
    doc: &'a Document,
    id: NodeId,
    depth: usize,
}

struct ChildrenView<'a> {
    doc: &'a Document,
    id: NodeId,
    depth: usize,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.depth > MAX_SERDE_DEPTH {
            return Err(S::Error::custom(format!(
                "SLON nesting deeper than {MAX_SERDE_DEPTH} blocks cannot be serialized"
            )));
        }
        let mut state = serializer.serialize_struct("Node", 2)?;
        state.serialize_field("entries", self.doc[self.id].entries())?;
        state.serialize_field(
            "children",
            &ChildrenView {
                doc: self.doc,
                id: self.id,
                depth: self.depth,
            },
        )?;
        state.end()
    }
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children = self.doc[self.id].children();
        let mut seq = serializer.serialize_seq(Some(children.len()))?;
        for &child in children {
            seq.serialize_element(&NodeView {
                doc: self.doc,
                id: child,
                depth: self.depth + 1,
            })?;
        }
        seq.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.root() {
            Some(id) => serializer.serialize_some(&NodeView {
                doc: self,
                id,
                depth: 1,
            }),
            None => serializer.serialize_none(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OwnedNode {
    #[serde(default)]
    entries: Entries,
    #[serde(default)]
    children: Vec<OwnedNode>,
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut doc = Document::new();
        let Some(root) = Option::<OwnedNode>::deserialize(deserializer)? else {
            return Ok(doc);
        };

        let mut pending = vec![(root, None)];
        while let Some((owned, parent)) = pending.pop() {
            let id = match parent {
                Some(parent) => doc.add_child(parent),
                None => {
                    let id = doc.new_node();
                    doc.set_root_unchecked(id);
                    id
                }
            };
            *doc[id].entries_mut() = owned.entries;
            pending.extend(owned.children.into_iter().rev().map(|child| (child, Some(id))));
        }
        Ok(doc)
    }
}
