//! Property-based tests for the write/read cycle.
//!
//! Any tree whose keys are identifiers and whose values contain no `"` must
//! read back structurally equal, in every output layout.

use proptest::prelude::*;
use slon::{from_str, to_string_with_options, Document, NodeId, SlonOptions};

#[derive(Debug, Clone)]
struct Block {
    pairs: Vec<(String, String)>,
    children: Vec<Block>,
}

fn block() -> impl Strategy<Value = Block> {
    let pairs = prop::collection::vec(("[A-Za-z0-9_-]{1,8}", "[^\"]{0,16}"), 0..5);
    let leaf = pairs.clone().prop_map(|pairs| Block {
        pairs,
        children: Vec::new(),
    });
    leaf.prop_recursive(4, 32, 4, move |inner| {
        (pairs.clone(), prop::collection::vec(inner, 0..4))
            .prop_map(|(pairs, children)| Block { pairs, children })
    })
}

fn build(block: &Block) -> Document {
    let mut doc = Document::with_root();
    let root = doc.root().unwrap();
    fill(&mut doc, root, block);
    doc
}

fn fill(doc: &mut Document, id: NodeId, block: &Block) {
    for (key, value) in &block.pairs {
        doc[id].set(key.as_str(), value.as_str());
    }
    for child in &block.children {
        let child_id = doc.add_child(id);
        fill(doc, child_id, child);
    }
}

fn options() -> impl Strategy<Value = SlonOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(values_in_line, save_minimal)| {
        SlonOptions::new()
            .with_values_in_line(values_in_line)
            .with_save_minimal(save_minimal)
    })
}

proptest! {
    #[test]
    fn prop_round_trip(block in block(), options in options()) {
        let doc = build(&block);
        let text = to_string_with_options(&doc, options).unwrap();
        let back = from_str(&text).unwrap();
        prop_assert_eq!(back, doc);
    }

    #[test]
    fn prop_reserialize_is_stable(block in block(), options in options()) {
        let text = to_string_with_options(&build(&block), options).unwrap();
        let again = to_string_with_options(&from_str(&text).unwrap(), options).unwrap();
        prop_assert_eq!(again, text);
    }

    #[test]
    fn prop_parser_never_panics(input in "[ -~\n\t]{0,64}") {
        let _ = from_str(&input);
    }

    #[test]
    fn prop_overwrite_keeps_first_position(
        keys in prop::collection::vec("[a-c]", 1..12),
    ) {
        let mut doc = Document::with_root();
        let root = doc.root().unwrap();
        let mut first_seen: Vec<String> = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            doc[root].set(key.as_str(), i.to_string());
            if !first_seen.contains(key) {
                first_seen.push(key.clone());
            }
        }
        let order: Vec<String> = doc[root].keys().map(String::from).collect();
        prop_assert_eq!(order, first_seen);
    }
}
