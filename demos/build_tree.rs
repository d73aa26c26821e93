//! Building a document in code and saving it.
//!
//! Run with: cargo run --example build_tree

use slon::{to_file, Document, SlonOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = Document::with_root();
    let root = doc.root().ok_or("missing root")?;
    doc[root].set("title", "users");

    for (name, admin) in [("user1", true), ("user2", false)] {
        let user = doc.add_child(root);
        doc[user].set("name", name);
        doc[user].set_bool("admin", admin);
    }

    // Detached nodes can be filled first and attached later.
    let guest = doc.new_node();
    doc[guest].set("name", "guest");
    doc.attach_child(root, guest)?;

    let path = std::env::temp_dir().join("users.slon");
    to_file(&path, &doc, SlonOptions::new().with_values_in_line(false))?;
    println!("wrote {}", path.display());
    print!("{}", std::fs::read_to_string(&path)?);

    let back = slon::from_file(&path)?;
    assert_eq!(back, doc);
    Ok(())
}
