//! Parse a SLON document, read from it and write it back.
//!
//! Run with: cargo run --example simple

use slon::{from_str, to_string};
use std::error::Error;

const CONFIG: &str = r#"
# game settings
{
    title="Slon Runner" version="3"
    {
        name="video"
        fullscreen="true" width="1920" height="1080"
    }
    {
        name="audio"
        volume="0.8"   # 0..1
    }
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = from_str(CONFIG)?;
    let root = doc.root().ok_or("document has no root block")?;

    println!("title: {}", doc[root].get("title").unwrap_or("?"));

    if let Some(video) = doc.find_child(root, "name", "video") {
        let width = doc[video].get_i64("width")?.unwrap_or(800);
        let fullscreen = doc[video].get_bool("fullscreen")?.unwrap_or(false);
        println!("video: {}px wide, fullscreen: {}", width, fullscreen);
    }

    if let Some(audio) = doc.find_child(root, "name", "audio") {
        println!("volume: {}", doc[audio].get_f64("volume")?.unwrap_or(1.0));
    }

    let text = to_string(&doc)?;
    println!("\nSLON output:\n{}", text);

    assert_eq!(from_str(&text)?, doc);
    println!("✓ Round-trip successful");

    Ok(())
}
