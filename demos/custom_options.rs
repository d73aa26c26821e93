//! Customizing SLON output and parsing with options.
//!
//! Run with: cargo run --example custom_options

use slon::{from_str, from_str_with_options, to_string_with_options, ParseOptions, SlonOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = from_str(r#"{ name="demo" mode="fast" { id="1" } { id="2" } }"#)?;

    // Default format (pairs on one line)
    println!("Default:");
    println!("{}", to_string_with_options(&doc, SlonOptions::new())?);

    // One pair per line
    println!("Values on separate lines:");
    let per_line = SlonOptions::new().with_values_in_line(false);
    println!("{}", to_string_with_options(&doc, per_line)?);

    // No whitespace at all
    println!("Minimal:");
    println!("{}\n", to_string_with_options(&doc, SlonOptions::minimal())?);

    // Strict parsing refuses what the default parser skips
    let sloppy = r#"{ a="1" } leftovers"#;
    println!("lenient: {:?}", from_str(sloppy).map(|d| d.len()));
    match from_str_with_options(sloppy, ParseOptions::strict()) {
        Ok(_) => println!("strict: accepted"),
        Err(e) => println!("strict: {}", e),
    }

    Ok(())
}
