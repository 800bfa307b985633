//! Arbor CLI
//!
//! A headless spec driver for testing and debugging: load a JSON spec,
//! materialize it into a fresh tree, and show what was built.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use arbor_build::{NodeSpec, Substitutions, materialize};
use arbor_dom::DomTree;
use arbor_html::{print_tree, serialize_children};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let as_html = args.iter().any(|arg| arg == "--html");
    let rest: Vec<&String> = args[1..].iter().filter(|arg| *arg != "--html").collect();

    if rest.is_empty() {
        eprintln!("Usage: arbor <spec.json> [--html]");
        eprintln!("       arbor --spec '<json>' [--html]");
        std::process::exit(1);
    }

    let document = if rest[0] == "--spec" {
        match rest.get(1) {
            Some(text) => (*text).clone(),
            None => {
                eprintln!("Error: --spec requires a JSON string argument");
                std::process::exit(1);
            }
        }
    } else {
        fs::read_to_string(rest[0]).with_context(|| format!("reading spec file '{}'", rest[0]))?
    };

    let spec: NodeSpec = serde_json::from_str(&document).context("parsing spec document")?;
    let kind = spec.kind();

    let mut tree = DomTree::new();
    let fragment = materialize(&mut tree, spec, &Substitutions::new(), None)?;

    if as_html {
        println!("{}", serialize_children(&tree, fragment)?);
        return Ok(());
    }

    println!("=== Tree ===");
    print_tree(&tree, fragment, 0);

    // The arena holds the document root and the host fragment on top of
    // whatever the spec described.
    println!("\n=== Summary ===");
    println!("{kind} spec materialized {} nodes", tree.len() - 2);

    Ok(())
}
