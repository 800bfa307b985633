//! HTML text output for arbor trees.
//!
//! # Scope
//!
//! This crate implements:
//! - **Fragment serialization** ([WHATWG § 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments))
//!   - Elements as `<tag attrs>children</tag>`, void elements without an
//!     end tag
//!   - Text and attribute escaping, where the tree's literal-text rule
//!     becomes visible in output
//!   - Comments, with the character sequences a comment cannot hold
//!     rejected
//! - **Debug dump** ([`print_tree`])
//!   - An indented one-node-per-line view of a subtree, for development
//!
//! # Not Implemented
//!
//! - Parsing; trees are built by the spec materializer, not from markup
//! - Raw-text element handling: contents of `style`/`script` are escaped
//!   like any other text

/// Indented tree dumps for debugging.
pub mod debug;
/// Subtree-to-markup serialization per [WHATWG § 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments).
pub mod serialize;

pub use debug::print_tree;
pub use serialize::{SerializeError, serialize, serialize_children};
