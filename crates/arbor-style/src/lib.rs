//! Inline CSS style tooling for the arbor builder.
//!
//! # Scope
//!
//! This crate implements:
//! - **Style attribute codec** ([CSS Style Attributes § 3](https://www.w3.org/TR/css-style-attr/#syntax))
//!   - Parse an inline style string into an ordered property map
//!   - Serialize the map back to attribute text
//!   - Double-quote awareness: a `;` or `:` inside a quoted value never splits
//! - **Style merging** ([§ 3.2 Interpretation](https://www.w3.org/TR/css-style-attr/#interpret))
//!   - Overlay new declarations onto an existing style attribute value,
//!     preserving every property the overlay does not name
//! - **Z-index scanning** ([CSS 2.1 § 9.9.1](https://www.w3.org/TR/CSS2/visuren.html#z-index))
//!   - Resolve per-element stack levels from inline styles
//!   - Min/max stack level over all descendants of a node
//!
//! # Not Implemented
//!
//! - Full CSS tokenization, `!important`, comments, or escape sequences
//! - The cascade: inline styles are the only style source here
//! - Layout or painting; stack levels are reported, never applied

/// Inline style string parsing and serialization per [CSS Style Attributes § 3](https://www.w3.org/TR/css-style-attr/#syntax).
pub mod codec;
/// Merge-don't-replace application of partial styles per [§ 3.2 Interpretation](https://www.w3.org/TR/css-style-attr/#interpret).
pub mod merge;
/// Z-index resolution and subtree scanning per [CSS 2.1 § 9.9.1](https://www.w3.org/TR/CSS2/visuren.html#z-index).
pub mod stacking;

// Re-exports for convenience
pub use codec::{Declaration, StyleMap};
pub use merge::merge_style;
pub use stacking::{ZIndex, ZRange, z_index_range};
