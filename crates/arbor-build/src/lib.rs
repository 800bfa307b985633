//! Declarative node construction for the arbor tree.
//!
//! # Scope
//!
//! This crate implements:
//! - **Spec types** ([`NodeSpec`], [`ElementSpec`])
//!   - Elements as plain data: tag, attributes, style, text, children,
//!     properties, event listeners, and a one-shot modifier
//!   - A chaining construction API, plus JSON loading for everything a
//!     data document can express
//! - **Placeholder substitution** ([`try_substitute_text`], [`substitute_value`])
//!   - Whole-string lookup of spec values in a caller-supplied table
//!   - Scalar-only at text positions; structural splicing for properties
//! - **Materialization** ([`materialize`])
//!   - Walks a spec and builds the nodes it describes, under a given
//!     target or a fresh fragment
//!   - Inline styles land via merge, so repeated application accumulates
//!     instead of clobbering
//!
//! # Not Implemented
//!
//! - Reconciliation or diffing: materializing twice builds twice
//! - Templating inside strings; substitution is whole-string only

/// The materializer: specs in, live nodes out.
pub mod materialize;
/// Spec types, their chaining construction API, and JSON loading.
pub mod spec;
/// Placeholder lookup for spec values.
pub mod substitute;

// Re-exports for convenience
pub use materialize::{MaterializeError, materialize};
pub use spec::{AttrValue, ElementSpec, Modifier, NodeSpec, SpecKind};
pub use substitute::{SubstituteError, Substitutions, substitute_value, try_substitute_text};
