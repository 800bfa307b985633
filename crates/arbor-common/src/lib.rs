//! Common utilities for the arbor tree builder.
//!
//! This crate provides shared infrastructure used by the other arbor crates:
//! - **Warning System** - deduplicated colored terminal output for recovered
//!   conditions (e.g. a substitution that could not be assigned)

pub mod warning;
