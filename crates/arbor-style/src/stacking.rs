//! Z-index resolution and subtree scanning.
//!
//! [§ 9.9 Layered presentation](https://www.w3.org/TR/CSS2/visuren.html#layers)
//!
//! "An element in CSS 2 may have a stack level, which describes its position
//! within a set of elements sharing the same stacking context."
//!
//! There is no cascade in this system; an element's effective z-index comes
//! solely from its inline style attribute.

use arbor_dom::{DomTree, NodeId};

use crate::codec::StyleMap;

/// [§ 9.9.1 Specifying the stack level: the 'z-index' property](https://www.w3.org/TR/CSS2/visuren.html#z-index)
///
/// "Values have the following meanings:
///
/// <integer>
///   This integer is the stack level of the generated box in the current
///   stacking context.
///
/// auto
///   The stack level of the generated box in the current stacking context
///   is 0."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZIndex {
    /// "The stack level of the generated box in the current stacking
    /// context is 0."
    #[default]
    Auto,
    /// "This integer is the stack level of the generated box in the
    /// current stacking context."
    Integer(i32),
}

impl ZIndex {
    /// Parse a CSS z-index value.
    ///
    /// Accepts `auto` (ASCII case-insensitive) and signed integers; any
    /// other value falls back to `auto`, the property's initial value
    /// ([§ 9.9.1](https://www.w3.org/TR/CSS2/visuren.html#z-index),
    /// "Initial: auto").
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("auto") {
            return ZIndex::Auto;
        }
        value.parse::<i32>().map_or(ZIndex::Auto, ZIndex::Integer)
    }

    /// The numeric stack level, if the value names one.
    #[must_use]
    pub fn as_integer(self) -> Option<i32> {
        match self {
            ZIndex::Auto => None,
            ZIndex::Integer(level) => Some(level),
        }
    }

    /// Whether the value is `auto`.
    #[must_use]
    pub fn is_auto(self) -> bool {
        matches!(self, ZIndex::Auto)
    }
}

/// The minimum and maximum stack levels found in a subtree scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZRange {
    /// Smallest integer z-index among the scanned descendants.
    pub min: i32,
    /// Largest integer z-index among the scanned descendants.
    pub max: i32,
}

/// Compute the min/max z-index over every descendant of `root`.
///
/// Walks all descendants in document order, resolves each element's
/// effective z-index from its inline `style` attribute, and folds the
/// integer values into a running minimum and maximum. Descendants whose
/// z-index is `auto`, unparseable, or absent are excluded, as are
/// non-element nodes.
///
/// If no descendant yields an integer z-index the result is
/// `ZRange { min: 0, max: 0 }` — callers never observe any internal scan
/// state.
#[must_use]
pub fn z_index_range(tree: &DomTree, root: NodeId) -> ZRange {
    let mut bounds: Option<(i32, i32)> = None;

    for id in tree.descendants(root) {
        let Some(style_text) = tree.attribute(id, "style") else {
            continue;
        };
        let style = StyleMap::parse(style_text);
        let Some(raw) = style.get("z-index") else {
            continue;
        };
        let Some(level) = ZIndex::from_css(raw).as_integer() else {
            continue;
        };
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(level), max.max(level)),
            None => (level, level),
        });
    }

    match bounds {
        Some((min, max)) => ZRange { min, max },
        None => ZRange { min: 0, max: 0 },
    }
}
