//! Merge-don't-replace application of partial styles.
//!
//! [§ 3.2 Interpretation](https://www.w3.org/TR/css-style-attr/#interpret)
//!
//! "The declarations in a style attribute apply to the element to which
//! the attribute belongs."
//!
//! Setting an element's inline style from a partial style object must never
//! drop the properties the object does not name. This module provides the
//! overlay primitive the materializer uses for every style write.

use crate::codec::StyleMap;

/// Overlay `new_styles` onto an existing inline style string.
///
/// The existing string is parsed, every property of `new_styles` is written
/// into the parsed map (new values win; properties the overlay does not
/// name survive unchanged, in place), and the merged map is serialized back
/// to inline style text.
///
/// ```
/// use arbor_style::{StyleMap, merge_style};
///
/// let mut patch = StyleMap::new();
/// patch.set("color", "blue");
/// let merged = merge_style("color: red; font-size: 12px;", &patch);
/// assert_eq!(merged, "color: blue; font-size: 12px;");
/// ```
#[must_use]
pub fn merge_style(existing: &str, new_styles: &StyleMap) -> String {
    let mut base = StyleMap::parse(existing);
    for decl in new_styles {
        base.set(&decl.name, &decl.value);
    }
    base.to_string()
}
