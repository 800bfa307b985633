//! Inline style string codec per [CSS Style Attributes § 3](https://www.w3.org/TR/css-style-attr/#syntax).
//!
//! "The value of the style attribute must match the syntax of the contents of
//! a CSS declaration block."
//!
//! This is a resilient single-pass parser for the declaration-block subset
//! that appears in `style="…"` attributes: `;`-separated declarations, each
//! split on its first `:` into a property name and a raw value. It performs
//! no tokenization beyond double-quote tracking, so a `;` inside a quoted
//! value (e.g. `content: "a;b"`) never acts as a separator.

use std::fmt;
use std::slice;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single parsed declaration from a style attribute.
///
/// [§ 3.2 Interpretation](https://www.w3.org/TR/css-style-attr/#interpret)
///
/// "The declarations in a style attribute apply to the element to which
/// the attribute belongs."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, trimmed and normalized to ASCII lowercase
    /// (CSS property names are ASCII case-insensitive).
    pub name: String,
    /// Raw value text, trimmed of surrounding whitespace. May contain
    /// quoted substrings with literal `;` or `:` characters.
    pub value: String,
}

/// An ordered mapping from CSS property name to raw value string.
///
/// Entry order is insertion order, and overwriting an existing property
/// keeps its original position — the same observable order contract as a
/// script-facing style object. Property names are unique within a map;
/// parsing applies last-declaration-wins for duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    declarations: Vec<Declaration>,
}

impl StyleMap {
    /// Create an empty style map.
    #[must_use]
    pub fn new() -> Self {
        StyleMap {
            declarations: Vec::new(),
        }
    }

    /// Parse an inline style string into a map.
    ///
    /// [§ 3.1 Syntax](https://www.w3.org/TR/css-style-attr/#syntax)
    ///
    /// - Declarations are separated by `;`, but a `;` inside a double-quoted
    ///   substring is literal (quote state toggles on every `"`, scanned left
    ///   to right in a single pass).
    /// - Within a declaration, everything before the first `:` is the
    ///   property name (trimmed, ASCII-lowercased); everything after it is
    ///   the value (trimmed). A declaration with no `:` contributes nothing.
    /// - Whitespace-only declarations and declarations whose name or value
    ///   trims to nothing are skipped.
    /// - The final declaration does not require a trailing `;`.
    /// - Duplicate property names: the last declaration wins, at the position
    ///   of the first occurrence.
    ///
    /// An empty input yields an empty map. A value containing further `:`
    /// characters keeps them in full; only the first `:` splits.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut map = StyleMap::new();
        let mut declaration = String::new();
        let mut in_quotes = false;

        for ch in input.chars() {
            match ch {
                '"' => {
                    in_quotes = !in_quotes;
                    declaration.push(ch);
                }
                ';' if !in_quotes => {
                    map.push_declaration(&declaration);
                    declaration.clear();
                }
                _ => declaration.push(ch),
            }
        }
        // The final declaration does not require a trailing `;`.
        map.push_declaration(&declaration);

        map
    }

    /// Split one raw declaration into name/value and insert it, skipping
    /// empty and colon-less items.
    fn push_declaration(&mut self, raw: &str) {
        if raw.trim().is_empty() {
            return;
        }
        let Some((raw_name, raw_value)) = raw.split_once(':') else {
            return;
        };
        self.set(raw_name, raw_value);
    }

    /// Look up a property value. The name is matched case-insensitively
    /// (both sides normalize to ASCII lowercase).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.trim().to_ascii_lowercase();
        self.declarations
            .iter()
            .find(|decl| decl.name == name)
            .map(|decl| decl.value.as_str())
    }

    /// Insert or overwrite a property.
    ///
    /// The name is trimmed and lowercased, the value trimmed. Overwriting an
    /// existing property keeps its position in the map; a new property is
    /// appended. A name or value that trims to nothing is ignored.
    pub fn set(&mut self, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            return;
        }
        match self.declarations.iter_mut().find(|decl| decl.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => self.declarations.push(Declaration {
                name,
                value: value.to_string(),
            }),
        }
    }

    /// Number of properties in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the map has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate over the declarations in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }
}

/// Serialize the map back to inline style text.
///
/// Each entry renders as `{name}: {value};`, entries joined by a single
/// space, in insertion order. An empty map renders as the empty string.
impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, decl) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", decl.name, decl.value)?;
        }
        Ok(())
    }
}

impl Extend<Declaration> for StyleMap {
    fn extend<T: IntoIterator<Item = Declaration>>(&mut self, iter: T) {
        for decl in iter {
            self.set(&decl.name, &decl.value);
        }
    }
}

impl FromIterator<Declaration> for StyleMap {
    fn from_iter<T: IntoIterator<Item = Declaration>>(iter: T) -> Self {
        let mut map = StyleMap::new();
        map.extend(iter);
        map
    }
}

impl<'a> IntoIterator for &'a StyleMap {
    type Item = &'a Declaration;
    type IntoIter = slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for StyleMap {
    type Item = Declaration;
    type IntoIter = std::vec::IntoIter<Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.into_iter()
    }
}

/// Serializes as a JSON-style map in insertion order.
impl Serialize for StyleMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for decl in self {
            map.serialize_entry(&decl.name, &decl.value)?;
        }
        map.end()
    }
}

/// A scalar style value as it appears in JSON documents.
///
/// Style objects in data documents may carry numbers (`{"z-index": 3}`) or
/// booleans alongside strings; all are stored as their text rendering.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStyleValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Flag(bool),
}

impl fmt::Display for RawStyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawStyleValue::Text(text) => f.write_str(text),
            RawStyleValue::Integer(n) => write!(f, "{n}"),
            RawStyleValue::Number(n) => write!(f, "{n}"),
            RawStyleValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Deserializes from either representation callers use interchangeably:
/// an inline style string (`"color: red; width: 10px"`) or a map of
/// property names to scalar values (`{"color": "red", "z-index": 3}`).
/// Map entry order is preserved.
impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StyleMapVisitor;

        impl<'de> Visitor<'de> for StyleMapVisitor {
            type Value = StyleMap;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an inline style string or a map of property names to values")
            }

            fn visit_str<E>(self, v: &str) -> Result<StyleMap, E>
            where
                E: serde::de::Error,
            {
                Ok(StyleMap::parse(v))
            }

            fn visit_map<A>(self, mut access: A) -> Result<StyleMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = StyleMap::new();
                while let Some((name, value)) = access.next_entry::<String, RawStyleValue>()? {
                    map.set(&name, &value.to_string());
                }
                Ok(map)
            }
        }

        deserializer.deserialize_any(StyleMapVisitor)
    }
}
