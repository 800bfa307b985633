//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! "The following steps form the HTML fragment serialization algorithm. The
//! algorithm takes as input a DOM Element, Document, or DocumentFragment
//! referred to as the node, and returns a string."
//!
//! Unlike a browser serializer, this one cannot assume its input came from a
//! parser: tags and comments arrive from arbitrary specs, so the shapes that
//! cannot be written down are reported as errors instead.

use arbor_dom::{DomTree, NodeId, NodeType};
use thiserror::Error;

/// Output the writer refuses to produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// The tag cannot appear in a start tag without changing the markup.
    #[error("tag name '{tag}' cannot be written as markup")]
    InvalidTagName {
        /// The offending tag name.
        tag: String,
    },
    /// A void element has no end tag, so its children would be silently lost.
    #[error("void element '{tag}' cannot carry children")]
    VoidWithChildren {
        /// The void element's tag name.
        tag: String,
    },
    /// The comment holds `--`, which would end it early.
    #[error("comment text contains '--'")]
    InvalidComment,
}

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
fn is_void_element(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Whether a tag name can be written into a start tag verbatim.
///
/// Parser-built trees never hold invalid names, but spec-built trees can;
/// anything that would terminate or restructure the tag is rejected. The
/// name must also open like a tag: a tokenizer only starts one on an ASCII
/// letter ([§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state),
/// "ASCII alpha: Create a new start tag token"), so `<1a>` would be read
/// back as text rather than an element.
fn is_valid_tag_name(tag_name: &str) -> bool {
    tag_name
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic())
        && !tag_name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '=' | '"' | '\''))
}

/// [§ 13.3](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// "Escaping a string ... consists of applying the following steps:
///  1. Replace any occurrence of the "&" character by the string "&amp;". ...
///  4. If the algorithm was not invoked in the attribute mode, replace any
///     occurrences of the "<" character by the string "&lt;", and any
///     occurrences of the ">" character by the string "&gt;"."
fn escape_text(data: &str) -> String {
    data.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// [§ 13.3](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// "3. If the algorithm was invoked in the attribute mode, replace any
/// occurrences of the """ character by the string "&quot;"."
fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Serializes the node itself, subtree and all.
///
/// Document and fragment nodes have no markup of their own and render their
/// contents, exactly as [`serialize_children`] does. A node id the tree does
/// not hold renders as nothing.
///
/// # Errors
///
/// See [`SerializeError`] for the shapes that cannot be written.
pub fn serialize(tree: &DomTree, id: NodeId) -> Result<String, SerializeError> {
    let mut out = String::new();
    serialize_into(tree, id, &mut out)?;
    Ok(out)
}

/// Serializes the node's contents without any enclosing markup.
///
/// [§ 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
///
/// "The HTML fragment serialization algorithm serializes the children of the
/// node being serialized, not the node itself."
///
/// # Errors
///
/// See [`SerializeError`] for the shapes that cannot be written.
pub fn serialize_children(tree: &DomTree, id: NodeId) -> Result<String, SerializeError> {
    let mut out = String::new();
    for &child in tree.children(id) {
        serialize_into(tree, child, &mut out)?;
    }
    Ok(out)
}

fn serialize_into(tree: &DomTree, id: NodeId, out: &mut String) -> Result<(), SerializeError> {
    let Some(node) = tree.get(id) else {
        return Ok(());
    };
    match &node.node_type {
        // Containers contribute their contents only.
        NodeType::Document | NodeType::Fragment => {
            for &child in tree.children(id) {
                serialize_into(tree, child, out)?;
            }
            Ok(())
        }
        NodeType::Element(data) => {
            let tag = &data.tag_name;
            if !is_valid_tag_name(tag) {
                return Err(SerializeError::InvalidTagName { tag: tag.clone() });
            }

            // "Append a U+003C LESS-THAN SIGN character (<), followed by
            // tagname."
            out.push('<');
            out.push_str(tag);

            // "For each attribute that the element has, append a U+0020
            // SPACE character, the attribute's serialized name ..., a
            // U+003D EQUALS SIGN character (=), a U+0022 QUOTATION MARK
            // character ("), the attribute's value, escaped as described
            // below in attribute mode, and a second U+0022 QUOTATION MARK
            // character (")."
            //
            // Attribute storage is unordered; names are sorted so the same
            // tree always writes the same markup.
            let mut attrs: Vec<(&str, &str)> = data
                .attrs
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            attrs.sort_unstable();
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
            out.push('>');

            // "If current node serializes as void, then continue on to the
            // next child node at this point."
            if is_void_element(tag) {
                if tree.children(id).is_empty() {
                    return Ok(());
                }
                return Err(SerializeError::VoidWithChildren { tag: tag.clone() });
            }

            for &child in tree.children(id) {
                serialize_into(tree, child, out)?;
            }

            // "Append a U+003C LESS-THAN SIGN character (<), a U+002F
            // SOLIDUS character (/), tagname again, and finally a U+003E
            // GREATER-THAN SIGN character (>)."
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
            Ok(())
        }
        NodeType::Text(data) => {
            out.push_str(&escape_text(data));
            Ok(())
        }
        // "If current node is a Comment, append the literal string "<!--"
        // followed by the value of current node's data IDL attribute,
        // followed by the literal string "-->"."
        NodeType::Comment(data) => {
            if data.contains("--") {
                return Err(SerializeError::InvalidComment);
            }
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
            Ok(())
        }
    }
}
