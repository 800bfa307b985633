//! Turning specs into live nodes.
//!
//! [`materialize`] walks a [`NodeSpec`] and builds the nodes it describes
//! inside a [`DomTree`]. Construction is forgiving the same way the style
//! codec is: placeholder bindings that cannot fill their position are
//! dropped with a warning and the spec's own value is kept, while genuinely
//! unbuildable input (an element with no tag, a reference to a node the
//! tree does not hold) is an error.

use arbor_common::warning::warn_once;
use arbor_dom::{DomTree, NodeId, PropValue};
use arbor_style::{StyleMap, merge_style};
use serde_json::Value;
use thiserror::Error;

use crate::spec::{AttrValue, ElementSpec, NodeSpec};
use crate::substitute::{SubstituteError, Substitutions, substitute_value, try_substitute_text};

/// Rejections raised while materializing a spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterializeError {
    /// An element spec (or tagged-child key) had no usable tag text.
    #[error("element spec has an empty tag name")]
    EmptyTag,
    /// A node reference pointed outside the target tree.
    #[error("node {id:?} is not in the target tree")]
    UnknownNode {
        /// The identifier that failed the lookup.
        id: NodeId,
    },
}

/// Builds the nodes described by `spec` under `target`, returning the target.
///
/// With no target the nodes are collected under a fresh fragment instead, so
/// even a bare list comes back as a single handle; callers use the fragment
/// directly or flush it into place with [`DomTree::move_children`].
///
/// Each element spec is applied in a fixed order:
///
/// 1. attributes other than `style`
/// 2. the inline style, merged from the `style` attribute entry and the
///    dedicated `style` field, the field winning name by name
/// 3. `text`, as a single text node
/// 4. `children`, in order
/// 5. tagged children, in order
/// 6. `properties`
/// 7. `events`, appended to whatever is already registered
/// 8. the modifier, against the finished element
///
/// Placeholder bindings resolve attribute values, style declaration values,
/// text, and property values. A binding that cannot fill its position is
/// reported through [`warn_once`] and the spec's literal value is kept.
///
/// # Errors
///
/// [`MaterializeError::EmptyTag`] if an element spec or tagged-child key has
/// no tag text; [`MaterializeError::UnknownNode`] if `target` or an
/// [`NodeSpec::Existing`] reference is not in `tree`.
#[allow(clippy::implicit_hasher)]
pub fn materialize(
    tree: &mut DomTree,
    spec: NodeSpec,
    substitutions: &Substitutions,
    target: Option<NodeId>,
) -> Result<NodeId, MaterializeError> {
    let target = match target {
        Some(id) => {
            if !tree.contains(id) {
                return Err(MaterializeError::UnknownNode { id });
            }
            id
        }
        None => tree.create_fragment(),
    };
    apply_spec(tree, spec, substitutions, target)?;
    Ok(target)
}

/// Applies one spec against an existing target node.
fn apply_spec(
    tree: &mut DomTree,
    spec: NodeSpec,
    substitutions: &Substitutions,
    target: NodeId,
) -> Result<(), MaterializeError> {
    match spec {
        NodeSpec::Null => Ok(()),
        NodeSpec::Existing(id) => {
            if !tree.contains(id) {
                return Err(MaterializeError::UnknownNode { id });
            }
            tree.append_child(target, id);
            Ok(())
        }
        NodeSpec::List(items) => {
            for item in items {
                apply_spec(tree, item, substitutions, target)?;
            }
            Ok(())
        }
        NodeSpec::Element(spec) => apply_element(tree, *spec, substitutions, target),
    }
}

/// Creates the element a spec describes and applies the spec's parts to it.
fn apply_element(
    tree: &mut DomTree,
    spec: ElementSpec,
    substitutions: &Substitutions,
    parent: NodeId,
) -> Result<(), MaterializeError> {
    let tag = spec.tag.trim();
    if tag.is_empty() {
        return Err(MaterializeError::EmptyTag);
    }
    let element = tree.create_element(tag);
    tree.append_child(parent, element);

    // 1. Attributes other than style; a style entry joins step 2 instead.
    let mut attribute_style = None;
    for (name, value) in spec.attributes {
        if name.eq_ignore_ascii_case("style") {
            attribute_style = Some(value);
            continue;
        }
        let text = resolve_attr_text(&name, &value, substitutions);
        let _ = tree.set_attribute(element, &name, &text);
    }

    // 2. Inline style: the attribute entry is the base, the dedicated field
    //    overrides it name by name.
    let mut style = StyleMap::new();
    if let Some(base) = &attribute_style {
        collect_style(&mut style, base, substitutions);
    }
    if let Some(explicit) = &spec.style {
        collect_style(&mut style, explicit, substitutions);
    }
    if !style.is_empty() {
        let merged = merge_style(tree.attribute(element, "style").unwrap_or(""), &style);
        let _ = tree.set_attribute(element, "style", &merged);
    }

    // 3. Text content, never interpreted as markup.
    if let Some(text) = spec.text {
        let content = match try_substitute_text(&text, substitutions) {
            Ok(resolved) => resolved,
            Err(error) => {
                warn_once("Builder", &format!("text kept as written: {error}"));
                text
            }
        };
        let text_node = tree.create_text_node(content);
        tree.append_child(element, text_node);
    }

    // 4. Children, in spec order.
    for child in spec.children {
        apply_spec(tree, child, substitutions, element)?;
    }

    // 5. Tagged children, after the ordinary list.
    for tagged in spec.tagged_children {
        apply_element(tree, tagged, substitutions, element)?;
    }

    // 6. Properties. The tree's property bag holds scalars, so structured
    //    values are dropped rather than coerced.
    for (name, value) in spec.properties {
        let resolved = substitute_value(&value, substitutions);
        match to_prop_value(&name, resolved) {
            Ok(prop) => {
                let _ = tree.set_property(element, &name, prop);
            }
            Err(error) => warn_once("Builder", &format!("property dropped: {error}")),
        }
    }

    // 7. Event listeners, appended to whatever is already registered.
    for listener in spec.events {
        let _ = tree.add_event_listener(element, &listener.event_type, listener.handler);
    }

    // 8. The modifier runs last and sees the finished element.
    if let Some(modifier) = spec.modifier {
        modifier.apply(tree, element);
    }
    Ok(())
}

/// Resolves one non-style attribute value to its text form.
fn resolve_attr_text(name: &str, value: &AttrValue, substitutions: &Substitutions) -> String {
    match value {
        AttrValue::Text(text) => match try_substitute_text(text, substitutions) {
            Ok(resolved) => resolved,
            Err(error) => {
                warn_once("Builder", &format!("attribute '{name}' kept as written: {error}"));
                text.clone()
            }
        },
        AttrValue::Style(_) => {
            let mut map = StyleMap::new();
            collect_style(&mut map, value, substitutions);
            map.to_string()
        }
    }
}

/// Folds one style source into `into`, resolving placeholder values.
fn collect_style(into: &mut StyleMap, source: &AttrValue, substitutions: &Substitutions) {
    let map = source.to_style_map();
    for declaration in &map {
        match try_substitute_text(&declaration.value, substitutions) {
            Ok(resolved) => into.set(&declaration.name, &resolved),
            Err(error) => {
                warn_once(
                    "Builder",
                    &format!("style '{}' kept as written: {error}", declaration.name),
                );
                into.set(&declaration.name, &declaration.value);
            }
        }
    }
}

/// Converts a resolved property value into the tree's scalar property type.
fn to_prop_value(name: &str, value: Value) -> Result<PropValue, SubstituteError> {
    match value {
        Value::Null => Ok(PropValue::Null),
        Value::Bool(flag) => Ok(PropValue::Bool(flag)),
        Value::String(text) => Ok(PropValue::String(text)),
        Value::Number(number) => number
            .as_i64()
            .map(PropValue::Int)
            .or_else(|| number.as_f64().map(PropValue::Float))
            .ok_or_else(|| SubstituteError::UnassignableValue {
                key: name.to_owned(),
            }),
        Value::Array(_) | Value::Object(_) => Err(SubstituteError::UnassignableValue {
            key: name.to_owned(),
        }),
    }
}
