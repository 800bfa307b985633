//! The declarative description of nodes to build.
//!
//! A [`NodeSpec`] is plain data: it says what nodes should exist, not how to
//! wire them up. Specs are built in code through [`ElementSpec`]'s chaining
//! methods or loaded from a JSON document; the two forms meet in the same
//! types, except that event handlers and modifiers are closures and can only
//! come from code.
//!
//! In the JSON form an element is an object. Recognized keys are `tag`,
//! `attributes`, `style`, `text`, `children`, and `properties`. Any other
//! key becomes a tagged child: an element named after the key, with the
//! key's value applied to it as a body. `null` children are allowed and
//! skipped, and an array anywhere a child is expected fans out in order.

use std::fmt;

use serde::Deserialize;
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;
use strum_macros::Display;

use arbor_dom::{DomTree, EventHandler, EventListener, NodeId};
use arbor_style::StyleMap;

/// One node to build, in any of the shapes the builder accepts.
#[derive(Debug, Default)]
pub enum NodeSpec {
    /// Explicit nothing; skipped wherever it appears.
    #[default]
    Null,
    /// A node that already lives in the target tree, appended as-is.
    ///
    /// Only constructible in code; a data document has no way to name a
    /// live node.
    Existing(NodeId),
    /// A declarative element description.
    Element(Box<ElementSpec>),
    /// A sequence of specs applied in order against the same target.
    List(Vec<NodeSpec>),
}

/// The shape of a [`NodeSpec`], for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SpecKind {
    /// [`NodeSpec::Null`]
    Null,
    /// [`NodeSpec::Existing`]
    Existing,
    /// [`NodeSpec::Element`]
    Element,
    /// [`NodeSpec::List`]
    List,
}

impl NodeSpec {
    /// Which shape this spec has.
    #[must_use]
    pub fn kind(&self) -> SpecKind {
        match self {
            NodeSpec::Null => SpecKind::Null,
            NodeSpec::Existing(_) => SpecKind::Existing,
            NodeSpec::Element(_) => SpecKind::Element,
            NodeSpec::List(_) => SpecKind::List,
        }
    }

    /// Flattens this spec into a child list: `Null` contributes nothing,
    /// a list contributes its items, anything else contributes itself.
    fn into_list(self) -> Vec<NodeSpec> {
        match self {
            NodeSpec::Null => Vec::new(),
            NodeSpec::List(items) => items,
            other => vec![other],
        }
    }
}

impl From<ElementSpec> for NodeSpec {
    fn from(spec: ElementSpec) -> Self {
        NodeSpec::Element(Box::new(spec))
    }
}

impl From<NodeId> for NodeSpec {
    fn from(id: NodeId) -> Self {
        NodeSpec::Existing(id)
    }
}

impl From<Vec<NodeSpec>> for NodeSpec {
    fn from(items: Vec<NodeSpec>) -> Self {
        NodeSpec::List(items)
    }
}

/// An attribute value: raw text, or a style map where one reads better.
///
/// The two forms are interchangeable. A text value in a style position is
/// parsed; a map value in a text position is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Plain attribute text.
    Text(String),
    /// A parsed style map, usable for `style` and serialized elsewhere.
    Style(StyleMap),
}

impl AttrValue {
    /// This value as a style map, parsing the text form.
    #[must_use]
    pub fn to_style_map(&self) -> StyleMap {
        match self {
            AttrValue::Text(text) => StyleMap::parse(text),
            AttrValue::Style(map) => map.clone(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

impl From<StyleMap> for AttrValue {
    fn from(map: StyleMap) -> Self {
        AttrValue::Style(map)
    }
}

/// A one-shot escape hatch run against the finished element.
///
/// Modifiers see the tree and the element's id after every other part of the
/// spec has been applied, so they can capture the id or perform tree surgery
/// the declarative form cannot express.
pub struct Modifier(Box<dyn FnOnce(&mut DomTree, NodeId)>);

impl Modifier {
    /// Wraps a closure to run against the finished element.
    pub fn new(callback: impl FnOnce(&mut DomTree, NodeId) + 'static) -> Self {
        Modifier(Box::new(callback))
    }

    /// Consumes the modifier, invoking its closure.
    pub fn apply(self, tree: &mut DomTree, id: NodeId) {
        (self.0)(tree, id);
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Modifier")
    }
}

/// A declarative element: a tag plus everything to apply to it.
///
/// Entry maps keep insertion order. Setting a name twice overwrites the
/// value in place, so the first position wins, the last value does.
#[derive(Debug, Default)]
pub struct ElementSpec {
    /// The element's tag name. Must not be empty at materialization time.
    pub tag: String,
    /// Attributes in insertion order. A `style` entry here is folded into
    /// the inline style rather than set verbatim.
    pub attributes: Vec<(String, AttrValue)>,
    /// The dedicated inline-style source; overrides same-named declarations
    /// from the `style` attribute entry.
    pub style: Option<AttrValue>,
    /// Node properties in insertion order, distinct from attributes.
    pub properties: Vec<(String, Value)>,
    /// Children applied in order before the tagged ones.
    pub children: Vec<NodeSpec>,
    /// Event listeners to register, in order, on top of any existing ones.
    pub events: Vec<EventListener>,
    /// Text content, appended as a text node without markup interpretation.
    pub text: Option<String>,
    /// Children introduced by tag-named keys, applied after `children`.
    pub tagged_children: Vec<ElementSpec>,
    /// Runs last, against the finished element.
    pub modifier: Option<Modifier>,
}

impl ElementSpec {
    /// Starts a spec for an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        ElementSpec {
            tag: tag.into(),
            ..ElementSpec::default()
        }
    }

    /// Sets an attribute. Repeating a name overwrites in place.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        set_entry(&mut self.attributes, name.into(), value.into());
        self
    }

    /// Sets the dedicated inline-style source.
    #[must_use]
    pub fn style(mut self, style: impl Into<AttrValue>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Sets a node property. Repeating a name overwrites in place.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        set_entry(&mut self.properties, name.into(), value.into());
        self
    }

    /// Appends a child spec.
    #[must_use]
    pub fn child(mut self, child: impl Into<NodeSpec>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Registers an event listener. Listeners accumulate; nothing is replaced.
    #[must_use]
    pub fn on(mut self, event_type: impl Into<String>, handler: EventHandler) -> Self {
        self.events.push(EventListener {
            event_type: event_type.into(),
            handler,
        });
        self
    }

    /// Appends a tagged child: `name` becomes the child's tag and `body`
    /// is applied to it. Any tag already set on `body` is replaced.
    #[must_use]
    pub fn tagged(mut self, name: impl Into<String>, mut body: ElementSpec) -> Self {
        body.tag = name.into();
        self.tagged_children.push(body);
        self
    }

    /// Attaches the modifier closure, run last against the finished element.
    #[must_use]
    pub fn modifier(mut self, callback: impl FnOnce(&mut DomTree, NodeId) + 'static) -> Self {
        self.modifier = Some(Modifier::new(callback));
        self
    }
}

/// Ordered insert with overwrite-in-place, the object-literal update rule.
fn set_entry<V>(entries: &mut Vec<(String, V)>, name: String, value: V) {
    match entries.iter_mut().find(|(existing, _)| *existing == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name, value)),
    }
}

/// Parses an element object body, consuming a map in document order.
///
/// With `tag_override` the body belongs to a tagged child: the key name has
/// already fixed the tag, and any `tag` entry in the body is read and
/// discarded. Without it a usable `tag` entry is required.
fn element_from_map<'de, A>(
    mut access: A,
    tag_override: Option<String>,
) -> Result<ElementSpec, A::Error>
where
    A: MapAccess<'de>,
{
    let tag_fixed = tag_override.is_some();
    let mut spec = ElementSpec {
        tag: tag_override.unwrap_or_default(),
        ..ElementSpec::default()
    };
    while let Some(key) = access.next_key::<String>()? {
        match key.as_str() {
            "tag" => {
                let tag = access.next_value::<String>()?;
                if !tag_fixed {
                    spec.tag = tag;
                }
            }
            "attributes" => {
                let AttrPairs(pairs) = access.next_value()?;
                for (name, value) in pairs {
                    set_entry(&mut spec.attributes, name, value);
                }
            }
            "style" => spec.style = Some(access.next_value()?),
            "text" => spec.text = Some(access.next_value()?),
            "children" => spec.children.extend(access.next_value::<NodeSpec>()?.into_list()),
            "properties" => {
                let PropPairs(pairs) = access.next_value()?;
                for (name, value) in pairs {
                    set_entry(&mut spec.properties, name, value);
                }
            }
            "events" => {
                return Err(de::Error::custom(
                    "event handlers cannot be carried in a data document; \
                     register them with `ElementSpec::on`",
                ));
            }
            "modifier" => {
                return Err(de::Error::custom(
                    "modifiers cannot be carried in a data document; \
                     attach them with `ElementSpec::modifier`",
                ));
            }
            _ => {
                let TaggedChildValue(bodies) = access.next_value()?;
                for mut body in bodies {
                    body.tag.clone_from(&key);
                    spec.tagged_children.push(body);
                }
            }
        }
    }
    if !tag_fixed && spec.tag.trim().is_empty() {
        return Err(de::Error::missing_field("tag"));
    }
    Ok(spec)
}

impl<'de> Deserialize<'de> for ElementSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ElementSpecVisitor;

        impl<'de> Visitor<'de> for ElementSpecVisitor {
            type Value = ElementSpec;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an element object with a `tag` entry")
            }

            fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                element_from_map(access, None)
            }
        }

        deserializer.deserialize_map(ElementSpecVisitor)
    }
}

impl<'de> Deserialize<'de> for NodeSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeSpecVisitor;

        impl<'de> Visitor<'de> for NodeSpecVisitor {
            type Value = NodeSpec;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("null, an element object, or an array of specs")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(NodeSpec::Null)
            }

            fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let spec = element_from_map(access, None)?;
                Ok(NodeSpec::Element(Box::new(spec)))
            }

            fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = access.next_element::<NodeSpec>()? {
                    items.push(item);
                }
                Ok(NodeSpec::List(items))
            }
        }

        deserializer.deserialize_any(NodeSpecVisitor)
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AttrValueVisitor;

        impl<'de> Visitor<'de> for AttrValueVisitor {
            type Value = AttrValue;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an attribute value: text, a scalar, or a style map")
            }

            fn visit_str<E>(self, text: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(AttrValue::Text(text.to_owned()))
            }

            fn visit_bool<E>(self, flag: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(AttrValue::Text(flag.to_string()))
            }

            fn visit_i64<E>(self, number: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(AttrValue::Text(number.to_string()))
            }

            fn visit_u64<E>(self, number: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(AttrValue::Text(number.to_string()))
            }

            fn visit_f64<E>(self, number: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(AttrValue::Text(number.to_string()))
            }

            fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let style = StyleMap::deserialize(MapAccessDeserializer::new(access))?;
                Ok(AttrValue::Style(style))
            }
        }

        deserializer.deserialize_any(AttrValueVisitor)
    }
}

/// The value of a tag-named key: null, one body, or an array of bodies.
struct TaggedChildValue(Vec<ElementSpec>);

impl<'de> Deserialize<'de> for TaggedChildValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TaggedVisitor;

        impl<'de> Visitor<'de> for TaggedVisitor {
            type Value = TaggedChildValue;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("null, an element body, or an array of element bodies")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(TaggedChildValue(Vec::new()))
            }

            fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let body = element_from_map(access, Some(String::new()))?;
                Ok(TaggedChildValue(vec![body]))
            }

            fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut bodies = Vec::new();
                while let Some(TaggedChildValue(inner)) = access.next_element()? {
                    bodies.extend(inner);
                }
                Ok(TaggedChildValue(bodies))
            }
        }

        deserializer.deserialize_any(TaggedVisitor)
    }
}

/// The `attributes` entry: an ordered name-to-value map.
struct AttrPairs(Vec<(String, AttrValue)>);

impl<'de> Deserialize<'de> for AttrPairs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AttrPairsVisitor;

        impl<'de> Visitor<'de> for AttrPairsVisitor {
            type Value = AttrPairs;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of attribute names to values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::new();
                while let Some((name, value)) = access.next_entry::<String, AttrValue>()? {
                    set_entry(&mut pairs, name, value);
                }
                Ok(AttrPairs(pairs))
            }
        }

        deserializer.deserialize_map(AttrPairsVisitor)
    }
}

/// The `properties` entry: an ordered name-to-value map of arbitrary JSON.
struct PropPairs(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for PropPairs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PropPairsVisitor;

        impl<'de> Visitor<'de> for PropPairsVisitor {
            type Value = PropPairs;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of property names to values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::new();
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    set_entry(&mut pairs, name, value);
                }
                Ok(PropPairs(pairs))
            }
        }

        deserializer.deserialize_map(PropPairsVisitor)
    }
}
