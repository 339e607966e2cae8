//! In-memory document: a slotmap-backed node arena implementing
//! [`NativeNode`].
//!
//! The render layer hands mount markup to [`MemoryDocument::render`], which
//! parses it into nodes and indexes every `data-nodeid` so a [`NodeHandle`]
//! can be mapped back to its live node. Each node keeps a log of the native
//! writes made through [`NativeNode`], so callers can count mutations.

use std::collections::{BTreeMap, HashMap, VecDeque};

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use super::parser::{is_void_element, parse_markup, parse_style_text, unescape, Fragment, MarkupError};
use super::{HostValue, NativeNode};
use crate::component::markup::escape;
use crate::handle::{NodeHandle, HANDLE_ATTRIBUTE};
use crate::style::{camelize, hyphenate};

const EMPTY_CHILDREN: &[NodeId] = &[];

/// Text properties mirrored onto an attribute.
const REFLECTED_TEXT: &[(&str, &str)] = &[("className", "class"), ("htmlFor", "for"), ("id", "id")];

/// Boolean properties mirrored onto attribute presence.
const REFLECTED_BOOL: &[(&str, &str)] = &[
    ("disabled", "disabled"),
    ("hidden", "hidden"),
    ("multiple", "multiple"),
    ("readOnly", "readonly"),
];

/// Boolean properties initialised from attribute presence but not mirrored
/// back once written.
const STATE_BOOL: &[&str] = &["checked", "selected"];

new_key_type! {
    /// Unique identifier for a node in a [`MemoryDocument`].
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

/// A native write recorded on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SetAttribute { name: String, value: String },
    RemoveAttribute { name: String },
    SetProperty { name: String, value: HostValue },
    SetStyle { key: String, value: String },
    SetInnerHtml(String),
    SetTextContent(String),
}

// ---------------------------------------------------------------------------
// MemoryNode
// ---------------------------------------------------------------------------

/// Data of a single node.
#[derive(Debug, Clone)]
pub struct MemoryNode {
    /// Tag name for elements, `None` for text nodes.
    tag: Option<String>,
    /// Raw text for text nodes.
    text: String,
    attributes: BTreeMap<String, String>,
    properties: BTreeMap<String, HostValue>,
    /// Inline style, keyed by camelCase name.
    style: BTreeMap<String, String>,
    handle: Option<NodeHandle>,
    mutations: Vec<Mutation>,
}

impl MemoryNode {
    fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            text: String::new(),
            attributes: BTreeMap::new(),
            properties: BTreeMap::new(),
            style: BTreeMap::new(),
            handle: None,
            mutations: Vec::new(),
        }
    }

    fn text_node(text: impl Into<String>) -> Self {
        Self {
            tag: None,
            text: text.into(),
            ..Self::element("")
        }
    }

    /// Tag name, or `None` for a text node.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn is_text(&self) -> bool {
        self.tag.is_none()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn style(&self, key: &str) -> &str {
        self.style.get(key).map_or("", String::as_str)
    }

    pub fn handle(&self) -> Option<NodeHandle> {
        self.handle
    }

    /// Native writes made since the node was created (or last cleared).
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    fn property(&self, name: &str) -> HostValue {
        if let Some((_, attr)) = REFLECTED_TEXT.iter().find(|(prop, _)| *prop == name) {
            return HostValue::Text(self.attribute(attr).unwrap_or_default().to_owned());
        }
        if let Some((_, attr)) = REFLECTED_BOOL.iter().find(|(prop, _)| *prop == name) {
            return HostValue::Bool(self.attributes.contains_key(*attr));
        }
        if let Some(value) = self.properties.get(name) {
            return value.clone();
        }
        if STATE_BOOL.contains(&name) {
            HostValue::Bool(self.attributes.contains_key(name))
        } else {
            HostValue::Text(self.attribute(name).unwrap_or_default().to_owned())
        }
    }

    fn write_property(&mut self, name: &str, value: HostValue) {
        if let Some((_, attr)) = REFLECTED_TEXT.iter().find(|(prop, _)| *prop == name) {
            self.attributes.insert((*attr).to_owned(), value.as_text().to_owned());
        } else if let Some((_, attr)) = REFLECTED_BOOL.iter().find(|(prop, _)| *prop == name) {
            if value == HostValue::Bool(true) {
                self.attributes.insert((*attr).to_owned(), String::new());
            } else {
                self.attributes.remove(*attr);
            }
        } else {
            self.properties.insert(name.to_owned(), value.clone());
        }
        self.mutations.push(Mutation::SetProperty {
            name: name.to_owned(),
            value,
        });
    }
}

// ---------------------------------------------------------------------------
// MemoryDocument
// ---------------------------------------------------------------------------

/// The in-memory node tree, backed by a slotmap arena.
///
/// Parent/child relationships live in secondary maps so that removal is
/// O(subtree size) and lookup is O(1).
#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: SlotMap<NodeId, MemoryNode>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    handles: HashMap<NodeHandle, NodeId>,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render markup into a fresh container and return its first element.
    ///
    /// The container is a `div` without a handle; reach it with
    /// [`MemoryDocument::parent`].
    pub fn render(&mut self, markup: &str) -> Result<NodeId, MarkupError> {
        let fragments = parse_markup(markup)?;
        let container = self.insert_node(MemoryNode::element("div"));
        self.insert_fragments(container, fragments);
        let first = self
            .children(container)
            .iter()
            .copied()
            .find(|&id| self.nodes.get(id).is_some_and(|n| !n.is_text()));
        match first {
            Some(id) => {
                tracing::trace!(nodes = self.nodes.len(), "rendered markup");
                Ok(id)
            }
            None => {
                self.remove(container);
                Err(MarkupError::NoElement)
            }
        }
    }

    /// The live node rendered for `handle`, if any.
    pub fn node_for(&self, handle: NodeHandle) -> Option<NodeId> {
        self.handles.get(&handle).copied()
    }

    /// The handle a node was rendered with, if any.
    pub fn handle_of(&self, id: NodeId) -> Option<NodeHandle> {
        self.nodes.get(id).and_then(MemoryNode::handle)
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(id)
    }

    /// Read cursor over a node.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        if self.contains(id) {
            Some(NodeRef { doc: self, id })
        } else {
            None
        }
    }

    /// Write cursor over a node, implementing [`NativeNode`].
    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_>> {
        if self.contains(id) {
            Some(NodeMut { doc: self, id })
        } else {
            None
        }
    }

    /// Enclosing node. Rendered roots sit in a handle-less container.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Child nodes in document order; empty for text nodes and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Live nodes, containers and text nodes included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` is still live.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Serialized content of a node.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_outer_html(child, &mut out);
        }
        out
    }

    /// Serialized node including its own tag.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_outer_html(id, &mut out);
        out
    }

    /// Concatenated, unescaped text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(current) {
                if node.is_text() {
                    out.push_str(&unescape(&node.text));
                }
            }
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Detach `id` and drop its subtree, unindexing every handle rendered
    /// inside it. Returns the detached node's data.
    pub fn remove(&mut self, id: NodeId) -> Option<MemoryNode> {
        if !self.contains(id) {
            return None;
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        let mut pending = VecDeque::from([id]);
        let mut detached = None;
        let mut dropped = 0usize;

        while let Some(current) = pending.pop_front() {
            pending.extend(self.children.remove(current).unwrap_or_default());
            self.parent.remove(current);
            let Some(node) = self.nodes.remove(current) else {
                continue;
            };
            dropped += 1;
            if let Some(handle) = node.handle {
                // A re-render may have indexed the handle to a newer node.
                if self.handles.get(&handle) == Some(&current) {
                    self.handles.remove(&handle);
                }
            }
            if current == id {
                detached = Some(node);
            }
        }

        tracing::trace!(dropped, "removed subtree");
        detached
    }

    fn insert_node(&mut self, node: MemoryNode) -> NodeId {
        let handle = node.handle;
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        if let Some(handle) = handle {
            self.handles.insert(handle, id);
        }
        id
    }

    fn insert_child(&mut self, parent: NodeId, node: MemoryNode) -> NodeId {
        let id = self.insert_node(node);
        self.parent.insert(id, parent);
        if let Some(kids) = self.children.get_mut(parent) {
            kids.push(id);
        }
        id
    }

    fn insert_fragments(&mut self, parent: NodeId, fragments: Vec<Fragment>) {
        for fragment in fragments {
            match fragment {
                Fragment::Text(text) => {
                    self.insert_child(parent, MemoryNode::text_node(text));
                }
                Fragment::Element {
                    tag,
                    attributes,
                    children,
                } => {
                    let mut node = MemoryNode::element(tag);
                    for (name, value) in attributes {
                        if name == "style" {
                            for (key, val) in parse_style_text(&value) {
                                node.style.insert(camelize(&key), val);
                            }
                            continue;
                        }
                        if name == HANDLE_ATTRIBUTE {
                            node.handle = NodeHandle::parse(&value);
                        }
                        node.attributes.insert(name, value);
                    }
                    let id = self.insert_child(parent, node);
                    self.insert_fragments(id, children);
                }
            }
        }
    }

    fn clear_children(&mut self, id: NodeId) {
        let kids = self.children(id).to_vec();
        for kid in kids {
            self.remove(kid);
        }
    }

    fn replace_with_markup(&mut self, id: NodeId, html: &str) {
        self.clear_children(id);
        match parse_markup(html) {
            Ok(fragments) => self.insert_fragments(id, fragments),
            Err(err) => {
                tracing::warn!(error = %err, "inner HTML is not well-formed; inserting it as text");
                self.insert_child(id, MemoryNode::text_node(html));
            }
        }
        tracing::debug!(children = self.children(id).len(), "replaced content");
    }

    fn write_outer_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let Some(tag) = node.tag() else {
            out.push_str(&node.text);
            return;
        };
        out.push('<');
        out.push_str(tag);
        for (name, value) in &node.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        let style: String = node
            .style
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{}:{};", hyphenate(key), value))
            .collect();
        if !style.is_empty() {
            out.push_str(&format!(" style=\"{}\"", escape(&style)));
        }
        out.push('>');
        if is_void_element(tag) {
            return;
        }
        for &child in self.children(id) {
            self.write_outer_html(child, out);
        }
        out.push_str(&format!("</{tag}>"));
    }
}

// ---------------------------------------------------------------------------
// Cursors
// ---------------------------------------------------------------------------

/// Read cursor over one node of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a MemoryDocument,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &'a MemoryNode {
        &self.doc.nodes[self.id]
    }

    pub fn tag(&self) -> Option<&'a str> {
        self.data().tag()
    }

    pub fn handle(&self) -> Option<NodeHandle> {
        self.data().handle
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.data().attribute(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.data().attributes.contains_key(name)
    }

    pub fn property(&self, name: &str) -> HostValue {
        self.data().property(name)
    }

    /// Shorthand for the `className` property.
    pub fn class_name(&self) -> String {
        self.property("className").as_text().to_owned()
    }

    pub fn style(&self, key: &str) -> &'a str {
        self.data().style(key)
    }

    pub fn inner_html(&self) -> String {
        self.doc.inner_html(self.id)
    }

    pub fn text_content(&self) -> String {
        self.doc.text_content(self.id)
    }

    pub fn mutations(&self) -> &'a [Mutation] {
        self.data().mutations()
    }
}

/// Write cursor over one node of a [`MemoryDocument`].
#[derive(Debug)]
pub struct NodeMut<'a> {
    doc: &'a mut MemoryDocument,
    id: NodeId,
}

impl NodeMut<'_> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Reborrow as a read cursor.
    pub fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef {
            doc: &*self.doc,
            id: self.id,
        }
    }

    pub fn mutations(&self) -> &[Mutation] {
        self.doc.nodes[self.id].mutations()
    }

    /// Forget recorded mutations.
    pub fn clear_mutations(&mut self) {
        self.data_mut().mutations.clear();
    }

    fn data_mut(&mut self) -> &mut MemoryNode {
        &mut self.doc.nodes[self.id]
    }
}

impl NativeNode for NodeMut<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.as_node_ref().attribute(name).map(str::to_owned)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let node = self.data_mut();
        node.attributes.insert(name.to_owned(), value.to_owned());
        node.mutations.push(Mutation::SetAttribute {
            name: name.to_owned(),
            value: value.to_owned(),
        });
    }

    fn remove_attribute(&mut self, name: &str) {
        let node = self.data_mut();
        node.attributes.remove(name);
        node.mutations.push(Mutation::RemoveAttribute {
            name: name.to_owned(),
        });
    }

    fn property(&self, name: &str) -> HostValue {
        self.as_node_ref().property(name)
    }

    fn set_property(&mut self, name: &str, value: HostValue) {
        self.data_mut().write_property(name, value);
    }

    fn style(&self, key: &str) -> String {
        self.as_node_ref().style(key).to_owned()
    }

    fn set_style(&mut self, key: &str, value: &str) {
        let node = self.data_mut();
        if value.is_empty() {
            node.style.remove(key);
        } else {
            node.style.insert(key.to_owned(), value.to_owned());
        }
        node.mutations.push(Mutation::SetStyle {
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }

    fn inner_html(&self) -> String {
        self.doc.inner_html(self.id)
    }

    fn set_inner_html(&mut self, html: &str) {
        let id = self.id;
        self.doc.replace_with_markup(id, html);
        self.data_mut()
            .mutations
            .push(Mutation::SetInnerHtml(html.to_owned()));
    }

    fn set_text_content(&mut self, text: &str) {
        let id = self.id;
        self.doc.clear_children(id);
        if !text.is_empty() {
            self.doc.insert_child(id, MemoryNode::text_node(escape(text)));
        }
        self.data_mut()
            .mutations
            .push(Mutation::SetTextContent(text.to_owned()));
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Rendering ────────────────────────────────────────────────────

    #[test]
    fn render_returns_first_element() {
        let mut doc = MemoryDocument::new();
        let id = doc.render(r#"<div class="monkey"></div>"#).unwrap();
        let node = doc.node(id).unwrap();
        assert_eq!(node.tag(), Some("div"));
        assert_eq!(node.class_name(), "monkey");
        assert!(doc.parent(id).is_some());
    }

    #[test]
    fn render_indexes_handles() {
        let mut handles: SlotMap<NodeHandle, ()> = SlotMap::with_key();
        let h = handles.insert(());
        let mut doc = MemoryDocument::new();
        let id = doc
            .render(&format!(r#"<div data-nodeid="{}"></div>"#, h.to_raw()))
            .unwrap();
        assert_eq!(doc.node_for(h), Some(id));
        assert_eq!(doc.handle_of(id), Some(h));
    }

    #[test]
    fn render_parses_inline_style() {
        let mut doc = MemoryDocument::new();
        let id = doc
            .render(r#"<div style="display:none;font-family:Arial;"></div>"#)
            .unwrap();
        let node = doc.node(id).unwrap();
        assert_eq!(node.style("display"), "none");
        assert_eq!(node.style("fontFamily"), "Arial");
        assert_eq!(node.style("color"), "");
    }

    #[test]
    fn render_keeps_vendor_prefixed_style_keys() {
        let mut doc = MemoryDocument::new();
        let id = doc.render(r#"<div style="-moz-transform:none;"></div>"#).unwrap();
        assert_eq!(doc.node(id).unwrap().style("MozTransform"), "none");
        assert_eq!(doc.inner_html(doc.parent(id).unwrap()), r#"<div style="-moz-transform:none;"></div>"#);
    }

    #[test]
    fn render_without_element_fails() {
        let mut doc = MemoryDocument::new();
        assert_eq!(doc.render("just text"), Err(MarkupError::NoElement));
        assert!(doc.is_empty());
    }

    #[test]
    fn render_does_not_log_mutations() {
        let mut doc = MemoryDocument::new();
        let id = doc.render(r#"<img height="17">"#).unwrap();
        assert!(doc.node(id).unwrap().mutations().is_empty());
    }

    // ── Properties ───────────────────────────────────────────────────

    #[test]
    fn class_name_reflects_class_attribute() {
        let mut doc = MemoryDocument::new();
        let id = doc.render("<div></div>").unwrap();
        let mut node = doc.node_mut(id).unwrap();
        node.set_property("className", HostValue::from("foo"));
        assert_eq!(node.attribute("class").as_deref(), Some("foo"));
        assert_eq!(node.as_node_ref().class_name(), "foo");
    }

    #[test]
    fn value_initialised_from_attribute() {
        let mut doc = MemoryDocument::new();
        let id = doc.render(r#"<input value="a">"#).unwrap();
        let mut node = doc.node_mut(id).unwrap();
        assert_eq!(node.property("value"), HostValue::from("a"));
        node.set_property("value", HostValue::from("b"));
        assert_eq!(node.property("value"), HostValue::from("b"));
        assert_eq!(node.attribute("value").as_deref(), Some("a"));
    }

    #[test]
    fn checked_state_from_attribute_presence() {
        let mut doc = MemoryDocument::new();
        let id = doc.render(r#"<input checked="">"#).unwrap();
        let mut node = doc.node_mut(id).unwrap();
        assert_eq!(node.property("checked"), HostValue::Bool(true));
        node.set_property("checked", HostValue::Bool(false));
        assert_eq!(node.property("checked"), HostValue::Bool(false));
    }

    #[test]
    fn disabled_reflects_presence() {
        let mut doc = MemoryDocument::new();
        let id = doc.render("<button></button>").unwrap();
        let mut node = doc.node_mut(id).unwrap();
        node.set_property("disabled", HostValue::Bool(true));
        assert!(node.has_attribute("disabled"));
        node.set_property("disabled", HostValue::Bool(false));
        assert!(!node.has_attribute("disabled"));
    }

    // ── Content ──────────────────────────────────────────────────────

    #[test]
    fn set_inner_html_replaces_children() {
        let mut doc = MemoryDocument::new();
        let id = doc.render("<div><span>a</span></div>").unwrap();
        let before = doc.len();
        let mut node = doc.node_mut(id).unwrap();
        node.set_inner_html(":)");
        assert_eq!(node.inner_html(), ":)");
        node.set_inner_html("");
        assert_eq!(node.inner_html(), "");
        assert_eq!(doc.len(), before - 2);
    }

    #[test]
    fn malformed_inner_html_becomes_text() {
        let mut doc = MemoryDocument::new();
        let id = doc.render("<div></div>").unwrap();
        let mut node = doc.node_mut(id).unwrap();
        node.set_inner_html("<b>");
        assert_eq!(doc.children(id).len(), 1);
        assert!(doc.get(doc.children(id)[0]).unwrap().is_text());
    }

    #[test]
    fn set_text_content_escapes() {
        let mut doc = MemoryDocument::new();
        let id = doc.render("<div></div>").unwrap();
        let mut node = doc.node_mut(id).unwrap();
        node.set_text_content("a < b");
        assert_eq!(node.inner_html(), "a &lt; b");
        assert_eq!(node.as_node_ref().text_content(), "a < b");
    }

    #[test]
    fn removed_children_drop_handle_index() {
        let mut handles: SlotMap<NodeHandle, ()> = SlotMap::with_key();
        let child = handles.insert(());
        let mut doc = MemoryDocument::new();
        let id = doc
            .render(&format!(
                r#"<div><span data-nodeid="{}"></span></div>"#,
                child.to_raw()
            ))
            .unwrap();
        assert!(doc.node_for(child).is_some());
        doc.node_mut(id).unwrap().set_inner_html("");
        assert!(doc.node_for(child).is_none());
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn outer_html_round_trips() {
        let mut doc = MemoryDocument::new();
        let markup = r#"<div class="a" title="x &amp; y" style="color:red;"><img height="17">hi</div>"#;
        let id = doc.render(markup).unwrap();
        insta::assert_snapshot!(
            doc.outer_html(id),
            @r#"<div class="a" title="x &amp; y" style="color:red;"><img height="17">hi</div>"#
        );
    }

    // ── Mutation log ─────────────────────────────────────────────────

    #[test]
    fn writes_are_logged() {
        let mut doc = MemoryDocument::new();
        let id = doc.render("<div></div>").unwrap();
        let mut node = doc.node_mut(id).unwrap();
        node.set_attribute("title", "t");
        node.set_style("left", "1px");
        node.remove_attribute("title");
        assert_eq!(
            node.mutations(),
            vec![
                Mutation::SetAttribute { name: "title".into(), value: "t".into() },
                Mutation::SetStyle { key: "left".into(), value: "1px".into() },
                Mutation::RemoveAttribute { name: "title".into() },
            ]
        );
        node.clear_mutations();
        assert!(node.mutations().is_empty());
    }
}
