//! Native node surface and the in-memory host used by the render layer.
//!
//! The reconciliation core only talks to [`NativeNode`]. Every operation is
//! synchronous and assumed to succeed once a node is mounted.

pub mod memory;
pub mod parser;
pub mod tokenizer;

pub use memory::{MemoryDocument, MemoryNode, Mutation, NodeId, NodeMut, NodeRef};
pub use parser::{parse_markup, parse_style_text, Fragment, MarkupError};

/// A value held by a node property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostValue {
    Text(String),
    Bool(bool),
}

impl HostValue {
    /// Text payload, or `""` for booleans.
    pub fn as_text(&self) -> &str {
        match self {
            HostValue::Text(text) => text,
            HostValue::Bool(_) => "",
        }
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Text(value.to_owned())
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

/// Mutation and query surface of one live native node.
pub trait NativeNode {
    /// Attribute value, or `None` if the attribute is absent.
    fn attribute(&self, name: &str) -> Option<String>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    fn set_attribute(&mut self, name: &str, value: &str);

    fn remove_attribute(&mut self, name: &str);

    /// Current value of a node property (e.g. `className`, `value`).
    fn property(&self, name: &str) -> HostValue;

    fn set_property(&mut self, name: &str, value: HostValue);

    /// Current value of one inline style key; `""` when unset.
    fn style(&self, key: &str) -> String;

    fn set_style(&mut self, key: &str, value: &str);

    fn inner_html(&self) -> String;

    /// Replace all content with parsed markup.
    fn set_inner_html(&mut self, html: &str);

    /// Replace all content with a single text node.
    fn set_text_content(&mut self, text: &str);
}
