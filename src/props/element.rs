//! Element and child descriptors.

use super::map::Props;

/// A declared native element: tag name plus its property map.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub props: Props,
}

impl Element {
    pub fn new(tag: impl Into<String>, props: Props) -> Self {
        Self {
            tag: tag.into(),
            props,
        }
    }
}

/// One entry of a `children` property.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// Escaped text.
    Text(String),
    /// A nested native element, mounted with its own handle.
    Element(Element),
}

impl Child {
    pub fn text(text: impl Into<String>) -> Self {
        Child::Text(text.into())
    }

    pub fn element(tag: impl Into<String>, props: Props) -> Self {
        Child::Element(Element::new(tag, props))
    }
}

impl From<&str> for Child {
    fn from(value: &str) -> Self {
        Child::Text(value.to_owned())
    }
}

impl From<Element> for Child {
    fn from(value: Element) -> Self {
        Child::Element(value)
    }
}
