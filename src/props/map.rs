//! Props: the property map describing one native node.

use std::collections::BTreeMap;

use super::element::Child;
use super::value::{Listener, PropValue};
use super::{CHILDREN, CLASS_NAME, CONTENT, DANGEROUSLY_SET_INNER_HTML, HTML_KEY, STYLE};

/// A mapping from property name to [`PropValue`].
///
/// Iteration is in key order, which keeps emitted mutations and markup
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    entries: BTreeMap<String, PropValue>,
}

impl Props {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property (builder).
    pub fn set(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `className` (builder).
    pub fn class_name(self, class: impl Into<String>) -> Self {
        self.set(CLASS_NAME, class.into())
    }

    /// Set the `style` mapping (builder).
    pub fn style(self, style: Props) -> Self {
        self.set(STYLE, style)
    }

    /// Set plain text `content` (builder).
    pub fn content(self, content: impl Into<PropValue>) -> Self {
        self.set(CONTENT, content)
    }

    /// Set `children` (builder).
    pub fn children(self, children: impl IntoIterator<Item = Child>) -> Self {
        self.set(CHILDREN, children.into_iter().collect::<Vec<_>>())
    }

    /// Set raw markup through `dangerouslySetInnerHTML: { __html }` (builder).
    pub fn inner_html(self, html: impl Into<String>) -> Self {
        self.set(
            DANGEROUSLY_SET_INNER_HTML,
            Props::new().set(HTML_KEY, html.into()),
        )
    }

    /// Attach an event listener, e.g. `on("onClick", || ..)` (builder).
    pub fn on(self, event: impl Into<String>, f: impl Fn() + 'static) -> Self {
        self.set(event, Listener::new(f))
    }

    /// Insert or replace a property.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Remove a property, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.entries.remove(name)
    }

    /// Look up a property.
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries.get(name)
    }

    /// Look up a property, treating `Null` as absent.
    pub fn get_present(&self, name: &str) -> Option<&PropValue> {
        self.entries.get(name).filter(|v| !v.is_null())
    }

    /// Whether the key exists (including `Null` values).
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate over `(name, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over property names in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_values() {
        let props = Props::new().class_name("foo").set("height", "17");
        assert_eq!(props.get("className"), Some(&PropValue::from("foo")));
        assert_eq!(props.get("height"), Some(&PropValue::from("17")));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn set_replaces_existing() {
        let props = Props::new().set("a", 1).set("a", 2);
        assert_eq!(props.get("a"), Some(&PropValue::Number(2.0)));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn get_present_skips_null() {
        let props = Props::new().set("className", PropValue::Null);
        assert!(props.contains_key("className"));
        assert!(props.get_present("className").is_none());
    }

    #[test]
    fn iteration_is_key_ordered() {
        let props = Props::new().set("zIndex", 1).set("color", "red").set("left", 2);
        let keys: Vec<_> = props.keys().collect();
        assert_eq!(keys, vec!["color", "left", "zIndex"]);
    }

    #[test]
    fn inner_html_wraps_html_key() {
        let props = Props::new().inner_html(":)");
        let wrapped = props.get(DANGEROUSLY_SET_INNER_HTML).and_then(PropValue::as_map);
        assert_eq!(
            wrapped.and_then(|m| m.get(HTML_KEY)),
            Some(&PropValue::from(":)"))
        );
    }

    #[test]
    fn collect_from_pairs() {
        let props: Props = [("display", "none"), ("color", "red")].into_iter().collect();
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn remove_returns_previous() {
        let mut props = Props::new().set("a", true);
        assert_eq!(props.remove("a"), Some(PropValue::Bool(true)));
        assert!(props.is_empty());
    }
}
