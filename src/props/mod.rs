//! Property maps: values, listeners, element and child descriptors.

pub mod element;
pub mod map;
pub mod value;

pub use element::{Child, Element};
pub use map::Props;
pub use value::{format_number, Listener, PropValue};

/// Inline style mapping.
pub const STYLE: &str = "style";
/// Child descriptors.
pub const CHILDREN: &str = "children";
/// Plain text content.
pub const CONTENT: &str = "content";
/// Raw markup, wrapped as `{ __html: "..." }`.
pub const DANGEROUSLY_SET_INNER_HTML: &str = "dangerouslySetInnerHTML";
/// Key inside the raw markup wrapper.
pub const HTML_KEY: &str = "__html";
/// CSS class list, rendered as the `class` attribute.
pub const CLASS_NAME: &str = "className";

/// Whether `name` is one of the three content-bearing keys.
pub fn is_content_key(name: &str) -> bool {
    matches!(name, CHILDREN | CONTENT | DANGEROUSLY_SET_INNER_HTML)
}

/// Whether `name` names an event listener: `on` followed by an uppercase
/// letter, e.g. `onClick`.
pub fn is_event_key(name: &str) -> bool {
    name.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}
