//! Mount markup: escaping, open tag serialization, closing tags.

use crate::config::ReconcileConfig;
use crate::handle::{NodeHandle, HANDLE_ATTRIBUTE};
use crate::host::parser::is_void_element;
use crate::props::{is_content_key, is_event_key, PropValue, Props, STYLE};
use crate::style::create_markup_for_styles;

/// Escape text for use in markup content or a quoted attribute value.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize one property as ` name="value"`, or `None` if it renders
/// nothing (`Null`, `false`, non-textual values, falsy booleans).
pub fn create_markup_for_property(name: &str, value: &PropValue, config: &ReconcileConfig) -> Option<String> {
    let attribute = config.attribute_name(name);
    if config.property(name).is_some_and(|info| info.boolean) {
        return value.is_truthy().then(|| format!(" {attribute}=\"\""));
    }
    let text = value.to_text()?;
    Some(format!(" {}=\"{}\"", attribute, escape(&text)))
}

/// Serialize the open tag for a node: tag name, attributes in key order,
/// inline style, and the node handle last.
///
/// Listener and content properties are not rendered.
pub fn create_open_tag_markup(
    tag: &str,
    props: &Props,
    handle: NodeHandle,
    config: &ReconcileConfig,
) -> String {
    let mut markup = format!("<{tag}");
    for (name, value) in props.iter() {
        if is_event_key(name) || is_content_key(name) {
            continue;
        }
        if name == STYLE {
            if let Some(style) = value.as_map() {
                let serialized = create_markup_for_styles(style, config);
                if !serialized.is_empty() {
                    markup.push_str(&format!(" style=\"{}\"", escape(&serialized)));
                }
            }
            continue;
        }
        if let Some(attribute) = create_markup_for_property(name, value, config) {
            markup.push_str(&attribute);
        }
    }
    markup.push_str(&format!(" {}=\"{}\">", HANDLE_ATTRIBUTE, handle.to_raw()));
    markup
}

/// Closing tag, empty for void elements.
pub fn close_tag(tag: &str) -> String {
    if is_void_element(tag) {
        String::new()
    } else {
        format!("</{tag}>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn handle() -> NodeHandle {
        let mut handles: SlotMap<NodeHandle, ()> = SlotMap::with_key();
        handles.insert(())
    }

    fn open_tag(props: Props) -> String {
        create_open_tag_markup("div", &props, handle(), &ReconcileConfig::default())
    }

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;");
        assert_eq!(escape("plain"), "plain");
    }

    // ── className ────────────────────────────────────────────────────

    #[test]
    fn class_name_renders_class() {
        assert!(open_tag(Props::new().class_name("a")).contains(r#" class="a""#));
        assert!(open_tag(Props::new().class_name("a b")).contains(r#" class="a b""#));
        assert!(open_tag(Props::new().class_name("")).contains(r#" class="""#));
    }

    #[test]
    fn null_class_name_is_omitted() {
        let markup = open_tag(Props::new().set("className", PropValue::Null));
        assert!(!markup.contains("class="));
    }

    // ── Other properties ─────────────────────────────────────────────

    #[test]
    fn full_open_tag() {
        let h = handle();
        let props = Props::new()
            .class_name("x")
            .set("height", 17)
            .set("title", "a\"b")
            .style(Props::new().set("display", "none").set("left", 1))
            .on("onClick", || {})
            .content("ignored");
        let markup = create_open_tag_markup("div", &props, h, &ReconcileConfig::default());
        assert_eq!(
            markup,
            format!(
                r#"<div class="x" height="17" style="display:none;left:1px;" title="a&quot;b" data-nodeid="{}">"#,
                h.to_raw()
            )
        );
    }

    #[test]
    fn boolean_properties() {
        assert!(open_tag(Props::new().set("checked", true)).contains(r#" checked="""#));
        assert!(!open_tag(Props::new().set("checked", false)).contains("checked"));
        assert!(open_tag(Props::new().set("readOnly", true)).contains(r#" readonly="""#));
    }

    #[test]
    fn empty_style_is_omitted() {
        let markup = open_tag(Props::new().style(Props::new()));
        assert!(!markup.contains("style="));
    }

    #[test]
    fn false_attribute_is_omitted() {
        assert!(!open_tag(Props::new().set("title", false)).contains("title"));
    }

    #[test]
    fn close_tags() {
        assert_eq!(close_tag("div"), "</div>");
        assert_eq!(close_tag("img"), "");
    }
}
