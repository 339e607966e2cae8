//! Inline style serialization and style key naming.

use crate::config::ReconcileConfig;
use crate::props::Props;

use super::value::resolve_style_value;

/// Serialize a style mapping as inline style text: `font-family:Arial;left:1px;`.
///
/// Keys resolving to `""` are skipped. Returns an empty string when nothing
/// remains.
pub fn create_markup_for_styles(style: &Props, config: &ReconcileConfig) -> String {
    let mut serialized = String::new();
    for (key, value) in style.iter() {
        let resolved = resolve_style_value(key, value, config);
        if resolved.is_empty() {
            continue;
        }
        serialized.push_str(&hyphenate(key));
        serialized.push(':');
        serialized.push_str(&resolved);
        serialized.push(';');
    }
    serialized
}

/// `fontFamily` -> `font-family`.
pub fn hyphenate(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `font-family` -> `fontFamily`. A leading `-` marks a vendor prefix:
/// `-moz-transform` -> `MozTransform`.
pub fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
