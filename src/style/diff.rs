//! Style diffing: emit only the style keys whose resolved value changed.

use crate::config::ReconcileConfig;
use crate::host::NativeNode;
use crate::props::Props;

use super::value::resolve_style_value;

/// One style write: `(key, resolved value)`. An empty value resets the key.
pub type StylePatch = (String, String);

/// Diff two style mappings. `None` is an empty mapping.
///
/// Keys only in `prev` are reset to `""` first, then keys of `next` whose
/// resolved value differs from the resolved previous value follow, each
/// group in key order.
pub fn diff_styles(
    prev: Option<&Props>,
    next: Option<&Props>,
    config: &ReconcileConfig,
) -> Vec<StylePatch> {
    let mut patches = Vec::new();

    if let Some(prev) = prev {
        for (key, value) in prev.iter() {
            let still_declared = next.is_some_and(|n| n.contains_key(key));
            if !still_declared && !resolve_style_value(key, value, config).is_empty() {
                patches.push((key.to_owned(), String::new()));
            }
        }
    }

    if let Some(next) = next {
        for (key, value) in next.iter() {
            let resolved = resolve_style_value(key, value, config);
            let previous = prev
                .and_then(|p| p.get(key))
                .map(|v| resolve_style_value(key, v, config))
                .unwrap_or_default();
            if resolved != previous {
                patches.push((key.to_owned(), resolved));
            }
        }
    }

    patches
}

/// Write style patches to the node in emission order.
pub fn apply_styles<N: NativeNode + ?Sized>(node: &mut N, patches: &[StylePatch]) {
    for (key, value) in patches {
        node.set_style(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropValue;
    use pretty_assertions::assert_eq;

    fn diff(prev: Option<&Props>, next: Option<&Props>) -> Vec<StylePatch> {
        diff_styles(prev, next, &ReconcileConfig::default())
    }

    fn patch(key: &str, value: &str) -> StylePatch {
        (key.to_owned(), value.to_owned())
    }

    #[test]
    fn removed_key_resets() {
        let prev = Props::new().set("display", "none").set("color", "red");
        let next = Props::new().set("color", "green");
        assert_eq!(
            diff(Some(&prev), Some(&next)),
            vec![patch("display", ""), patch("color", "green")]
        );
    }

    #[test]
    fn identical_styles_emit_nothing() {
        let style = Props::new().set("display", "block").set("left", 1);
        assert!(diff(Some(&style), Some(&style)).is_empty());
    }

    #[test]
    fn equivalent_resolution_emits_nothing() {
        let prev = Props::new().set("left", 1);
        let next = Props::new().set("left", "1px");
        assert!(diff(Some(&prev), Some(&next)).is_empty());
    }

    #[test]
    fn null_prev_is_empty() {
        let next = Props::new().set("display", "block");
        assert_eq!(diff(None, Some(&next)), vec![patch("display", "block")]);
    }

    #[test]
    fn null_next_resets_everything() {
        let prev = Props::new().set("display", "none").set("color", "red");
        assert_eq!(
            diff(Some(&prev), None),
            vec![patch("color", ""), patch("display", "")]
        );
    }

    #[test]
    fn various_reset_values() {
        let prev = Props::new()
            .set("display", "block")
            .set("left", "1")
            .set("top", 2)
            .set("fontFamily", "Arial");
        let next = Props::new()
            .set("display", "")
            .set("left", PropValue::Null)
            .set("top", false)
            .set("fontFamily", true);
        assert_eq!(
            diff(Some(&prev), Some(&next)),
            vec![
                patch("display", ""),
                patch("fontFamily", ""),
                patch("left", ""),
                patch("top", ""),
            ]
        );
    }

    #[test]
    fn unset_key_never_applied_is_not_reset() {
        let prev = Props::new().set("left", PropValue::Null);
        assert!(diff(Some(&prev), None).is_empty());
    }

    #[test]
    fn numeric_change() {
        let prev = Props::new().set("opacity", 0);
        let next = Props::new().set("opacity", 0.5);
        assert_eq!(diff(Some(&prev), Some(&next)), vec![patch("opacity", "0.5")]);
    }
}
