//! Attribute/property patching: diff two flat property maps into a list of
//! native mutations.
//!
//! `style` is delegated to [`crate::style`]. Content keys and `on*` listener
//! keys are skipped here; the component handles them.

use crate::config::{PropertyInfo, ReconcileConfig};
use crate::host::{HostValue, NativeNode};
use crate::props::{is_content_key, is_event_key, PropValue, Props, STYLE};
use crate::style::diff_styles;

/// One native mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    SetAttribute { name: String, value: String },
    RemoveAttribute { name: String },
    /// Write a node property. With `skip_if_current`, the write is dropped
    /// when the node already holds `value`.
    SetProperty {
        name: String,
        value: HostValue,
        skip_if_current: bool,
    },
    SetStyle { key: String, value: String },
}

/// Diff `prev` against `next`. Identical maps produce no patches.
///
/// Removals come first (in key order), then sets and style writes.
pub fn diff_props(prev: &Props, next: &Props, config: &ReconcileConfig) -> Vec<Patch> {
    let mut patches = Vec::new();

    for (name, value) in prev.iter() {
        if value.is_null() || next.get_present(name).is_some() || is_delegated(name) {
            continue;
        }
        if name == STYLE {
            push_styles(&mut patches, value.as_map(), None, config);
        } else {
            push_removal(&mut patches, name, config);
        }
    }

    for (name, value) in next.iter() {
        if value.is_null() || is_delegated(name) {
            continue;
        }
        let previous = prev.get_present(name);
        if name == STYLE {
            push_styles(
                &mut patches,
                previous.and_then(PropValue::as_map),
                value.as_map(),
                config,
            );
            continue;
        }
        if previous == Some(value) {
            continue;
        }
        push_assignment(&mut patches, name, value, previous.is_some(), config);
    }

    patches
}

/// Apply patches to the node in order.
pub fn apply_patches<N: NativeNode + ?Sized>(node: &mut N, patches: &[Patch]) {
    for patch in patches {
        match patch {
            Patch::SetAttribute { name, value } => node.set_attribute(name, value),
            Patch::RemoveAttribute { name } => node.remove_attribute(name),
            Patch::SetProperty {
                name,
                value,
                skip_if_current,
            } => {
                if *skip_if_current && node.property(name) == *value {
                    continue;
                }
                node.set_property(name, value.clone());
            }
            Patch::SetStyle { key, value } => node.set_style(key, value),
        }
    }
}

fn is_delegated(name: &str) -> bool {
    is_content_key(name) || is_event_key(name)
}

fn push_styles(
    patches: &mut Vec<Patch>,
    prev: Option<&Props>,
    next: Option<&Props>,
    config: &ReconcileConfig,
) {
    patches.extend(
        diff_styles(prev, next, config)
            .into_iter()
            .map(|(key, value)| Patch::SetStyle { key, value }),
    );
}

/// Remove `name` entirely. Property-backed entries are reset to their
/// default and their reflected attribute is dropped; plain attributes are
/// removed.
fn push_removal(patches: &mut Vec<Patch>, name: &str, config: &ReconcileConfig) {
    let attribute = config.attribute_name(name).to_owned();
    if let Some(info) = config.property(name).filter(|info| info.must_use_property) {
        patches.push(Patch::SetProperty {
            name: name.to_owned(),
            value: info.default_value(),
            skip_if_current: false,
        });
    }
    patches.push(Patch::RemoveAttribute { name: attribute });
}

/// Assign `value` to `name`. Values without a textual form (and `false`
/// for non-boolean entries) remove the entry if it was set.
fn push_assignment(
    patches: &mut Vec<Patch>,
    name: &str,
    value: &PropValue,
    was_set: bool,
    config: &ReconcileConfig,
) {
    let info = config.property(name);
    if let Some(info) = info.filter(|info| info.boolean) {
        patches.push(boolean_assignment(name, info, value.is_truthy()));
        return;
    }
    match (value.to_text(), info) {
        (Some(text), Some(info)) if info.must_use_property => patches.push(Patch::SetProperty {
            name: name.to_owned(),
            value: HostValue::Text(text),
            skip_if_current: info.controlled,
        }),
        (Some(text), _) => patches.push(Patch::SetAttribute {
            name: config.attribute_name(name).to_owned(),
            value: text,
        }),
        (None, _) if was_set => push_removal(patches, name, config),
        (None, _) => {}
    }
}

fn boolean_assignment(name: &str, info: &PropertyInfo, on: bool) -> Patch {
    if info.must_use_property {
        return Patch::SetProperty {
            name: name.to_owned(),
            value: HostValue::Bool(on),
            skip_if_current: info.controlled,
        };
    }
    if on {
        Patch::SetAttribute {
            name: info.attribute.clone(),
            value: String::new(),
        }
    } else {
        Patch::RemoveAttribute {
            name: info.attribute.clone(),
        }
    }
}
