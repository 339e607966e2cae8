//! Node handles: the identity of one mounted native node.

use slotmap::{new_key_type, Key, KeyData};

new_key_type! {
    /// Opaque identity of a mounted native node. Copy, lightweight (u64).
    ///
    /// Allocated by the reconciler at mount, rendered into markup as the
    /// `data-nodeid` attribute, and used as the key into the listener
    /// registry. A released handle is never handed out again with the same
    /// raw value.
    pub struct NodeHandle;
}

/// Attribute carrying the node handle in generated markup.
pub const HANDLE_ATTRIBUTE: &str = "data-nodeid";

impl NodeHandle {
    /// Raw form written into markup.
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Rebuild a handle from its raw markup form.
    pub fn from_raw(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }

    /// Parse the value of a `data-nodeid` attribute.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<u64>().ok().map(Self::from_raw)
    }
}
