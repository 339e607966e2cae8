//! Listener registry: (node handle, event name) -> listener.
//!
//! [`ListenerRegistry`] lives as long as the application. Entries are added
//! when a node with `on*` props is mounted, replaced when the prop changes,
//! and removed when the prop goes away or the node unmounts. It is never
//! cleared implicitly.

use std::collections::HashMap;

use crate::handle::NodeHandle;
use crate::props::Listener;

// ---------------------------------------------------------------------------
// ListenerStore
// ---------------------------------------------------------------------------

/// Capability set the mount/unmount lifecycle needs from a listener store.
pub trait ListenerStore {
    /// Register `listener`, replacing any previous one for the same key.
    fn put_listener(&mut self, handle: NodeHandle, event: &str, listener: Listener);

    /// Look up the listener for `event` on `handle`.
    fn get_listener(&self, handle: NodeHandle, event: &str) -> Option<&Listener>;

    /// Remove one registration. No-op if absent.
    fn delete_listener(&mut self, handle: NodeHandle, event: &str);

    /// Remove every registration for `handle`. No-op if none exist.
    fn delete_all_listeners(&mut self, handle: NodeHandle);
}

// ---------------------------------------------------------------------------
// ListenerRegistry
// ---------------------------------------------------------------------------

/// HashMap-backed [`ListenerStore`].
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    bank: HashMap<NodeHandle, HashMap<String, Listener>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any listener is registered for `handle`.
    pub fn has_listeners(&self, handle: NodeHandle) -> bool {
        self.bank.contains_key(&handle)
    }

    /// Event names registered for `handle`, sorted.
    pub fn events(&self, handle: NodeHandle) -> Vec<&str> {
        let mut events: Vec<&str> = self
            .bank
            .get(&handle)
            .map(|by_event| by_event.keys().map(String::as_str).collect())
            .unwrap_or_default();
        events.sort_unstable();
        events
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.bank.values().map(HashMap::len).sum()
    }

    /// Whether the registry has no registrations.
    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }
}

impl ListenerStore for ListenerRegistry {
    fn put_listener(&mut self, handle: NodeHandle, event: &str, listener: Listener) {
        self.bank
            .entry(handle)
            .or_default()
            .insert(event.to_owned(), listener);
    }

    fn get_listener(&self, handle: NodeHandle, event: &str) -> Option<&Listener> {
        self.bank.get(&handle).and_then(|by_event| by_event.get(event))
    }

    fn delete_listener(&mut self, handle: NodeHandle, event: &str) {
        if let Some(by_event) = self.bank.get_mut(&handle) {
            by_event.remove(event);
            if by_event.is_empty() {
                self.bank.remove(&handle);
            }
        }
    }

    fn delete_all_listeners(&mut self, handle: NodeHandle) {
        self.bank.remove(&handle);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn handles(n: usize) -> Vec<NodeHandle> {
        let mut map: SlotMap<NodeHandle, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_registry_is_empty() {
        let reg = ListenerRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
    }

    // ── Put / Get ────────────────────────────────────────────────────

    #[test]
    fn put_and_get() {
        let h = handles(1)[0];
        let cb = Listener::new(|| {});
        let mut reg = ListenerRegistry::new();
        reg.put_listener(h, "onClick", cb.clone());
        assert_eq!(reg.get_listener(h, "onClick"), Some(&cb));
        assert_eq!(reg.get_listener(h, "onMouseDown"), None);
        assert!(reg.has_listeners(h));
    }

    #[test]
    fn put_replaces() {
        let h = handles(1)[0];
        let first = Listener::new(|| {});
        let second = Listener::new(|| {});
        let mut reg = ListenerRegistry::new();
        reg.put_listener(h, "onClick", first);
        reg.put_listener(h, "onClick", second.clone());
        assert_eq!(reg.get_listener(h, "onClick"), Some(&second));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn handles_are_independent() {
        let hs = handles(2);
        let a = Listener::new(|| {});
        let b = Listener::new(|| {});
        let mut reg = ListenerRegistry::new();
        reg.put_listener(hs[0], "onClick", a.clone());
        reg.put_listener(hs[1], "onClick", b.clone());
        assert_eq!(reg.get_listener(hs[0], "onClick"), Some(&a));
        assert_eq!(reg.get_listener(hs[1], "onClick"), Some(&b));
    }

    // ── Delete ───────────────────────────────────────────────────────

    #[test]
    fn delete_one() {
        let h = handles(1)[0];
        let mut reg = ListenerRegistry::new();
        reg.put_listener(h, "onClick", Listener::new(|| {}));
        reg.put_listener(h, "onKeyUp", Listener::new(|| {}));
        reg.delete_listener(h, "onClick");
        assert_eq!(reg.events(h), vec!["onKeyUp"]);
        reg.delete_listener(h, "onKeyUp");
        assert!(!reg.has_listeners(h));
        assert!(reg.is_empty());
    }

    #[test]
    fn delete_all() {
        let hs = handles(2);
        let mut reg = ListenerRegistry::new();
        reg.put_listener(hs[0], "onClick", Listener::new(|| {}));
        reg.put_listener(hs[0], "onKeyUp", Listener::new(|| {}));
        reg.put_listener(hs[1], "onClick", Listener::new(|| {}));
        reg.delete_all_listeners(hs[0]);
        assert!(reg.get_listener(hs[0], "onClick").is_none());
        assert!(reg.get_listener(hs[1], "onClick").is_some());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn deletes_are_idempotent() {
        let h = handles(1)[0];
        let mut reg = ListenerRegistry::new();
        reg.delete_listener(h, "onClick");
        reg.delete_all_listeners(h);
        reg.delete_all_listeners(h);
        assert!(reg.is_empty());
    }
}
