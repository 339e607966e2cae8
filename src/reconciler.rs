//! The reconciler: mount, patch and unmount native components.
//!
//! [`Reconciler`] owns the configuration, the handle arena and the listener
//! store. Mount validates the whole element tree before allocating a handle
//! or registering a listener, so a [`ConfigurationError`] leaves no trace.
//! Patches validate the new props before the first native write.

use slotmap::SlotMap;

use crate::component::markup::{close_tag, create_open_tag_markup, escape};
use crate::component::NativeComponent;
use crate::config::ReconcileConfig;
use crate::content::ContentSource;
use crate::error::ConfigurationError;
use crate::event::{ListenerRegistry, ListenerStore};
use crate::handle::NodeHandle;
use crate::host::parser::is_void_element;
use crate::host::NativeNode;
use crate::patch::{apply_patches, diff_props};
use crate::props::{is_event_key, Child, Element, Listener, PropValue, Props, STYLE};

/// Mounts, patches and unmounts native components.
#[derive(Debug)]
pub struct Reconciler<L: ListenerStore = ListenerRegistry> {
    config: ReconcileConfig,
    listeners: L,
    handles: SlotMap<NodeHandle, ()>,
}

impl Reconciler {
    /// A reconciler with the default configuration and listener registry.
    pub fn new() -> Self {
        Self::with_config(ReconcileConfig::default())
    }

    /// A reconciler with a custom configuration.
    pub fn with_config(config: ReconcileConfig) -> Self {
        Self::with_store(config, ListenerRegistry::new())
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ListenerStore> Reconciler<L> {
    /// A reconciler registering listeners into `listeners`.
    pub fn with_store(config: ReconcileConfig, listeners: L) -> Self {
        Self {
            config,
            listeners,
            handles: SlotMap::with_key(),
        }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// The listener store, for event dispatch.
    pub fn listeners(&self) -> &L {
        &self.listeners
    }

    /// Shorthand for `listeners().get_listener(..)`.
    pub fn get_listener(&self, handle: NodeHandle, event: &str) -> Option<&Listener> {
        self.listeners.get_listener(handle, event)
    }

    /// Whether `handle` belongs to a mounted node.
    pub fn is_mounted(&self, handle: NodeHandle) -> bool {
        self.handles.contains_key(handle)
    }

    /// Number of mounted nodes, children included.
    pub fn mounted_count(&self) -> usize {
        self.handles.len()
    }

    // ── Mount ────────────────────────────────────────────────────────

    /// Mount `element`: returns its component and the markup to render.
    ///
    /// Fails if `style` is not a mapping or if more than one content source
    /// is set, anywhere in the element tree. On failure no handle is
    /// allocated and no listener registered.
    pub fn mount(
        &mut self,
        element: &Element,
    ) -> Result<(NativeComponent, String), ConfigurationError> {
        validate_element(element)?;
        Ok(self.mount_validated(element))
    }

    fn mount_validated(&mut self, element: &Element) -> (NativeComponent, String) {
        let handle = self.handles.insert(());
        let mut markup = create_open_tag_markup(&element.tag, &element.props, handle, &self.config);
        let mut children = Vec::new();
        if !is_void_element(&element.tag) {
            let content = ContentSource::resolve_lenient(&element.props);
            let (mounted, content_markup) = self.mount_content(&content);
            children = mounted;
            markup.push_str(&content_markup);
            markup.push_str(&close_tag(&element.tag));
        }
        self.register_listeners(handle, &element.props);

        let component = NativeComponent {
            handle,
            tag: element.tag.clone(),
            props: element.props.clone(),
            children,
        };
        (component, markup)
    }

    /// Build content markup, mounting child elements on the way.
    fn mount_content(&mut self, content: &ContentSource) -> (Vec<NativeComponent>, String) {
        match content {
            ContentSource::Children(children) => {
                let mut mounted = Vec::new();
                let mut markup = String::new();
                for child in children {
                    match child {
                        Child::Text(text) => markup.push_str(&escape(text)),
                        Child::Element(element) => {
                            let (component, child_markup) = self.mount_validated(element);
                            mounted.push(component);
                            markup.push_str(&child_markup);
                        }
                    }
                }
                (mounted, markup)
            }
            ContentSource::PlainContent(text) => (Vec::new(), escape(text)),
            ContentSource::RawMarkup(html) => (Vec::new(), html.clone()),
            ContentSource::None => (Vec::new(), String::new()),
        }
    }

    fn register_listeners(&mut self, handle: NodeHandle, props: &Props) {
        for (name, value) in props.iter() {
            if let Some(listener) = value.as_listener().filter(|_| is_event_key(name)) {
                self.listeners.put_listener(handle, name, listener.clone());
            }
        }
    }

    // ── Update ───────────────────────────────────────────────────────

    /// Apply `next` to the mounted `component` and its live `node`.
    ///
    /// Only changed attributes, properties and style keys are written.
    /// Content is replaced wholesale when the resolved content source
    /// changes. Calling this twice with the same `next` writes nothing the
    /// second time.
    ///
    /// Fails before any write if `next.style` is not a mapping or a new child
    /// element is invalid. Conflicting content sources are not an error here;
    /// see [`ContentSource::resolve_lenient`].
    ///
    /// An unmounted component is left untouched: nothing is written and no
    /// listener is registered.
    pub fn receive_props<N: NativeNode + ?Sized>(
        &mut self,
        component: &mut NativeComponent,
        next: &Props,
        node: &mut N,
    ) -> Result<(), ConfigurationError> {
        if !self.is_mounted(component.handle) {
            return Ok(());
        }
        validate_style(next)?;
        let prev_content = ContentSource::resolve_lenient(&component.props);
        let next_content = ContentSource::resolve_lenient(next);
        let content_changed = prev_content != next_content;
        if content_changed {
            validate_children(&next_content)?;
        }

        let patches = diff_props(&component.props, next, &self.config);
        apply_patches(node, &patches);
        self.update_listeners(component.handle, &component.props, next);

        if content_changed && !is_void_element(&component.tag) {
            for child in &mut component.children {
                self.unmount(child);
            }
            let (children, markup) = self.mount_content(&next_content);
            match next_content {
                ContentSource::PlainContent(text) => node.set_text_content(&text),
                _ => node.set_inner_html(&markup),
            }
            component.children = children;
        }

        component.props = next.clone();
        Ok(())
    }

    fn update_listeners(&mut self, handle: NodeHandle, prev: &Props, next: &Props) {
        for (name, value) in prev.iter() {
            if !is_event_key(name) || value.as_listener().is_none() {
                continue;
            }
            if next.get(name).and_then(PropValue::as_listener).is_none() {
                self.listeners.delete_listener(handle, name);
            }
        }
        for (name, value) in next.iter() {
            let Some(listener) = value.as_listener().filter(|_| is_event_key(name)) else {
                continue;
            };
            if prev.get(name).and_then(PropValue::as_listener) != Some(listener) {
                self.listeners.put_listener(handle, name, listener.clone());
            }
        }
    }

    // ── Unmount ──────────────────────────────────────────────────────

    /// Unmount `component` and its mounted children, releasing their
    /// listener registrations. Unmounting twice is a no-op.
    pub fn unmount(&mut self, component: &mut NativeComponent) {
        for child in &mut component.children {
            self.unmount(child);
        }
        component.children.clear();
        self.release(component.handle);
    }

    /// Release one handle: drop its listener registrations and free it.
    /// No-op for handles that are not mounted.
    pub fn release(&mut self, handle: NodeHandle) {
        if self.handles.remove(handle).is_some() {
            self.listeners.delete_all_listeners(handle);
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// `style` must be a mapping when set.
fn validate_style(props: &Props) -> Result<(), ConfigurationError> {
    match props.get_present(STYLE) {
        Some(PropValue::Map(_)) | None => Ok(()),
        Some(other) => Err(ConfigurationError::StyleNotMapping {
            found: other.type_name(),
        }),
    }
}

/// Validate an element and every child element it declares.
fn validate_element(element: &Element) -> Result<(), ConfigurationError> {
    validate_style(&element.props)?;
    let content = ContentSource::resolve(&element.props)?;
    validate_children(&content)
}

fn validate_children(content: &ContentSource) -> Result<(), ConfigurationError> {
    if let ContentSource::Children(children) = content {
        for child in children {
            if let Child::Element(element) = child {
                validate_element(element)?;
            }
        }
    }
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
