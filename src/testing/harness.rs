//! Harness: mount an element into an in-memory document and drive patches.
//!
//! The `Harness` plays the render layer: it mounts through a [`Reconciler`],
//! renders the markup into a [`MemoryDocument`], and routes later patches to
//! the live node.

use crate::component::NativeComponent;
use crate::error::ConfigurationError;
use crate::handle::NodeHandle;
use crate::host::{MarkupError, MemoryDocument, NodeId, NodeMut, NodeRef};
use crate::props::{Element, Props};
use crate::reconciler::Reconciler;

/// Failure to get an element on screen.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Markup(#[from] MarkupError),
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A mounted element together with its reconciler and document.
///
/// # Examples
///
/// ```
/// use reconcile_dom::props::{Element, Props};
/// use reconcile_dom::testing::Harness;
///
/// let mut harness = Harness::render(Element::new("div", Props::new().class_name("a"))).unwrap();
/// harness.receive_props(Props::new().class_name("b")).unwrap();
/// assert_eq!(harness.node().class_name(), "b");
/// ```
#[derive(Debug)]
pub struct Harness {
    reconciler: Reconciler,
    document: MemoryDocument,
    component: NativeComponent,
    node: NodeId,
}

impl Harness {
    /// Mount `element` with a fresh reconciler and render it.
    pub fn render(element: Element) -> Result<Self, RenderError> {
        Self::render_with(Reconciler::new(), element)
    }

    /// Mount `element` with the given reconciler and render it.
    pub fn render_with(mut reconciler: Reconciler, element: Element) -> Result<Self, RenderError> {
        let (component, markup) = reconciler.mount(&element)?;
        let mut document = MemoryDocument::new();
        let node = match document.render(&markup) {
            Ok(node) => node,
            Err(err) => {
                let mut component = component;
                reconciler.unmount(&mut component);
                return Err(err.into());
            }
        };
        Ok(Self {
            reconciler,
            document,
            component,
            node,
        })
    }

    // ── Driving ──────────────────────────────────────────────────────

    /// Patch the mounted node with `next`.
    pub fn receive_props(&mut self, next: Props) -> Result<(), ConfigurationError> {
        let Some(mut node) = self.document.node_mut(self.node) else {
            return Ok(());
        };
        self.reconciler
            .receive_props(&mut self.component, &next, &mut node)
    }

    /// Unmount the component and drop its node from the document.
    pub fn unmount(&mut self) {
        self.reconciler.unmount(&mut self.component);
        if let Some(container) = self.document.parent(self.node) {
            self.document.remove(container);
        }
    }

    /// Forget the mutations recorded on the root node so far.
    pub fn clear_mutations(&mut self) {
        if let Some(mut node) = self.document.node_mut(self.node) {
            node.clear_mutations();
        }
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Read cursor over the root node.
    ///
    /// # Panics
    ///
    /// Panics if the node was removed by [`Harness::unmount`].
    pub fn node(&self) -> NodeRef<'_> {
        self.document
            .node(self.node)
            .expect("harness node was unmounted")
    }

    /// Write cursor over the root node, for simulating user input.
    ///
    /// # Panics
    ///
    /// Panics if the node was removed by [`Harness::unmount`].
    pub fn node_mut(&mut self) -> NodeMut<'_> {
        self.document
            .node_mut(self.node)
            .expect("harness node was unmounted")
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    pub fn handle(&self) -> NodeHandle {
        self.component.handle()
    }

    pub fn component(&self) -> &NativeComponent {
        &self.component
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }
}
