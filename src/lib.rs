//! # reconcile-dom
//!
//! Property diffing and mount/unmount lifecycle for native DOM-like nodes.
//!
//! Given the props a node was last rendered with and a new set of props,
//! reconcile-dom computes the minimal set of native writes (attribute sets
//! and removals, style patches, content replacement, listener rewiring) and
//! applies them through the [`host::NativeNode`] surface. Mounting produces
//! markup for the render layer; unmounting releases every listener
//! registered for the node.
//!
//! ## Core Systems
//!
//! - **[`props`]**: Property maps and element descriptors
//! - **[`style`]**: Style diffing and inline serialization
//! - **[`patch`]**: Attribute/property diffing into native mutations
//! - **[`content`]**: Mutually exclusive content source resolution
//! - **[`component`]**: Mounted-node wrapper and mount markup
//! - **[`reconciler`]**: Mount, patch and unmount lifecycle
//! - **[`event`]**: Listener registry keyed by node handle
//! - **[`host`]**: Native node trait and the in-memory document
//! - **[`config`]**: Known-property table and unitless style keys
//! - **[`testing`]**: Harness driving a mounted element in memory

// Foundation
pub mod config;
pub mod error;
pub mod handle;
pub mod props;

// Diffing
pub mod content;
pub mod patch;
pub mod style;

// Lifecycle
pub mod component;
pub mod event;
pub mod reconciler;

// Host
pub mod host;
pub mod testing;

pub use config::{PropertyInfo, ReconcileConfig};
pub use content::ContentSource;
pub use error::ConfigurationError;
pub use handle::NodeHandle;
pub use reconciler::Reconciler;

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use reconcile_dom_macros::props;
