//! Event listeners keyed by node handle.

pub mod registry;

pub use registry::{ListenerRegistry, ListenerStore};
