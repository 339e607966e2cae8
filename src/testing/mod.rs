//! Headless testing helpers.
//!
//! Use the [`Harness`] to mount an element into a
//! [`MemoryDocument`](crate::host::MemoryDocument) and drive patches against
//! the live node.

pub mod harness;

pub use harness::{Harness, RenderError};
