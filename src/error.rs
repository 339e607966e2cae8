//! Error types for the reconciliation core.

/// Fatal configuration problems detected while validating a property map.
///
/// Always reported before any handle is allocated, any listener is
/// registered, or any native node is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Can only set one of `children`, `props.content`, or `props.dangerouslySetInnerHTML`.")]
    MultipleContentSources,
    #[error("The `style` prop expects a mapping from style properties to values, not a {found}.")]
    StyleNotMapping { found: &'static str },
}
