//! NativeComponent: the wrapper owning one mounted node's applied props.

use crate::handle::NodeHandle;
use crate::props::Props;

/// A mounted native element.
///
/// Holds the snapshot of the props last applied to the node, which the next
/// patch diffs against, and the components mounted for its child elements.
#[derive(Debug)]
pub struct NativeComponent {
    pub(crate) handle: NodeHandle,
    pub(crate) tag: String,
    pub(crate) props: Props,
    pub(crate) children: Vec<NativeComponent>,
}

impl NativeComponent {
    /// Identity of the mounted node.
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The props currently applied to the node.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Components mounted for child elements, in declaration order.
    pub fn children(&self) -> &[NativeComponent] {
        &self.children
    }

    /// Handles of this component and every mounted descendant, pre-order.
    pub fn handles(&self) -> Vec<NodeHandle> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            result.push(current.handle);
            for child in current.children.iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}
