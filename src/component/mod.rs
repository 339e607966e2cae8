//! Native components: mounted-node wrapper and mount markup.

pub mod markup;
pub mod native;

pub use markup::{close_tag, create_markup_for_property, create_open_tag_markup, escape};
pub use native::NativeComponent;
