//! Style patching: value resolution, diffing, inline serialization.

pub mod diff;
pub mod markup;
pub mod value;

pub use diff::{apply_styles, diff_styles, StylePatch};
pub use markup::{camelize, create_markup_for_styles, hyphenate};
pub use value::resolve_style_value;
