//! Style value resolution: number coercion and unit suffixing.

use crate::config::{ReconcileConfig, DEFAULT_UNIT};
use crate::props::{format_number, PropValue};

/// Resolve a declared style value to the string written to the node.
///
/// - `Null`, booleans and `""` resolve to `""` (reset).
/// - Numbers, and strings that parse as finite numbers, get the default
///   unit unless `key` is unitless.
/// - Any other string is used verbatim.
pub fn resolve_style_value(key: &str, value: &PropValue, config: &ReconcileConfig) -> String {
    match value {
        PropValue::Number(n) if n.is_finite() => with_unit(key, &format_number(*n), config),
        PropValue::Number(_) => String::new(),
        PropValue::Str(s) if s.is_empty() => String::new(),
        PropValue::Str(s) if is_numeric(s) => with_unit(key, s.trim(), config),
        PropValue::Str(s) => s.clone(),
        PropValue::Null
        | PropValue::Bool(_)
        | PropValue::Map(_)
        | PropValue::Children(_)
        | PropValue::Listener(_) => String::new(),
    }
}

fn with_unit(key: &str, number: &str, config: &ReconcileConfig) -> String {
    if config.is_unitless(key) {
        number.to_owned()
    } else {
        format!("{number}{DEFAULT_UNIT}")
    }
}

fn is_numeric(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(f64::is_finite)
}
