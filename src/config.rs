//! Reconciler configuration: the known-property table and unitless styles.
//!
//! [`ReconcileConfig::default`] describes a DOM-like host. Properties that
//! are not listed are written as plain attributes under their own name.

use std::collections::{HashMap, HashSet};

use crate::host::HostValue;

// ---------------------------------------------------------------------------
// PropertyInfo
// ---------------------------------------------------------------------------

/// How a known property maps onto the native node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    /// Attribute name used in markup (e.g. `class` for `className`).
    pub attribute: String,
    /// Updates go through the node's property surface instead of attributes.
    pub must_use_property: bool,
    /// Writing the property has side effects (cursor position, selection),
    /// so a write is skipped when the node already holds the new value.
    pub controlled: bool,
    /// The property holds a boolean rather than text.
    pub boolean: bool,
}

impl PropertyInfo {
    /// A plain attribute-backed property.
    pub fn attribute(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            must_use_property: false,
            controlled: false,
            boolean: false,
        }
    }

    /// A property written through the node's property surface.
    pub fn property(attribute: impl Into<String>) -> Self {
        Self {
            must_use_property: true,
            ..Self::attribute(attribute)
        }
    }

    /// Mark as controlled (builder).
    pub fn controlled(mut self) -> Self {
        self.controlled = true;
        self
    }

    /// Mark as boolean-valued (builder).
    pub fn boolean(mut self) -> Self {
        self.boolean = true;
        self
    }

    /// Value written when the property is removed.
    pub fn default_value(&self) -> HostValue {
        if self.boolean {
            HostValue::Bool(false)
        } else {
            HostValue::Text(String::new())
        }
    }
}

// ---------------------------------------------------------------------------
// ReconcileConfig
// ---------------------------------------------------------------------------

/// Style keys whose numeric values are written without a unit.
const DEFAULT_UNITLESS: &[&str] = &[
    "columnCount",
    "fillOpacity",
    "flex",
    "flexGrow",
    "flexShrink",
    "fontWeight",
    "lineHeight",
    "opacity",
    "order",
    "orphans",
    "widows",
    "zIndex",
    "zoom",
];

/// Unit appended to numeric values of length-valued style keys.
pub const DEFAULT_UNIT: &str = "px";

/// Configuration shared by every patch and mount.
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    properties: HashMap<String, PropertyInfo>,
    unitless_styles: HashSet<String>,
}

impl ReconcileConfig {
    /// A configuration with no known properties and no unitless styles.
    pub fn empty() -> Self {
        Self {
            properties: HashMap::new(),
            unitless_styles: HashSet::new(),
        }
    }

    /// Register or replace a known property (builder).
    pub fn with_property(mut self, name: impl Into<String>, info: PropertyInfo) -> Self {
        self.properties.insert(name.into(), info);
        self
    }

    /// Register a unitless style key (builder).
    pub fn with_unitless(mut self, key: impl Into<String>) -> Self {
        self.unitless_styles.insert(key.into());
        self
    }

    /// Look up a known property.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.get(name)
    }

    /// Attribute name used for `name` in markup.
    pub fn attribute_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.properties
            .get(name)
            .map_or(name, |info| info.attribute.as_str())
    }

    /// Whether numeric values of `key` are written without a unit.
    pub fn is_unitless(&self, key: &str) -> bool {
        self.unitless_styles.contains(key)
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        let mut config = Self::empty()
            .with_property("className", PropertyInfo::property("class"))
            .with_property("htmlFor", PropertyInfo::property("for"))
            .with_property("value", PropertyInfo::property("value").controlled())
            .with_property("checked", PropertyInfo::property("checked").controlled().boolean())
            .with_property("selected", PropertyInfo::property("selected").controlled().boolean())
            .with_property("multiple", PropertyInfo::property("multiple").boolean())
            .with_property("disabled", PropertyInfo::property("disabled").boolean())
            .with_property("readOnly", PropertyInfo::property("readonly").boolean())
            .with_property("hidden", PropertyInfo::property("hidden").boolean());
        for key in DEFAULT_UNITLESS {
            config = config.with_unitless(*key);
        }
        config
    }
}
