//! Property values: PropValue, Listener, number formatting.

use std::fmt;
use std::rc::Rc;

use super::element::Child;
use super::map::Props;

// ---------------------------------------------------------------------------
// Listener
// ---------------------------------------------------------------------------

/// An event callback attached through an `on*` property.
///
/// Cloning shares the same callback. Equality is identity: two listeners are
/// equal only when they wrap the same allocation.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn()>);

impl Listener {
    /// Wrap a closure as a listener.
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self) {
        (self.0)()
    }

    /// Whether both listeners wrap the same callback.
    pub fn ptr_eq(&self, other: &Listener) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener(<fn>)")
    }
}

// ---------------------------------------------------------------------------
// PropValue
// ---------------------------------------------------------------------------

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Explicitly unset. Treated like an absent key by every patcher.
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    /// Nested mapping, used by `style` and `dangerouslySetInnerHTML`.
    Map(Props),
    /// Child descriptors for the `children` property.
    Children(Vec<Child>),
    Listener(Listener),
}

impl PropValue {
    /// Whether this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    /// Borrow the nested mapping, if this is a `Map`.
    pub fn as_map(&self) -> Option<&Props> {
        match self {
            PropValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the listener, if this is a `Listener`.
    pub fn as_listener(&self) -> Option<&Listener> {
        match self {
            PropValue::Listener(listener) => Some(listener),
            _ => None,
        }
    }

    /// Truthiness for boolean-valued properties: `false`, `Null`, `0`,
    /// `NaN` and `""` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Null => false,
            PropValue::Bool(b) => *b,
            PropValue::Number(n) => *n != 0.0 && !n.is_nan(),
            PropValue::Str(s) => !s.is_empty(),
            PropValue::Map(_) | PropValue::Children(_) | PropValue::Listener(_) => true,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropValue::Null => "null",
            PropValue::Bool(_) => "boolean",
            PropValue::Number(_) => "number",
            PropValue::Str(_) => "string",
            PropValue::Map(_) => "mapping",
            PropValue::Children(_) => "child list",
            PropValue::Listener(_) => "listener",
        }
    }

    /// Textual form used for attributes and plain content.
    ///
    /// `Null` and `false` yield `None` (the attribute is absent); `true`
    /// yields an empty string. Maps, children and listeners have no textual
    /// form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            PropValue::Null | PropValue::Bool(false) => None,
            PropValue::Bool(true) => Some(String::new()),
            PropValue::Number(n) => Some(format_number(*n)),
            PropValue::Str(s) => Some(s.clone()),
            PropValue::Map(_) | PropValue::Children(_) | PropValue::Listener(_) => None,
        }
    }
}

/// Format a number the way markup expects it: integral values without a
/// fractional part, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        PropValue::Number(f64::from(value))
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(f64::from(value))
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        PropValue::Number(f64::from(value))
    }
}

impl From<Props> for PropValue {
    fn from(value: Props) -> Self {
        PropValue::Map(value)
    }
}

impl From<Vec<Child>> for PropValue {
    fn from(value: Vec<Child>) -> Self {
        PropValue::Children(value)
    }
}

impl From<Listener> for PropValue {
    fn from(value: Listener) -> Self {
        PropValue::Listener(value)
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropValue::Null, Into::into)
    }
}
