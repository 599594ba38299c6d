//! Raw style tree for atomcss.
//!
//! Contains the already-evaluated style data handed over by a front end
//! (style namespaces, keyframes, variable groups, constants) and the
//! single place where object keys are classified into properties and
//! conditions.

use indexmap::IndexMap;

/// An ordered string-keyed map of raw values. Key order is significant.
pub type RawMap = IndexMap<String, RawValue>;

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A raw, already-evaluated style value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Explicit unset.
    Null,

    String(String),

    Number(f64),

    /// Fallback chain. Only primitives are legal elements.
    Array(Vec<RawValue>),

    /// A namespace, a conditional map or a pseudo/at-rule block.
    Object(RawMap),

    /// A foreign style object included as-is.
    Include(IncludedStyles),

    /// Never legal in a style; kept so validation can report it.
    Boolean(bool),
}

impl RawValue {
    /// `null`, strings and numbers.
    pub fn is_primitive(&self) -> bool {
        matches!(self, RawValue::Null | RawValue::String(_) | RawValue::Number(_))
    }

    pub fn as_object(&self) -> Option<&RawMap> {
        match self {
            RawValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Human-readable name of the value's shape, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::String(_) => "string",
            RawValue::Number(_) => "number",
            RawValue::Array(_) => "array",
            RawValue::Object(_) => "object",
            RawValue::Include(_) => "include",
            RawValue::Boolean(_) => "boolean",
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::String(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Boolean(b),
            serde_json::Value::Number(n) => RawValue::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => RawValue::String(s),
            serde_json::Value::Array(items) => {
                RawValue::Array(items.into_iter().map(RawValue::from).collect())
            }
            serde_json::Value::Object(map) => {
                if let Some(include) = IncludedStyles::from_marker(&map) {
                    return RawValue::Include(include);
                }
                RawValue::Object(
                    map.into_iter()
                        .map(|(k, v)| (k, RawValue::from(v)))
                        .collect(),
                )
            }
        }
    }
}

/// Marker for a style object included verbatim from elsewhere.
///
/// Written in JSON input as `{"$$include": "<reference>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludedStyles {
    pub reference: String,
}

impl IncludedStyles {
    pub const MARKER: &'static str = "$$include";

    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    fn from_marker(map: &serde_json::Map<String, serde_json::Value>) -> Option<Self> {
        if map.len() != 1 {
            return None;
        }
        match map.get(Self::MARKER) {
            Some(serde_json::Value::String(reference)) => Some(Self::new(reference.clone())),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Key classification
// ---------------------------------------------------------------------------

/// What an object key means inside a style tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind<'a> {
    /// `default`: the unconditioned branch of a conditional map.
    Default,
    /// `:hover`, `::before`, `:nth-child(2n)`.
    Pseudo(&'a str),
    /// `@media ...`, `@supports ...`.
    AtRule(&'a str),
    /// Anything else: a CSS property key.
    Property(&'a str),
}

impl<'a> KeyKind<'a> {
    pub fn classify(key: &'a str) -> Self {
        if key == "default" {
            KeyKind::Default
        } else if key.starts_with(':') {
            KeyKind::Pseudo(key)
        } else if key.starts_with('@') {
            KeyKind::AtRule(key)
        } else {
            KeyKind::Property(key)
        }
    }

    /// Pseudo or at-rule.
    pub fn is_modifier(&self) -> bool {
        matches!(self, KeyKind::Pseudo(_) | KeyKind::AtRule(_))
    }

    /// Legal as a key of a conditional map.
    pub fn is_condition(&self) -> bool {
        !matches!(self, KeyKind::Property(_))
    }
}

/// Whether `key` is a pseudo-element (`::before`) rather than a pseudo-class.
pub fn is_pseudo_element(key: &str) -> bool {
    key.starts_with("::")
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A theme override request: new values for variables of an existing theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeOverride {
    /// Name of the variable group being overridden.
    pub theme: String,
    pub values: RawMap,
}

/// A complete input document. Every section is optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Namespace name → raw style namespace.
    pub create: RawMap,

    /// Animation label → frames (`from`, `50%`, `to` → property map).
    pub keyframes: RawMap,

    /// Theme name → variable name → value.
    pub define_vars: IndexMap<String, RawMap>,

    /// Override name → override request.
    pub create_theme: IndexMap<String, ThemeOverride>,

    /// Group name → constant name → value.
    pub define_consts: IndexMap<String, RawMap>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.create.is_empty()
            && self.keyframes.is_empty()
            && self.define_vars.is_empty()
            && self.create_theme.is_empty()
            && self.define_consts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_classify_keys() {
        assert_eq!(KeyKind::classify("default"), KeyKind::Default);
        assert_eq!(KeyKind::classify(":hover"), KeyKind::Pseudo(":hover"));
        assert_eq!(KeyKind::classify("::before"), KeyKind::Pseudo("::before"));
        assert_eq!(
            KeyKind::classify("@media (min-width: 10px)"),
            KeyKind::AtRule("@media (min-width: 10px)")
        );
        assert_eq!(KeyKind::classify("color"), KeyKind::Property("color"));
    }

    #[test]
    fn test_condition_and_modifier() {
        assert!(KeyKind::classify("default").is_condition());
        assert!(!KeyKind::classify("default").is_modifier());
        assert!(KeyKind::classify(":focus").is_modifier());
        assert!(!KeyKind::classify("margin").is_condition());
    }

    #[test]
    fn test_from_json_preserves_order() {
        let value = RawValue::from(json!({ "z": 1, "a": "x", "m": null }));
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_from_json_include_marker() {
        let value = RawValue::from(json!({ "$$include": "styles.base" }));
        assert_eq!(value, RawValue::Include(IncludedStyles::new("styles.base")));
    }

    #[test]
    fn test_from_json_marker_with_siblings_is_object() {
        let value = RawValue::from(json!({ "$$include": "a", "color": "red" }));
        assert_eq!(value.type_name(), "object");
    }

    #[test]
    fn test_from_json_boolean() {
        assert_eq!(RawValue::from(json!(true)), RawValue::Boolean(true));
    }
}
