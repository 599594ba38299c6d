//! Structural validation of style namespaces.
//!
//! Runs before any other compilation stage and rejects trees the flattener
//! cannot give a meaning to. Validation is a pure check: it never rewrites
//! the tree.

use crate::ast::{KeyKind, RawMap, RawValue};

/// A style namespace that cannot be compiled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Style namespace '{namespace}' must be an object, got {found}")]
    IllegalNamespaceValue { namespace: String, found: &'static str },

    #[error("Invalid value for '{key}': a style value can only be a string, number, null, array or conditional object, got {found}")]
    IllegalPropValue { key: String, found: &'static str },

    #[error("Invalid fallback array for '{key}': elements can only be strings, numbers or null, got {found}")]
    IllegalPropArrayValue { key: String, found: &'static str },

    #[error("Invalid conditional key '{key}': keys of a conditional value must be 'default' or start with ':' or '@'")]
    InvalidPseudoOrAtRule { key: String },

    #[error("Duplicate conditional '{key}': the same condition is already active")]
    DuplicateConditional { key: String },

    #[error("Pseudo '{key}' cannot be nested directly inside pseudo '{parent}'")]
    IllegalNestedPseudo { key: String, parent: String },

    #[error("Included styles for '{key}' can only be used at the top level of a namespace")]
    OnlyTopLevelIncludes { key: String },
}

/// Validate one named namespace.
pub fn validate_namespace(name: &str, namespace: &RawValue) -> Result<(), ValidationError> {
    match namespace {
        RawValue::Object(map) => validate_styles(map, &[]),
        other => Err(ValidationError::IllegalNamespaceValue {
            namespace: name.to_string(),
            found: other.type_name(),
        }),
    }
}

/// Validate a namespace body (or a pseudo/at-rule block inside one).
/// `conditions` holds the modifier keys already entered.
fn validate_styles(map: &RawMap, conditions: &[&str]) -> Result<(), ValidationError> {
    for (key, value) in map {
        match value {
            v if v.is_primitive() => {}
            RawValue::Array(items) => validate_array(key, items)?,
            RawValue::Include(_) => {
                if !conditions.is_empty() {
                    return Err(ValidationError::OnlyTopLevelIncludes { key: key.clone() });
                }
            }
            RawValue::Object(inner) => match KeyKind::classify(key) {
                KeyKind::Pseudo(_) | KeyKind::AtRule(_) => {
                    if conditions.contains(&key.as_str()) {
                        return Err(ValidationError::DuplicateConditional { key: key.clone() });
                    }
                    if let (KeyKind::Pseudo(_), Some(parent)) =
                        (KeyKind::classify(key), conditions.last())
                    {
                        if parent.starts_with(':') {
                            return Err(ValidationError::IllegalNestedPseudo {
                                key: key.clone(),
                                parent: parent.to_string(),
                            });
                        }
                    }
                    let mut nested = conditions.to_vec();
                    nested.push(key);
                    validate_styles(inner, &nested)?;
                }
                KeyKind::Default | KeyKind::Property(_) => {
                    let mut nested = conditions.to_vec();
                    nested.push(key);
                    validate_conditional(inner, &nested)?;
                }
            },
            other => {
                return Err(ValidationError::IllegalPropValue {
                    key: key.clone(),
                    found: other.type_name(),
                });
            }
        }
    }
    Ok(())
}

/// Validate the body of a conditional value: `{ default: .., ':hover': .. }`.
fn validate_conditional(map: &RawMap, conditions: &[&str]) -> Result<(), ValidationError> {
    for (key, value) in map {
        if !KeyKind::classify(key).is_condition() {
            return Err(ValidationError::InvalidPseudoOrAtRule { key: key.clone() });
        }
        if conditions.contains(&key.as_str()) {
            return Err(ValidationError::DuplicateConditional { key: key.clone() });
        }
        match value {
            v if v.is_primitive() => {}
            RawValue::Array(items) => validate_array(key, items)?,
            RawValue::Object(inner) => {
                let mut nested = conditions.to_vec();
                nested.push(key);
                validate_conditional(inner, &nested)?;
            }
            RawValue::Include(_) => {
                return Err(ValidationError::OnlyTopLevelIncludes { key: key.clone() });
            }
            other => {
                return Err(ValidationError::IllegalPropValue {
                    key: key.clone(),
                    found: other.type_name(),
                });
            }
        }
    }
    Ok(())
}

fn validate_array(key: &str, items: &[RawValue]) -> Result<(), ValidationError> {
    match items.iter().find(|item| !item.is_primitive()) {
        Some(item) => Err(ValidationError::IllegalPropArrayValue {
            key: key.to_string(),
            found: item.type_name(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn validate(value: serde_json::Value) -> Result<(), ValidationError> {
        validate_namespace("root", &RawValue::from(value))
    }

    // =========================================================================
    // Accepted shapes
    // =========================================================================

    #[test]
    fn test_primitives() {
        assert_eq!(
            validate(json!({ "color": "red", "zIndex": 1, "margin": null })),
            Ok(())
        );
    }

    #[test]
    fn test_fallback_array() {
        assert_eq!(validate(json!({ "position": ["sticky", "fixed", null] })), Ok(()));
    }

    #[test]
    fn test_conditional_value() {
        assert_eq!(
            validate(json!({
                "color": {
                    "default": "red",
                    ":hover": { "default": "blue", "@media (min-width: 10px)": "green" }
                }
            })),
            Ok(())
        );
    }

    #[test]
    fn test_legacy_modifier_block() {
        assert_eq!(
            validate(json!({ ":hover": { "color": "red" }, "@media print": { ":hover": { "color": "blue" } } })),
            Ok(())
        );
    }

    #[test]
    fn test_top_level_include() {
        assert_eq!(validate(json!({ "base": { "$$include": "a.b" } })), Ok(()));
    }

    // =========================================================================
    // Rejected shapes
    // =========================================================================

    #[test]
    fn test_namespace_must_be_object() {
        assert_eq!(
            validate(json!("red")),
            Err(ValidationError::IllegalNamespaceValue {
                namespace: "root".into(),
                found: "string",
            })
        );
    }

    #[test]
    fn test_boolean_value() {
        assert_eq!(
            validate(json!({ "color": false })),
            Err(ValidationError::IllegalPropValue {
                key: "color".into(),
                found: "boolean",
            })
        );
    }

    #[test]
    fn test_array_with_object_element() {
        assert_eq!(
            validate(json!({ "color": ["red", { "default": "blue" }] })),
            Err(ValidationError::IllegalPropArrayValue {
                key: "color".into(),
                found: "object",
            })
        );
    }

    #[test]
    fn test_array_with_nested_array() {
        assert!(matches!(
            validate(json!({ "color": { "default": ["red", ["blue"]] } })),
            Err(ValidationError::IllegalPropArrayValue { .. })
        ));
    }

    #[test]
    fn test_invalid_conditional_key() {
        assert_eq!(
            validate(json!({ "color": { "hover": "red" } })),
            Err(ValidationError::InvalidPseudoOrAtRule { key: "hover".into() })
        );
    }

    #[test]
    fn test_duplicate_conditional_in_value() {
        assert_eq!(
            validate(json!({ "color": { ":hover": { ":hover": "red" } } })),
            Err(ValidationError::DuplicateConditional { key: ":hover".into() })
        );
    }

    #[test]
    fn test_duplicate_conditional_across_levels() {
        assert_eq!(
            validate(json!({ "@media print": { "color": { "@media print": "red" } } })),
            Err(ValidationError::DuplicateConditional {
                key: "@media print".into()
            })
        );
    }

    #[test]
    fn test_nested_pseudo_blocks() {
        assert_eq!(
            validate(json!({ ":hover": { ":active": { "color": "red" } } })),
            Err(ValidationError::IllegalNestedPseudo {
                key: ":active".into(),
                parent: ":hover".into(),
            })
        );
    }

    #[test]
    fn test_pseudo_inside_at_rule_block_is_legal() {
        assert_eq!(
            validate(json!({ "@media print": { ":hover": { "color": "red" } } })),
            Ok(())
        );
    }

    #[test]
    fn test_include_inside_modifier_block() {
        assert_eq!(
            validate(json!({ ":hover": { "base": { "$$include": "a.b" } } })),
            Err(ValidationError::OnlyTopLevelIncludes { key: "base".into() })
        );
    }

    #[test]
    fn test_include_inside_conditional() {
        assert_eq!(
            validate(json!({ "color": { "default": { "$$include": "a.b" } } })),
            Err(ValidationError::OnlyTopLevelIncludes {
                key: "default".into()
            })
        );
    }
}
