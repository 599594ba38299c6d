//! Compile-time constants (`defineConsts`).
//!
//! Constants are referenced in rules as `var(--<constKey>)` and substituted
//! with their literal value when the stylesheet is rendered.

use crate::hash::hash;
use crate::options::CompilerOptions;
use crate::value::format_number;
use crate::CompileError;
use atomcss_parser::{RawMap, RawValue};
use indexmap::IndexMap;
use serde::Serialize;

/// A constant to substitute into the final stylesheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectableConstant {
    pub const_key: String,
    pub const_value: String,
    pub priority: f64,
}

/// Define a group of constants. Returns the key → value map handed back to
/// callers and the constants to inject, keyed by `constKey`.
pub fn define_consts(
    group: &str,
    constants: &RawMap,
    options: &CompilerOptions,
) -> Result<(IndexMap<String, String>, IndexMap<String, InjectableConstant>), CompileError> {
    let mut values = IndexMap::with_capacity(constants.len());
    let mut injected = IndexMap::with_capacity(constants.len());

    for (key, value) in constants {
        if key.starts_with("--") {
            return Err(CompileError::InvalidConstKey { key: key.clone() });
        }
        let const_value = match value {
            RawValue::String(text) => text.clone(),
            RawValue::Number(n) => format_number(*n),
            other => {
                return Err(CompileError::InvalidConstValue {
                    key: key.clone(),
                    found: other.type_name(),
                });
            }
        };

        let hashed = format!("{}{}", options.class_name_prefix, hash(&format!("{group}.{key}")));
        let const_key = if options.dev {
            format!("{}-{hashed}", var_safe_key(key))
        } else {
            hashed
        };

        values.insert(key.clone(), const_value.clone());
        injected.insert(
            const_key.clone(),
            InjectableConstant {
                const_key,
                const_value,
                priority: 0.0,
            },
        );
    }

    tracing::debug!(group, constants = values.len(), "defined constants");
    Ok((values, injected))
}

/// A key usable inside a custom property name.
fn var_safe_key(key: &str) -> String {
    let safe: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    if safe.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{safe}")
    } else {
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawMap {
        match RawValue::from(value) {
            RawValue::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_define_consts() {
        let (values, injected) = define_consts(
            "breakpoints",
            &raw(json!({ "small": "@media (max-width: 600px)", "cols": 12 })),
            &CompilerOptions::default(),
        )
        .unwrap();
        assert_eq!(values["small"], "@media (max-width: 600px)");
        assert_eq!(values["cols"], "12");

        let key = format!("x{}", hash("breakpoints.small"));
        assert_eq!(injected[key.as_str()].const_value, "@media (max-width: 600px)");
        assert_eq!(injected[key.as_str()].priority, 0.0);
    }

    #[test]
    fn test_dev_keys_are_readable() {
        let options = CompilerOptions {
            dev: true,
            ..CompilerOptions::default()
        };
        let (_, injected) =
            define_consts("sizes", &raw(json!({ "card.gap": "8px" })), &options).unwrap();
        let key = injected.keys().next().unwrap();
        assert!(key.starts_with("card-gap-x"), "{key}");
    }

    #[test]
    fn test_custom_property_key_rejected() {
        assert_eq!(
            define_consts("c", &raw(json!({ "--x": "1" })), &CompilerOptions::default()),
            Err(CompileError::InvalidConstKey { key: "--x".into() })
        );
    }

    #[test]
    fn test_object_value_rejected() {
        assert!(matches!(
            define_consts("c", &raw(json!({ "x": { "a": 1 } })), &CompilerOptions::default()),
            Err(CompileError::InvalidConstValue { .. })
        ));
    }

    #[test]
    fn test_var_safe_key() {
        assert_eq!(var_safe_key("primary color"), "primary-color");
        assert_eq!(var_safe_key("2xl"), "_2xl");
    }
}
