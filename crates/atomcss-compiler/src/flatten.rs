//! Flattening of a raw namespace into `(key, StyleRule)` pairs.
//!
//! Shorthands are expanded here, fallback arrays are deduplicated, and
//! nested conditions (`{ default, ':hover', '@media' }` values as well as
//! `':hover': { ... }` blocks) are turned into key paths on each rule.

use crate::options::CompilerOptions;
use crate::pre_rule::{PreRule, PreRuleValue, StyleRule};
use crate::shorthands::expand_shorthand;
use crate::value::{normalize_key, StyleValue};
use crate::CompileError;
use atomcss_parser::{KeyKind, RawMap, RawValue, ValidationError};
use indexmap::IndexMap;

/// A flattened entry: the key it will have in the compiled namespace.
pub type FlatEntry = (String, StyleRule);

/// Flatten a validated namespace.
pub fn flatten_raw_style_object(
    style: &RawMap,
    options: &CompilerOptions,
) -> Result<Vec<FlatEntry>, CompileError> {
    let mut flattened = Vec::new();
    for (key, value) in style {
        flatten_entry(key, value, &[], options, &mut flattened)?;
    }
    Ok(flattened)
}

fn flatten_entry(
    raw_key: &str,
    value: &RawValue,
    key_path: &[String],
    options: &CompilerOptions,
    out: &mut Vec<FlatEntry>,
) -> Result<(), CompileError> {
    let key = normalize_key(raw_key);

    match value {
        RawValue::Include(included) => {
            out.push((key.to_string(), StyleRule::Included(included.clone())));
        }

        RawValue::Null | RawValue::String(_) | RawValue::Number(_) => {
            let value = StyleValue::from_raw(value);
            for (property, value) in expand_shorthand(key, value.as_ref(), options.style_resolution)? {
                let rule = match value {
                    Some(value) => StyleRule::Rule(PreRule::new(
                        property.clone(),
                        PreRuleValue::Single(value),
                        key_path.to_vec(),
                    )),
                    None => StyleRule::Null,
                };
                out.push((property, rule));
            }
        }

        RawValue::Array(items) => {
            let mut equivalents: IndexMap<String, Vec<StyleValue>> = IndexMap::new();
            for item in items {
                let item = StyleValue::from_raw(item);
                for (property, value) in
                    expand_shorthand(key, item.as_ref(), options.style_resolution)?
                {
                    let candidates = equivalents.entry(property).or_default();
                    if let Some(value) = value.filter(|v| !v.is_empty()) {
                        if !candidates.contains(&value) {
                            candidates.push(value);
                        }
                    }
                }
            }
            for (property, mut values) in equivalents {
                let rule = match values.len() {
                    0 => StyleRule::Null,
                    1 => StyleRule::Rule(PreRule::new(
                        property.clone(),
                        PreRuleValue::Single(values.remove(0)),
                        key_path.to_vec(),
                    )),
                    _ => StyleRule::Rule(PreRule::new(
                        property.clone(),
                        PreRuleValue::Fallbacks(values),
                        key_path.to_vec(),
                    )),
                };
                out.push((property, rule));
            }
        }

        RawValue::Object(inner) if KeyKind::classify(key).is_modifier() => {
            // `':hover': { color: 'red' }` block
            let mut nested_path = key_path.to_vec();
            nested_path.push(key.to_string());
            let mut nested = Vec::new();
            for (inner_key, inner_value) in inner {
                flatten_entry(inner_key, inner_value, &nested_path, options, &mut nested)?;
            }
            out.extend(
                nested
                    .into_iter()
                    .map(|(property, rule)| (format!("{key}_{property}"), rule)),
            );
        }

        RawValue::Object(conditions) => {
            let mut equivalents: IndexMap<String, Vec<StyleRule>> = IndexMap::new();
            for (condition, inner_value) in conditions {
                let mut condition_path = key_path.to_vec();
                if condition != "default" {
                    condition_path.push(condition.clone());
                }
                let mut nested = Vec::new();
                flatten_entry(key, inner_value, &condition_path, options, &mut nested)?;
                for (property, rule) in nested {
                    if matches!(rule, StyleRule::Included(_)) {
                        return Err(ValidationError::OnlyTopLevelIncludes {
                            key: condition.clone(),
                        }
                        .into());
                    }
                    equivalents.entry(property).or_default().push(rule);
                }
            }
            for (property, rules) in equivalents {
                out.push((property, StyleRule::set(rules)));
            }
        }

        RawValue::Boolean(_) => {
            return Err(ValidationError::IllegalPropValue {
                key: key.to_string(),
                found: value.type_name(),
            }
            .into());
        }
    }

    Ok(())
}
