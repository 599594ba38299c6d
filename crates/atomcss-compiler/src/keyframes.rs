//! `@keyframes` animations.

use crate::hash::hash;
use crate::normalize::{transform_value, ValueCache};
use crate::options::CompilerOptions;
use crate::rtl::{generate_ltr, generate_rtl};
use crate::shorthands::expand_shorthand;
use crate::value::{dashify, StyleValue};
use crate::{CompileError, InjectableStyle};
use atomcss_parser::RawValue;
use indexmap::IndexMap;

/// Compile an animation's frames into its generated name and the
/// `@keyframes` rule defining it.
pub fn keyframes(
    name: &str,
    frames: &RawValue,
    options: &CompilerOptions,
    cache: &ValueCache,
) -> Result<(String, InjectableStyle), CompileError> {
    let RawValue::Object(frames) = frames else {
        return Err(invalid(name, format!("expected an object of frames, got {}", frames.type_name())));
    };

    let mut ltr = String::new();
    let mut rtl = String::new();
    for (label, frame) in frames {
        let RawValue::Object(declarations) = frame else {
            return Err(invalid(name, format!("frame '{label}' must be an object")));
        };

        let mut expanded: IndexMap<String, String> = IndexMap::new();
        for (property, value) in declarations {
            if !value.is_primitive() {
                return Err(invalid(
                    name,
                    format!("'{property}' in frame '{label}' must be a string, number or null"),
                ));
            }
            let value = StyleValue::from_raw(value);
            for (longhand, value) in expand_shorthand(property, value.as_ref(), options.style_resolution)? {
                let Some(value) = value else { continue };
                let dashed = dashify(&longhand);
                let css_value = transform_value(&dashed, &value, options, cache)?;
                expanded.insert(dashed, css_value);
            }
        }

        ltr.push_str(&format_frame(label, expanded.iter().map(|(p, v)| generate_ltr(p, v))));
        rtl.push_str(&format_frame(
            label,
            expanded
                .iter()
                .map(|(p, v)| generate_rtl(p, v).unwrap_or_else(|| (p.clone(), v.clone()))),
        ));
    }

    let animation_name = format!("{}{}-B", options.class_name_prefix, hash(&ltr));
    tracing::debug!(name, animation = %animation_name, "compiled keyframes");

    let rtl = (rtl != ltr).then(|| format!("@keyframes {animation_name}{{{rtl}}}"));
    let style = InjectableStyle {
        priority: 1.0,
        ltr: format!("@keyframes {animation_name}{{{ltr}}}"),
        rtl,
    };
    Ok((animation_name, style))
}

fn format_frame(label: &str, declarations: impl Iterator<Item = (String, String)>) -> String {
    let body: String = declarations
        .map(|(property, value)| format!("{property}:{value};"))
        .collect();
    format!("{label}{{{body}}}")
}

fn invalid(name: &str, message: String) -> CompileError {
    CompileError::InvalidKeyframes {
        name: name.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn compile(frames: serde_json::Value) -> Result<(String, InjectableStyle), CompileError> {
        keyframes(
            "fade",
            &RawValue::from(frames),
            &CompilerOptions::default(),
            &ValueCache::new(),
        )
    }

    #[test]
    fn test_simple_animation() {
        let (name, style) = compile(json!({
            "from": { "opacity": 0 },
            "to": { "opacity": 1 }
        }))
        .unwrap();
        let body = "from{opacity:0;}to{opacity:1;}";
        assert_eq!(name, format!("x{}-B", hash(body)));
        assert_eq!(style.ltr, format!("@keyframes {name}{{{body}}}"));
        assert_eq!(style.rtl, None);
        assert_eq!(style.priority, 1.0);
    }

    #[test]
    fn test_values_normalized() {
        let (_, style) = compile(json!({
            "0%": { "transform": "translateX( 0px )", "width": 10 }
        }))
        .unwrap();
        assert!(style.ltr.contains("0%{transform:translateX(0px);width:10px;}"), "{}", style.ltr);
    }

    #[test]
    fn test_direction_sensitive_frames() {
        let (name, style) = compile(json!({
            "from": { "marginInlineStart": 0 },
            "to": { "marginInlineStart": 10 }
        }))
        .unwrap();
        assert_eq!(
            style.ltr,
            format!("@keyframes {name}{{from{{margin-inline-start:0;}}to{{margin-inline-start:10px;}}}}")
        );
        assert_eq!(style.rtl, None);
    }

    #[test]
    fn test_rtl_variant() {
        let (name, style) = compile(json!({
            "from": { "boxShadow": "1px 1px red" }
        }))
        .unwrap();
        assert_eq!(
            style.rtl.as_deref(),
            Some(format!("@keyframes {name}{{from{{box-shadow:-1px 1px red;}}}}").as_str())
        );
    }

    #[test]
    fn test_nulls_dropped() {
        let (_, style) = compile(json!({ "from": { "color": null, "opacity": 0 } })).unwrap();
        assert!(style.ltr.ends_with("{from{opacity:0;}}"));
    }

    #[test]
    fn test_invalid_frame() {
        assert!(matches!(
            compile(json!({ "from": "red" })),
            Err(CompileError::InvalidKeyframes { .. })
        ));
        assert!(matches!(
            compile(json!({ "from": { "color": ["red"] } })),
            Err(CompileError::InvalidKeyframes { .. })
        ));
    }
}
