//! Class names and CSS rule text for a single atomic declaration.

use crate::hash::hash;
use crate::normalize::{transform_value, ValueCache};
use crate::options::CompilerOptions;
use crate::priority::rule_priority;
use crate::rtl::{generate_ltr, generate_rtl};
use crate::value::{dashify, StyleValue};
use crate::{CompileError, InjectableStyle};

/// Browser-specific selectors a `::thumb` pseudo-element stands for.
const THUMB_VARIANTS: &[&str] = &["::-webkit-slider-thumb", "::-moz-range-thumb", "::-ms-thumb"];

/// Compile one property (camelCase) with its value or fallback chain into
/// a class name and the rule that defines it.
pub fn convert_style_to_class_name(
    property: &str,
    values: &[StyleValue],
    pseudos: &[&str],
    at_rules: &[&str],
    options: &CompilerOptions,
    cache: &ValueCache,
) -> Result<(String, InjectableStyle), CompileError> {
    let dashed = dashify(property);
    let css_values = values
        .iter()
        .map(|value| transform_value(&dashed, value, options, cache))
        .collect::<Result<Vec<_>, _>>()?;

    let mut sorted_pseudos = pseudos.to_vec();
    sorted_pseudos.sort_unstable();
    let mut sorted_at_rules = at_rules.to_vec();
    sorted_at_rules.sort_unstable();

    let modifier_hash = match sorted_pseudos.concat() + &sorted_at_rules.concat() {
        modifiers if modifiers.is_empty() => "null".to_string(),
        modifiers => modifiers,
    };
    let string_to_hash = format!("<>{dashed}{}{modifier_hash}", css_values.join(", "));

    let class_name = if options.dev {
        format!("{dashed}-{}{}", options.class_name_prefix, hash(&string_to_hash))
    } else {
        format!("{}{}", options.class_name_prefix, hash(&string_to_hash))
    };

    let style = generate_rule(&class_name, &dashed, &css_values, pseudos, at_rules)?;
    Ok((class_name, style))
}

/// Build the LTR/RTL rule text and priority for a class.
pub fn generate_rule(
    class_name: &str,
    property: &str,
    values: &[String],
    pseudos: &[&str],
    at_rules: &[&str],
) -> Result<InjectableStyle, CompileError> {
    let values = if values.len() > 1 {
        variable_fallbacks(property, values)?
    } else {
        values.to_vec()
    };

    let ltr_decls: Vec<String> = values
        .iter()
        .map(|value| {
            let (property, value) = generate_ltr(property, value);
            format!("{property}:{value}")
        })
        .collect();
    let rtl_decls: Vec<String> = values
        .iter()
        .filter_map(|value| generate_rtl(property, value))
        .map(|(property, value)| format!("{property}:{value}"))
        .collect();

    let ltr = build_rule(class_name, &ltr_decls.join(";"), pseudos, at_rules);
    let rtl = (!rtl_decls.is_empty())
        .then(|| build_rule(class_name, &rtl_decls.join(";"), pseudos, at_rules));

    Ok(InjectableStyle {
        priority: rule_priority(property, pseudos, at_rules),
        ltr,
        rtl,
    })
}

/// `.x.x:hover{decls}` wrapped in each at-rule. Every at-rule repeats the
/// class once more in the selector so conditional rules outrank plain ones.
fn build_rule(class_name: &str, declarations: &str, pseudos: &[&str], at_rules: &[&str]) -> String {
    let mut selector = format!(".{class_name}");
    for _ in at_rules {
        selector.push('.');
        selector.push_str(class_name);
    }
    for pseudo in pseudos.iter().filter(|p| **p != "::thumb") {
        selector.push_str(pseudo);
    }

    if pseudos.contains(&"::thumb") {
        selector = THUMB_VARIANTS
            .iter()
            .map(|variant| format!("{selector}{variant}"))
            .collect::<Vec<_>>()
            .join(", ");
    }

    at_rules
        .iter()
        .fold(format!("{selector}{{{declarations}}}"), |rule, at_rule| {
            format!("{at_rule}{{{rule}}}")
        })
}

// =========================================================================
// Variable fallbacks
// =========================================================================

fn is_var(value: &str) -> bool {
    value.starts_with("var(") && value.ends_with(')')
}

/// Fold `var()` entries of a fallback chain into one nested `var()`.
///
/// `['red', 'var(--a)', 'var(--b)']` becomes `var(--b,var(--a,red))`.
/// Variables must form one contiguous run.
fn variable_fallbacks(property: &str, values: &[String]) -> Result<Vec<String>, CompileError> {
    let (Some(first), Some(last)) = (
        values.iter().position(|v| is_var(v)),
        values.iter().rposition(|v| is_var(v)),
    ) else {
        return Ok(values.to_vec());
    };

    let before = &values[..first];
    let vars = &values[first..=last];
    let after = &values[last + 1..];

    if !vars.iter().all(|v| is_var(v)) {
        return Err(CompileError::InvalidShorthandValue {
            property: property.to_string(),
            value: values.join(", "),
        });
    }

    let names: Vec<&str> = vars.iter().rev().map(|v| &v[4..v.len() - 1]).collect();
    let mut folded: Vec<String> = if before.is_empty() {
        vec![compose_vars(&names, None)]
    } else {
        before
            .iter()
            .map(|literal| compose_vars(&names, Some(literal)))
            .collect()
    };
    folded.extend(after.iter().cloned());
    Ok(folded)
}

fn compose_vars(names: &[&str], fallback: Option<&str>) -> String {
    names
        .iter()
        .rev()
        .fold(fallback.map(str::to_string), |inner, name| {
            Some(match inner {
                Some(inner) => format!("var({name},{inner})"),
                None => format!("var({name})"),
            })
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compile(property: &str, values: &[StyleValue], pseudos: &[&str], at_rules: &[&str]) -> (String, InjectableStyle) {
        convert_style_to_class_name(
            property,
            values,
            pseudos,
            at_rules,
            &CompilerOptions::default(),
            &ValueCache::new(),
        )
        .unwrap()
    }

    // =========================================================================
    // Class names
    // =========================================================================

    #[test]
    fn test_simple_declaration() {
        let (class_name, style) = compile("backgroundColor", &["red".into()], &[], &[]);
        assert_eq!(class_name, "xrkmrrc");
        assert_eq!(style.ltr, ".xrkmrrc{background-color:red}");
        assert_eq!(style.rtl, None);
        assert_eq!(style.priority, 4.0);
    }

    #[test]
    fn test_equivalent_values_share_a_class() {
        let (a, _) = compile("margin", &["0px".into()], &[], &[]);
        let (b, _) = compile("margin", &[StyleValue::Number(0.0)], &[], &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_modifier_order_does_not_matter() {
        let (a, _) = compile("color", &["red".into()], &[":hover", ":focus"], &[]);
        let (b, _) = compile("color", &["red".into()], &[":focus", ":hover"], &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_dev_class_name() {
        let options = CompilerOptions {
            dev: true,
            ..CompilerOptions::default()
        };
        let (class_name, _) = convert_style_to_class_name(
            "backgroundColor",
            &["red".into()],
            &[],
            &[],
            &options,
            &ValueCache::new(),
        )
        .unwrap();
        assert_eq!(class_name, "background-color-xrkmrrc");
    }

    #[test]
    fn test_custom_prefix() {
        let options = CompilerOptions {
            class_name_prefix: "a".into(),
            ..CompilerOptions::default()
        };
        let (class_name, _) = convert_style_to_class_name(
            "color",
            &["blue".into()],
            &[],
            &[],
            &options,
            &ValueCache::new(),
        )
        .unwrap();
        assert_eq!(class_name, "aju2f9n");
    }

    // =========================================================================
    // Rule text
    // =========================================================================

    #[test]
    fn test_pseudo_rule() {
        let style = generate_rule("c", "color", &["blue".into()], &[":hover"], &[]).unwrap();
        assert_eq!(style.ltr, ".c:hover{color:blue}");
        assert_eq!(style.priority, 17.0);
    }

    #[test]
    fn test_at_rule_doubles_class() {
        let style = generate_rule(
            "c",
            "background-color",
            &["blue".into()],
            &[],
            &["@media (min-width: 1000px)"],
        )
        .unwrap();
        assert_eq!(
            style.ltr,
            "@media (min-width: 1000px){.c.c{background-color:blue}}"
        );
        assert_eq!(style.priority, 25.0);
    }

    #[test]
    fn test_thumb_expands() {
        let style = generate_rule("c", "color", &["red".into()], &["::thumb"], &[]).unwrap();
        assert_eq!(
            style.ltr,
            ".c::-webkit-slider-thumb, .c::-moz-range-thumb, .c::-ms-thumb{color:red}"
        );
    }

    #[test]
    fn test_fallback_chain() {
        let style =
            generate_rule("c", "position", &["sticky".into(), "fixed".into()], &[], &[]).unwrap();
        assert_eq!(style.ltr, ".c{position:sticky;position:fixed}");
    }

    #[test]
    fn test_direction_sensitive_rule() {
        let style = generate_rule("c", "margin-start", &["4px".into()], &[], &[]).unwrap();
        assert_eq!(style.ltr, ".c{margin-left:4px}");
        assert_eq!(style.rtl.as_deref(), Some(".c{margin-right:4px}"));
        assert_eq!(style.priority, 4.0);
    }

    // =========================================================================
    // Variable fallbacks
    // =========================================================================

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_fold_vars_with_literal() {
        assert_eq!(
            variable_fallbacks("color", &strings(&["red", "var(--a)", "var(--b)"])).unwrap(),
            strings(&["var(--b,var(--a,red))"])
        );
    }

    #[test]
    fn test_fold_vars_only() {
        assert_eq!(
            variable_fallbacks("color", &strings(&["var(--a)", "var(--b)"])).unwrap(),
            strings(&["var(--b,var(--a))"])
        );
    }

    #[test]
    fn test_fold_keeps_trailing_values() {
        assert_eq!(
            variable_fallbacks("color", &strings(&["var(--a)", "blue"])).unwrap(),
            strings(&["var(--a)", "blue"])
        );
    }

    #[test]
    fn test_non_contiguous_vars() {
        assert!(matches!(
            variable_fallbacks("color", &strings(&["var(--a)", "red", "var(--b)"])),
            Err(CompileError::InvalidShorthandValue { .. })
        ));
    }

    #[test]
    fn test_no_vars_untouched() {
        assert_eq!(
            variable_fallbacks("position", &strings(&["sticky", "fixed"])).unwrap(),
            strings(&["sticky", "fixed"])
        );
    }
}
