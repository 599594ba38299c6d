//! Theme variables (`defineVars`) and theme overrides (`createTheme`).

use crate::hash::hash;
use crate::options::CompilerOptions;
use crate::value::format_number;
use crate::{CompileError, InjectableStyle, StylesTable};
use atomcss_parser::{RawMap, RawValue};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Joins the at-rules of one condition combination into a single key.
const SPLIT_TOKEN: &str = "__$$__";

const DEFAULT: &str = "default";

/// A compiled variable group: each key maps to a `var(--name)` reference.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompiledVars {
    /// Hashed group name, also the class of the group's root rule.
    #[serde(rename = "__themeName__")]
    pub theme_name: String,
    #[serde(flatten)]
    pub vars: IndexMap<String, String>,
}

impl CompiledVars {
    /// Custom property name (`--xabc`) of `key`.
    pub fn variable_name(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .and_then(|reference| reference.strip_prefix("var("))
            .and_then(|name| name.strip_suffix(')'))
    }
}

/// The class that applies a theme override.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeClass {
    pub theme_name: String,
    pub class_name: String,
}

impl Serialize for ThemeClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("$$css", &true)?;
        map.serialize_entry(&self.theme_name, &self.class_name)?;
        map.end()
    }
}

/// Declarations grouped by the at-rule combination they apply under.
type DeclarationsByAtRule = IndexMap<String, Vec<String>>;

/// Define a group of variables. Returns their references and the `:root`
/// rules declaring their values.
pub fn define_vars(
    theme_name: &str,
    variables: &RawMap,
    options: &CompilerOptions,
) -> Result<(CompiledVars, StylesTable), CompileError> {
    let prefix = &options.class_name_prefix;
    let theme_hash = format!("{prefix}{}", hash(theme_name));

    let mut vars = IndexMap::with_capacity(variables.len());
    let mut by_at_rule = DeclarationsByAtRule::new();
    for (key, value) in variables {
        let name_hash = format!("{prefix}{}", hash(&format!("{theme_name}.{key}")));
        collect_vars_by_at_rule(key, &name_hash, value, &[], &mut by_at_rule)?;
        vars.insert(key.clone(), format!("var(--{name_hash})"));
    }
    tracing::debug!(theme = theme_name, vars = vars.len(), "defined variables");

    let mut styles = StylesTable::new();
    for (at_rule, declarations) in &by_at_rule {
        let root = format!(":root{{{}}}", declarations.concat());
        if at_rule == DEFAULT {
            styles.insert(
                theme_hash.clone(),
                InjectableStyle {
                    priority: 0.0,
                    ltr: root,
                    rtl: None,
                },
            );
        } else {
            styles.insert(
                format!("{theme_hash}-{}", hash(at_rule)),
                InjectableStyle {
                    priority: 0.1,
                    ltr: wrap_with_at_rules(&root, at_rule),
                    rtl: None,
                },
            );
        }
    }

    Ok((
        CompiledVars {
            theme_name: theme_hash,
            vars,
        },
        styles,
    ))
}

/// Override some variables of a group under a new class.
pub fn create_theme(
    theme_vars: &CompiledVars,
    overrides: &RawMap,
    options: &CompilerOptions,
) -> Result<(ThemeClass, StylesTable), CompileError> {
    let mut keys: Vec<&String> = overrides.keys().collect();
    keys.sort();

    let mut by_at_rule = DeclarationsByAtRule::new();
    for key in keys {
        let name = theme_vars.variable_name(key).ok_or_else(|| {
            CompileError::UnknownThemeVariable {
                theme: theme_vars.theme_name.clone(),
                variable: key.clone(),
            }
        })?;
        let name_hash = name.trim_start_matches("--");
        collect_vars_by_at_rule(key, name_hash, &overrides[key.as_str()], &[], &mut by_at_rule)?;
    }

    let mut at_rules: Vec<&String> = by_at_rule.keys().collect();
    at_rules.sort_by(|a, b| match (a.as_str() == DEFAULT, b.as_str() == DEFAULT) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.cmp(b),
    });

    let string_to_hash: String = at_rules
        .iter()
        .map(|at_rule| {
            let declarations = by_at_rule[at_rule.as_str()].concat();
            if at_rule.as_str() == DEFAULT {
                declarations
            } else {
                wrap_with_at_rules(&declarations, at_rule)
            }
        })
        .collect();
    let class_name = format!("{}{}", options.class_name_prefix, hash(&string_to_hash));

    let mut styles = StylesTable::new();
    for at_rule in at_rules {
        let rule = format!(".{class_name}{{{}}}", by_at_rule[at_rule.as_str()].concat());
        if at_rule.as_str() == DEFAULT {
            styles.insert(
                class_name.clone(),
                InjectableStyle {
                    priority: 0.5,
                    ltr: rule,
                    rtl: None,
                },
            );
        } else {
            let depth = at_rule.split(SPLIT_TOKEN).count() as f64;
            styles.insert(
                format!("{class_name}-{}", hash(at_rule)),
                InjectableStyle {
                    priority: 0.5 + 0.1 * depth,
                    ltr: wrap_with_at_rules(&rule, at_rule),
                    rtl: None,
                },
            );
        }
    }

    Ok((
        ThemeClass {
            theme_name: theme_vars.theme_name.clone(),
            class_name,
        },
        styles,
    ))
}

/// Walk one variable value, recording `--name:value;` under every at-rule
/// combination it is declared for.
fn collect_vars_by_at_rule(
    key: &str,
    name_hash: &str,
    value: &RawValue,
    at_rules: &[&str],
    collection: &mut DeclarationsByAtRule,
) -> Result<(), CompileError> {
    let text = match value {
        RawValue::Null => return Ok(()),
        RawValue::String(text) => text.clone(),
        RawValue::Number(n) => format_number(*n),
        RawValue::Object(conditions) => {
            return collect_conditions(key, name_hash, conditions, at_rules, collection);
        }
        RawValue::Array(_) | RawValue::Include(_) | RawValue::Boolean(_) => {
            return Err(CompileError::UnsupportedThemeValue {
                variable: key.to_string(),
                found: value.type_name(),
            });
        }
    };

    let combination = if at_rules.is_empty() {
        DEFAULT.to_string()
    } else {
        let mut sorted = at_rules.to_vec();
        sorted.sort_unstable();
        sorted.join(SPLIT_TOKEN)
    };
    collection
        .entry(combination)
        .or_default()
        .push(format!("--{name_hash}:{text};"));
    Ok(())
}

fn collect_conditions(
    key: &str,
    name_hash: &str,
    conditions: &RawMap,
    at_rules: &[&str],
    collection: &mut DeclarationsByAtRule,
) -> Result<(), CompileError> {
    if !conditions.contains_key(DEFAULT) {
        return Err(CompileError::MissingDefault {
            variable: key.to_string(),
        });
    }
    for (condition, inner) in conditions {
        if condition == DEFAULT {
            collect_vars_by_at_rule(key, name_hash, inner, at_rules, collection)?;
        } else if condition.starts_with('@') {
            let mut nested = at_rules.to_vec();
            nested.push(condition);
            collect_vars_by_at_rule(key, name_hash, inner, &nested, collection)?;
        } else {
            return Err(CompileError::InvalidThemeCondition {
                variable: key.to_string(),
                condition: condition.clone(),
            });
        }
    }
    Ok(())
}

/// Wrap `inner` in each at-rule of a combination, the first outermost.
fn wrap_with_at_rules(inner: &str, combination: &str) -> String {
    combination
        .split(SPLIT_TOKEN)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .fold(inner.to_string(), |rule, at_rule| format!("{at_rule}{{{rule}}}"))
}
