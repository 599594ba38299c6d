//! Intermediate rules produced by flattening a namespace.
//!
//! A flattened namespace is a list of `(key, StyleRule)` pairs. Each rule
//! knows how to compile itself into zero or more `(className, style)`
//! tuples, or passes an included style object through untouched.

use crate::normalize::ValueCache;
use crate::options::CompilerOptions;
use crate::rule::convert_style_to_class_name;
use crate::value::StyleValue;
use crate::{CompileError, InjectableStyle};
use atomcss_parser::{is_pseudo_element, IncludedStyles};
use std::cmp::Ordering;

/// A compiled class together with the rule that defines it.
pub type StyleTuple = (String, InjectableStyle);

/// The value of a single declaration: one value or a fallback chain.
#[derive(Debug, Clone, PartialEq)]
pub enum PreRuleValue {
    Single(StyleValue),
    Fallbacks(Vec<StyleValue>),
}

impl PreRuleValue {
    pub fn values(&self) -> &[StyleValue] {
        match self {
            PreRuleValue::Single(value) => std::slice::from_ref(value),
            PreRuleValue::Fallbacks(values) => values,
        }
    }
}

/// One property under a set of conditions.
#[derive(Debug, Clone)]
pub struct PreRule {
    /// camelCase property name, or a custom property.
    pub property: String,
    pub value: PreRuleValue,
    /// Every condition (`:hover`, `@media ...`) enclosing the value, outermost
    /// first.
    pub key_path: Vec<String>,
}

impl PreRule {
    pub fn new(property: impl Into<String>, value: PreRuleValue, key_path: Vec<String>) -> Self {
        Self {
            property: property.into(),
            value,
            key_path,
        }
    }

    /// Pseudo-classes and pseudo-elements in selector order.
    pub fn pseudos(&self) -> Vec<&str> {
        sort_pseudos(self.key_path.iter().map(String::as_str).filter(|k| k.starts_with(':')))
    }

    /// At-rules, sorted.
    pub fn at_rules(&self) -> Vec<&str> {
        let mut at_rules: Vec<&str> = self
            .key_path
            .iter()
            .map(String::as_str)
            .filter(|k| k.starts_with('@'))
            .collect();
        at_rules.sort_by(|a, b| compare_conditions(a, b));
        at_rules
    }

    pub fn compile(
        &self,
        options: &CompilerOptions,
        cache: &ValueCache,
    ) -> Result<StyleTuple, CompileError> {
        convert_style_to_class_name(
            &self.property,
            self.value.values(),
            &self.pseudos(),
            &self.at_rules(),
            options,
            cache,
        )
    }
}

impl PartialEq for PreRule {
    /// Two rules are equal when they compile to the same class.
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property
            && self.value == other.value
            && self.pseudos() == other.pseudos()
            && self.at_rules() == other.at_rules()
    }
}

/// `default` first, everything else in plain string order.
fn compare_conditions(a: &str, b: &str) -> Ordering {
    match (a == "default", b == "default") {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(b),
    }
}

/// Pseudo-elements keep their position; each run of pseudo-classes between
/// them is sorted.
fn sort_pseudos<'a>(pseudos: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut sorted = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for pseudo in pseudos {
        if is_pseudo_element(pseudo) {
            run.sort_by(|a, b| compare_conditions(a, b));
            sorted.append(&mut run);
            sorted.push(pseudo);
        } else {
            run.push(pseudo);
        }
    }
    run.sort_by(|a, b| compare_conditions(a, b));
    sorted.append(&mut run);
    sorted
}

// =========================================================================
// Rule variants
// =========================================================================

/// A flattened entry.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleRule {
    /// Explicitly unset; compiles to no class.
    Null,
    Rule(PreRule),
    /// Alternatives for one property under different conditions. Only ever
    /// holds `Null` and `Rule` members.
    Set(Vec<StyleRule>),
    Included(IncludedStyles),
}

/// Result of compiling a [`StyleRule`].
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledRule {
    /// One entry per member; `None` for unset members.
    Classes(Vec<Option<StyleTuple>>),
    Included(IncludedStyles),
}

impl StyleRule {
    /// Build a rule set, flattening nested sets. An empty set is `Null` and
    /// a single member stands for itself.
    pub fn set(rules: Vec<StyleRule>) -> StyleRule {
        let mut flat = Vec::with_capacity(rules.len());
        for rule in rules {
            match rule {
                StyleRule::Set(members) => flat.extend(members),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => StyleRule::Null,
            1 => flat.pop().unwrap_or(StyleRule::Null),
            _ => StyleRule::Set(flat),
        }
    }

    pub fn compile(
        &self,
        options: &CompilerOptions,
        cache: &ValueCache,
    ) -> Result<CompiledRule, CompileError> {
        let classes = match self {
            StyleRule::Null => vec![None],
            StyleRule::Rule(rule) => vec![Some(rule.compile(options, cache)?)],
            StyleRule::Set(members) => {
                let mut compiled = Vec::new();
                for member in members {
                    if let CompiledRule::Classes(classes) = member.compile(options, cache)? {
                        compiled.extend(classes.into_iter().flatten().map(Some));
                    }
                }
                if compiled.is_empty() {
                    vec![None]
                } else {
                    compiled
                }
            }
            StyleRule::Included(included) => return Ok(CompiledRule::Included(included.clone())),
        };
        Ok(CompiledRule::Classes(classes))
    }
}
