//! Namespace compilation: raw namespaces to class name strings plus the
//! rules that must be injected for them.

use crate::flatten::{flatten_raw_style_object, FlatEntry};
use crate::options::CompilerOptions;
use crate::pre_rule::CompiledRule;
use crate::{CompilationContext, CompileError, StylesTable};
use atomcss_parser::{validate_namespace, IncludedStyles, RawMap, RawValue, ValidationError};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashSet};

/// The compiled value of one namespace key.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledValue {
    /// Space-separated class names.
    Class(String),
    /// The key resolves to no class.
    Null,
    Included(IncludedStyles),
}

/// A compiled namespace. Serializes as an object carrying a `$$css: true`
/// marker next to its keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledNamespace {
    pub entries: IndexMap<String, CompiledValue>,
}

impl CompiledNamespace {
    pub fn get(&self, key: &str) -> Option<&CompiledValue> {
        self.entries.get(key)
    }

    /// Class names of `key`, if it has any.
    pub fn class_names(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(CompiledValue::Class(classes)) => Some(classes),
            _ => None,
        }
    }
}

impl Serialize for CompiledNamespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        for (key, value) in &self.entries {
            match value {
                CompiledValue::Class(classes) => map.serialize_entry(key, classes)?,
                CompiledValue::Null => map.serialize_entry(key, &None::<String>)?,
                CompiledValue::Included(included) => map.serialize_entry(
                    key,
                    &BTreeMap::from([(IncludedStyles::MARKER, included.reference.as_str())]),
                )?,
            }
        }
        map.serialize_entry("$$css", &true)?;
        map.end()
    }
}

/// Compile every namespace with a fresh styles table.
pub fn compile_namespaces(
    namespaces: &RawMap,
    options: &CompilerOptions,
    ctx: &CompilationContext,
) -> Result<(IndexMap<String, CompiledNamespace>, StylesTable), CompileError> {
    let mut styles = StylesTable::new();
    let compiled = compile_namespaces_into(namespaces, options, ctx, &mut styles)?;
    Ok((compiled, styles))
}

/// Compile every namespace, adding injected rules to `styles`. A class that
/// is already present keeps its first definition.
pub fn compile_namespaces_into(
    namespaces: &RawMap,
    options: &CompilerOptions,
    ctx: &CompilationContext,
    styles: &mut StylesTable,
) -> Result<IndexMap<String, CompiledNamespace>, CompileError> {
    let mut compiled = IndexMap::with_capacity(namespaces.len());

    for (name, namespace) in namespaces {
        validate_namespace(name, namespace)?;
        let RawValue::Object(style) = namespace else {
            return Err(ValidationError::IllegalNamespaceValue {
                namespace: name.clone(),
                found: namespace.type_name(),
            }
            .into());
        };

        let flattened = dedupe_keys(flatten_raw_style_object(style, options)?);
        tracing::debug!(namespace = %name, rules = flattened.len(), "compiling namespace");

        let mut entries = IndexMap::with_capacity(flattened.len());
        for (key, rule) in flattened {
            let value = match rule.compile(options, ctx.cache())? {
                CompiledRule::Included(included) => CompiledValue::Included(included),
                CompiledRule::Classes(tuples) => {
                    let present: Vec<_> = tuples.into_iter().flatten().collect();
                    if present.is_empty() {
                        CompiledValue::Null
                    } else if options.test {
                        CompiledValue::Class(format!("{name}__{key}"))
                    } else {
                        let class_names = present
                            .iter()
                            .map(|(class_name, _)| class_name.as_str())
                            .collect::<Vec<_>>()
                            .join(" ");
                        for (class_name, style) in present {
                            if styles.contains_key(&class_name) {
                                tracing::trace!(class = %class_name, "style already injected");
                                continue;
                            }
                            styles.insert(class_name, style);
                        }
                        CompiledValue::Class(class_names)
                    }
                }
            };
            entries.insert(key, value);
        }

        compiled.insert(name.clone(), CompiledNamespace { entries });
    }

    Ok(compiled)
}

/// Keep only the last entry for each key, at the position of that last
/// occurrence.
fn dedupe_keys(entries: Vec<FlatEntry>) -> Vec<FlatEntry> {
    let mut seen = HashSet::new();
    let mut deduped: Vec<FlatEntry> = entries
        .into_iter()
        .rev()
        .filter(|(key, _)| seen.insert(key.clone()))
        .collect();
    deduped.reverse();
    deduped
}
