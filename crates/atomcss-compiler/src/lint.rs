//! Lint pass: custom properties referenced in styles but never defined.

use atomcss_lexer::{NodeKind, Scanner};
use atomcss_parser::{RawMap, RawValue};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A `var(--name)` reference with no known definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintWarning {
    pub namespace: String,
    pub key: String,
    pub variable: String,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Undefined variable '{}' in {}.{}",
            self.variable, self.namespace, self.key
        )
    }
}

/// Report every variable referenced by `namespaces` that is not in
/// `defined`. Values that fail to scan are skipped; compilation reports
/// them.
pub fn undefined_variables(namespaces: &RawMap, defined: &HashSet<String>) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for (namespace, styles) in namespaces {
        let Some(styles) = styles.as_object() else {
            continue;
        };
        for (key, value) in styles {
            let mut referenced = Vec::new();
            collect_references(value, &mut referenced);
            for variable in referenced {
                if !defined.contains(&variable) {
                    warnings.push(LintWarning {
                        namespace: namespace.clone(),
                        key: key.clone(),
                        variable,
                    });
                }
            }
        }
    }
    warnings
}

fn collect_references(value: &RawValue, out: &mut Vec<String>) {
    match value {
        RawValue::String(text) if text.contains("var(") => {
            let Ok(tree) = Scanner::scan(text) else {
                return;
            };
            tree.walk(&mut |node, _| {
                if let NodeKind::Function { name, nodes, .. } = &node.kind {
                    let variable = nodes.first().and_then(|n| n.as_word());
                    if let Some(variable) = variable.filter(|v| name == "var" && v.starts_with("--")) {
                        if !out.iter().any(|seen| seen == variable) {
                            out.push(variable.to_string());
                        }
                    }
                }
            });
        }
        RawValue::Array(items) => items.iter().for_each(|item| collect_references(item, out)),
        RawValue::Object(map) => map.values().for_each(|inner| collect_references(inner, out)),
        _ => {}
    }
}
