//! Stylesheet rendering.
//!
//! Orders injected rules by priority, scopes direction-sensitive rules to
//! the document direction and substitutes compile-time constants.

use crate::constants::InjectableConstant;
use crate::{InjectableStyle, StylesTable};
use indexmap::IndexMap;
use std::cmp::Ordering;

const LTR_SCOPE: &str = "html:not([dir='rtl'])";
const RTL_SCOPE: &str = "html[dir='rtl']";

/// Render every injected rule into one stylesheet, one rule per line.
pub fn render_stylesheet(
    styles: &StylesTable,
    constants: &IndexMap<String, InjectableConstant>,
) -> String {
    let mut rules: Vec<&InjectableStyle> = styles.values().collect();
    rules.sort_by(|a, b| a.priority.partial_cmp(&b.priority).unwrap_or(Ordering::Equal));

    let mut lines = Vec::with_capacity(rules.len());
    for style in rules {
        match &style.rtl {
            // Animation names are global: a static sheet cannot scope them
            Some(_) if style.ltr.starts_with("@keyframes") => lines.push(style.ltr.clone()),
            Some(rtl) => {
                lines.push(add_ancestor_selector(&style.ltr, LTR_SCOPE));
                lines.push(add_ancestor_selector(rtl, RTL_SCOPE));
            }
            None => lines.push(style.ltr.clone()),
        }
    }

    substitute_constants(lines.join("\n"), constants)
}

/// Prefix every selector of the innermost rule with `ancestor`.
pub fn add_ancestor_selector(rule: &str, ancestor: &str) -> String {
    let mut start = 0;
    while rule[start..].starts_with('@') {
        match rule[start..].find('{') {
            Some(brace) => start += brace + 1,
            None => return rule.to_string(),
        }
    }
    let Some(brace) = rule[start..].find('{') else {
        return rule.to_string();
    };
    let end = start + brace;

    let scoped = split_selectors(&rule[start..end])
        .iter()
        .map(|selector| format!("{ancestor} {}", selector.trim()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}{scoped}{}", &rule[..start], &rule[end..])
}

/// Split a selector list on top-level commas.
fn split_selectors(selectors: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    for (i, c) in selectors.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&selectors[last..i]);
                last = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&selectors[last..]);
    parts
}

fn substitute_constants(css: String, constants: &IndexMap<String, InjectableConstant>) -> String {
    constants.values().fold(css, |css, constant| {
        css.replace(
            &format!("var(--{})", constant.const_key),
            &constant.const_value,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn style(priority: f64, ltr: &str, rtl: Option<&str>) -> InjectableStyle {
        InjectableStyle {
            priority,
            ltr: ltr.to_string(),
            rtl: rtl.map(str::to_string),
        }
    }

    #[test]
    fn test_sorted_by_priority() {
        let mut styles = StylesTable::new();
        styles.insert("b".into(), style(17.0, ".b:hover{color:red}", None));
        styles.insert("a".into(), style(4.0, ".a{color:blue}", None));
        styles.insert("c".into(), style(4.0, ".c{opacity:1}", None));
        assert_eq!(
            render_stylesheet(&styles, &IndexMap::new()),
            ".a{color:blue}\n.c{opacity:1}\n.b:hover{color:red}"
        );
    }

    #[test]
    fn test_direction_scoping() {
        let mut styles = StylesTable::new();
        styles.insert(
            "m".into(),
            style(4.0, ".m{margin-left:4px}", Some(".m{margin-right:4px}")),
        );
        assert_eq!(
            render_stylesheet(&styles, &IndexMap::new()),
            "html:not([dir='rtl']) .m{margin-left:4px}\nhtml[dir='rtl'] .m{margin-right:4px}"
        );
    }

    #[test]
    fn test_ancestor_inside_at_rules() {
        assert_eq!(
            add_ancestor_selector("@media a{@supports b{.x.x:hover{float:left}}}", RTL_SCOPE),
            "@media a{@supports b{html[dir='rtl'] .x.x:hover{float:left}}}"
        );
    }

    #[test]
    fn test_ancestor_selector_list() {
        assert_eq!(
            add_ancestor_selector(".x::a, .x::b{color:red}", "html"),
            "html .x::a, html .x::b{color:red}"
        );
    }

    #[test]
    fn test_constants_substituted() {
        let mut styles = StylesTable::new();
        styles.insert(
            "w".into(),
            style(4.0, ".w{width:var(--xsize)}", None),
        );
        let mut constants = IndexMap::new();
        constants.insert(
            "xsize".to_string(),
            InjectableConstant {
                const_key: "xsize".into(),
                const_value: "8px".into(),
                priority: 0.0,
            },
        );
        assert_eq!(render_stylesheet(&styles, &constants), ".w{width:8px}");
    }

    #[test]
    fn test_empty() {
        assert_eq!(render_stylesheet(&StylesTable::new(), &IndexMap::new()), "");
    }
}
