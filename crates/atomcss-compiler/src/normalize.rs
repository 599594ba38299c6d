//! Value normalization.
//!
//! Turns a raw property value into its canonical CSS text so that equal
//! styles written differently (`0px` / `0`, `500ms` / `.5s`, extra spaces)
//! hash to the same class name. Values are scanned into a node tree,
//! rewritten by a fixed sequence of passes and printed back.

use crate::options::CompilerOptions;
use crate::value::{format_number, round4, StyleValue};
use crate::CompileError;
use atomcss_lexer::{parse_unit, NodeKind, Scanner, ValueTree};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Properties whose numeric values take no unit. Dashed names.
const UNITLESS_PROPERTIES: &[&str] = &[
    "-webkit-line-clamp",
    "animation-iteration-count",
    "aspect-ratio",
    "border-image-outset",
    "border-image-slice",
    "border-image-width",
    "column-count",
    "counter-increment",
    "counter-reset",
    "counter-set",
    "fill-opacity",
    "flex",
    "flex-grow",
    "flex-order",
    "flex-positive",
    "flex-shrink",
    "flood-opacity",
    "font-weight",
    "grid-area",
    "grid-column",
    "grid-column-end",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-start",
    "initial-letter",
    "line-clamp",
    "line-height",
    "math-depth",
    "max-lines",
    "opacity",
    "order",
    "orphans",
    "scale",
    "stop-opacity",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "tab-size",
    "widows",
    "z-index",
];

const TIME_PROPERTIES: &[&str] = &[
    "animation-delay",
    "animation-duration",
    "transition-delay",
    "transition-duration",
];

/// Functions whose presence means a `content` value is already CSS.
const CONTENT_FUNCTIONS: &[&str] = &[
    "attr(",
    "counter(",
    "counters(",
    "url(",
    "linear-gradient(",
    "radial-gradient(",
    "repeating-linear-gradient(",
    "repeating-radial-gradient(",
    "conic-gradient(",
    "image-set(",
    "var(--",
];

const CONTENT_KEYWORDS: &[&str] = &[
    "normal",
    "none",
    "open-quote",
    "close-quote",
    "no-open-quote",
    "no-close-quote",
    "inherit",
    "initial",
    "revert",
    "revert-layer",
    "unset",
];

/// Unit appended to a bare number for `property` (dashed).
pub fn number_suffix(property: &str) -> &'static str {
    if property.starts_with("--") || UNITLESS_PROPERTIES.contains(&property) {
        ""
    } else if TIME_PROPERTIES.contains(&property) {
        "ms"
    } else {
        "px"
    }
}

/// Convert a style value to normalized CSS text for `property` (dashed).
pub fn transform_value(
    property: &str,
    value: &StyleValue,
    options: &CompilerOptions,
    cache: &ValueCache,
) -> Result<String, CompileError> {
    let raw = match value {
        StyleValue::Number(n) => format!("{}{}", format_number(round4(*n)), number_suffix(property)),
        StyleValue::String(s) => s.clone(),
    };
    cache.normalize(property, &raw, options.use_rem_for_font_size)
}

// =========================================================================
// Cache
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    property: String,
    value: String,
    use_rem: bool,
}

/// Memoized [`normalize_value`] results.
///
/// Shared between compilations through [`crate::CompilationContext`]; safe
/// to use from several threads at once.
#[derive(Debug, Default)]
pub struct ValueCache {
    entries: Mutex<HashMap<CacheKey, String>>,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(
        &self,
        property: &str,
        value: &str,
        use_rem: bool,
    ) -> Result<String, CompileError> {
        let key = CacheKey {
            property: property.to_string(),
            value: value.to_string(),
            use_rem,
        };
        if let Some(hit) = self.entries.lock().get(&key) {
            tracing::trace!(property, value, "normalize cache hit");
            return Ok(hit.clone());
        }
        let normalized = normalize_value(property, value, use_rem)?;
        self.entries.lock().insert(key, normalized.clone());
        Ok(normalized)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

// =========================================================================
// Passes
// =========================================================================

/// Normalize `value` for the dashed `property`. Uncached.
pub fn normalize_value(property: &str, value: &str, use_rem: bool) -> Result<String, CompileError> {
    if matches!(property, "content" | "hyphenate-character") {
        return Ok(normalize_content(value));
    }

    let mut tree = Scanner::scan(value)?;

    detect_unclosed_functions(&tree, value)?;
    normalize_whitespace(&mut tree);
    normalize_timings(&mut tree);
    normalize_zero_dimensions(&mut tree);
    normalize_leading_zero(&mut tree);
    normalize_quotes(&mut tree);
    if use_rem && property == "font-size" {
        convert_font_size_to_rem(&mut tree);
    }

    Ok(tree.to_string())
}

/// Quote free text; leave CSS content syntax alone.
fn normalize_content(value: &str) -> String {
    let is_function = CONTENT_FUNCTIONS.iter().any(|f| value.contains(f));
    let is_keyword = CONTENT_KEYWORDS.contains(&value);
    let is_quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));

    if is_function || is_keyword || is_quoted {
        value.to_string()
    } else {
        format!("\"{value}\"")
    }
}

fn detect_unclosed_functions(tree: &ValueTree, value: &str) -> Result<(), CompileError> {
    let mut unclosed = false;
    tree.walk(&mut |node, _| {
        if let NodeKind::Function { unclosed: true, .. } = node.kind {
            unclosed = true;
        }
    });
    if unclosed {
        return Err(CompileError::UnclosedFunction {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Collapse whitespace runs to one space and drop the whitespace around
/// dividers and inside parentheses.
fn normalize_whitespace(tree: &mut ValueTree) {
    tree.walk_mut(&mut |node, _| match &mut node.kind {
        NodeKind::Space(space) => *space = " ".to_string(),
        NodeKind::Div { before, after, .. } | NodeKind::Function { before, after, .. } => {
            before.clear();
            after.clear();
        }
        _ => {}
    });

    while tree.nodes.first().is_some_and(|n| n.is_space()) {
        tree.nodes.remove(0);
    }
    while tree.nodes.last().is_some_and(|n| n.is_space()) {
        tree.nodes.pop();
    }
}

/// `500ms` → `.5s`. Durations under 10ms keep their unit.
fn normalize_timings(tree: &mut ValueTree) {
    tree.walk_mut(&mut |node, _| {
        if let NodeKind::Word(word) = &mut node.kind {
            let seconds = parse_unit(word)
                .filter(|dim| dim.unit == "ms")
                .map(|dim| dim.value() / 1000.0)
                .filter(|s| *s >= 0.01);
            if let Some(seconds) = seconds {
                *word = format!("{}s", format_number(seconds));
            }
        }
    });
}

/// Zero lengths lose their unit outside functions; zero angles, times,
/// fractions and percentages get one canonical unit.
fn normalize_zero_dimensions(tree: &mut ValueTree) {
    tree.walk_mut(&mut |node, depth| {
        if let NodeKind::Word(word) = &mut node.kind {
            let replacement = parse_unit(word).filter(|dim| dim.value() == 0.0).and_then(|dim| {
                match dim.unit.to_ascii_lowercase().as_str() {
                    "deg" | "grad" | "turn" | "rad" => Some("0deg"),
                    "ms" | "s" => Some("0s"),
                    "fr" => Some("0fr"),
                    "%" => Some("0%"),
                    _ if depth == 0 => Some("0"),
                    _ => None,
                }
            });
            if let Some(replacement) = replacement {
                *word = replacement.to_string();
            }
        }
    });
}

/// `0.5em` → `.5em`.
fn normalize_leading_zero(tree: &mut ValueTree) {
    tree.walk_mut(&mut |node, _| {
        if let NodeKind::Word(word) = &mut node.kind {
            let replacement = parse_unit(word)
                .filter(|dim| (0.0..1.0).contains(&dim.value()))
                .map(|dim| {
                    let number = format_number(dim.value()).replacen("0.", ".", 1);
                    format!("{number}{}", dim.unit)
                });
            if let Some(replacement) = replacement {
                *word = replacement;
            }
        }
    });
}

/// Empty strings always use double quotes.
fn normalize_quotes(tree: &mut ValueTree) {
    tree.walk_mut(&mut |node, _| {
        if let NodeKind::Str { value, quote } = &mut node.kind {
            if value.is_empty() {
                *quote = '"';
            }
        }
    });
}

fn convert_font_size_to_rem(tree: &mut ValueTree) {
    tree.walk_mut(&mut |node, _| {
        if let NodeKind::Word(word) = &mut node.kind {
            let replacement = parse_unit(word)
                .filter(|dim| dim.unit == "px")
                .map(|dim| format!("{}rem", format_number(round4(dim.value() / 16.0))));
            if let Some(replacement) = replacement {
                *word = replacement;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn norm(property: &str, value: &str) -> String {
        normalize_value(property, value, false).unwrap()
    }

    // =========================================================================
    // Whitespace
    // =========================================================================

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(norm("border", "  1px   solid\tred "), "1px solid red");
    }

    #[test]
    fn test_whitespace_around_dividers_and_parens() {
        assert_eq!(norm("color", "rgba( 0 , 0 , 0 , 0.5 )"), "rgba(0,0,0,.5)");
        assert_eq!(norm("grid-area", "1 / 2"), "1/2");
    }

    #[test]
    fn test_whitespace_inside_calc_kept() {
        assert_eq!(norm("width", "calc( 100%  -  10px )"), "calc(100% - 10px)");
    }

    // =========================================================================
    // Numbers and units
    // =========================================================================

    #[test]
    fn test_timings() {
        assert_eq!(norm("transition-duration", "500ms"), ".5s");
        assert_eq!(norm("transition-duration", "1000ms"), "1s");
        assert_eq!(norm("transition-duration", "1234ms"), "1.234s");
        assert_eq!(norm("transition-duration", "5ms"), "5ms");
        assert_eq!(norm("transition-duration", "0ms"), "0s");
    }

    #[test]
    fn test_zero_dimensions() {
        assert_eq!(norm("margin", "0px"), "0");
        assert_eq!(norm("margin", "0rem"), "0");
        assert_eq!(norm("transform", "rotate(0rad)"), "rotate(0deg)");
        assert_eq!(norm("grid-template-columns", "0fr 1fr"), "0fr 1fr");
        assert_eq!(norm("width", "0%"), "0%");
    }

    #[test]
    fn test_zero_length_inside_function_keeps_unit() {
        assert_eq!(norm("width", "calc(0px + 1em)"), "calc(0px + 1em)");
    }

    #[test]
    fn test_leading_zero() {
        assert_eq!(norm("opacity", "0.5"), ".5");
        assert_eq!(norm("margin", "0.25em"), ".25em");
        assert_eq!(norm("margin", "1.5em"), "1.5em");
    }

    #[test]
    fn test_negative_values_untouched() {
        assert_eq!(norm("margin", "-1pt"), "-1pt");
        assert_eq!(norm("margin", "-0.5em"), "-0.5em");
    }

    #[test]
    fn test_keywords_untouched() {
        assert_eq!(norm("display", "flex"), "flex");
        assert_eq!(norm("color", "#00ff00"), "#00ff00");
    }

    // =========================================================================
    // Strings and content
    // =========================================================================

    #[test]
    fn test_empty_string_quotes() {
        assert_eq!(norm("quotes", "''"), "\"\"");
        assert_eq!(norm("font-family", "'Inter'"), "'Inter'");
    }

    #[test]
    fn test_content_is_quoted() {
        assert_eq!(norm("content", "hello"), "\"hello\"");
        assert_eq!(norm("hyphenate-character", "-"), "\"-\"");
    }

    #[test]
    fn test_content_passthrough() {
        assert_eq!(norm("content", "'x'"), "'x'");
        assert_eq!(norm("content", "\"\""), "\"\"");
        assert_eq!(norm("content", "attr(data-label)"), "attr(data-label)");
        assert_eq!(norm("content", "var(--icon)"), "var(--icon)");
        assert_eq!(norm("content", "open-quote"), "open-quote");
        assert_eq!(norm("content", "none"), "none");
    }

    // =========================================================================
    // Errors and options
    // =========================================================================

    #[test]
    fn test_unclosed_function() {
        assert_eq!(
            normalize_value("width", "calc(1px + 2px", false),
            Err(CompileError::UnclosedFunction {
                value: "calc(1px + 2px".into()
            })
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            normalize_value("font-family", "'Inter", false),
            Err(CompileError::ValueSyntax(_))
        ));
    }

    #[test]
    fn test_font_size_rem() {
        assert_eq!(normalize_value("font-size", "24px", true).unwrap(), "1.5rem");
        assert_eq!(normalize_value("font-size", "24px", false).unwrap(), "24px");
        assert_eq!(normalize_value("width", "24px", true).unwrap(), "24px");
    }

    #[test]
    fn test_number_suffix() {
        assert_eq!(number_suffix("width"), "px");
        assert_eq!(number_suffix("opacity"), "");
        assert_eq!(number_suffix("--size"), "");
        assert_eq!(number_suffix("animation-duration"), "ms");
    }

    #[test]
    fn test_transform_numbers() {
        let options = CompilerOptions::default();
        let cache = ValueCache::new();
        let t = |p: &str, n: f64| transform_value(p, &StyleValue::Number(n), &options, &cache).unwrap();
        assert_eq!(t("width", 10.0), "10px");
        assert_eq!(t("width", 0.5), ".5px");
        assert_eq!(t("opacity", 0.123456), ".1235");
        assert_eq!(t("z-index", 2.0), "2");
        assert_eq!(t("transition-duration", 500.0), ".5s");
        assert_eq!(t("width", 0.0), "0");
    }

    #[test]
    fn test_cache_memoizes_and_clears() {
        let cache = ValueCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.normalize("margin", "0px", false).unwrap(), "0");
        assert_eq!(cache.normalize("margin", "0px", false).unwrap(), "0");
        assert_eq!(cache.len(), 1);
        cache.normalize("font-size", "16px", true).unwrap();
        cache.normalize("font-size", "16px", false).unwrap();
        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }
}
