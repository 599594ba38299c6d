//! Primitive style values and the small string helpers shared by every
//! compilation stage.

use atomcss_parser::RawValue;
use std::fmt;

/// A single non-null style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    String(String),
    Number(f64),
}

impl StyleValue {
    /// Convert a raw primitive. `None` for `null` and non-primitives.
    pub fn from_raw(value: &RawValue) -> Option<Self> {
        match value {
            RawValue::String(s) => Some(StyleValue::String(s.clone())),
            RawValue::Number(n) => Some(StyleValue::Number(*n)),
            _ => None,
        }
    }

    /// Empty strings are dropped from fallback chains.
    pub fn is_empty(&self) -> bool {
        matches!(self, StyleValue::String(s) if s.is_empty())
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::String(s) => f.write_str(s),
            StyleValue::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::String(value.to_string())
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

/// Format a number without a trailing `.0`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Round to four decimal places, halves towards positive infinity.
pub fn round4(n: f64) -> f64 {
    (n * 10000.0 + 0.5).floor() / 10000.0
}

/// `backgroundColor` → `background-color`, `MozOsxFontSmoothing` →
/// `-moz-osx-font-smoothing`. Custom properties are returned unchanged.
pub fn dashify(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let mut out = String::with_capacity(property.len() + 4);
    // Start of string counts as a boundary
    let mut prev_lower = true;
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase();
        }
    }
    out
}

/// Rewrite a `var(--name)` property key to `--name`. Other keys are
/// returned unchanged.
pub fn normalize_key(key: &str) -> &str {
    key.strip_prefix("var(")
        .and_then(|rest| rest.strip_suffix(')'))
        .filter(|name| name.starts_with("--"))
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dashify() {
        assert_eq!(dashify("backgroundColor"), "background-color");
        assert_eq!(dashify("color"), "color");
        assert_eq!(dashify("borderTopStartRadius"), "border-top-start-radius");
        assert_eq!(dashify("WebkitLineClamp"), "-webkit-line-clamp");
        assert_eq!(dashify("MozOsxFontSmoothing"), "-moz-osx-font-smoothing");
        assert_eq!(dashify("--brandColor"), "--brandColor");
        assert_eq!(dashify("margin-top"), "margin-top");
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("var(--x)"), "--x");
        assert_eq!(normalize_key("--x"), "--x");
        assert_eq!(normalize_key("color"), "color");
        assert_eq!(normalize_key("var(x)"), "var(x)");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(1.23456), 1.2346);
        assert_eq!(round4(0.00004), 0.0);
        assert_eq!(round4(2.0), 2.0);
    }

    #[test]
    fn test_display_number() {
        assert_eq!(StyleValue::Number(1.5).to_string(), "1.5");
        assert_eq!(StyleValue::from("red").to_string(), "red");
    }
}
