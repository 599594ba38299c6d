//! Compiler configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How shorthand properties are expanded into longhands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleResolution {
    /// Split box shorthands into logical longhands and reset the longhands
    /// of everything else with explicit nulls.
    #[default]
    ApplicationOrder,
    /// Same splits, no resets: property priorities settle conflicts.
    PropertySpecificity,
    /// Split shorthands into (non-standard) logical longhands at compile time.
    LegacyExpandShorthands,
}

impl StyleResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleResolution::ApplicationOrder => "application-order",
            StyleResolution::PropertySpecificity => "property-specificity",
            StyleResolution::LegacyExpandShorthands => "legacy-expand-shorthands",
        }
    }
}

impl fmt::Display for StyleResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StyleResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "application-order" => Ok(StyleResolution::ApplicationOrder),
            "property-specificity" => Ok(StyleResolution::PropertySpecificity),
            "legacy-expand-shorthands" => Ok(StyleResolution::LegacyExpandShorthands),
            other => Err(format!("Unknown style resolution '{other}'")),
        }
    }
}

/// Options recognized by every compiler entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Prefix generated class names with the property they set.
    pub dev: bool,
    /// Replace class names with `<namespace>__<key>` placeholders and
    /// inject nothing.
    pub test: bool,
    /// Convert `font-size` pixel values to rem.
    pub use_rem_for_font_size: bool,
    pub class_name_prefix: String,
    /// Custom properties known to exist at runtime. Only used by the lint
    /// pass; `None` disables it.
    #[serde(rename = "definedStylexCSSVariables")]
    pub defined_css_variables: Option<Vec<String>>,
    pub style_resolution: StyleResolution,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            dev: false,
            test: false,
            use_rem_for_font_size: false,
            class_name_prefix: "x".to_string(),
            defined_css_variables: None,
            style_resolution: StyleResolution::default(),
        }
    }
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style_resolution(mut self, style_resolution: StyleResolution) -> Self {
        self.style_resolution = style_resolution;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = CompilerOptions::default();
        assert_eq!(options.class_name_prefix, "x");
        assert_eq!(options.style_resolution, StyleResolution::ApplicationOrder);
        assert!(!options.dev);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let options: CompilerOptions = serde_json::from_str(
            r#"{"dev": true, "styleResolution": "legacy-expand-shorthands", "useRemForFontSize": true}"#,
        )
        .unwrap();
        assert!(options.dev);
        assert!(options.use_rem_for_font_size);
        assert_eq!(
            options.style_resolution,
            StyleResolution::LegacyExpandShorthands
        );
        assert_eq!(options.class_name_prefix, "x");
    }

    #[test]
    fn test_deserialize_variable_allowlist() {
        let options: CompilerOptions =
            serde_json::from_str(r#"{"definedStylexCSSVariables": ["--a"]}"#).unwrap();
        assert_eq!(options.defined_css_variables, Some(vec!["--a".to_string()]));
    }

    #[test]
    fn test_style_resolution_from_str() {
        assert_eq!(
            "property-specificity".parse::<StyleResolution>(),
            Ok(StyleResolution::PropertySpecificity)
        );
        assert!("nope".parse::<StyleResolution>().is_err());
    }
}
