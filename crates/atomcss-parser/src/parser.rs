//! Document parser for atomcss.
//!
//! Reads a JSON input document into a [`Document`]. JSON syntax errors keep
//! the line/column reported by `serde_json`; shape errors (a section that is
//! not an object, an unknown section) are reported at the document start.
//!
//! The parser only checks the *document* shape. Whether a namespace is a
//! legal style tree is the validator's job, so illegal style values survive
//! parsing untouched.

use crate::ast::{Document, RawMap, RawValue, ThemeOverride};
use crate::ParseError;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Input document parser.
pub struct Parser;

impl Parser {
    /// Parse a JSON source string into a document.
    pub fn parse(source: &str) -> Result<Document, ParseError> {
        let value: Value = serde_json::from_str(source).map_err(|e| ParseError {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        })?;
        Self::from_value(value)
    }

    /// Build a document from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Document, ParseError> {
        let Value::Object(sections) = value else {
            return Err(shape_error("Expected the document to be an object"));
        };

        let mut doc = Document::default();

        for (section, body) in sections {
            match section.as_str() {
                "create" => doc.create = expect_map(&section, body)?,
                "keyframes" => doc.keyframes = expect_map(&section, body)?,
                "defineVars" => doc.define_vars = expect_groups(&section, body)?,
                "defineConsts" => doc.define_consts = expect_groups(&section, body)?,
                "createTheme" => doc.create_theme = parse_overrides(body)?,
                other => {
                    return Err(shape_error(format!("Unknown document section '{other}'")));
                }
            }
        }

        Ok(doc)
    }
}

fn expect_object(what: &str, value: Value) -> Result<Map<String, Value>, ParseError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(shape_error(format!(
            "Expected '{what}' to be an object, got {}",
            json_type(&other)
        ))),
    }
}

/// A section whose values are raw style values, kept as-is.
fn expect_map(section: &str, value: Value) -> Result<RawMap, ParseError> {
    Ok(expect_object(section, value)?
        .into_iter()
        .map(|(k, v)| (k, RawValue::from(v)))
        .collect())
}

/// A section of named groups, each an object of raw values.
fn expect_groups(section: &str, value: Value) -> Result<IndexMap<String, RawMap>, ParseError> {
    let mut groups = IndexMap::new();
    for (name, body) in expect_object(section, value)? {
        let what = format!("{section}.{name}");
        groups.insert(name, expect_map(&what, body)?);
    }
    Ok(groups)
}

/// `createTheme`: `{ "<name>": { "theme": "<themeName>", "values": {...} } }`
fn parse_overrides(value: Value) -> Result<IndexMap<String, ThemeOverride>, ParseError> {
    let mut overrides = IndexMap::new();

    for (name, body) in expect_object("createTheme", value)? {
        let what = format!("createTheme.{name}");
        let mut body = expect_object(&what, body)?;

        let theme = match body.remove("theme") {
            Some(Value::String(theme)) => theme,
            _ => {
                return Err(shape_error(format!(
                    "Expected '{what}.theme' to name a variable group"
                )));
            }
        };

        let values = match body.remove("values") {
            Some(values) => expect_map(&format!("{what}.values"), values)?,
            None => RawMap::new(),
        };

        if let Some(extra) = body.keys().next() {
            return Err(shape_error(format!("Unknown key '{extra}' in '{what}'")));
        }

        overrides.insert(name, ThemeOverride { theme, values });
    }

    Ok(overrides)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn shape_error(message: impl Into<String>) -> ParseError {
    ParseError {
        message: message.into(),
        line: 1,
        column: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::IncludedStyles;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Document {
        Parser::parse(source).unwrap()
    }

    // =========================================================================
    // Empty / simple
    // =========================================================================

    #[test]
    fn test_empty_document() {
        let doc = parse("{}");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_create_section() {
        let doc = parse(r#"{"create": {"root": {"color": "red", "zIndex": 2}}}"#);
        let root = doc.create["root"].as_object().unwrap();
        assert_eq!(root["color"], RawValue::from("red"));
        assert_eq!(root["zIndex"], RawValue::Number(2.0));
    }

    #[test]
    fn test_namespace_key_order_preserved() {
        let doc = parse(r#"{"create": {"b": {}, "a": {}, "c": {}}}"#);
        let names: Vec<&str> = doc.create.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_include_marker() {
        let doc = parse(r#"{"create": {"root": {"base": {"$$include": "other.base"}}}}"#);
        let root = doc.create["root"].as_object().unwrap();
        assert_eq!(
            root["base"],
            RawValue::Include(IncludedStyles::new("other.base"))
        );
    }

    #[test]
    fn test_illegal_style_values_survive_parsing() {
        let doc = parse(r#"{"create": {"root": {"color": true}}}"#);
        let root = doc.create["root"].as_object().unwrap();
        assert_eq!(root["color"], RawValue::Boolean(true));
    }

    // =========================================================================
    // Variables, themes, constants
    // =========================================================================

    #[test]
    fn test_define_vars_groups() {
        let doc = parse(r#"{"defineVars": {"colors": {"fg": "black", "bg": {"default": "white"}}}}"#);
        let colors = &doc.define_vars["colors"];
        assert_eq!(colors.len(), 2);
        assert_eq!(colors["fg"], RawValue::from("black"));
    }

    #[test]
    fn test_create_theme() {
        let doc = parse(
            r#"{"createTheme": {"dark": {"theme": "colors", "values": {"fg": "white"}}}}"#,
        );
        let dark = &doc.create_theme["dark"];
        assert_eq!(dark.theme, "colors");
        assert_eq!(dark.values["fg"], RawValue::from("white"));
    }

    #[test]
    fn test_define_consts() {
        let doc = parse(r#"{"defineConsts": {"breakpoints": {"small": "@media (max-width: 600px)"}}}"#);
        assert_eq!(doc.define_consts["breakpoints"].len(), 1);
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn test_syntax_error_position() {
        let err = Parser::parse("{\n  \"create\": {,}\n}").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_document_must_be_object() {
        let err = Parser::parse("[]").unwrap_err();
        assert!(err.message.contains("document to be an object"));
    }

    #[test]
    fn test_unknown_section() {
        let err = Parser::parse(r#"{"styles": {}}"#).unwrap_err();
        assert!(err.message.contains("Unknown document section 'styles'"));
    }

    #[test]
    fn test_section_must_be_object() {
        let err = Parser::parse(r#"{"create": 1}"#).unwrap_err();
        assert!(err.message.contains("Expected 'create' to be an object, got number"));
    }

    #[test]
    fn test_theme_override_requires_theme_name() {
        let err = Parser::parse(r#"{"createTheme": {"dark": {"values": {}}}}"#).unwrap_err();
        assert!(err.message.contains("createTheme.dark.theme"));
    }

    #[test]
    fn test_theme_override_rejects_unknown_keys() {
        let err =
            Parser::parse(r#"{"createTheme": {"dark": {"theme": "c", "extra": 1}}}"#).unwrap_err();
        assert!(err.message.contains("Unknown key 'extra'"));
    }
}
