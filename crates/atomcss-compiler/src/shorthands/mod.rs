//! Shorthand expansion.
//!
//! Every style resolution decides, per property, whether a shorthand is
//! kept, split into longhands, or rejected. The strategies share the
//! positional helpers below (`1px 2px` → four sides, `a b / c` → four
//! corners) and are selected with a plain `match` on
//! [`StyleResolution`].

pub mod application_order;
pub mod legacy;
pub mod property_specificity;

pub use application_order::ApplicationOrder;
pub use legacy::LegacyExpandShorthands;
pub use property_specificity::PropertySpecificity;

use crate::options::StyleResolution;
use crate::value::StyleValue;
use crate::CompileError;
use atomcss_lexer::{NodeKind, Scanner};

/// One output declaration: camelCase property and value, `None` meaning an
/// explicit reset.
pub type Longhand = (String, Option<StyleValue>);

/// A shorthand expansion strategy.
pub trait ShorthandExpansion {
    fn resolution(&self) -> StyleResolution;

    /// Expand `property`. Returns `Ok(None)` when the strategy leaves the
    /// property untouched.
    fn expand(
        &self,
        property: &str,
        value: Option<&StyleValue>,
    ) -> Result<Option<Vec<Longhand>>, CompileError>;
}

/// Expand `property` under `resolution`. Properties that are not
/// shorthands come back as a single pair.
pub fn expand_shorthand(
    property: &str,
    value: Option<&StyleValue>,
    resolution: StyleResolution,
) -> Result<Vec<Longhand>, CompileError> {
    let expanded = match resolution {
        StyleResolution::ApplicationOrder => ApplicationOrder.expand(property, value)?,
        StyleResolution::PropertySpecificity => PropertySpecificity.expand(property, value)?,
        StyleResolution::LegacyExpandShorthands => {
            LegacyExpandShorthands.expand(property, value)?
        }
    };
    Ok(expanded.unwrap_or_else(|| vec![single(property, value)]))
}

// =========================================================================
// Builders
// =========================================================================

pub(crate) fn single(property: &str, value: Option<&StyleValue>) -> Longhand {
    (property.to_string(), value.cloned())
}

/// `property: value` followed by a reset of each of `resets`.
pub(crate) fn with_nulls<I, S>(property: &str, value: Option<&StyleValue>, resets: I) -> Vec<Longhand>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    std::iter::once(single(property, value))
        .chain(resets.into_iter().map(|name| (name.into(), None)))
        .collect()
}

/// The same value for every name.
pub(crate) fn same(names: &[&str], value: Option<&StyleValue>) -> Vec<Longhand> {
    names.iter().map(|name| single(name, value)).collect()
}

pub(crate) fn zip<const N: usize>(names: [&str; N], values: [Option<StyleValue>; N]) -> Vec<Longhand> {
    names
        .into_iter()
        .zip(values)
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

pub(crate) fn unsupported(property: &str, resolution: StyleResolution) -> CompileError {
    CompileError::UnsupportedShorthand {
        property: property.to_string(),
        strategy: resolution.as_str(),
    }
}

// =========================================================================
// Positional values
// =========================================================================

/// Split a value on top-level whitespace. A trailing `!important` is
/// carried over to every part.
pub fn split_value(value: Option<&StyleValue>) -> Result<Vec<Option<StyleValue>>, CompileError> {
    let text = match value {
        Some(StyleValue::String(text)) => text,
        _ => return Ok(vec![value.cloned()]),
    };

    let tree = Scanner::scan(text)?;
    let mut parts: Vec<String> = tree
        .nodes
        .iter()
        .filter(|node| !node.is_space() && !node.is_div())
        .map(|node| node.to_string())
        .collect();

    if parts.last().is_some_and(|last| last == "!important") {
        parts.pop();
        for part in &mut parts {
            part.push_str(" !important");
        }
    }

    if parts.is_empty() {
        return Ok(vec![value.cloned()]);
    }
    Ok(parts.into_iter().map(|p| Some(StyleValue::String(p))).collect())
}

/// `top [right [bottom [left]]]` → `[top, right, bottom, left]`.
pub fn sides(
    property: &str,
    value: Option<&StyleValue>,
) -> Result<[Option<StyleValue>; 4], CompileError> {
    expand_sides(property, value, split_value(value)?)
}

/// `a [b]` → `[a, b]`, the second defaulting to the first.
pub fn pair(
    property: &str,
    value: Option<&StyleValue>,
) -> Result<[Option<StyleValue>; 2], CompileError> {
    match split_value(value)?.as_slice() {
        [both] => Ok([both.clone(), both.clone()]),
        [first, second] => Ok([first.clone(), second.clone()]),
        _ => Err(invalid_value(property, value)),
    }
}

/// Border radius corners in `top-start, top-end, bottom-end, bottom-start`
/// order. Handles the `horizontal / vertical` form.
pub fn corners(
    property: &str,
    value: Option<&StyleValue>,
) -> Result<[Option<StyleValue>; 4], CompileError> {
    let Some(StyleValue::String(text)) = value else {
        return sides(property, value);
    };

    let tree = Scanner::scan(text)?;
    let is_slash = |kind: &NodeKind| matches!(kind, NodeKind::Div { value: '/', .. });
    if !tree.nodes.iter().any(|node| is_slash(&node.kind)) {
        return sides(property, value);
    }

    let mut groups: Vec<Vec<Option<StyleValue>>> = vec![Vec::new()];
    for node in &tree.nodes {
        if is_slash(&node.kind) {
            groups.push(Vec::new());
        } else if !node.is_space() && !node.is_div() {
            if let Some(group) = groups.last_mut() {
                group.push(Some(StyleValue::String(node.to_string())));
            }
        }
    }

    let [horizontal, vertical] = <[Vec<Option<StyleValue>>; 2]>::try_from(groups)
        .map_err(|_| invalid_value(property, value))?;
    let horizontal = expand_sides(property, value, horizontal)?;
    let vertical = expand_sides(property, value, vertical)?;

    let corner = |i: usize| match (&horizontal[i], &vertical[i]) {
        (Some(h), Some(v)) => Some(StyleValue::String(format!("{h} {v}"))),
        _ => None,
    };
    Ok([corner(0), corner(1), corner(2), corner(3)])
}

fn expand_sides(
    property: &str,
    value: Option<&StyleValue>,
    parts: Vec<Option<StyleValue>>,
) -> Result<[Option<StyleValue>; 4], CompileError> {
    match parts.as_slice() {
        [all] => Ok([all.clone(), all.clone(), all.clone(), all.clone()]),
        [vertical, horizontal] => Ok([
            vertical.clone(),
            horizontal.clone(),
            vertical.clone(),
            horizontal.clone(),
        ]),
        [top, horizontal, bottom] => Ok([
            top.clone(),
            horizontal.clone(),
            bottom.clone(),
            horizontal.clone(),
        ]),
        [top, right, bottom, left] => Ok([top.clone(), right.clone(), bottom.clone(), left.clone()]),
        _ => Err(invalid_value(property, value)),
    }
}

fn invalid_value(property: &str, value: Option<&StyleValue>) -> CompileError {
    CompileError::InvalidShorthandValue {
        property: property.to_string(),
        value: value.map_or_else(|| "null".to_string(), |v| v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn s(value: &str) -> Option<StyleValue> {
        Some(StyleValue::from(value))
    }

    fn strings(values: &[Option<StyleValue>]) -> Vec<String> {
        values
            .iter()
            .map(|v| v.as_ref().map_or("null".to_string(), |v| v.to_string()))
            .collect()
    }

    #[test]
    fn test_split_value() {
        let parts = split_value(s("1px  calc(2px + 1em) 3px").as_ref()).unwrap();
        assert_eq!(strings(&parts), vec!["1px", "calc(2px + 1em)", "3px"]);
    }

    #[test]
    fn test_split_value_important() {
        let parts = split_value(s("1px 2px !important").as_ref()).unwrap();
        assert_eq!(strings(&parts), vec!["1px !important", "2px !important"]);
    }

    #[test]
    fn test_split_number_and_null() {
        assert_eq!(split_value(Some(&StyleValue::Number(4.0))).unwrap(), vec![Some(StyleValue::Number(4.0))]);
        assert_eq!(split_value(None).unwrap(), vec![None]);
    }

    #[test]
    fn test_sides_counts() {
        let side = |v: &str| strings(&sides("margin", s(v).as_ref()).unwrap());
        assert_eq!(side("1px"), vec!["1px", "1px", "1px", "1px"]);
        assert_eq!(side("1px 2px"), vec!["1px", "2px", "1px", "2px"]);
        assert_eq!(side("1px 2px 3px"), vec!["1px", "2px", "3px", "2px"]);
        assert_eq!(side("1px 2px 3px 4px"), vec!["1px", "2px", "3px", "4px"]);
    }

    #[test]
    fn test_sides_too_many_values() {
        assert_eq!(
            sides("margin", s("1px 2px 3px 4px 5px").as_ref()),
            Err(CompileError::InvalidShorthandValue {
                property: "margin".into(),
                value: "1px 2px 3px 4px 5px".into(),
            })
        );
    }

    #[test]
    fn test_pair() {
        assert_eq!(strings(&pair("gap", s("1px").as_ref()).unwrap()), vec!["1px", "1px"]);
        assert_eq!(strings(&pair("gap", s("1px 2px").as_ref()).unwrap()), vec!["1px", "2px"]);
        assert!(pair("gap", s("1px 2px 3px").as_ref()).is_err());
    }

    #[test]
    fn test_corners_with_slash() {
        let corners = corners("borderRadius", s("10px 20px / 5px").as_ref()).unwrap();
        assert_eq!(
            strings(&corners),
            vec!["10px 5px", "20px 5px", "10px 5px", "20px 5px"]
        );
    }

    #[test]
    fn test_corners_without_slash() {
        let corners = corners("borderRadius", s("4px 8px").as_ref()).unwrap();
        assert_eq!(strings(&corners), vec!["4px", "8px", "4px", "8px"]);
    }

    #[test]
    fn test_expand_non_shorthand_passes_through() {
        for resolution in [
            StyleResolution::ApplicationOrder,
            StyleResolution::PropertySpecificity,
            StyleResolution::LegacyExpandShorthands,
        ] {
            assert_eq!(
                expand_shorthand("color", s("red").as_ref(), resolution).unwrap(),
                vec![("color".to_string(), s("red"))]
            );
        }
    }
}
