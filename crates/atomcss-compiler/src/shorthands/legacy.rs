//! `legacy-expand-shorthands`: split shorthands into longhands at compile
//! time, writing logical sides with the non-standard `Start`/`End` names
//! (`marginStart`, `borderTopEndRadius`) that the direction tables map to
//! physical properties.

use super::{corners, pair, same, sides, with_nulls, zip, Longhand, ShorthandExpansion};
use crate::options::StyleResolution;
use crate::value::StyleValue;
use crate::CompileError;

pub struct LegacyExpandShorthands;

/// Standard and logical names rewritten to the property this strategy
/// expands instead.
fn alias(property: &str) -> Option<&'static str> {
    Some(match property {
        "insetBlockStart" => "top",
        "insetBlockEnd" => "bottom",
        "insetInlineStart" => "start",
        "insetInlineEnd" => "end",
        "blockSize" => "height",
        "inlineSize" => "width",
        "minBlockSize" => "minHeight",
        "maxBlockSize" => "maxHeight",
        "minInlineSize" => "minWidth",
        "maxInlineSize" => "maxWidth",
        "borderBlock" => "borderVertical",
        "borderBlockColor" => "borderVerticalColor",
        "borderBlockStyle" => "borderVerticalStyle",
        "borderBlockWidth" => "borderVerticalWidth",
        "borderBlockStart" => "borderTop",
        "borderBlockStartColor" => "borderTopColor",
        "borderBlockStartStyle" => "borderTopStyle",
        "borderBlockStartWidth" => "borderTopWidth",
        "borderBlockEnd" => "borderBottom",
        "borderBlockEndColor" => "borderBottomColor",
        "borderBlockEndStyle" => "borderBottomStyle",
        "borderBlockEndWidth" => "borderBottomWidth",
        "borderInline" => "borderHorizontal",
        "borderInlineColor" => "borderHorizontalColor",
        "borderInlineStyle" => "borderHorizontalStyle",
        "borderInlineWidth" => "borderHorizontalWidth",
        "borderInlineStart" => "borderStart",
        "borderInlineStartColor" => "borderStartColor",
        "borderInlineStartStyle" => "borderStartStyle",
        "borderInlineStartWidth" => "borderStartWidth",
        "borderInlineEnd" => "borderEnd",
        "borderInlineEndColor" => "borderEndColor",
        "borderInlineEndStyle" => "borderEndStyle",
        "borderInlineEndWidth" => "borderEndWidth",
        "borderStartStartRadius" => "borderTopStartRadius",
        "borderStartEndRadius" => "borderTopEndRadius",
        "borderEndStartRadius" => "borderBottomStartRadius",
        "borderEndEndRadius" => "borderBottomEndRadius",
        "gridGap" => "gap",
        "gridRowGap" => "rowGap",
        "gridColumnGap" => "columnGap",
        "marginBlock" => "marginVertical",
        "marginBlockStart" => "marginTop",
        "marginBlockEnd" => "marginBottom",
        "marginInline" => "marginHorizontal",
        "marginInlineStart" => "marginStart",
        "marginInlineEnd" => "marginEnd",
        "overflowBlock" => "overflowY",
        "overflowInline" => "overflowX",
        "paddingBlock" => "paddingVertical",
        "paddingBlockStart" => "paddingTop",
        "paddingBlockEnd" => "paddingBottom",
        "paddingInline" => "paddingHorizontal",
        "paddingInlineStart" => "paddingStart",
        "paddingInlineEnd" => "paddingEnd",
        _ => return None,
    })
}

impl ShorthandExpansion for LegacyExpandShorthands {
    fn resolution(&self) -> StyleResolution {
        StyleResolution::LegacyExpandShorthands
    }

    fn expand(
        &self,
        property: &str,
        value: Option<&StyleValue>,
    ) -> Result<Option<Vec<Longhand>>, CompileError> {
        if let Some(target) = alias(property) {
            let expanded = self.expand(target, value)?;
            return Ok(Some(expanded.unwrap_or_else(|| vec![super::single(target, value)])));
        }

        let expanded: Vec<Longhand> = match property {
            "border" => same(&["borderTop", "borderEnd", "borderBottom", "borderStart"], value),
            "borderColor" => zip(
                ["borderTopColor", "borderEndColor", "borderBottomColor", "borderStartColor"],
                sides(property, value)?,
            ),
            "borderStyle" => zip(
                ["borderTopStyle", "borderEndStyle", "borderBottomStyle", "borderStartStyle"],
                sides(property, value)?,
            ),
            "borderWidth" => zip(
                ["borderTopWidth", "borderEndWidth", "borderBottomWidth", "borderStartWidth"],
                sides(property, value)?,
            ),
            "borderHorizontal" => same(&["borderStart", "borderEnd"], value),
            "borderHorizontalColor" => {
                zip(["borderStartColor", "borderEndColor"], pair(property, value)?)
            }
            "borderHorizontalStyle" => {
                zip(["borderStartStyle", "borderEndStyle"], pair(property, value)?)
            }
            "borderHorizontalWidth" => {
                zip(["borderStartWidth", "borderEndWidth"], pair(property, value)?)
            }
            "borderVertical" => same(&["borderTop", "borderBottom"], value),
            "borderVerticalColor" => {
                zip(["borderTopColor", "borderBottomColor"], pair(property, value)?)
            }
            "borderVerticalStyle" => {
                zip(["borderTopStyle", "borderBottomStyle"], pair(property, value)?)
            }
            "borderVerticalWidth" => {
                zip(["borderTopWidth", "borderBottomWidth"], pair(property, value)?)
            }
            "borderRadius" => zip(
                [
                    "borderTopStartRadius",
                    "borderTopEndRadius",
                    "borderBottomEndRadius",
                    "borderBottomStartRadius",
                ],
                corners(property, value)?,
            ),

            "inset" => zip(["top", "end", "bottom", "start"], sides(property, value)?),
            "insetInline" => zip(["start", "end"], pair(property, value)?),
            "insetBlock" => zip(["top", "bottom"], pair(property, value)?),
            "start" | "end" => with_nulls(property, value, ["left", "right"]),
            "left" | "right" => with_nulls(property, value, ["start", "end"]),

            "gap" => zip(["rowGap", "columnGap"], pair(property, value)?),
            "overflow" => zip(["overflowX", "overflowY"], pair(property, value)?),

            "margin" => zip(
                ["marginTop", "marginEnd", "marginBottom", "marginStart"],
                sides(property, value)?,
            ),
            "marginHorizontal" => zip(["marginStart", "marginEnd"], pair(property, value)?),
            "marginVertical" => zip(["marginTop", "marginBottom"], pair(property, value)?),
            "marginStart" | "marginEnd" => {
                with_nulls(property, value, ["marginLeft", "marginRight"])
            }
            "marginLeft" | "marginRight" => {
                with_nulls(property, value, ["marginStart", "marginEnd"])
            }

            "padding" => zip(
                ["paddingTop", "paddingEnd", "paddingBottom", "paddingStart"],
                sides(property, value)?,
            ),
            "paddingHorizontal" => zip(["paddingStart", "paddingEnd"], pair(property, value)?),
            "paddingVertical" => zip(["paddingTop", "paddingBottom"], pair(property, value)?),
            "paddingStart" | "paddingEnd" => {
                with_nulls(property, value, ["paddingLeft", "paddingRight"])
            }
            "paddingLeft" | "paddingRight" => {
                with_nulls(property, value, ["paddingStart", "paddingEnd"])
            }

            _ => return Ok(None),
        };

        Ok(Some(expanded))
    }
}
