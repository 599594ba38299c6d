//! `application-order`: keep shorthands as single declarations and reset
//! every longhand they cover with an explicit null, so that whichever
//! declaration is applied last wins when style objects are merged.
//!
//! Positional box shorthands (`margin`, `padding`, `inset`, `gap`, border
//! colors/styles/widths and radii) are split into logical longhands, with
//! the matching physical properties reset.

use super::{corners, pair, sides, single, unsupported, with_nulls, zip, Longhand, ShorthandExpansion};
use crate::options::StyleResolution;
use crate::value::StyleValue;
use crate::CompileError;

pub struct ApplicationOrder;

/// Shorthands without a safe expansion under logical resolution.
pub(crate) const DISALLOWED: &[&str] = &["all", "borderLeft", "borderRight"];

/// Non-standard names accepted for compatibility, with their standard
/// replacement.
pub(crate) fn standard_alias(property: &str) -> Option<&'static str> {
    Some(match property {
        "borderHorizontal" => "borderInline",
        "borderHorizontalColor" => "borderInlineColor",
        "borderHorizontalStyle" => "borderInlineStyle",
        "borderHorizontalWidth" => "borderInlineWidth",
        "borderVertical" => "borderBlock",
        "borderVerticalColor" => "borderBlockColor",
        "borderVerticalStyle" => "borderBlockStyle",
        "borderVerticalWidth" => "borderBlockWidth",
        "borderStart" => "borderInlineStart",
        "borderStartColor" => "borderInlineStartColor",
        "borderStartStyle" => "borderInlineStartStyle",
        "borderStartWidth" => "borderInlineStartWidth",
        "borderEnd" => "borderInlineEnd",
        "borderEndColor" => "borderInlineEndColor",
        "borderEndStyle" => "borderInlineEndStyle",
        "borderEndWidth" => "borderInlineEndWidth",
        "borderTopStartRadius" => "borderStartStartRadius",
        "borderTopEndRadius" => "borderStartEndRadius",
        "borderBottomStartRadius" => "borderEndStartRadius",
        "borderBottomEndRadius" => "borderEndEndRadius",
        "marginStart" => "marginInlineStart",
        "marginEnd" => "marginInlineEnd",
        "marginHorizontal" => "marginInline",
        "marginVertical" => "marginBlock",
        "paddingStart" => "paddingInlineStart",
        "paddingEnd" => "paddingInlineEnd",
        "paddingHorizontal" => "paddingInline",
        "paddingVertical" => "paddingBlock",
        "start" => "insetInlineStart",
        "end" => "insetInlineEnd",
        "gridGap" => "gap",
        "gridRowGap" => "rowGap",
        "gridColumnGap" => "columnGap",
        _ => return None,
    })
}

/// Split a positional box shorthand into logical longhands. Shared with
/// `property-specificity`, which drops the physical resets.
pub(crate) fn positional(
    property: &str,
    value: Option<&StyleValue>,
) -> Result<Option<(Vec<Longhand>, &'static [&'static str])>, CompileError> {
    let side_names = |prefix: &str, suffix: &str| {
        [
            format!("{prefix}Top{suffix}"),
            format!("{prefix}InlineEnd{suffix}"),
            format!("{prefix}Bottom{suffix}"),
            format!("{prefix}InlineStart{suffix}"),
        ]
    };
    let split = |names: [String; 4], values: [Option<StyleValue>; 4]| -> Vec<Longhand> {
        names.into_iter().zip(values).collect()
    };

    Ok(Some(match property {
        "margin" => (
            split(side_names("margin", ""), sides(property, value)?),
            &["marginLeft", "marginRight"] as &[&str],
        ),
        "padding" => (
            split(side_names("padding", ""), sides(property, value)?),
            &["paddingLeft", "paddingRight"] as &[&str],
        ),
        "inset" => (
            zip(
                ["top", "insetInlineEnd", "bottom", "insetInlineStart"],
                sides(property, value)?,
            ),
            &["left", "right"] as &[&str],
        ),
        "borderColor" => (
            split(side_names("border", "Color"), sides(property, value)?),
            &["borderLeftColor", "borderRightColor"] as &[&str],
        ),
        "borderStyle" => (
            split(side_names("border", "Style"), sides(property, value)?),
            &["borderLeftStyle", "borderRightStyle"] as &[&str],
        ),
        "borderWidth" => (
            split(side_names("border", "Width"), sides(property, value)?),
            &["borderLeftWidth", "borderRightWidth"] as &[&str],
        ),
        "borderRadius" => (
            zip(
                [
                    "borderStartStartRadius",
                    "borderStartEndRadius",
                    "borderEndEndRadius",
                    "borderEndStartRadius",
                ],
                corners(property, value)?,
            ),
            &[
                "borderTopLeftRadius",
                "borderTopRightRadius",
                "borderBottomRightRadius",
                "borderBottomLeftRadius",
            ] as &[&str],
        ),
        "gap" => (zip(["rowGap", "columnGap"], pair(property, value)?), &[] as &[&str]),
        _ => return Ok(None),
    }))
}

/// Width, style and color longhands of one border side.
fn border_side(side: &str) -> [String; 3] {
    [
        format!("border{side}Width"),
        format!("border{side}Style"),
        format!("border{side}Color"),
    ]
}

/// One longhand for each listed border side: `border{side}{part}`.
fn border_part(part: &str, sides: &[&str]) -> Vec<String> {
    sides.iter().map(|side| format!("border{side}{part}")).collect()
}

const ALL_SIDES: &[&str] = &["Top", "Right", "Bottom", "Left", "InlineStart", "InlineEnd"];

impl ShorthandExpansion for ApplicationOrder {
    fn resolution(&self) -> StyleResolution {
        StyleResolution::ApplicationOrder
    }

    fn expand(
        &self,
        property: &str,
        value: Option<&StyleValue>,
    ) -> Result<Option<Vec<Longhand>>, CompileError> {
        if DISALLOWED.contains(&property) {
            return Err(unsupported(property, self.resolution()));
        }
        if let Some(standard) = standard_alias(property) {
            let expanded = self.expand(standard, value)?;
            return Ok(Some(expanded.unwrap_or_else(|| vec![single(standard, value)])));
        }
        if let Some((longhands, resets)) = positional(property, value)? {
            let mut longhands = longhands;
            longhands.extend(resets.iter().map(|name| (name.to_string(), None)));
            return Ok(Some(longhands));
        }

        let expanded = match property {
            "animation" => with_nulls(
                property,
                value,
                [
                    "animationComposition",
                    "animationName",
                    "animationDuration",
                    "animationTimingFunction",
                    "animationDelay",
                    "animationIterationCount",
                    "animationDirection",
                    "animationFillMode",
                    "animationPlayState",
                    "animationTimeline",
                    "animationRange",
                ],
            ),
            "background" => with_nulls(
                property,
                value,
                [
                    "backgroundAttachment",
                    "backgroundClip",
                    "backgroundColor",
                    "backgroundImage",
                    "backgroundOrigin",
                    "backgroundPosition",
                    "backgroundPositionX",
                    "backgroundPositionY",
                    "backgroundRepeat",
                    "backgroundSize",
                ],
            ),
            "backgroundPosition" => {
                with_nulls(property, value, ["backgroundPositionX", "backgroundPositionY"])
            }

            "border" => {
                let mut resets: Vec<String> = [
                    "borderTop",
                    "borderBottom",
                    "borderBlock",
                    "borderBlockStart",
                    "borderBlockEnd",
                    "borderInline",
                    "borderInlineStart",
                    "borderInlineEnd",
                    "borderBlockWidth",
                    "borderBlockStyle",
                    "borderBlockColor",
                    "borderInlineWidth",
                    "borderInlineStyle",
                    "borderInlineColor",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect();
                for side in ALL_SIDES {
                    resets.extend(border_side(side));
                }
                with_nulls(property, value, resets)
            }
            "borderBlock" => {
                let mut resets = vec![
                    "borderBlockStart".to_string(),
                    "borderBlockEnd".to_string(),
                    "borderTop".to_string(),
                    "borderBottom".to_string(),
                ];
                resets.extend(border_side("Top"));
                resets.extend(border_side("Bottom"));
                with_nulls(property, value, resets)
            }
            "borderInline" => {
                let mut resets = vec![
                    "borderInlineStart".to_string(),
                    "borderInlineEnd".to_string(),
                ];
                for side in ["InlineStart", "InlineEnd", "Left", "Right"] {
                    resets.extend(border_side(side));
                }
                with_nulls(property, value, resets)
            }
            "borderTop" | "borderBottom" | "borderBlockStart" | "borderBlockEnd" => {
                let side = property.trim_start_matches("border");
                with_nulls(property, value, border_side(side))
            }
            "borderInlineStart" | "borderInlineEnd" => {
                let side = property.trim_start_matches("border");
                let mut resets = border_side(side).to_vec();
                resets.extend(border_side("Left"));
                resets.extend(border_side("Right"));
                with_nulls(property, value, resets)
            }
            "borderBlockColor" | "borderBlockStyle" | "borderBlockWidth" => {
                let part = property.trim_start_matches("borderBlock");
                with_nulls(property, value, border_part(part, &["Top", "Bottom"]))
            }
            "borderInlineColor" | "borderInlineStyle" | "borderInlineWidth" => {
                let part = property.trim_start_matches("borderInline");
                with_nulls(
                    property,
                    value,
                    border_part(part, &["InlineStart", "InlineEnd", "Left", "Right"]),
                )
            }
            "borderInlineStartColor" | "borderInlineStartStyle" | "borderInlineStartWidth"
            | "borderInlineEndColor" | "borderInlineEndStyle" | "borderInlineEndWidth" => {
                let part = property
                    .trim_start_matches("borderInlineStart")
                    .trim_start_matches("borderInlineEnd");
                with_nulls(property, value, border_part(part, &["Left", "Right"]))
            }
            "borderLeftColor" | "borderLeftStyle" | "borderLeftWidth" | "borderRightColor"
            | "borderRightStyle" | "borderRightWidth" => {
                let part = property
                    .trim_start_matches("borderLeft")
                    .trim_start_matches("borderRight");
                with_nulls(property, value, border_part(part, &["InlineStart", "InlineEnd"]))
            }
            "borderImage" => with_nulls(
                property,
                value,
                [
                    "borderImageOutset",
                    "borderImageRepeat",
                    "borderImageSlice",
                    "borderImageSource",
                    "borderImageWidth",
                ],
            ),

            "borderStartStartRadius" | "borderStartEndRadius" => {
                with_nulls(property, value, ["borderTopLeftRadius", "borderTopRightRadius"])
            }
            "borderEndStartRadius" | "borderEndEndRadius" => with_nulls(
                property,
                value,
                ["borderBottomLeftRadius", "borderBottomRightRadius"],
            ),
            "borderTopLeftRadius" | "borderTopRightRadius" => {
                with_nulls(property, value, ["borderStartStartRadius", "borderStartEndRadius"])
            }
            "borderBottomLeftRadius" | "borderBottomRightRadius" => {
                with_nulls(property, value, ["borderEndStartRadius", "borderEndEndRadius"])
            }

            "columnRule" => with_nulls(
                property,
                value,
                ["columnRuleColor", "columnRuleStyle", "columnRuleWidth"],
            ),
            "columns" => with_nulls(property, value, ["columnCount", "columnWidth"]),
            "container" => with_nulls(property, value, ["containerName", "containerType"]),
            "containIntrinsicSize" => with_nulls(
                property,
                value,
                ["containIntrinsicWidth", "containIntrinsicHeight"],
            ),
            "flex" => with_nulls(property, value, ["flexGrow", "flexShrink", "flexBasis"]),
            "flexFlow" => with_nulls(property, value, ["flexDirection", "flexWrap"]),
            "font" => with_nulls(
                property,
                value,
                [
                    "fontFamily",
                    "fontSize",
                    "fontStretch",
                    "fontStyle",
                    "fontVariant",
                    "fontWeight",
                    "lineHeight",
                ],
            ),
            "fontVariant" => with_nulls(
                property,
                value,
                [
                    "fontVariantAlternates",
                    "fontVariantCaps",
                    "fontVariantEastAsian",
                    "fontVariantEmoji",
                    "fontVariantLigatures",
                    "fontVariantNumeric",
                    "fontVariantPosition",
                ],
            ),
            "grid" => with_nulls(
                property,
                value,
                [
                    "gridTemplate",
                    "gridTemplateAreas",
                    "gridTemplateColumns",
                    "gridTemplateRows",
                    "gridAutoRows",
                    "gridAutoColumns",
                    "gridAutoFlow",
                ],
            ),
            "gridArea" => with_nulls(
                property,
                value,
                [
                    "gridRow",
                    "gridRowStart",
                    "gridRowEnd",
                    "gridColumn",
                    "gridColumnStart",
                    "gridColumnEnd",
                ],
            ),
            "gridColumn" => with_nulls(property, value, ["gridColumnStart", "gridColumnEnd"]),
            "gridRow" => with_nulls(property, value, ["gridRowStart", "gridRowEnd"]),
            "gridTemplate" => with_nulls(
                property,
                value,
                ["gridTemplateAreas", "gridTemplateColumns", "gridTemplateRows"],
            ),

            "insetInline" => with_nulls(
                property,
                value,
                ["insetInlineStart", "insetInlineEnd", "left", "right"],
            ),
            "insetBlock" => with_nulls(property, value, ["top", "bottom"]),
            "insetInlineStart" | "insetInlineEnd" => with_nulls(property, value, ["left", "right"]),
            "left" | "right" => with_nulls(property, value, ["insetInlineStart", "insetInlineEnd"]),

            "listStyle" => with_nulls(
                property,
                value,
                ["listStyleImage", "listStylePosition", "listStyleType"],
            ),

            "marginInline" => with_nulls(
                property,
                value,
                ["marginInlineStart", "marginInlineEnd", "marginLeft", "marginRight"],
            ),
            "marginBlock" => with_nulls(property, value, ["marginTop", "marginBottom"]),
            "marginInlineStart" | "marginInlineEnd" => {
                with_nulls(property, value, ["marginLeft", "marginRight"])
            }
            "marginLeft" | "marginRight" => {
                with_nulls(property, value, ["marginInlineStart", "marginInlineEnd"])
            }

            "mask" => with_nulls(
                property,
                value,
                [
                    "maskClip",
                    "maskComposite",
                    "maskImage",
                    "maskMode",
                    "maskOrigin",
                    "maskPosition",
                    "maskRepeat",
                    "maskSize",
                ],
            ),
            "maskBorder" => with_nulls(
                property,
                value,
                [
                    "maskBorderMode",
                    "maskBorderOutset",
                    "maskBorderRepeat",
                    "maskBorderSlice",
                    "maskBorderSource",
                    "maskBorderWidth",
                ],
            ),
            "offset" => with_nulls(
                property,
                value,
                [
                    "offsetAnchor",
                    "offsetDistance",
                    "offsetPath",
                    "offsetPosition",
                    "offsetRotate",
                ],
            ),
            "outline" => with_nulls(
                property,
                value,
                ["outlineColor", "outlineOffset", "outlineStyle", "outlineWidth"],
            ),
            "overflow" => with_nulls(property, value, ["overflowX", "overflowY"]),

            "paddingInline" => with_nulls(
                property,
                value,
                ["paddingInlineStart", "paddingInlineEnd", "paddingLeft", "paddingRight"],
            ),
            "paddingBlock" => with_nulls(property, value, ["paddingTop", "paddingBottom"]),
            "paddingInlineStart" | "paddingInlineEnd" => {
                with_nulls(property, value, ["paddingLeft", "paddingRight"])
            }
            "paddingLeft" | "paddingRight" => {
                with_nulls(property, value, ["paddingInlineStart", "paddingInlineEnd"])
            }

            "placeContent" => with_nulls(property, value, ["alignContent", "justifyContent"]),
            "placeItems" => with_nulls(property, value, ["alignItems", "justifyItems"]),
            "placeSelf" => with_nulls(property, value, ["alignSelf", "justifySelf"]),
            "scrollMargin" | "scrollPadding" => {
                let resets: Vec<String> = [
                    "Top",
                    "Right",
                    "Bottom",
                    "Left",
                    "BlockStart",
                    "BlockEnd",
                    "InlineStart",
                    "InlineEnd",
                ]
                .iter()
                .map(|side| format!("{property}{side}"))
                .collect();
                with_nulls(property, value, resets)
            }
            "scrollTimeline" => {
                with_nulls(property, value, ["scrollTimelineName", "scrollTimelineAxis"])
            }
            "textDecoration" => with_nulls(
                property,
                value,
                [
                    "textDecorationColor",
                    "textDecorationLine",
                    "textDecorationStyle",
                    "textDecorationThickness",
                ],
            ),
            "textEmphasis" => {
                with_nulls(property, value, ["textEmphasisColor", "textEmphasisStyle"])
            }
            "transition" => with_nulls(
                property,
                value,
                [
                    "transitionBehavior",
                    "transitionDelay",
                    "transitionDuration",
                    "transitionProperty",
                    "transitionTimingFunction",
                ],
            ),
            _ => return Ok(None),
        };

        Ok(Some(expanded))
    }
}
