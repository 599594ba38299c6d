//! Direction-sensitive declarations.
//!
//! Logical (`margin-start`) and direction-relative (`float: start`)
//! declarations are rewritten to physical ones for left-to-right output;
//! the right-to-left mapping mirrors them. Values that flip on their own
//! (cursors, shadow offsets) only produce an RTL counterpart.

use atomcss_lexer::{parse_unit, NodeKind, Scanner};

/// Logical property → physical property in LTR.
const LOGICAL_TO_LTR: &[(&str, &str)] = &[
    ("margin-start", "margin-left"),
    ("margin-end", "margin-right"),
    ("padding-start", "padding-left"),
    ("padding-end", "padding-right"),
    ("border-start", "border-left"),
    ("border-end", "border-right"),
    ("border-start-width", "border-left-width"),
    ("border-end-width", "border-right-width"),
    ("border-start-color", "border-left-color"),
    ("border-end-color", "border-right-color"),
    ("border-start-style", "border-left-style"),
    ("border-end-style", "border-right-style"),
    ("border-inline-start-color", "border-left-color"),
    ("border-inline-end-color", "border-right-color"),
    ("border-inline-start-style", "border-left-style"),
    ("border-inline-end-style", "border-right-style"),
    ("border-inline-start-width", "border-left-width"),
    ("border-inline-end-width", "border-right-width"),
    ("border-top-start-radius", "border-top-left-radius"),
    ("border-bottom-start-radius", "border-bottom-left-radius"),
    ("border-top-end-radius", "border-top-right-radius"),
    ("border-bottom-end-radius", "border-bottom-right-radius"),
    ("start", "left"),
    ("end", "right"),
];

const CURSOR_FLIPS: &[(&str, &str)] = &[
    ("e-resize", "w-resize"),
    ("w-resize", "e-resize"),
    ("ne-resize", "nw-resize"),
    ("nw-resize", "ne-resize"),
    ("nesw-resize", "nwse-resize"),
    ("nwse-resize", "nesw-resize"),
    ("se-resize", "sw-resize"),
    ("sw-resize", "se-resize"),
];

fn ltr_property(property: &str) -> Option<&'static str> {
    LOGICAL_TO_LTR
        .iter()
        .find(|(logical, _)| *logical == property)
        .map(|(_, physical)| *physical)
}

/// The physical property on the opposite side.
fn mirror(physical: &str) -> String {
    if physical.contains("left") {
        physical.replacen("left", "right", 1)
    } else {
        physical.replacen("right", "left", 1)
    }
}

/// `start`/`end` keyword → physical side for the given direction.
fn side_keyword(value: &str, rtl: bool) -> Option<&'static str> {
    match (value, rtl) {
        ("start" | "inline-start", false) | ("end" | "inline-end", true) => Some("left"),
        ("end" | "inline-end", false) | ("start" | "inline-start", true) => Some("right"),
        _ => None,
    }
}

/// Replace `start`/`end` words in a position list.
fn flip_position_words(value: &str, rtl: bool) -> Option<String> {
    let mut changed = false;
    let words: Vec<&str> = value
        .split(' ')
        .map(|word| match side_keyword(word, rtl) {
            Some(side) => {
                changed = true;
                side
            }
            None => word,
        })
        .collect();
    changed.then(|| words.join(" "))
}

/// Declaration as emitted for left-to-right documents.
pub fn generate_ltr(property: &str, value: &str) -> (String, String) {
    if let Some(physical) = ltr_property(property) {
        return (physical.to_string(), value.to_string());
    }
    let value = match property {
        "float" | "clear" => side_keyword(value, false).map(str::to_string),
        "background-position" => flip_position_words(value, false),
        _ => None,
    }
    .unwrap_or_else(|| value.to_string());
    (property.to_string(), value)
}

/// Declaration for right-to-left documents, or `None` when the
/// declaration reads the same in both directions.
pub fn generate_rtl(property: &str, value: &str) -> Option<(String, String)> {
    if let Some(physical) = ltr_property(property) {
        return Some((mirror(physical), value.to_string()));
    }
    let flipped = match property {
        "float" | "clear" => side_keyword(value, true).map(str::to_string),
        "background-position" => flip_position_words(value, true),
        "cursor" => CURSOR_FLIPS
            .iter()
            .find(|(from, _)| *from == value)
            .map(|(_, to)| to.to_string()),
        "box-shadow" | "text-shadow" => flip_shadow(value),
        _ => None,
    }?;
    Some((property.to_string(), flipped))
}

/// Negate the horizontal offset of every shadow in a list.
fn flip_shadow(value: &str) -> Option<String> {
    let mut tree = Scanner::scan(value).ok()?;
    let mut flipped_current = false;

    for node in &mut tree.nodes {
        match &mut node.kind {
            NodeKind::Div { value: ',', .. } => flipped_current = false,
            NodeKind::Word(word) if !flipped_current => {
                let negated = parse_unit(word).map(|dim| {
                    if dim.value() == 0.0 {
                        word.clone()
                    } else if let Some(positive) = word.strip_prefix('-') {
                        positive.to_string()
                    } else {
                        format!("-{}", word.trim_start_matches('+'))
                    }
                });
                if let Some(negated) = negated {
                    *word = negated;
                    flipped_current = true;
                }
            }
            _ => {}
        }
    }

    let flipped = tree.to_string();
    (flipped != value).then_some(flipped)
}
