//! Rule priorities.
//!
//! The stylesheet is sorted by ascending priority, so a higher number wins
//! the cascade between rules of equal selector specificity: longhands beat
//! shorthands, `:hover` beats `:focus-within`, `@media` beats plain rules.

const SHORTHANDS_OF_SHORTHANDS: &[&str] = &[
    "border",
    "border-block",
    "border-inline",
    "font",
    "grid",
    "grid-area",
    "inset",
    "margin",
    "mask",
    "padding",
    "scroll-margin",
    "scroll-padding",
];

const SHORTHANDS_OF_LONGHANDS: &[&str] = &[
    "animation",
    "background",
    "background-position",
    "border-block-color",
    "border-block-end",
    "border-block-start",
    "border-block-style",
    "border-block-width",
    "border-bottom",
    "border-color",
    "border-end",
    "border-image",
    "border-inline-color",
    "border-inline-end",
    "border-inline-start",
    "border-inline-style",
    "border-inline-width",
    "border-left",
    "border-radius",
    "border-right",
    "border-start",
    "border-style",
    "border-top",
    "border-width",
    "column-rule",
    "columns",
    "contain-intrinsic-size",
    "container",
    "flex",
    "flex-flow",
    "font-variant",
    "gap",
    "grid-column",
    "grid-row",
    "grid-template",
    "inset-block",
    "inset-inline",
    "list-style",
    "margin-block",
    "margin-inline",
    "mask-border",
    "offset",
    "outline",
    "overflow",
    "padding-block",
    "padding-inline",
    "place-content",
    "place-items",
    "place-self",
    "scroll-margin-block",
    "scroll-margin-inline",
    "scroll-padding-block",
    "scroll-padding-inline",
    "scroll-timeline",
    "text-decoration",
    "text-emphasis",
    "transition",
];

const PSEUDO_CLASS_PRIORITIES: &[(&str, f64)] = &[
    (":is", 4.5),
    (":where", 4.5),
    (":not", 4.5),
    (":has", 4.5),
    (":dir", 5.0),
    (":lang", 5.1),
    (":first-child", 5.2),
    (":first-of-type", 5.3),
    (":last-child", 5.4),
    (":last-of-type", 5.5),
    (":only-child", 5.6),
    (":only-of-type", 5.7),
    (":nth-child", 6.0),
    (":nth-last-child", 6.1),
    (":nth-of-type", 6.2),
    (":nth-last-of-type", 6.3),
    (":empty", 7.0),
    (":link", 8.0),
    (":any-link", 8.1),
    (":local-link", 8.2),
    (":target-within", 8.3),
    (":target", 8.4),
    (":visited", 8.5),
    (":enabled", 9.1),
    (":disabled", 9.2),
    (":required", 9.3),
    (":optional", 9.4),
    (":read-only", 9.5),
    (":read-write", 9.6),
    (":placeholder-shown", 9.7),
    (":in-range", 9.8),
    (":out-of-range", 9.9),
    (":default", 10.0),
    (":checked", 10.1),
    (":indeterminate", 10.1),
    (":blank", 10.2),
    (":valid", 10.3),
    (":invalid", 10.4),
    (":user-invalid", 10.5),
    (":autofill", 11.0),
    (":picture-in-picture", 12.0),
    (":modal", 12.1),
    (":fullscreen", 12.2),
    (":paused", 12.3),
    (":playing", 12.4),
    (":current", 12.5),
    (":past", 12.6),
    (":future", 12.7),
    (":hover", 13.0),
    (":focus-within", 14.0),
    (":focus-visible", 15.0),
    (":focus", 16.0),
    (":active", 17.0),
];

const UNKNOWN_PSEUDO_CLASS: f64 = 4.5;

/// Priority of a property (dashed), pseudo or at-rule key.
pub fn get_priority(key: &str) -> f64 {
    if key.starts_with("--") {
        return 1.0;
    }
    if key.starts_with('@') {
        return at_rule_priority(key);
    }
    if key.starts_with("::") {
        return 0.0;
    }
    if key.starts_with(':') {
        return pseudo_class_priority(key);
    }
    property_priority(key)
}

fn at_rule_priority(key: &str) -> f64 {
    if key.starts_with("@media") {
        21.0
    } else if key.starts_with("@container") {
        22.0
    } else {
        // @supports and anything unrecognized
        20.0
    }
}

fn pseudo_class_priority(key: &str) -> f64 {
    // Functional pseudos are looked up by name
    let name = key.split('(').next().unwrap_or(key);
    PSEUDO_CLASS_PRIORITIES
        .iter()
        .find(|(pseudo, _)| *pseudo == name)
        .map_or(UNKNOWN_PSEUDO_CLASS, |(_, priority)| *priority)
}

fn property_priority(property: &str) -> f64 {
    if property == "all" {
        1.0
    } else if SHORTHANDS_OF_SHORTHANDS.contains(&property) {
        2.0
    } else if SHORTHANDS_OF_LONGHANDS.contains(&property) {
        3.0
    } else if property.contains("left") || property.contains("right") {
        4.1
    } else {
        4.0
    }
}

/// Priority of a rule: property plus every pseudo and at-rule it is
/// conditioned on.
pub fn rule_priority(property: &str, pseudos: &[&str], at_rules: &[&str]) -> f64 {
    get_priority(property)
        + pseudos.iter().map(|p| get_priority(p)).sum::<f64>()
        + at_rules.iter().map(|a| get_priority(a)).sum::<f64>()
}
