use std::fmt;

/// A position in a value string, tracking line and column for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Classification of a value node.
///
/// Every variant keeps the whitespace it was written with, so printing a
/// freshly scanned tree reproduces the source byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A bare token: keyword, number, dimension, hex color, operator.
    Word(String),

    /// A quoted string. `value` is the raw content between the quotes,
    /// escapes included.
    Str {
        value: String,
        quote: char,
    },

    /// A run of whitespace between two other nodes.
    Space(String),

    /// A `,` or `/` separator together with the whitespace around it.
    Div {
        value: char,
        before: String,
        after: String,
    },

    /// `name(args)`. A bare parenthesized group has an empty name.
    /// `before`/`after` hold the whitespace just inside the parentheses.
    Function {
        name: String,
        nodes: Vec<ValueNode>,
        before: String,
        after: String,
        unclosed: bool,
    },
}

/// A node in a scanned value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    pub kind: NodeKind,
    pub span: Span,
}

impl ValueNode {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_space(&self) -> bool {
        matches!(self.kind, NodeKind::Space(_))
    }

    pub fn is_div(&self) -> bool {
        matches!(self.kind, NodeKind::Div { .. })
    }

    /// The word text, if this node is a word.
    pub fn as_word(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Word(w) => Some(w),
            _ => None,
        }
    }
}

impl fmt::Display for ValueNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Word(w) => f.write_str(w),
            NodeKind::Str { value, quote } => write!(f, "{quote}{value}{quote}"),
            NodeKind::Space(s) => f.write_str(s),
            NodeKind::Div {
                value,
                before,
                after,
            } => write!(f, "{before}{value}{after}"),
            NodeKind::Function {
                name,
                nodes,
                before,
                after,
                unclosed,
            } => {
                write!(f, "{name}({before}")?;
                for node in nodes {
                    write!(f, "{node}")?;
                }
                f.write_str(after)?;
                if !unclosed {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

/// A fully scanned value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueTree {
    pub nodes: Vec<ValueNode>,
}

impl ValueTree {
    pub fn new(nodes: Vec<ValueNode>) -> Self {
        Self { nodes }
    }

    /// Visit every node depth-first, parents before children.
    ///
    /// The callback receives the function nesting depth of the node (0 at
    /// the top level). The raw contents of `url()` are not descended into.
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&ValueNode, usize),
    {
        walk_nodes(&self.nodes, 0, f);
    }

    /// Mutable counterpart of [`ValueTree::walk`].
    pub fn walk_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut ValueNode, usize),
    {
        walk_nodes_mut(&mut self.nodes, 0, f);
    }
}

impl fmt::Display for ValueTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

fn is_url(name: &str) -> bool {
    name.eq_ignore_ascii_case("url")
}

fn walk_nodes<F>(nodes: &[ValueNode], depth: usize, f: &mut F)
where
    F: FnMut(&ValueNode, usize),
{
    for node in nodes {
        f(node, depth);
        if let NodeKind::Function { name, nodes, .. } = &node.kind {
            if !is_url(name) {
                walk_nodes(nodes, depth + 1, f);
            }
        }
    }
}

fn walk_nodes_mut<F>(nodes: &mut [ValueNode], depth: usize, f: &mut F)
where
    F: FnMut(&mut ValueNode, usize),
{
    for node in nodes.iter_mut() {
        f(node, depth);
        if let NodeKind::Function { name, nodes, .. } = &mut node.kind {
            if !is_url(name) {
                walk_nodes_mut(nodes, depth + 1, f);
            }
        }
    }
}

/// A word split into its numeric part and its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension<'a> {
    pub number: &'a str,
    pub unit: &'a str,
}

impl Dimension<'_> {
    /// Numeric value of the number part.
    pub fn value(&self) -> f64 {
        self.number.parse().unwrap_or(0.0)
    }
}

/// Split a word like `-1.5em` into `("-1.5", "em")`.
///
/// Returns `None` when the word does not start with a number.
pub fn parse_unit(word: &str) -> Option<Dimension<'_>> {
    let bytes = word.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let mut digits = 0;
    while pos < len && bytes[pos].is_ascii_digit() {
        pos += 1;
        digits += 1;
    }

    if pos + 1 < len && bytes[pos] == b'.' && bytes[pos + 1].is_ascii_digit() {
        pos += 1;
        while pos < len && bytes[pos].is_ascii_digit() {
            pos += 1;
            digits += 1;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent, only when digits follow (`1em` is a unit, `1e3` is not)
    if pos < len && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < len && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < len && bytes[exp].is_ascii_digit() {
            while exp < len && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            pos = exp;
        }
    }

    Some(Dimension {
        number: &word[..pos],
        unit: &word[pos..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dim(word: &str) -> Option<(&str, &str)> {
        parse_unit(word).map(|d| (d.number, d.unit))
    }

    #[test]
    fn test_unit_integer() {
        assert_eq!(dim("10px"), Some(("10", "px")));
    }

    #[test]
    fn test_unit_signed_fraction() {
        assert_eq!(dim("-.5em"), Some(("-.5", "em")));
        assert_eq!(dim("+0.25%"), Some(("+0.25", "%")));
    }

    #[test]
    fn test_unit_unitless() {
        assert_eq!(dim("0"), Some(("0", "")));
    }

    #[test]
    fn test_unit_exponent() {
        assert_eq!(dim("1e3ms"), Some(("1e3", "ms")));
        assert_eq!(dim("2em"), Some(("2", "em")));
    }

    #[test]
    fn test_unit_not_a_number() {
        assert_eq!(dim("red"), None);
        assert_eq!(dim("#000"), None);
        assert_eq!(dim("-"), None);
        assert_eq!(dim("."), None);
    }

    #[test]
    fn test_dimension_value() {
        assert_eq!(parse_unit("-1.5px").map(|d| d.value()), Some(-1.5));
    }
}
