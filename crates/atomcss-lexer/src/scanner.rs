use crate::node::{NodeKind, Span, ValueNode, ValueTree};
use crate::LexerError;

/// CSS value scanner.
///
/// Scans a single property value into a [`ValueTree`].
/// Follows the usual hand-written scanner layout:
/// - `Vec<char>` source for index-based navigation
/// - Recursive descent into function arguments
/// - Position tracking on every node
///
/// Unbalanced input is tolerated: a function missing its closing
/// parenthesis is returned with `unclosed: true` so later passes can
/// decide how to report it. Only an unterminated string is a scan error.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    byte_pos: usize,
    line: usize,
    column: usize,
}

impl Scanner {
    /// Create a new scanner for the given value.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            byte_pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scan an entire value into a tree.
    pub fn scan(source: &str) -> Result<ValueTree, LexerError> {
        let mut scanner = Scanner::new(source);
        let (nodes, _) = scanner.scan_sequence(0)?;
        Ok(ValueTree::new(nodes))
    }

    /// Scan nodes until the end of input or, inside a function, the closing
    /// parenthesis. Returns the nodes and whether a `)` was consumed.
    fn scan_sequence(&mut self, depth: usize) -> Result<(Vec<ValueNode>, bool), LexerError> {
        let mut nodes: Vec<ValueNode> = Vec::new();

        while !self.is_at_end() {
            let ch = self.peek();
            match ch {
                c if c.is_whitespace() => {
                    let start = self.mark();
                    let text = self.take_whitespace();
                    nodes.push(ValueNode::new(NodeKind::Space(text), self.span_from(start)));
                }

                '"' | '\'' => nodes.push(self.scan_string()?),

                ',' | '/' => {
                    let start = self.mark();
                    let before = match nodes.last() {
                        Some(ValueNode {
                            kind: NodeKind::Space(s),
                            ..
                        }) => {
                            let s = s.clone();
                            nodes.pop();
                            s
                        }
                        _ => String::new(),
                    };
                    self.advance();
                    let after = self.take_whitespace();
                    nodes.push(ValueNode::new(
                        NodeKind::Div {
                            value: ch,
                            before,
                            after,
                        },
                        self.span_from(start),
                    ));
                }

                ')' if depth > 0 => {
                    self.advance();
                    return Ok((nodes, true));
                }

                '(' => {
                    let start = self.mark();
                    nodes.push(self.scan_function(String::new(), start, depth)?);
                }

                _ => {
                    let start = self.mark();
                    let word = self.scan_word(depth);
                    if !self.is_at_end() && self.peek() == '(' {
                        nodes.push(self.scan_function(word, start, depth)?);
                    } else {
                        nodes.push(ValueNode::new(NodeKind::Word(word), self.span_from(start)));
                    }
                }
            }
        }

        Ok((nodes, false))
    }

    // --- Scanners ---

    /// Scan `name(...)`. The scanner sits on the opening parenthesis.
    fn scan_function(
        &mut self,
        name: String,
        start: (usize, usize, usize),
        depth: usize,
    ) -> Result<ValueNode, LexerError> {
        self.advance(); // consume `(`
        let before = self.take_whitespace();

        let is_raw_url = name.eq_ignore_ascii_case("url")
            && !self.is_at_end()
            && self.peek() != '"'
            && self.peek() != '\'';

        let (mut nodes, closed) = if is_raw_url {
            self.scan_raw_url()
        } else {
            self.scan_sequence(depth + 1)?
        };

        let after = match nodes.last() {
            Some(ValueNode {
                kind: NodeKind::Space(s),
                ..
            }) => {
                let s = s.clone();
                nodes.pop();
                s
            }
            _ => String::new(),
        };

        Ok(ValueNode::new(
            NodeKind::Function {
                name,
                nodes,
                before,
                after,
                unclosed: !closed,
            },
            self.span_from(start),
        ))
    }

    /// Unquoted `url()` contents are kept verbatim as a single word.
    fn scan_raw_url(&mut self) -> (Vec<ValueNode>, bool) {
        let start = self.mark();
        let mut content = String::new();
        let mut closed = false;

        while !self.is_at_end() {
            let c = self.peek();
            if c == ')' {
                self.advance();
                closed = true;
                break;
            }
            content.push(c);
            self.advance();
        }

        let trimmed = content.trim_end();
        let trailing = content[trimmed.len()..].to_string();
        let mut nodes = Vec::new();
        if !trimmed.is_empty() {
            nodes.push(ValueNode::new(
                NodeKind::Word(trimmed.to_string()),
                self.span_from(start),
            ));
        }
        if !trailing.is_empty() {
            nodes.push(ValueNode::new(NodeKind::Space(trailing), self.span_from(start)));
        }
        (nodes, closed)
    }

    /// Scan a quoted string. Escapes are kept as written.
    fn scan_string(&mut self) -> Result<ValueNode, LexerError> {
        let quote = self.peek();
        let start = self.mark();
        self.advance(); // consume opening quote

        let mut value = String::new();

        while !self.is_at_end() && self.peek() != quote {
            if self.peek() == '\\' {
                value.push('\\');
                self.advance();
                if self.is_at_end() {
                    break;
                }
            }
            value.push(self.peek());
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexerError {
                message: "Unterminated string".into(),
                line: start.1,
                column: start.2,
            });
        }

        self.advance(); // consume closing quote

        Ok(ValueNode::new(
            NodeKind::Str { value, quote },
            self.span_from(start),
        ))
    }

    /// Scan a bare word. A `)` only ends a word inside a function.
    fn scan_word(&mut self, depth: usize) -> String {
        let mut word = String::new();

        while !self.is_at_end() {
            let c = self.peek();
            let stops = c.is_whitespace()
                || matches!(c, '"' | '\'' | ',' | '/' | '(')
                || (c == ')' && depth > 0);
            if stops {
                break;
            }
            if c == '\\' {
                word.push(c);
                self.advance();
                if self.is_at_end() {
                    break;
                }
            }
            word.push(self.peek());
            self.advance();
        }

        word
    }

    // --- Helpers ---

    fn take_whitespace(&mut self) -> String {
        let mut text = String::new();
        while !self.is_at_end() && self.peek().is_whitespace() {
            text.push(self.peek());
            self.advance();
        }
        text
    }

    fn mark(&self) -> (usize, usize, usize) {
        (self.byte_pos, self.line, self.column)
    }

    fn span_from(&self, start: (usize, usize, usize)) -> Span {
        Span::new(start.0, self.byte_pos, start.1, start.2)
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            let c = self.chars[self.pos];
            self.pos += 1;
            self.byte_pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}
