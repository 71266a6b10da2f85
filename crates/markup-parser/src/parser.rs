//! Recursive descent markup parser.
//!
//! The parser never fails: every input produces a tree. Malformed markup is
//! recovered the way browsers do it (open elements close at their parent's end
//! tag or at the end of input, stray end tags are dropped) and each recovery
//! is recorded as a [`ParseError`].

use crate::ast::*;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{scan_expression, TagLexer, TagTokenKind, Token};
use crate::ParseResult;
use smol_str::SmolStr;
use source_map::Span;
use std::iter::Peekable;

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// The markup parser.
pub struct Parser<'src> {
    source: &'src str,
    pos: usize,
    /// Names of the elements currently open, innermost last.
    open: Vec<SmolStr>,
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    /// Creates a new parser.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            open: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Parses the source into a document.
    pub fn parse(mut self) -> ParseResult {
        let nodes = self.parse_children();

        ParseResult {
            document: Document {
                nodes,
                span: Span::from_usize(0, self.source.len()),
            },
            errors: self.errors,
        }
    }

    // === Cursor helpers ===

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn error(&mut self, kind: ParseErrorKind, span: Span) {
        self.errors.push(ParseError::new(kind, span));
    }

    /// Moves past the next `>`, or to the end of input.
    fn skip_past_gt(&mut self) {
        self.pos = self
            .rest()
            .find('>')
            .map_or(self.source.len(), |idx| self.pos + idx + 1);
    }

    // === Content ===

    /// Parses sibling nodes until the end of input or a closing tag of an
    /// open element.
    fn parse_children(&mut self) -> Vec<Node> {
        let mut nodes = Vec::new();

        while !self.at_end() {
            let rest = self.rest();
            if rest.starts_with("<!--") {
                nodes.push(self.parse_comment());
            } else if rest.starts_with("</") {
                match self.peek_closing_tag_name() {
                    Some(name) if self.is_open(&name) => break,
                    Some(_) => self.stray_closing_tag(),
                    None => nodes.push(self.parse_text()),
                }
            } else if rest.starts_with("<!") {
                nodes.push(self.parse_declaration());
            } else if starts_element(rest) {
                nodes.push(self.parse_element());
            } else if rest.starts_with('{') {
                nodes.push(self.parse_expression());
            } else {
                nodes.push(self.parse_text());
            }
        }

        nodes
    }

    fn is_open(&self, name: &str) -> bool {
        self.open.iter().any(|open| open.eq_ignore_ascii_case(name))
    }

    /// Returns the name in a `</name` at the cursor.
    fn peek_closing_tag_name(&self) -> Option<SmolStr> {
        let after = self.rest().strip_prefix("</")?;
        let len = after.bytes().take_while(|&b| is_tag_name_byte(b)).count();
        (len > 0).then(|| SmolStr::new(&after[..len]))
    }

    fn stray_closing_tag(&mut self) {
        let start = self.pos;
        let name = self.peek_closing_tag_name().unwrap_or_default();
        self.skip_past_gt();
        let kind = if is_void_element(&name) {
            ParseErrorKind::VoidElementClosingTag {
                tag_name: name.to_string(),
            }
        } else {
            ParseErrorKind::UnexpectedClosingTag {
                tag_name: name.to_string(),
            }
        };
        self.error(kind, Span::from_usize(start, self.pos));
    }

    fn parse_text(&mut self) -> Node {
        let start = self.pos;
        // A `<` or `{` at the cursor is text here, so look past it.
        let skip = self.rest().chars().next().map_or(0, char::len_utf8);
        let len = self.rest()[skip..]
            .find(&['<', '{'][..])
            .map_or(self.rest().len(), |idx| idx + skip);
        self.pos += len;

        Node::Text(Text {
            span: Span::from_usize(start, self.pos),
            data: self.source[start..self.pos].to_string(),
        })
    }

    fn parse_comment(&mut self) -> Node {
        let start = self.pos;
        let body_start = start + 4;
        let (body_end, end) = match self.source[body_start..].find("-->") {
            Some(idx) => (body_start + idx, body_start + idx + 3),
            None => {
                self.error(
                    ParseErrorKind::UnclosedComment,
                    Span::from_usize(start, self.source.len()),
                );
                (self.source.len(), self.source.len())
            }
        };
        self.pos = end;

        Node::Comment(Comment {
            span: Span::from_usize(start, end),
            data: self.source[body_start..body_end].to_string(),
        })
    }

    /// Parses `<!DOCTYPE ...>` and similar declarations as comments.
    fn parse_declaration(&mut self) -> Node {
        let start = self.pos;
        self.skip_past_gt();
        let body_end = if self.source[..self.pos].ends_with('>') {
            self.pos - 1
        } else {
            self.pos
        };

        Node::Comment(Comment {
            span: Span::from_usize(start, self.pos),
            data: self.source[start + 2..body_end].to_string(),
        })
    }

    /// Parses a `{...}` expression. An unbalanced `{` is kept as text so the
    /// rest of the document still parses.
    fn parse_expression(&mut self) -> Node {
        let start = self.pos;
        let Some(end) = scan_expression(self.source, start) else {
            self.error(
                ParseErrorKind::UnclosedExpression,
                Span::from_usize(start, start + 1),
            );
            return self.parse_text();
        };
        self.pos = end;

        let expression_span = Span::from_usize(start + 1, (end - 1).max(start + 1));

        Node::Expression(Expression {
            span: Span::from_usize(start, end),
            expression: expression_span.slice(self.source).to_string(),
            expression_span,
        })
    }

    // === Elements ===

    fn parse_element(&mut self) -> Node {
        let start = self.pos;
        let name_len = self.source[start + 1..]
            .bytes()
            .take_while(|&b| is_tag_name_byte(b))
            .count();
        let name = SmolStr::new(&self.source[start + 1..start + 1 + name_len]);
        self.pos = start + 1 + name_len;

        let (attributes, self_closing, terminated) = self.parse_attributes();
        if !terminated {
            self.error(
                ParseErrorKind::UnterminatedStartTag {
                    tag_name: name.to_string(),
                },
                Span::from_usize(start, self.pos),
            );
        }

        if self_closing || is_void_element(&name) || !terminated {
            return Node::Element(Element {
                span: Span::from_usize(start, self.pos),
                name,
                attributes,
                children: Vec::new(),
                content_span: None,
                self_closing,
            });
        }

        let content_start = self.pos;
        let (children, content_end) = if is_raw_text_element(&name) {
            self.parse_raw_text(&name)
        } else {
            self.open.push(name.clone());
            let children = self.parse_children();
            self.open.pop();
            (children, self.pos)
        };

        let closes_here = self
            .peek_closing_tag_name()
            .is_some_and(|closing| closing.eq_ignore_ascii_case(&name));
        if closes_here {
            self.skip_past_gt();
        } else {
            self.error(
                ParseErrorKind::UnclosedTag {
                    tag_name: name.to_string(),
                },
                Span::from_usize(start, content_start),
            );
        }

        Node::Element(Element {
            span: Span::from_usize(start, self.pos),
            name,
            attributes,
            children,
            content_span: Some(Span::from_usize(content_start, content_end)),
            self_closing,
        })
    }

    /// Reads raw text up to `</name`, leaving the cursor on the end tag.
    fn parse_raw_text(&mut self, name: &str) -> (Vec<Node>, usize) {
        let start = self.pos;
        let needle = format!("</{}", name.to_ascii_lowercase());
        let end = self.source[start..]
            .to_ascii_lowercase()
            .find(&needle)
            .map_or(self.source.len(), |idx| start + idx);
        self.pos = end;

        let children = if end > start {
            vec![Node::Text(Text {
                span: Span::from_usize(start, end),
                data: self.source[start..end].to_string(),
            })]
        } else {
            Vec::new()
        };
        (children, end)
    }

    /// Parses attributes up to the end of the start tag.
    ///
    /// Returns the attributes, whether the tag was self-closing and whether
    /// the tag was terminated at all.
    fn parse_attributes(&mut self) -> (Vec<Attribute>, bool, bool) {
        let mut tokens = Vec::new();
        let mut end = None;

        for token in TagLexer::new(self.source, self.pos) {
            match token.kind {
                TagTokenKind::Close => {
                    end = Some((token.span.end, false));
                    break;
                }
                TagTokenKind::SelfClose => {
                    end = Some((token.span.end, true));
                    break;
                }
                _ => tokens.push(token),
            }
        }

        let mut attributes = Vec::new();
        let mut tokens = tokens.into_iter().peekable();
        while let Some(token) = tokens.next() {
            match token.kind {
                TagTokenKind::Name => attributes.push(self.parse_attribute(token, &mut tokens)),
                TagTokenKind::Expression => {
                    // `{name}` shorthand for `name={name}`.
                    let expression_span = strip_delimiters(token.span);
                    let expression = expression_span.slice(self.source).trim().to_string();
                    attributes.push(Attribute {
                        span: token.span,
                        name: SmolStr::new(&expression),
                        name_span: expression_span,
                        value: AttributeValue::Expression {
                            expression,
                            span: expression_span,
                        },
                    });
                }
                TagTokenKind::Slash => {}
                TagTokenKind::UnclosedExpression => {
                    self.error(ParseErrorKind::UnclosedExpression, token.span)
                }
                other => self.error(
                    ParseErrorKind::InvalidAttribute {
                        message: format!("unexpected {}", other.name()),
                    },
                    token.span,
                ),
            }
        }

        match end {
            Some((pos, self_closing)) => {
                self.pos = usize::from(pos);
                (attributes, self_closing, true)
            }
            None => {
                self.pos = self.source.len();
                (attributes, false, false)
            }
        }
    }

    fn parse_attribute(
        &mut self,
        name_token: Token,
        tokens: &mut Peekable<impl Iterator<Item = Token>>,
    ) -> Attribute {
        let name = SmolStr::new(name_token.span.slice(self.source));
        let boolean = Attribute {
            span: name_token.span,
            name: name.clone(),
            name_span: name_token.span,
            value: AttributeValue::Boolean,
        };

        if !tokens.peek().is_some_and(|t| t.kind == TagTokenKind::Eq) {
            return boolean;
        }
        let eq = tokens.next().map_or(name_token.span, |t| t.span);

        let value_token = match tokens.peek() {
            Some(t)
                if matches!(
                    t.kind,
                    TagTokenKind::DoubleQuoted
                        | TagTokenKind::SingleQuoted
                        | TagTokenKind::Name
                        | TagTokenKind::Expression
                ) =>
            {
                *t
            }
            _ => {
                self.error(
                    ParseErrorKind::InvalidAttribute {
                        message: format!("expected a value after {}=", name),
                    },
                    eq,
                );
                return boolean;
            }
        };
        tokens.next();

        let value = match value_token.kind {
            TagTokenKind::Expression => {
                let span = strip_delimiters(value_token.span);
                AttributeValue::Expression {
                    expression: span.slice(self.source).to_string(),
                    span,
                }
            }
            TagTokenKind::Name => AttributeValue::Text {
                value: value_token.span.slice(self.source).to_string(),
                span: value_token.span,
            },
            _ => {
                let span = strip_delimiters(value_token.span);
                AttributeValue::Text {
                    value: span.slice(self.source).to_string(),
                    span,
                }
            }
        };

        Attribute {
            span: name_token.span.cover(value_token.span),
            name,
            name_span: name_token.span,
            value,
        }
    }
}

fn starts_element(rest: &str) -> bool {
    let bytes = rest.as_bytes();
    bytes.len() > 1 && bytes[0] == b'<' && bytes[1].is_ascii_alphabetic()
}

/// Shrinks a `{...}` or quoted span by one byte on each side.
fn strip_delimiters(span: Span) -> Span {
    let range = span.to_range_usize();
    Span::from_usize(
        range.start + 1,
        range.end.saturating_sub(1).max(range.start + 1),
    )
}
