//! Start-tag lexer using logos.
//!
//! Text content is scanned directly by the parser; this lexer only runs
//! between a tag name and the `>` that ends the start tag, where attributes
//! live.

use logos::Logos;
use source_map::Span;

/// A token inside a start tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TagTokenKind,
    /// The span of the token in the full source.
    pub span: Span,
}

/// Token kinds inside a start tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TagTokenKind {
    /// `>`
    #[token(">")]
    Close,

    /// `/>`
    #[token("/>")]
    SelfClose,

    /// A lone `/`
    #[token("/")]
    Slash,

    /// `=`
    #[token("=")]
    Eq,

    /// `{expression}`; the lexer extends the `{` to its matching `}`.
    #[token("{")]
    Expression,

    /// `"value"`
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// `'value'`
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// An attribute name or unquoted value. Slashes may appear inside but not
    /// at either end, so `disabled/>` still ends the tag.
    #[regex(r#"[^\s"'=<>/{}`]+(/[^\s"'=<>/{}`]+)*"#)]
    Name,

    /// A `{` with no matching `}` before the end of input.
    UnclosedExpression,

    /// Anything else, such as a stray `<` or an unterminated quote.
    Error,
}

impl TagTokenKind {
    /// Returns a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        match self {
            TagTokenKind::Close => "'>'",
            TagTokenKind::SelfClose => "'/>'",
            TagTokenKind::Slash => "'/'",
            TagTokenKind::Eq => "'='",
            TagTokenKind::Expression => "expression",
            TagTokenKind::DoubleQuoted | TagTokenKind::SingleQuoted => "quoted value",
            TagTokenKind::Name => "name",
            TagTokenKind::UnclosedExpression => "unclosed expression",
            TagTokenKind::Error => "invalid character",
        }
    }
}

/// A lexer over the attribute section of one start tag.
pub struct TagLexer<'src> {
    inner: logos::Lexer<'src, TagTokenKind>,
    source: &'src str,
    base: usize,
}

impl<'src> TagLexer<'src> {
    /// Creates a lexer that starts at byte `offset` of `source`.
    ///
    /// `offset` must lie on a char boundary.
    pub fn new(source: &'src str, offset: usize) -> Self {
        Self {
            inner: TagTokenKind::lexer(&source[offset..]),
            source,
            base: offset,
        }
    }

    /// Returns the text of a token.
    pub fn text(&self, token: &Token) -> &'src str {
        token.span.slice(self.source)
    }
}

impl Iterator for TagLexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let mut kind = self.inner.next()?.unwrap_or(TagTokenKind::Error);

        if kind == TagTokenKind::Expression {
            let open = self.base + self.inner.span().start;
            match scan_expression(self.source, open) {
                Some(end) => self.inner.bump(end - open - 1),
                None => {
                    self.inner.bump(self.inner.remainder().len());
                    kind = TagTokenKind::UnclosedExpression;
                }
            }
        }

        let span = self.inner.span();
        Some(Token {
            kind,
            span: Span::from_usize(self.base + span.start, self.base + span.end),
        })
    }
}

/// Finds the end of the `{...}` expression opening at byte `open`.
///
/// Returns the offset just past the matching `}`. Braces inside string
/// literals and comments do not count.
pub(crate) fn scan_expression(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            quote @ (b'"' | b'\'' | b'`') => {
                i = skip_string(bytes, i, quote)?;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = bytes[i..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |p| i + p);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let close = source[i + 2..].find("*/")?;
                i += 2 + close + 2;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    None
}

fn skip_string(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            c if c == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}
