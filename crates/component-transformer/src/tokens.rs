//! A coarse JavaScript token scanner.
//!
//! Only token boundaries matter here: both translators place mappings at the
//! start of tokens, which keeps their maps aligned for composition.

use logos::Logos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Logos)]
#[logos(skip r"[ \t\r\n\f]+")]
enum ScriptToken {
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    DoubleQuoted,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    SingleQuoted,

    #[regex(r"`([^`\\]|\\.)*`")]
    Template,

    /// Identifiers, keywords and numbers.
    #[regex(r"[A-Za-z0-9_$]+")]
    Word,

    /// Any other single character.
    #[regex(r"[^A-Za-z0-9_$ \t\r\n\f]")]
    Punct,
}

/// Returns the byte offsets where tokens start, in order. Comments are skipped.
pub(crate) fn token_starts(code: &str) -> Vec<usize> {
    let mut lexer = ScriptToken::lexer(code);
    let mut starts = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(ScriptToken::LineComment | ScriptToken::BlockComment) => {}
            // Unrecognized input still starts something worth mapping.
            Ok(_) | Err(_) => starts.push(lexer.span().start),
        }
    }
    starts
}
