use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer for LaTeX math source.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// A control word, such as `\frac`.
    #[regex(r"\\[a-zA-Z]+")]
    Command,

    /// A control symbol, such as `\,` or `\{`.
    #[regex(r"\\[^a-zA-Z]")]
    EscapedSymbol,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    #[token("^")]
    Caret,

    #[token("_")]
    Underscore,

    /// A non-breaking space.
    #[token("~")]
    Tilde,

    /// Characters with a special meaning in LaTeX that cannot appear unescaped in math.
    #[regex(r"[&#%]")]
    Reserved,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r"[a-zA-Z]")]
    Letter,

    #[regex(r"[+\-*/=<>!,;:|()'.?]")]
    Operator,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token is whitespace, which is insignificant in math mode.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl<'source> Token<'source> {
    /// Returns true if the token is whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }

    /// For a control word, the command name without its leading backslash.
    pub fn command_name(&self) -> &'source str {
        self.lexeme.strip_prefix('\\').unwrap_or(self.lexeme)
    }
}
