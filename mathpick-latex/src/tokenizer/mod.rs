pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows the
/// parser to look ahead and to split tokens.
///
/// Input that no token matches (a lone trailing backslash, for example) becomes a
/// [`TokenKind::Symbol`] token, so that the parser can report it instead of silently dropping it.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn fraction() {
        compare_tokens(
            "\\frac{1}{x_2}",
            [
                (TokenKind::Command, "\\frac"),
                (TokenKind::OpenBrace, "{"),
                (TokenKind::Number, "1"),
                (TokenKind::CloseBrace, "}"),
                (TokenKind::OpenBrace, "{"),
                (TokenKind::Letter, "x"),
                (TokenKind::Underscore, "_"),
                (TokenKind::Number, "2"),
                (TokenKind::CloseBrace, "}"),
            ],
        );
    }

    #[test]
    fn mixed_symbols() {
        compare_tokens(
            "\\pi r^2 \\, = 3.14 & ∞",
            [
                (TokenKind::Command, "\\pi"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Letter, "r"),
                (TokenKind::Caret, "^"),
                (TokenKind::Number, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::EscapedSymbol, "\\,"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Operator, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "3.14"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Reserved, "&"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "∞"),
            ],
        );
    }

    #[test]
    fn trailing_backslash_is_kept() {
        let tokens = tokenize_complete("x\\");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Symbol);
        assert_eq!(tokens[1].lexeme, "\\");
        assert_eq!(tokens[1].span, 1..2);
    }
}
