//! A recursive descent parser for the subset of LaTeX math the builder produces and users type.
//!
//! Whitespace between tokens is insignificant, except inside `\text{...}`, whose argument is taken
//! verbatim. Empty groups are legal everywhere, so in-progress expressions such as `\frac{x}{}`
//! parse successfully.

pub mod error;

use crate::{
    ast::{FracStyle, MathNode},
    commands::{self, Command, ControlSymbol},
    tokenizer::{tokenize_complete, Token, TokenKind},
};
use error::*;
use mathpick_error::Error;
use std::ops::Range;

/// How deeply groups, arguments and `\left ... \right` pairs may nest before parsing fails with
/// [`TooDeep`].
pub const MAX_DEPTH: usize = 128;

/// Parses LaTeX math source into a [`MathNode`].
///
/// The spans of a returned [`Error`] are byte ranges into `source`.
pub fn parse(source: &str) -> Result<MathNode, Error> {
    Parser::new(source).parse_all()
}

/// What ends a row of nodes.
#[derive(Debug, Clone)]
enum Terminator {
    /// The end of the source.
    Eof,

    /// A `}` closing the group opened at the given span.
    Brace(Range<usize>),

    /// A `]` closing the optional argument opened at the given span.
    Bracket(Range<usize>),

    /// A `\right` closing the `\left` at the given span.
    Right(Range<usize>),
}

/// A high-level parser for LaTeX math source. It takes a string as input and produces a
/// [`MathNode`] as output.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The source code being parsed.
    source: &'source str,

    /// The tokens produced by the tokenizer. Tokens may be split while parsing, see
    /// [`Parser::parse_argument`].
    tokens: Box<[Token<'source>]>,

    /// The index of the next token to be consumed.
    cursor: usize,

    /// How many calls to [`Parser::parse_primary`] are in progress.
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            tokens: tokenize_complete(source),
            cursor: 0,
            depth: 0,
        }
    }

    /// Parses the whole source.
    pub fn parse_all(&mut self) -> Result<MathNode, Error> {
        let nodes = self.parse_row(&Terminator::Eof)?;
        Ok(MathNode::row(nodes))
    }

    /// Moves the cursor past any whitespace tokens.
    fn skip_whitespace(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns the next non-whitespace token without consuming it.
    fn peek(&mut self) -> Option<Token<'source>> {
        self.skip_whitespace();
        self.tokens.get(self.cursor).cloned()
    }

    /// Consumes and returns the next non-whitespace token.
    fn next_token(&mut self) -> Option<Token<'source>> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    /// The empty span at the end of the source.
    fn eof_span(&self) -> Range<usize> {
        self.source.len()..self.source.len()
    }

    /// The span of the next non-whitespace token, or the end of the source.
    fn here(&mut self) -> Range<usize> {
        match self.peek() {
            Some(token) => token.span,
            None => self.eof_span(),
        }
    }

    /// Parses nodes until the given terminator, which is left unconsumed.
    fn parse_row(&mut self, end: &Terminator) -> Result<Vec<MathNode>, Error> {
        let mut nodes = Vec::new();

        loop {
            let Some(token) = self.peek() else {
                return match end {
                    Terminator::Eof => Ok(nodes),
                    Terminator::Brace(open) => Err(Error::new(vec![open.clone()], UnclosedGroup { open: '{' })),
                    Terminator::Bracket(open) => Err(Error::new(vec![open.clone()], UnclosedGroup { open: '[' })),
                    Terminator::Right(left) => Err(Error::new(vec![left.clone()], MissingRight)),
                };
            };

            match (token.kind, end) {
                (TokenKind::CloseBrace, Terminator::Brace(_))
                    | (TokenKind::CloseBracket, Terminator::Bracket(_)) => return Ok(nodes),
                (TokenKind::Command, Terminator::Right(_)) if token.command_name() == "right" => {
                    return Ok(nodes);
                },
                _ => nodes.push(self.parse_atom()?),
            }
        }
    }

    /// Parses a node along with any subscript and superscript attached to it.
    ///
    /// A script with no base, such as a degree sign `^{\circ}` at the start of a group, is
    /// attached to an empty row.
    fn parse_atom(&mut self) -> Result<MathNode, Error> {
        let base = match self.peek() {
            Some(token) if matches!(token.kind, TokenKind::Caret | TokenKind::Underscore) => {
                MathNode::Row(Vec::new())
            },
            Some(token) => {
                self.cursor += 1;
                self.parse_primary(token)?
            },
            None => MathNode::Row(Vec::new()),
        };

        let mut sub: Option<(Range<usize>, MathNode)> = None;
        let mut sup: Option<(Range<usize>, MathNode)> = None;

        while let Some(op) = self.peek() {
            let (slot, script) = match op.kind {
                TokenKind::Caret => (&mut sup, '^'),
                TokenKind::Underscore => (&mut sub, '_'),
                _ => break,
            };
            self.cursor += 1;

            if let Some((first, _)) = slot {
                return Err(Error::new(vec![first.clone(), op.span], DoubleScript { script }));
            }

            let Some(arg) = self.parse_argument()? else {
                return Err(Error::new(vec![op.span], MissingScript { script }));
            };
            *slot = Some((op.span, arg));
        }

        if sub.is_none() && sup.is_none() {
            return Ok(base);
        }

        Ok(MathNode::Scripts {
            base: Box::new(base),
            sub: sub.map(|(_, node)| Box::new(node)),
            sup: sup.map(|(_, node)| Box::new(node)),
        })
    }

    /// Parses a single argument of a command or script: either a braced group or a single token.
    /// Returns [`None`] if the next token cannot start an argument.
    ///
    /// Like TeX, a multi-digit number only contributes its first digit, so `x^23` is `x^{2}3`.
    /// The rest of the number is left in place as a token of its own.
    fn parse_argument(&mut self) -> Result<Option<MathNode>, Error> {
        let Some(token) = self.peek() else {
            return Ok(None);
        };

        match token.kind {
            TokenKind::CloseBrace | TokenKind::Caret | TokenKind::Underscore => Ok(None),
            TokenKind::Command if token.command_name() == "right" => Ok(None),
            TokenKind::Number if token.lexeme.len() > 1 => {
                let (first, rest) = token.lexeme.split_at(1);
                self.tokens[self.cursor] = Token {
                    span: token.span.start + 1..token.span.end,
                    kind: TokenKind::Number,
                    lexeme: rest,
                };
                Ok(Some(MathNode::Number(first.to_string())))
            },
            _ => {
                self.cursor += 1;
                self.parse_primary(token).map(Some)
            },
        }
    }

    /// Parses a required argument of `command`, which takes `count` arguments in total.
    fn parse_required(&mut self, command: &Token, count: usize) -> Result<MathNode, Error> {
        let here = self.here();
        self.parse_argument()?.ok_or_else(|| missing_argument(command, count, here))
    }

    /// Parses an optional `[...]` argument, if one follows.
    fn parse_optional(&mut self) -> Result<Option<MathNode>, Error> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::OpenBracket => {
                self.cursor += 1;
                let nodes = self.parse_row(&Terminator::Bracket(token.span))?;
                self.cursor += 1;
                Ok(Some(MathNode::row(nodes)))
            },
            _ => Ok(None),
        }
    }

    /// Parses the node starting with the given, already consumed, token.
    ///
    /// Every nested group or argument goes through here, so this is where nesting is limited to
    /// [`MAX_DEPTH`].
    fn parse_primary(&mut self, token: Token<'source>) -> Result<MathNode, Error> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::new(vec![token.span], TooDeep { limit: MAX_DEPTH }));
        }

        self.depth += 1;
        let node = self.parse_nested(token);
        self.depth -= 1;
        node
    }

    fn parse_nested(&mut self, token: Token<'source>) -> Result<MathNode, Error> {
        let node = match token.kind {
            TokenKind::OpenBrace => {
                let nodes = self.parse_row(&Terminator::Brace(token.span))?;
                self.cursor += 1;
                MathNode::row(nodes)
            },
            TokenKind::CloseBrace => return Err(Error::new(vec![token.span], UnmatchedCloseGroup)),
            TokenKind::Number => MathNode::Number(token.lexeme.to_string()),
            TokenKind::Letter => MathNode::Ident { name: token.lexeme.to_string(), upright: false },
            TokenKind::Operator if token.lexeme == "'" => MathNode::Operator("′".to_string()),
            TokenKind::Operator | TokenKind::OpenBracket | TokenKind::CloseBracket => {
                MathNode::Operator(token.lexeme.to_string())
            },
            TokenKind::Tilde => MathNode::Space("0.25em".to_string()),
            TokenKind::EscapedSymbol => {
                match token.lexeme.chars().nth(1).and_then(commands::control_symbol) {
                    Some(ControlSymbol::Space(width)) => MathNode::Space(width.to_string()),
                    Some(ControlSymbol::Operator(symbol)) => MathNode::Operator(symbol.to_string()),
                    Some(ControlSymbol::LineBreak) => MathNode::Row(Vec::new()),
                    None => return Err(unexpected(token)),
                }
            },
            TokenKind::Command => self.parse_command(token)?,
            TokenKind::Symbol if token.lexeme != "\\" => {
                MathNode::Ident { name: token.lexeme.to_string(), upright: false }
            },
            TokenKind::Symbol
                | TokenKind::Reserved
                | TokenKind::Caret
                | TokenKind::Underscore
                | TokenKind::Whitespace => return Err(unexpected(token)),
        };

        Ok(node)
    }

    /// Parses a control word and its arguments.
    fn parse_command(&mut self, token: Token<'source>) -> Result<MathNode, Error> {
        let name = token.command_name();
        let Some(command) = commands::lookup(name) else {
            return Err(Error::new(vec![token.span], UnknownCommand { name: name.to_string() }));
        };

        let node = match command {
            Command::Ident(name) => MathNode::Ident { name: name.to_string(), upright: false },
            Command::Upright(name) => MathNode::Ident { name: name.to_string(), upright: true },
            Command::Operator(symbol) => MathNode::Operator(symbol.to_string()),
            Command::LargeOperator { symbol, limits } => {
                MathNode::LargeOperator { symbol: symbol.to_string(), limits }
            },
            Command::Space(width) => MathNode::Space(width.to_string()),
            Command::Frac(style) => {
                let numerator = self.parse_required(&token, 2)?;
                let denominator = self.parse_required(&token, 2)?;
                MathNode::Frac {
                    numerator: Box::new(numerator),
                    denominator: Box::new(denominator),
                    line: true,
                    style,
                }
            },
            Command::Binom => {
                let top = self.parse_required(&token, 2)?;
                let bottom = self.parse_required(&token, 2)?;
                MathNode::Fenced {
                    open: "(".to_string(),
                    body: Box::new(MathNode::Frac {
                        numerator: Box::new(top),
                        denominator: Box::new(bottom),
                        line: false,
                        style: FracStyle::Inherit,
                    }),
                    close: ")".to_string(),
                }
            },
            Command::Sqrt => {
                // `\sqrt[]{x}` is a plain square root
                let index = self.parse_optional()?.filter(|index| !index.is_empty());
                let radicand = self.parse_required(&token, 1)?;
                MathNode::Sqrt {
                    index: index.map(Box::new),
                    radicand: Box::new(radicand),
                }
            },
            Command::Text => MathNode::Text(self.parse_verbatim(&token)?),
            Command::Style(variant) => MathNode::Styled {
                variant,
                body: Box::new(self.parse_required(&token, 1)?),
            },
            Command::Accent(accent) => MathNode::Accent {
                accent: accent.to_string(),
                body: Box::new(self.parse_required(&token, 1)?),
            },
            Command::Left => self.parse_fenced(token)?,
            Command::Right => return Err(Error::new(vec![token.span], UnmatchedRight)),
        };

        Ok(node)
    }

    /// Takes the source between a `{` and its matching `}` verbatim, for commands like `\text`.
    fn parse_verbatim(&mut self, command: &Token) -> Result<String, Error> {
        let here = self.here();
        let open = match self.peek() {
            Some(token) if token.kind == TokenKind::OpenBrace => token,
            _ => return Err(missing_argument(command, 1, here)),
        };

        let mut depth = 0usize;
        for index in self.cursor..self.tokens.len() {
            match self.tokens[index].kind {
                TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseBrace => {
                    depth -= 1;
                    if depth == 0 {
                        let text = &self.source[open.span.end..self.tokens[index].span.start];
                        self.cursor = index + 1;
                        return Ok(text.to_string());
                    }
                },
                _ => {},
            }
        }

        Err(Error::new(vec![open.span], UnclosedGroup { open: '{' }))
    }

    /// Parses `\left<delim> ... \right<delim>`, starting after the `\left` token.
    fn parse_fenced(&mut self, left: Token<'source>) -> Result<MathNode, Error> {
        let open = self.parse_delimiter(&left)?;
        let body = self.parse_row(&Terminator::Right(left.span.clone()))?;
        let Some(right) = self.next_token() else {
            return Err(Error::new(vec![left.span], MissingRight));
        };
        let close = self.parse_delimiter(&right)?;

        Ok(MathNode::Fenced {
            open,
            body: Box::new(MathNode::row(body)),
            close,
        })
    }

    /// Parses the delimiter following `\left` or `\right`. The `.` delimiter is returned as an
    /// empty string.
    fn parse_delimiter(&mut self, after: &Token) -> Result<String, Error> {
        let Some(token) = self.next_token() else {
            return Err(Error::new(vec![after.span.clone()], InvalidDelimiter { found: String::new() }));
        };

        let symbol = match token.kind {
            TokenKind::Operator if token.lexeme == "." => Some(""),
            TokenKind::Operator | TokenKind::OpenBracket | TokenKind::CloseBracket => Some(token.lexeme),
            TokenKind::EscapedSymbol => match token.lexeme.chars().nth(1).and_then(commands::control_symbol) {
                Some(ControlSymbol::Operator(symbol)) => Some(symbol),
                _ => None,
            },
            TokenKind::Command => match commands::lookup(token.command_name()) {
                Some(Command::Operator(symbol)) => Some(symbol),
                _ => None,
            },
            _ => None,
        };

        match symbol.filter(|symbol| commands::is_delimiter(symbol)) {
            Some(symbol) => Ok(symbol.to_string()),
            None => Err(Error::new(vec![token.span], InvalidDelimiter { found: token.lexeme.to_string() })),
        }
    }
}

/// Builds the error for a command that is missing an argument at `here`.
fn missing_argument(command: &Token, count: usize, here: Range<usize>) -> Error {
    Error::new(
        vec![command.span.clone(), here],
        MissingArgument { command: command.command_name().to_string(), count },
    )
}

fn unexpected(token: Token) -> Error {
    Error::new(vec![token.span], UnexpectedToken { found: token.lexeme.to_string() })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ariadne::Source;

    fn ident(name: &str) -> MathNode {
        MathNode::Ident { name: name.to_string(), upright: false }
    }

    fn num(n: &str) -> MathNode {
        MathNode::Number(n.to_string())
    }

    /// Parses `source`, expecting it to fail, and returns the error spans along with the plain
    /// text of the report.
    fn fail(source: &str) -> (Vec<Range<usize>>, String) {
        let err = parse(source).unwrap_err();
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(source)), &mut buf)
            .unwrap();
        let report = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        (err.spans, report)
    }

    #[test]
    fn superscript() {
        assert_eq!(parse("x^2").unwrap(), MathNode::Scripts {
            base: Box::new(ident("x")),
            sub: None,
            sup: Some(Box::new(num("2"))),
        });
    }

    #[test]
    fn script_takes_one_digit() {
        assert_eq!(parse("x^23").unwrap(), MathNode::Row(vec![
            MathNode::Scripts {
                base: Box::new(ident("x")),
                sub: None,
                sup: Some(Box::new(num("2"))),
            },
            num("3"),
        ]));
    }

    #[test]
    fn both_scripts_in_any_order() {
        let expected = MathNode::Scripts {
            base: Box::new(ident("a")),
            sub: Some(Box::new(num("1"))),
            sup: Some(Box::new(num("2"))),
        };
        assert_eq!(parse("a_1^2").unwrap(), expected);
        assert_eq!(parse("a^2_1").unwrap(), expected);
    }

    #[test]
    fn empty_groups_from_builder() {
        assert_eq!(parse("\\frac{x}{}").unwrap(), MathNode::Frac {
            numerator: Box::new(ident("x")),
            denominator: Box::new(MathNode::Row(vec![])),
            line: true,
            style: FracStyle::Inherit,
        });
        assert_eq!(parse("{}^{}").unwrap(), MathNode::Scripts {
            base: Box::new(MathNode::Row(vec![])),
            sub: None,
            sup: Some(Box::new(MathNode::Row(vec![]))),
        });
    }

    #[test]
    fn degree_sign() {
        let degree = Some(Box::new(MathNode::Operator("∘".to_string())));
        assert_eq!(parse("90^{\\circ}").unwrap(), MathNode::Scripts {
            base: Box::new(num("90")),
            sub: None,
            sup: degree.clone(),
        });
        assert_eq!(parse("^{\\circ}").unwrap(), MathNode::Scripts {
            base: Box::new(MathNode::Row(vec![])),
            sub: None,
            sup: degree,
        });
    }

    #[test]
    fn unbraced_fraction() {
        assert_eq!(parse("\\frac12").unwrap(), MathNode::Frac {
            numerator: Box::new(num("1")),
            denominator: Box::new(num("2")),
            line: true,
            style: FracStyle::Inherit,
        });
    }

    #[test]
    fn nth_root() {
        assert_eq!(parse("\\sqrt[3]{8}").unwrap(), MathNode::Sqrt {
            index: Some(Box::new(num("3"))),
            radicand: Box::new(num("8")),
        });
        assert_eq!(parse("\\sqrt[]{8}").unwrap(), MathNode::Sqrt {
            index: None,
            radicand: Box::new(num("8")),
        });
    }

    #[test]
    fn verbatim_text() {
        assert_eq!(parse("\\text{if  {x} }").unwrap(), MathNode::Text("if  {x} ".to_string()));
    }

    #[test]
    fn fenced() {
        assert_eq!(parse("\\left( x \\right.").unwrap(), MathNode::Fenced {
            open: "(".to_string(),
            body: Box::new(ident("x")),
            close: String::new(),
        });
        assert_eq!(parse("\\left\\langle a \\right\\rangle").unwrap(), MathNode::Fenced {
            open: "⟨".to_string(),
            body: Box::new(ident("a")),
            close: "⟩".to_string(),
        });
    }

    #[test]
    fn unknown_command() {
        let (spans, report) = fail("x + \\foo");
        assert_eq!(spans, vec![4..8]);
        assert!(report.contains("unknown command `\\foo`"), "{}", report);
    }

    #[test]
    fn missing_argument() {
        let (spans, report) = fail("\\frac{1}");
        assert_eq!(spans, vec![0..5, 8..8]);
        assert!(report.contains("missing argument for `\\frac`"), "{}", report);
    }

    #[test]
    fn unclosed_group() {
        let (spans, report) = fail("\\frac{1}{2");
        assert_eq!(spans, vec![8..9]);
        assert!(report.contains("this `{` is never closed"), "{}", report);
    }

    #[test]
    fn unmatched_close_group() {
        let (spans, _) = fail("x}");
        assert_eq!(spans, vec![1..2]);
    }

    #[test]
    fn missing_script() {
        let (spans, report) = fail("x_");
        assert_eq!(spans, vec![1..2]);
        assert!(report.contains("missing subscript"), "{}", report);
    }

    #[test]
    fn double_script() {
        let (spans, report) = fail("x^1^2");
        assert_eq!(spans, vec![1..2, 3..4]);
        assert!(report.contains("double superscript"), "{}", report);
    }

    #[test]
    fn missing_right() {
        let (spans, _) = fail("\\left( x");
        assert_eq!(spans, vec![0..5]);
    }

    #[test]
    fn right_without_left() {
        let (spans, report) = fail("x \\right)");
        assert_eq!(spans, vec![2..8]);
        assert!(report.contains("unmatched `\\right`"), "{}", report);
    }

    #[test]
    fn invalid_delimiter() {
        let (spans, report) = fail("\\left< x \\right>");
        assert_eq!(spans, vec![5..6]);
        assert!(report.contains("`<` is not a delimiter"), "{}", report);
    }

    #[test]
    fn reserved_character() {
        let (spans, report) = fail("a & b");
        assert_eq!(spans, vec![2..3]);
        assert!(report.contains("unexpected `&`"), "{}", report);
    }

    #[test]
    fn nesting_limit() {
        let source = format!("{}x{}", "{".repeat(MAX_DEPTH - 1), "}".repeat(MAX_DEPTH - 1));
        assert!(parse(&source).is_ok());

        let source = format!("{}x{}", "{".repeat(MAX_DEPTH), "}".repeat(MAX_DEPTH));
        let (spans, report) = fail(&source);
        assert_eq!(spans, vec![MAX_DEPTH..MAX_DEPTH + 1]);
        assert!(report.contains("expression is nested too deeply"), "{}", report);
    }

    #[test]
    fn nested_commands_are_limited() {
        let err = parse(&format!("{}x", "\\sqrt".repeat(10_000))).unwrap_err();
        assert_eq!(err.spans, vec![MAX_DEPTH * 5..MAX_DEPTH * 5 + 5]);

        let err = parse(&"\\left(".repeat(10_000)).unwrap_err();
        assert_eq!(err.spans, vec![MAX_DEPTH * 6..MAX_DEPTH * 6 + 5]);

        let err = parse(&format!("x{}", "^{".repeat(10_000))).unwrap_err();
        assert_eq!(err.spans, vec![MAX_DEPTH * 2 + 2..MAX_DEPTH * 2 + 3]);
    }
}
