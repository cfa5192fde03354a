use crate::error::*;
use mathpick_error::Error;
use mathpick_tree::{symbols, Field, NodeId, NodeKind, Symbol, SymbolCategory};
use std::ops::Range;

/// A word of the input line, with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
}

impl Word<'_> {
    /// The word as a node identifier.
    pub fn id(&self) -> NodeId {
        NodeId::from(self.text)
    }
}

/// Splits an input line into words, keeping track of where each word is.
#[derive(Debug, Clone)]
struct Words<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Words<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.line[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn next_word(&mut self) -> Option<Word<'a>> {
        self.skip_whitespace();
        let rest = &self.line[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = Word {
            text: &rest[..len],
            span: self.pos..self.pos + len,
        };
        self.pos += len;
        Some(word)
    }

    /// Takes everything up to the end of the line, without surrounding whitespace.
    fn rest(&mut self) -> Word<'a> {
        self.skip_whitespace();
        let text = self.line[self.pos..].trim_end();
        let word = Word {
            text,
            span: self.pos..self.pos + text.len(),
        };
        self.pos = self.line.len();
        word
    }

    /// The empty span at the end of the line.
    fn end(&self) -> Range<usize> {
        self.line.len()..self.line.len()
    }
}

/// A command typed into the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    Add(NodeKind),
    Sym(&'static Symbol),
    Ctx { node: Word<'a>, field: Field, field_span: Range<usize> },
    Top,
    Text { node: Word<'a>, content: &'a str },
    Rm(Word<'a>),
    Swap { node: Word<'a>, kind: NodeKind },
    Tree,
    Latex,
    Commit,
    Clear,

    /// Render mixed content. `text` starts at byte `offset` of the input line.
    Render { text: &'a str, offset: usize },

    Symbols(Option<SymbolCategory>),
    Help,
}

/// The commands, with their usage, in the order `help` lists them.
pub const USAGE: &[(&str, &str)] = &[
    ("add", "add <kind>"),
    ("sym", "sym <name>"),
    ("ctx", "ctx <id> <field>"),
    ("top", "top"),
    ("text", "text <id> <content...>"),
    ("rm", "rm <id>"),
    ("swap", "swap <id> <kind>"),
    ("tree", "tree"),
    ("latex", "latex"),
    ("commit", "commit"),
    ("clear", "clear"),
    ("render", "render <text with $latex$...>"),
    ("symbols", "symbols [category]"),
    ("help", "help"),
];

fn join_names<T>(items: impl IntoIterator<Item = T>, name: impl Fn(T) -> &'static str) -> String {
    items.into_iter().map(name).collect::<Vec<_>>().join(", ")
}

/// Reads the operands of one command.
struct Operands<'a> {
    words: Words<'a>,
    command: Word<'a>,
    name: &'static str,
    usage: &'static str,
}

impl<'a> Operands<'a> {
    fn required(&mut self, operand: &'static str) -> Result<Word<'a>, Error> {
        self.words.next_word().ok_or_else(|| {
            Error::new(
                vec![self.command.span.clone(), self.words.end()],
                MissingOperand { command: self.name, operand, usage: self.usage },
            )
        })
    }

    fn kind(&mut self) -> Result<NodeKind, Error> {
        let word = self.required("kind")?;
        word.text.parse().map_err(|_| {
            Error::new(vec![word.span.clone()], UnknownKind {
                name: word.text.to_string(),
                allowed: join_names(NodeKind::ALL, NodeKind::name),
            })
        })
    }

    /// Fails if anything but whitespace is left.
    fn finish(mut self) -> Result<(), Error> {
        let rest = self.words.rest();
        if rest.text.is_empty() {
            Ok(())
        } else {
            Err(Error::new(vec![rest.span], TrailingInput { command: self.name, usage: self.usage }))
        }
    }
}

/// Parses one line of input into a [`Command`]. Returns [`None`] for a blank line.
pub fn parse(line: &str) -> Result<Option<Command<'_>>, Error> {
    let mut words = Words::new(line);
    let Some(command) = words.next_word() else {
        return Ok(None);
    };

    let Some((name, usage)) = USAGE.iter().find(|(name, _)| *name == command.text).copied() else {
        return Err(Error::new(vec![command.span], UnknownCommand { name: command.text.to_string() }));
    };
    let mut operands = Operands { words, command, name, usage };

    let parsed = match name {
        "add" => Command::Add(operands.kind()?),
        "sym" => {
            let word = operands.required("symbol name")?;
            let symbol = symbols::lookup(word.text).ok_or_else(|| {
                Error::new(vec![word.span.clone()], UnknownSymbol { name: word.text.to_string() })
            })?;
            Command::Sym(symbol)
        },
        "ctx" => {
            let node = operands.required("node id")?;
            let word = operands.required("field")?;
            let field = word.text.parse().map_err(|_| {
                Error::new(vec![word.span.clone()], UnknownField { name: word.text.to_string() })
            })?;
            Command::Ctx { node, field, field_span: word.span }
        },
        "text" => {
            let node = operands.required("node id")?;
            // the content may be empty, which clears the node
            let content = operands.words.rest().text;
            Command::Text { node, content }
        },
        "rm" => Command::Rm(operands.required("node id")?),
        "swap" => {
            let node = operands.required("node id")?;
            let kind = operands.kind()?;
            Command::Swap { node, kind }
        },
        "render" => {
            let rest = operands.words.rest();
            Command::Render { text: rest.text, offset: rest.span.start }
        },
        "symbols" => match operands.words.next_word() {
            Some(word) => {
                let category = word.text.parse().map_err(|()| {
                    Error::new(vec![word.span.clone()], UnknownCategory {
                        name: word.text.to_string(),
                        allowed: join_names(SymbolCategory::ALL, SymbolCategory::name),
                    })
                })?;
                Command::Symbols(Some(category))
            },
            None => Command::Symbols(None),
        },
        "top" => Command::Top,
        "tree" => Command::Tree,
        "latex" => Command::Latex,
        "commit" => Command::Commit,
        "clear" => Command::Clear,
        _ => Command::Help,
    };

    operands.finish()?;
    Ok(Some(parsed))
}

/// The help text listing every command.
pub fn help() -> String {
    let mut lines = vec!["commands:".to_string()];
    lines.extend(USAGE.iter().map(|(_, usage)| format!("  {}", usage)));
    lines.push(format!("kinds: {}", join_names(NodeKind::ALL, NodeKind::name)));
    lines.push(format!("fields: {}", join_names(Field::ALL, Field::name)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn blank_line() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn add_kind() {
        assert_eq!(parse("add Fraction").unwrap(), Some(Command::Add(NodeKind::Fraction)));
    }

    #[test]
    fn ctx_with_spans() {
        let command = parse("ctx  n1 lower_limit").unwrap();
        assert_eq!(command, Some(Command::Ctx {
            node: Word { text: "n1", span: 5..7 },
            field: Field::LowerLimit,
            field_span: 8..19,
        }));
    }

    #[test]
    fn text_keeps_inner_spacing() {
        let command = parse("text n4   a +  b  ").unwrap();
        assert_eq!(command, Some(Command::Text {
            node: Word { text: "n4", span: 5..7 },
            content: "a +  b",
        }));
    }

    #[test]
    fn render_offset() {
        let command = parse("render  $x$ ok").unwrap();
        assert_eq!(command, Some(Command::Render { text: "$x$ ok", offset: 8 }));
    }

    #[test]
    fn unknown_command() {
        let err = parse("  frobnicate 1").unwrap_err();
        assert_eq!(err.spans, vec![2..12]);
    }

    #[test]
    fn missing_operand_points_at_end() {
        let err = parse("swap n1").unwrap_err();
        assert_eq!(err.spans, vec![0..4, 7..7]);
    }

    #[test]
    fn unknown_kind() {
        let err = parse("add matrix").unwrap_err();
        assert_eq!(err.spans, vec![4..10]);
    }

    #[test]
    fn trailing_input() {
        let err = parse("tree please now").unwrap_err();
        assert_eq!(err.spans, vec![5..15]);
    }

    #[test]
    fn symbols_category() {
        assert_eq!(parse("symbols greek").unwrap(), Some(Command::Symbols(Some(SymbolCategory::Greek))));
        assert_eq!(parse("symbols").unwrap(), Some(Command::Symbols(None)));
        assert!(parse("symbols shapes").is_err());
    }
}
