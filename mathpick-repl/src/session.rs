use crate::{command::{self, Command, Word}, error::*};
use mathpick_error::Error;
use mathpick_latex::{render_mixed, RenderOptions};
use mathpick_tree::{symbols, ExpressionNode, Field, Forest, NodeKind, Picker, SequentialIds, SymbolCategory};
use std::ops::Range;

/// What a command printed, along with any problems to report that did not stop it.
#[derive(Debug, Default)]
pub struct Output {
    pub text: String,

    /// Errors with spans into the input line, such as LaTeX fragments that did not render.
    pub failures: Vec<Error>,
}

impl From<String> for Output {
    fn from(text: String) -> Self {
        Self { text, failures: Vec::new() }
    }
}

/// The state of the interactive host: one picker session and the render configuration.
#[derive(Debug)]
pub struct Session {
    picker: Picker<SequentialIds>,
    options: RenderOptions,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with short sequential ids (`n1`, `n2`, ...) so they can be typed.
    pub fn new() -> Self {
        Self {
            picker: Picker::with_ids(SequentialIds::new()),
            options: RenderOptions::default(),
        }
    }

    /// Parses and executes one line of input.
    pub fn execute(&mut self, line: &str) -> Result<Output, Error> {
        let Some(command) = command::parse(line)? else {
            return Ok(Output::default());
        };

        let text = match command {
            Command::Add(kind) => {
                let id = self.picker.add_component(kind);
                format!("added {} {}\n{}", kind, id, self.preview())
            },
            Command::Sym(symbol) => {
                let id = self.picker.add_symbol(symbol);
                format!("added {} {}\n{}", symbol.name, id, self.preview())
            },
            Command::Ctx { node, field, field_span } => {
                self.check_field(&node, field, field_span)?;
                self.picker.set_editing_context(node.id(), field);
                format!("editing {}.{}", node.text, field)
            },
            Command::Top => {
                self.picker.clear_editing_context();
                "editing top level".to_string()
            },
            Command::Text { node, content } => {
                let found = self.find(&node)?;
                if found.content().is_none() {
                    return Err(Error::new(vec![node.span], NotText {
                        id: node.text.to_string(),
                        kind: found.kind().to_string(),
                    }));
                }
                self.picker.update_content(&node.id(), content);
                self.preview()
            },
            Command::Rm(node) => {
                self.find(&node)?;
                self.picker.remove_node(&node.id());
                self.preview()
            },
            Command::Swap { node, kind } => {
                let Some(id) = self.picker.replace_node(&node.id(), kind) else {
                    return Err(no_such_node(&node));
                };
                format!("replaced {} by {} {}\n{}", node.text, kind, id, self.preview())
            },
            Command::Tree => tree(self.picker.forest()),
            Command::Latex => self.picker.preview(),
            Command::Commit => self.picker.commit(),
            Command::Clear => {
                self.picker.clear_all();
                "cleared".to_string()
            },
            Command::Render { text, offset } => {
                let rendered = render_mixed(text, &self.options);
                return Ok(Output {
                    text: rendered.html,
                    failures: rendered.failures.into_iter().map(|err| err.offset(offset)).collect(),
                });
            },
            Command::Symbols(category) => palette(category),
            Command::Help => command::help(),
        };

        Ok(text.into())
    }

    /// The preview line printed after an edit.
    fn preview(&self) -> String {
        let latex = self.picker.preview();
        match self.picker.editing_context() {
            Some(context) => format!("{}    (editing {}.{})", latex, context.node_id, context.field),
            None => latex,
        }
    }

    fn find(&self, node: &Word) -> Result<&ExpressionNode, Error> {
        self.picker.forest().find(&node.id()).ok_or_else(|| no_such_node(node))
    }

    /// Checks that the node exists and has the field, so the picker's refusal can be reported.
    fn check_field(&self, node: &Word, field: Field, field_span: Range<usize>) -> Result<(), Error> {
        let kind = self.find(node)?.kind();
        if kind.has_field(field) {
            return Ok(());
        }

        Err(Error::new(vec![field_span], InvalidField {
            kind: kind.to_string(),
            field: field.to_string(),
            allowed: kind.fields().iter().map(|field| field.name()).collect::<Vec<_>>().join(", "),
        }))
    }
}

fn no_such_node(node: &Word) -> Error {
    Error::new(vec![node.span.clone()], NoSuchNode { id: node.text.to_string() })
}

/// Lists the forest as an indented tree, one node per line.
fn tree(forest: &Forest) -> String {
    fn push_node(lines: &mut Vec<String>, node: &ExpressionNode, depth: usize) {
        let indent = "  ".repeat(depth);
        match node.content() {
            Some(content) => lines.push(format!("{}{} text {:?}", indent, node.id, content)),
            None => lines.push(format!("{}{} {}", indent, node.id, node.kind())),
        }

        for (field, children) in node.children() {
            lines.push(format!("{}  {}:", indent, field));
            for child in children {
                push_node(lines, child, depth + 2);
            }
        }
    }

    if forest.is_empty() {
        return "(empty)".to_string();
    }

    let mut lines = Vec::new();
    for node in forest {
        push_node(&mut lines, node, 0);
    }
    lines.join("\n")
}

/// Lists the palette, or one category of it.
fn palette(category: Option<SymbolCategory>) -> String {
    let categories = match category {
        Some(category) => vec![category],
        None => SymbolCategory::ALL.to_vec(),
    };

    categories
        .into_iter()
        .map(|category| {
            let entries = symbols::in_category(category)
                .map(|symbol| format!("{} {}", symbol.name, symbol.latex))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", category, entries)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(session: &mut Session, line: &str) -> String {
        session.execute(line).unwrap().text
    }

    #[test]
    fn build_and_commit() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "add fraction"), "added fraction n1\n\\frac{}{}");
        assert_eq!(run(&mut session, "text n2 1"), "\\frac{1}{}");
        assert_eq!(run(&mut session, "ctx n1 denominator"), "editing n1.denominator");
        assert_eq!(run(&mut session, "sym pi"), "added pi n4\n\\frac{1}{ \\pi}    (editing n1.denominator)");
        assert_eq!(run(&mut session, "commit"), "\\frac{1}{ \\pi}");
        assert_eq!(run(&mut session, "latex"), "");
    }

    #[test]
    fn tree_listing() {
        let mut session = Session::new();
        run(&mut session, "add sqrt");
        run(&mut session, "text n2 x");
        assert_eq!(
            run(&mut session, "tree"),
            "n1 sqrt\n  radicand:\n    n2 text \"x\"\n  index:",
        );
    }

    #[test]
    fn errors_point_at_the_word() {
        let mut session = Session::new();
        run(&mut session, "add power");

        let err = session.execute("ctx n1 numerator").unwrap_err();
        assert_eq!(err.spans, vec![7..16]);

        let err = session.execute("text n1 x").unwrap_err();
        assert_eq!(err.spans, vec![5..7]);

        let err = session.execute("rm  n9").unwrap_err();
        assert_eq!(err.spans, vec![4..6]);
    }

    #[test]
    fn swap_keeps_position() {
        let mut session = Session::new();
        run(&mut session, "add text");
        run(&mut session, "add text");
        run(&mut session, "text n2 y");
        run(&mut session, "swap n1 sqrt");
        assert_eq!(run(&mut session, "latex"), "\\sqrt{} y");
    }

    #[test]
    fn render_failures_are_shifted() {
        let mut session = Session::new();
        let line = "render ok $\\nope$";
        let output = session.execute(line).unwrap();

        assert_eq!(output.text, "ok $\\nope$");
        assert_eq!(output.failures.len(), 1);
        assert_eq!(&line[output.failures[0].spans[0].clone()], "\\nope");
    }

    #[test]
    fn palette_category() {
        assert!(palette(Some(SymbolCategory::Arrows)).starts_with("arrows: to \\to, "));
        assert_eq!(palette(None).lines().count(), SymbolCategory::ALL.len());
    }

    #[test]
    fn render_uses_default_options() {
        let mut session = Session::new();
        assert_eq!(session.options, RenderOptions::default());
        assert_eq!(
            run(&mut session, "render a<b $x$"),
            "a&lt;b <math display=\"inline\"><mi>x</mi></math>",
        );
    }
}
