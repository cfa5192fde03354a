use ariadne::{Fmt, Source};
use mathpick_attrs::ErrorKind;
use mathpick_error::{Error, ErrorKind, EXPR};

/// The first word of the input is not a command.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", name),
    labels = ["this command"],
    help = format!("type {} to list the commands", "help".fg(EXPR)),
)]
pub struct UnknownCommand {
    pub name: String,
}

/// A command was not given all of its operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is missing its {}", command, operand),
    labels = ["this command".to_string(), format!("expected the {} here", operand)],
    help = format!("usage: {}", usage.fg(EXPR)),
)]
pub struct MissingOperand {
    pub command: &'static str,
    pub operand: &'static str,
    pub usage: &'static str,
}

/// A command was given more operands than it takes.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("too many operands for `{}`", command),
    labels = ["this input is extra"],
    help = format!("usage: {}", usage.fg(EXPR)),
)]
pub struct TrailingInput {
    pub command: &'static str,
    pub usage: &'static str,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown node kind `{}`", name),
    labels = ["this kind"],
    help = format!("the kinds are: {}", allowed.fg(EXPR)),
)]
pub struct UnknownKind {
    pub name: String,
    pub allowed: String,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown field `{}`", name),
    labels = ["this field"],
)]
pub struct UnknownField {
    pub name: String,
}

/// The node has no field of that name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("{} nodes have no `{}` field", kind, field),
    labels = ["this field"],
    help = if allowed.is_empty() {
        format!("{} nodes have no fields", kind)
    } else {
        format!("{} nodes have: {}", kind, allowed.fg(EXPR))
    },
)]
pub struct InvalidField {
    pub kind: String,
    pub field: String,
    pub allowed: String,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("no node has the id `{}`", id),
    labels = ["this id"],
    help = format!("type {} to list the nodes", "tree".fg(EXPR)),
)]
pub struct NoSuchNode {
    pub id: String,
}

/// Content can only be set on text nodes.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is a {} node, not a text node", id, kind),
    labels = ["this node"],
    help = "only text nodes have content; edit one of its fields instead",
)]
pub struct NotText {
    pub id: String,
    pub kind: String,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown symbol `{}`", name),
    labels = ["this symbol"],
    help = format!("type {} to list the palette", "symbols".fg(EXPR)),
)]
pub struct UnknownSymbol {
    pub name: String,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown symbol category `{}`", name),
    labels = ["this category"],
    help = format!("the categories are: {}", allowed.fg(EXPR)),
)]
pub struct UnknownCategory {
    pub name: String,
    pub allowed: String,
}

/// Report the given errors to stderr, against the input line they came from.
///
/// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
/// we can only use its `eprint` method to print to stderr.
///
/// [`Report`]: ariadne::Report
pub fn report_to_stderr(errors: &[Error], input: &str) {
    for err in errors {
        let report = err.build_report("input");
        if let Err(io_err) = report.eprint(("input", Source::from(input))) {
            eprintln!("{}", io_err);
        }
    }
}
