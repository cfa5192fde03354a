use ariadne::Fmt;
use mathpick_attrs::ErrorKind;
use mathpick_error::{ErrorKind, EXPR};

/// A control word that the renderer does not know.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `\\{}`", name),
    labels = ["this command"],
    help = "check the spelling, or insert the symbol from the palette instead",
)]
pub struct UnknownCommand {
    /// The name of the command, without the leading backslash.
    pub name: String,
}

/// A command that takes arguments was not given enough of them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument for `\\{}`", command),
    labels = ["this command".to_string(), format!("I expected a {} here", "{group}".fg(EXPR))],
    help = format!("`\\{}` takes {} argument(s)", command, count),
)]
pub struct MissingArgument {
    pub command: String,

    /// How many required arguments the command takes.
    pub count: usize,
}

/// A group was opened but never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed group",
    labels = [format!("this `{}` is never closed", open)],
    help = format!("add a closing `{}`", if *open == '[' { ']' } else { '}' }),
)]
pub struct UnclosedGroup {
    /// The character that opened the group, either `{` or `[`.
    pub open: char,
}

/// A closing brace was found without a matching opening brace.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unmatched closing brace",
    labels = ["this `}` has no matching `{`"],
)]
pub struct UnmatchedCloseGroup;

/// A `^` or `_` was not followed by a script.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing {} after `{}`", if *script == '^' { "superscript" } else { "subscript" }, script),
    labels = [format!("I expected an {} after this", "expression".fg(EXPR))],
)]
pub struct MissingScript {
    /// The script operator, either `^` or `_`.
    pub script: char,
}

/// A base was given two superscripts or two subscripts.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("double {}", if *script == '^' { "superscript" } else { "subscript" }),
    labels = ["first script here", "second script here"],
    help = format!("wrap the first script in braces, like `{{x{}a}}{}b`", script, script),
)]
pub struct DoubleScript {
    pub script: char,
}

/// `\left` without a matching `\right`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing `\\right`",
    labels = ["this `\\left` is never closed"],
    help = format!("add `{}` (or `\\right.` for an invisible delimiter)", "\\right)".fg(EXPR)),
)]
pub struct MissingRight;

/// `\right` without a preceding `\left`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unmatched `\\right`",
    labels = ["this `\\right` has no matching `\\left`"],
)]
pub struct UnmatchedRight;

/// `\left` or `\right` was followed by something that cannot be a delimiter.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid delimiter",
    labels = [if found.is_empty() {
        "expected a delimiter after this".to_string()
    } else {
        format!("`{}` is not a delimiter", found)
    }],
    help = format!("use one of {}", "( ) [ ] \\{ \\} | \\| \\langle \\rangle .".fg(EXPR)),
)]
pub struct InvalidDelimiter {
    /// The source text that was found in place of the delimiter. Empty at the end of input.
    pub found: String,
}

/// A token that cannot appear at this position.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", found),
    labels = ["here"],
    help = if found.starts_with('\\') {
        "a lone backslash must start a command, like `\\alpha`".to_string()
    } else {
        format!("special characters must be escaped, like `\\{}`", found)
    },
)]
pub struct UnexpectedToken {
    pub found: String,
}

/// The source nests groups or commands too deeply to be parsed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = ["this is nested too deeply"],
    help = format!("groups and commands can be nested at most {} levels deep", limit),
)]
pub struct TooDeep {
    /// The maximum nesting depth.
    pub limit: usize,
}
