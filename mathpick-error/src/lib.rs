//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, along with the [`Error`] type that attaches source spans to an error kind.
//!
//! Spans are byte ranges into whatever source the error was produced from: a LaTeX fragment, a
//! whole mixed-content string, or a line typed into the terminal host.

use ariadne::{Color, Report};
use std::{fmt::Debug, ops::Range};

#[cfg(test)]
extern crate self as mathpick_error;

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Shifts every span of this error forward by `by` bytes.
    ///
    /// Used when an error was produced from a slice of a larger source, so that the report points
    /// at the right place in the larger source.
    pub fn offset(mut self, by: usize) -> Self {
        for span in &mut self.spans {
            *span = span.start + by..span.end + by;
        }
        self
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ariadne::Source;
    use mathpick_attrs::ErrorKind;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("unknown command `\\{}`", name),
        labels = ["this command"],
        help = "check the spelling of the command",
    )]
    struct Unknown {
        name: String,
    }

    /// Renders the report of the error to a plain string.
    fn render(err: &Error, src: &str) -> String {
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(src)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn offset_shifts_spans() {
        let err = Error::new(vec![1..4, 6..6], Unknown { name: "foo".to_string() }).offset(10);
        assert_eq!(err.spans, vec![11..14, 16..16]);
    }

    #[test]
    fn report_contains_message_label_and_help() {
        let src = "a \\foo b";
        let err = Error::new(vec![2..6], Unknown { name: "foo".to_string() });
        let report = render(&err, src);

        assert!(report.contains("unknown command `\\foo`"));
        assert!(report.contains("this command"));
        assert!(report.contains("check the spelling of the command"));
    }
}
