//! Splitting free text with inline `$...$` LaTeX into fragments.

use logos::Logos;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The raw pieces of mixed content.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
enum Piece {
    /// A closed `$...$` region.
    #[regex(r"\$[^$]*\$")]
    Math,

    /// A `$` with no closing partner.
    #[token("$")]
    Dollar,

    #[regex(r"[^$]+")]
    Literal,
}

/// Whether a [`Fragment`] is plain text or LaTeX source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub enum FragmentKind {
    Text,
    Latex,
}

/// A consecutive part of mixed content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Fragment<'a> {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: FragmentKind,

    /// The text, or the LaTeX source without its `$` delimiters.
    pub content: &'a str,

    /// Where the fragment lies in the input. For LaTeX fragments, this includes the delimiters.
    pub span: Range<usize>,
}

impl Fragment<'_> {
    /// Returns true if this is a LaTeX fragment.
    pub fn is_latex(&self) -> bool {
        self.kind == FragmentKind::Latex
    }
}

/// Splits `text` into alternating text and LaTeX fragments, in order.
///
/// A LaTeX fragment is a `$`, then any run of non-`$` characters, then a closing `$`. A `$`
/// without a closing partner is kept as literal text. Whitespace inside fragments is preserved,
/// text fragments are never empty, and concatenating the fragments (with the delimiters of LaTeX
/// fragments restored) gives back `text`.
///
/// ```
/// use mathpick_latex::{split_mixed_content, FragmentKind};
///
/// let fragments = split_mixed_content("area = $\\pi r^2$ approx.");
/// let parts = fragments.iter().map(|f| (f.kind, f.content)).collect::<Vec<_>>();
/// assert_eq!(parts, [
///     (FragmentKind::Text, "area = "),
///     (FragmentKind::Latex, "\\pi r^2"),
///     (FragmentKind::Text, " approx."),
/// ]);
/// ```
pub fn split_mixed_content(text: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut literal: Option<Range<usize>> = None;
    let mut lexer = Piece::lexer(text);

    while let Some(piece) = lexer.next() {
        let span = lexer.span();
        match piece {
            Ok(Piece::Math) => {
                if let Some(literal) = literal.take() {
                    fragments.push(text_fragment(text, literal));
                }
                fragments.push(Fragment {
                    kind: FragmentKind::Latex,
                    content: &text[span.start + 1..span.end - 1],
                    span,
                });
            },
            // an unclosed `$` is merged with the text around it
            Ok(Piece::Dollar | Piece::Literal) | Err(()) => {
                literal = Some(match literal {
                    Some(literal) => literal.start..span.end,
                    None => span,
                });
            },
        }
    }

    if let Some(literal) = literal {
        fragments.push(text_fragment(text, literal));
    }

    fragments
}

fn text_fragment(text: &str, span: Range<usize>) -> Fragment<'_> {
    Fragment {
        kind: FragmentKind::Text,
        content: &text[span.clone()],
        span,
    }
}
