//! Writing parsed expressions as MathML elements.

use crate::{ast::{FracStyle, MathNode}, render::MathDisplay};
use std::fmt::{self, Display, Formatter};

/// A trait for types that can be written as MathML.
pub trait MathMl {
    /// Writes the MathML for `self` to the given formatter. `display` decides where the limits of
    /// large operators go.
    fn fmt_mathml(&self, f: &mut Formatter, display: MathDisplay) -> fmt::Result;

    /// Wraps the value in a [`MathMlFormatter`], which implements [`Display`].
    fn as_mathml(&self, display: MathDisplay) -> MathMlFormatter<'_, Self> {
        MathMlFormatter(self, display)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`MathMl`].
pub struct MathMlFormatter<'a, T: ?Sized>(&'a T, MathDisplay);

impl<T> Display for MathMlFormatter<'_, T>
where
    T: MathMl + ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt_mathml(f, self.1)
    }
}

/// Writes a string with the characters that are special in XML replaced by entities.
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(index) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..index])?;
            f.write_str(match rest.as_bytes()[index] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            })?;
            rest = &rest[index + 1..];
        }
        f.write_str(rest)
    }
}

/// Writes a `<mo>` element, marked stretchy when used as a `\left` / `\right` delimiter.
fn fmt_fence(f: &mut Formatter, symbol: &str) -> fmt::Result {
    if symbol.is_empty() {
        return Ok(());
    }
    write!(f, "<mo fence=\"true\" stretchy=\"true\">{}</mo>", Escaped(symbol))
}

fn fmt_scripts(
    f: &mut Formatter,
    base: &MathNode,
    sub: Option<&MathNode>,
    sup: Option<&MathNode>,
    display: MathDisplay,
) -> fmt::Result {
    let limits = display == MathDisplay::Block
        && matches!(base, MathNode::LargeOperator { limits: true, .. });
    let tag = match (sub.is_some(), sup.is_some(), limits) {
        (true, true, true) => "munderover",
        (true, false, true) => "munder",
        (false, true, true) => "mover",
        (true, true, false) => "msubsup",
        (true, false, false) => "msub",
        (false, true, false) => "msup",
        (false, false, _) => return base.fmt_mathml(f, display),
    };

    write!(f, "<{}>", tag)?;
    base.fmt_mathml(f, display)?;
    for script in sub.into_iter().chain(sup) {
        script.fmt_mathml(f, display)?;
    }
    write!(f, "</{}>", tag)
}

impl MathMl for MathNode {
    fn fmt_mathml(&self, f: &mut Formatter, display: MathDisplay) -> fmt::Result {
        match self {
            MathNode::Ident { name, upright } => {
                // multi-letter identifiers are upright by default
                if *upright && name.chars().count() == 1 {
                    write!(f, "<mi mathvariant=\"normal\">{}</mi>", Escaped(name))
                } else {
                    write!(f, "<mi>{}</mi>", Escaped(name))
                }
            },
            MathNode::Number(n) => write!(f, "<mn>{}</mn>", Escaped(n)),
            MathNode::Operator(op) => write!(f, "<mo>{}</mo>", Escaped(op)),
            MathNode::LargeOperator { symbol, limits } => {
                if *limits {
                    write!(f, "<mo movablelimits=\"true\">{}</mo>", Escaped(symbol))
                } else {
                    write!(f, "<mo largeop=\"true\">{}</mo>", Escaped(symbol))
                }
            },
            MathNode::Text(text) => write!(f, "<mtext>{}</mtext>", Escaped(text)),
            MathNode::Space(width) => write!(f, "<mspace width=\"{}\"/>", Escaped(width)),
            MathNode::Row(nodes) => {
                f.write_str("<mrow>")?;
                for node in nodes {
                    node.fmt_mathml(f, display)?;
                }
                f.write_str("</mrow>")
            },
            MathNode::Frac { numerator, denominator, line, style } => {
                f.write_str("<mfrac")?;
                if !line {
                    f.write_str(" linethickness=\"0\"")?;
                }
                match style {
                    FracStyle::Inherit => {},
                    FracStyle::Display => f.write_str(" displaystyle=\"true\"")?,
                    FracStyle::Text => f.write_str(" displaystyle=\"false\"")?,
                }
                f.write_str(">")?;
                numerator.fmt_mathml(f, display)?;
                denominator.fmt_mathml(f, display)?;
                f.write_str("</mfrac>")
            },
            MathNode::Sqrt { index: None, radicand } => {
                f.write_str("<msqrt>")?;
                radicand.fmt_mathml(f, display)?;
                f.write_str("</msqrt>")
            },
            MathNode::Sqrt { index: Some(index), radicand } => {
                f.write_str("<mroot>")?;
                radicand.fmt_mathml(f, display)?;
                index.fmt_mathml(f, display)?;
                f.write_str("</mroot>")
            },
            MathNode::Scripts { base, sub, sup } => {
                fmt_scripts(f, base, sub.as_deref(), sup.as_deref(), display)
            },
            MathNode::Fenced { open, body, close } => {
                f.write_str("<mrow>")?;
                fmt_fence(f, open)?;
                body.fmt_mathml(f, display)?;
                fmt_fence(f, close)?;
                f.write_str("</mrow>")
            },
            MathNode::Styled { variant, body } => {
                write!(f, "<mstyle mathvariant=\"{}\">", variant.mathvariant())?;
                body.fmt_mathml(f, display)?;
                f.write_str("</mstyle>")
            },
            MathNode::Accent { accent, body } => {
                f.write_str("<mover accent=\"true\">")?;
                body.fmt_mathml(f, display)?;
                write!(f, "<mo>{}</mo></mover>", Escaped(accent))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::parser::parse;

    fn inline(source: &str) -> String {
        parse(source).unwrap().as_mathml(MathDisplay::Inline).to_string()
    }

    #[test]
    fn escape() {
        assert_eq!(Escaped("a < b && c").to_string(), "a &lt; b &amp;&amp; c");
        assert_eq!(Escaped("plain").to_string(), "plain");
    }

    #[test]
    fn fraction() {
        assert_eq!(inline("\\frac{1}{x}"), "<mfrac><mn>1</mn><mi>x</mi></mfrac>");
    }

    #[test]
    fn upright_letters() {
        assert_eq!(inline("\\Delta"), "<mi mathvariant=\"normal\">Δ</mi>");
        assert_eq!(inline("\\sin"), "<mi>sin</mi>");
    }

    #[test]
    fn root_children_order() {
        assert_eq!(inline("\\sqrt[n]{x}"), "<mroot><mi>x</mi><mi>n</mi></mroot>");
    }

    #[test]
    fn sum_limits_follow_display() {
        let source = "\\sum_{k}^{n}";
        let node = parse(source).unwrap();
        assert_eq!(
            node.as_mathml(MathDisplay::Inline).to_string(),
            "<msubsup><mo movablelimits=\"true\">∑</mo><mi>k</mi><mi>n</mi></msubsup>",
        );
        assert_eq!(
            node.as_mathml(MathDisplay::Block).to_string(),
            "<munderover><mo movablelimits=\"true\">∑</mo><mi>k</mi><mi>n</mi></munderover>",
        );
    }

    #[test]
    fn integral_never_takes_limits() {
        let node = parse("\\int_0^1").unwrap();
        assert_eq!(
            node.as_mathml(MathDisplay::Block).to_string(),
            "<msubsup><mo largeop=\"true\">∫</mo><mn>0</mn><mn>1</mn></msubsup>",
        );
    }

    #[test]
    fn invisible_delimiter() {
        assert_eq!(
            inline("\\left. x \\right|"),
            "<mrow><mi>x</mi><mo fence=\"true\" stretchy=\"true\">|</mo></mrow>",
        );
    }

    #[test]
    fn binomial() {
        assert_eq!(
            inline("\\binom{n}{k}"),
            "<mrow><mo fence=\"true\" stretchy=\"true\">(</mo><mfrac linethickness=\"0\"><mi>n</mi><mi>k</mi></mfrac><mo fence=\"true\" stretchy=\"true\">)</mo></mrow>",
        );
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(inline("\\text{a<b}"), "<mtext>a&lt;b</mtext>");
    }
}
