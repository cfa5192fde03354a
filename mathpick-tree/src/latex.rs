use crate::node::{ExpressionNode, Forest, NodeBody, Sequence};
use std::fmt::{Display, Formatter, Result};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Serializes the whole forest to a single LaTeX string.
///
/// This never fails: incomplete expressions serialize with empty groups, e.g. a fraction with an
/// empty denominator becomes `\frac{x}{}`.
pub fn to_latex(forest: &Forest) -> String {
    forest.as_display().to_string()
}

impl Latex for Sequence {
    /// Siblings are separated by a single space.
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        for (i, node) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            node.fmt_latex(f)?;
        }
        Ok(())
    }
}

impl Latex for Forest {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        self.roots().fmt_latex(f)
    }
}

impl Latex for ExpressionNode {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match &self.body {
            NodeBody::Text { content } => write!(f, "{}", content),
            NodeBody::Fraction { numerator, denominator } => write!(
                f,
                "\\frac{{{}}}{{{}}}",
                numerator.as_display(),
                denominator.as_display(),
            ),
            NodeBody::Sqrt { radicand, index } if index.is_empty() => {
                write!(f, "\\sqrt{{{}}}", radicand.as_display())
            },
            NodeBody::Sqrt { radicand, index } => write!(
                f,
                "\\sqrt[{}]{{{}}}",
                index.as_display(),
                radicand.as_display(),
            ),
            NodeBody::Power { base, exponent } => write!(
                f,
                "{{{}}}^{{{}}}",
                base.as_display(),
                exponent.as_display(),
            ),
            NodeBody::Subscript { base, index } => write!(
                f,
                "{{{}}}_{{{}}}",
                base.as_display(),
                index.as_display(),
            ),
            NodeBody::Sum { integrand, lower_limit, upper_limit } => write!(
                f,
                "\\sum_{{{}}}^{{{}}} {}",
                lower_limit.as_display(),
                upper_limit.as_display(),
                integrand.as_display(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::{
        id::SequentialIds,
        kind::NodeKind,
    };

    fn text(id: &str, content: &str) -> ExpressionNode {
        ExpressionNode::text(id.into(), content)
    }

    fn seq(nodes: Vec<ExpressionNode>) -> Sequence {
        Sequence::from(nodes)
    }

    #[test]
    fn empty_forest() {
        assert_eq!(to_latex(&Forest::new()), "");
    }

    #[test]
    fn fraction() {
        let node = ExpressionNode::fraction("f".into(), seq(vec![text("a", "1")]), seq(vec![text("b", "2")]));
        assert_eq!(node.as_display().to_string(), "\\frac{1}{2}");
    }

    #[test]
    fn incomplete_fraction() {
        let node = ExpressionNode::fraction("f".into(), seq(vec![text("a", "x")]), Sequence::empty());
        assert_eq!(node.as_display().to_string(), "\\frac{x}{}");
    }

    #[test]
    fn sqrt_with_and_without_index() {
        let square = ExpressionNode::sqrt("s".into(), seq(vec![text("r", "9")]), Sequence::empty());
        assert_eq!(square.as_display().to_string(), "\\sqrt{9}");

        let cube = ExpressionNode::sqrt("s".into(), seq(vec![text("r", "9")]), seq(vec![text("i", "3")]));
        assert_eq!(cube.as_display().to_string(), "\\sqrt[3]{9}");
    }

    #[test]
    fn power_and_subscript() {
        let power = ExpressionNode::power("p".into(), seq(vec![text("b", "x")]), seq(vec![text("e", "2")]));
        let sub = ExpressionNode::subscript("s".into(), seq(vec![text("b2", "a")]), seq(vec![text("i", "n")]));
        let forest = Forest::from(vec![power, text("plus", "+"), sub]);

        assert_eq!(to_latex(&forest), "{x}^{2} + {a}_{n}");
    }

    #[test]
    fn sum() {
        let node = ExpressionNode::sum(
            "s".into(),
            seq(vec![text("i", "k^2")]),
            seq(vec![text("l", "k=1")]),
            seq(vec![text("u", "n")]),
        );
        assert_eq!(node.as_display().to_string(), "\\sum_{k=1}^{n} k^2");
    }

    #[test]
    fn nested_templates() {
        let mut ids = SequentialIds::new();
        let forest = Forest::from(vec![
            ExpressionNode::template(NodeKind::Sum, &mut ids),
            ExpressionNode::template(NodeKind::Power, &mut ids),
        ]);
        assert_eq!(to_latex(&forest), "\\sum_{}^{}  {}^{}");
    }

    #[test]
    fn siblings_are_joined_with_spaces() {
        let node = ExpressionNode::fraction(
            "f".into(),
            seq(vec![text("a", "a"), text("b", "+"), text("c", "b")]),
            seq(vec![text("d", "2")]),
        );
        assert_eq!(node.as_display().to_string(), "\\frac{a + b}{2}");
    }
}
