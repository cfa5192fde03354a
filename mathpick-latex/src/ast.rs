//! The syntax tree of a parsed LaTeX math expression.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a fraction is typeset relative to its surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FracStyle {
    /// Follow the surrounding display style (`\frac`).
    Inherit,

    /// Always full size (`\dfrac`).
    Display,

    /// Always inline size (`\tfrac`).
    Text,
}

/// A font variant applied by commands such as `\mathbf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variant {
    Normal,
    Bold,
    Italic,
    DoubleStruck,
    Script,
    SansSerif,
    Monospace,
}

impl Variant {
    /// The value of the MathML `mathvariant` attribute for this variant.
    pub fn mathvariant(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::DoubleStruck => "double-struck",
            Self::Script => "script",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
        }
    }
}

/// A node of a parsed LaTeX math expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MathNode {
    /// An identifier, such as `x`, `\alpha` or `\sin`. Upright identifiers are set in the normal
    /// font instead of italics.
    Ident {
        name: String,
        upright: bool,
    },

    /// A number literal, such as `3.14`.
    Number(String),

    /// An operator, relation, arrow, or punctuation.
    Operator(String),

    /// A large operator such as `\sum` or `\int`. Operators with `limits` place their scripts
    /// above and below them in display mode.
    LargeOperator {
        symbol: String,
        limits: bool,
    },

    /// Upright text from `\text{...}`.
    Text(String),

    /// Horizontal space of the given width, in CSS units.
    Space(String),

    /// A sequence of nodes.
    Row(Vec<MathNode>),

    /// A fraction. `line` is false for binomial coefficients.
    Frac {
        numerator: Box<MathNode>,
        denominator: Box<MathNode>,
        line: bool,
        style: FracStyle,
    },

    /// A square root, or an n-th root if `index` is present.
    Sqrt {
        index: Option<Box<MathNode>>,
        radicand: Box<MathNode>,
    },

    /// A base with a subscript, a superscript, or both.
    Scripts {
        base: Box<MathNode>,
        sub: Option<Box<MathNode>>,
        sup: Option<Box<MathNode>>,
    },

    /// A body between stretchy delimiters, from `\left ... \right`. An empty delimiter string
    /// stands for the invisible `.` delimiter.
    Fenced {
        open: String,
        body: Box<MathNode>,
        close: String,
    },

    /// A body set in a different font variant.
    Styled {
        variant: Variant,
        body: Box<MathNode>,
    },

    /// An accent placed over a body, such as `\hat{x}`.
    Accent {
        accent: String,
        body: Box<MathNode>,
    },
}

impl MathNode {
    /// Wraps a sequence of nodes into a single node. A sequence of exactly one node is returned
    /// as that node.
    pub fn row(mut nodes: Vec<MathNode>) -> MathNode {
        if nodes.len() == 1 {
            nodes.remove(0)
        } else {
            MathNode::Row(nodes)
        }
    }

    /// Returns true if the node is an empty row, such as the one produced by `{}`.
    pub fn is_empty(&self) -> bool {
        matches!(self, MathNode::Row(nodes) if nodes.is_empty())
    }
}
