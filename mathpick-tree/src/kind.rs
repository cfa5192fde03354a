use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The closed set of node kinds an expression can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub enum NodeKind {
    /// Literal text, the only kind carrying a scalar `content`.
    Text,

    /// A fraction, `\frac{numerator}{denominator}`.
    Fraction,

    /// A square root, or an nth root when the `index` field is non-empty.
    Sqrt,

    /// A base raised to an exponent.
    Power,

    /// A base with a subscript index.
    Subscript,

    /// A summation with an integrand and lower / upper limits.
    Sum,
}

impl NodeKind {
    /// Every node kind, in palette order.
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Text,
        NodeKind::Fraction,
        NodeKind::Sqrt,
        NodeKind::Power,
        NodeKind::Subscript,
        NodeKind::Sum,
    ];

    /// Returns the child fields a node of this kind carries, in declaration order. `text` nodes
    /// have no child fields.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Text => &[],
            Self::Fraction => &[Field::Numerator, Field::Denominator],
            Self::Sqrt => &[Field::Radicand, Field::Index],
            Self::Power => &[Field::Base, Field::Exponent],
            Self::Subscript => &[Field::Base, Field::Index],
            Self::Sum => &[Field::Integrand, Field::LowerLimit, Field::UpperLimit],
        }
    }

    /// Returns true if nodes of this kind carry the given child field.
    pub fn has_field(self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    /// The name of the kind, as used by the host UI.
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Fraction => "fraction",
            Self::Sqrt => "sqrt",
            Self::Power => "power",
            Self::Subscript => "subscript",
            Self::Sum => "sum",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A string did not name a [`NodeKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown node kind `{}`", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A named child sequence of a node.
///
/// Not every field is legal for every kind; see [`NodeKind::fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub enum Field {
    Numerator,
    Denominator,
    Radicand,
    Index,
    Base,
    Exponent,
    Integrand,
    LowerLimit,
    UpperLimit,
}

impl Field {
    /// Every field, across all node kinds.
    pub const ALL: [Field; 9] = [
        Field::Numerator,
        Field::Denominator,
        Field::Radicand,
        Field::Index,
        Field::Base,
        Field::Exponent,
        Field::Integrand,
        Field::LowerLimit,
        Field::UpperLimit,
    ];

    /// The name of the field, as used by the host UI.
    pub fn name(self) -> &'static str {
        match self {
            Self::Numerator => "numerator",
            Self::Denominator => "denominator",
            Self::Radicand => "radicand",
            Self::Index => "index",
            Self::Base => "base",
            Self::Exponent => "exponent",
            Self::Integrand => "integrand",
            Self::LowerLimit => "lowerLimit",
            Self::UpperLimit => "upperLimit",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A string did not name a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown field `{}`", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the camelCase names (`lowerLimit`) as well as snake_case (`lower_limit`), ignoring
    /// case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('_', "");
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kinds() {
        assert_eq!("fraction".parse(), Ok(NodeKind::Fraction));
        assert_eq!("SQRT".parse(), Ok(NodeKind::Sqrt));
        assert_eq!("matrix".parse::<NodeKind>(), Err(UnknownKind("matrix".to_string())));
    }

    #[test]
    fn parse_fields() {
        assert_eq!("lowerLimit".parse(), Ok(Field::LowerLimit));
        assert_eq!("upper_limit".parse(), Ok(Field::UpperLimit));
        assert_eq!("numerator".parse(), Ok(Field::Numerator));
        assert!("limit".parse::<Field>().is_err());
    }

    #[test]
    fn fields_are_kind_specific() {
        assert!(NodeKind::Text.fields().is_empty());
        assert!(NodeKind::Sqrt.has_field(Field::Index));
        assert!(NodeKind::Subscript.has_field(Field::Index));
        assert!(!NodeKind::Power.has_field(Field::Index));
        assert!(!NodeKind::Fraction.has_field(Field::Base));
        assert_eq!(NodeKind::Sum.fields().len(), 3);
    }
}
