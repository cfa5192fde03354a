use crate::{
    id::{IdGenerator, NodeId},
    iter::Descendants,
    kind::{Field, NodeKind},
};
use std::{ops::Deref, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable, ordered sequence of nodes.
///
/// Sequences are reference-counted, so cloning one is cheap and two versions of a forest can share
/// every sequence that an edit did not touch. Use [`Sequence::ptr_eq`] to observe the sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Sequence(Arc<[ExpressionNode]>);

impl Sequence {
    /// Creates an empty sequence.
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Returns true if both sequences point to the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns a new sequence with `node` appended after the existing nodes.
    pub fn pushed(&self, node: ExpressionNode) -> Self {
        let mut nodes = self.0.to_vec();
        nodes.push(node);
        Self::from(nodes)
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for Sequence {
    type Target = [ExpressionNode];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<ExpressionNode>> for Sequence {
    fn from(nodes: Vec<ExpressionNode>) -> Self {
        Self(Arc::from(nodes))
    }
}

impl FromIterator<ExpressionNode> for Sequence {
    fn from_iter<I: IntoIterator<Item = ExpressionNode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a ExpressionNode;
    type IntoIter = std::slice::Iter<'a, ExpressionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The kind-specific payload of an [`ExpressionNode`].
///
/// Each variant carries only the fields that are meaningful for its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase"),
)]
pub enum NodeBody {
    Text {
        content: String,
    },
    Fraction {
        numerator: Sequence,
        denominator: Sequence,
    },
    Sqrt {
        radicand: Sequence,

        /// Empty for an ordinary square root; non-empty for an nth root.
        index: Sequence,
    },
    Power {
        base: Sequence,
        exponent: Sequence,
    },
    Subscript {
        base: Sequence,
        index: Sequence,
    },
    Sum {
        integrand: Sequence,
        lower_limit: Sequence,
        upper_limit: Sequence,
    },
}

impl NodeBody {
    /// Returns the kind of this body.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Text { .. } => NodeKind::Text,
            Self::Fraction { .. } => NodeKind::Fraction,
            Self::Sqrt { .. } => NodeKind::Sqrt,
            Self::Power { .. } => NodeKind::Power,
            Self::Subscript { .. } => NodeKind::Subscript,
            Self::Sum { .. } => NodeKind::Sum,
        }
    }

    /// Returns the child sequence stored in `field`, or [`None`] if this kind has no such field.
    pub fn field(&self, field: Field) -> Option<&Sequence> {
        match (self, field) {
            (Self::Fraction { numerator, .. }, Field::Numerator) => Some(numerator),
            (Self::Fraction { denominator, .. }, Field::Denominator) => Some(denominator),
            (Self::Sqrt { radicand, .. }, Field::Radicand) => Some(radicand),
            (Self::Sqrt { index, .. }, Field::Index) => Some(index),
            (Self::Power { base, .. }, Field::Base) => Some(base),
            (Self::Power { exponent, .. }, Field::Exponent) => Some(exponent),
            (Self::Subscript { base, .. }, Field::Base) => Some(base),
            (Self::Subscript { index, .. }, Field::Index) => Some(index),
            (Self::Sum { integrand, .. }, Field::Integrand) => Some(integrand),
            (Self::Sum { lower_limit, .. }, Field::LowerLimit) => Some(lower_limit),
            (Self::Sum { upper_limit, .. }, Field::UpperLimit) => Some(upper_limit),
            _ => None,
        }
    }

    fn field_mut(&mut self, field: Field) -> Option<&mut Sequence> {
        match (self, field) {
            (Self::Fraction { numerator, .. }, Field::Numerator) => Some(numerator),
            (Self::Fraction { denominator, .. }, Field::Denominator) => Some(denominator),
            (Self::Sqrt { radicand, .. }, Field::Radicand) => Some(radicand),
            (Self::Sqrt { index, .. }, Field::Index) => Some(index),
            (Self::Power { base, .. }, Field::Base) => Some(base),
            (Self::Power { exponent, .. }, Field::Exponent) => Some(exponent),
            (Self::Subscript { base, .. }, Field::Base) => Some(base),
            (Self::Subscript { index, .. }, Field::Index) => Some(index),
            (Self::Sum { integrand, .. }, Field::Integrand) => Some(integrand),
            (Self::Sum { lower_limit, .. }, Field::LowerLimit) => Some(lower_limit),
            (Self::Sum { upper_limit, .. }, Field::UpperLimit) => Some(upper_limit),
            _ => None,
        }
    }
}

/// A single node of a mathematical expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpressionNode {
    /// The identifier of this node, unique across the whole forest.
    pub id: NodeId,

    /// The kind-specific data of this node.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub body: NodeBody,
}

impl ExpressionNode {
    /// Creates a node from its parts.
    pub fn new(id: NodeId, body: NodeBody) -> Self {
        Self { id, body }
    }

    /// Creates a `text` node.
    pub fn text(id: NodeId, content: impl Into<String>) -> Self {
        Self::new(id, NodeBody::Text { content: content.into() })
    }

    /// Creates a `fraction` node.
    pub fn fraction(id: NodeId, numerator: Sequence, denominator: Sequence) -> Self {
        Self::new(id, NodeBody::Fraction { numerator, denominator })
    }

    /// Creates a `sqrt` node. Pass an empty `index` for an ordinary square root.
    pub fn sqrt(id: NodeId, radicand: Sequence, index: Sequence) -> Self {
        Self::new(id, NodeBody::Sqrt { radicand, index })
    }

    /// Creates a `power` node.
    pub fn power(id: NodeId, base: Sequence, exponent: Sequence) -> Self {
        Self::new(id, NodeBody::Power { base, exponent })
    }

    /// Creates a `subscript` node.
    pub fn subscript(id: NodeId, base: Sequence, index: Sequence) -> Self {
        Self::new(id, NodeBody::Subscript { base, index })
    }

    /// Creates a `sum` node.
    pub fn sum(
        id: NodeId,
        integrand: Sequence,
        lower_limit: Sequence,
        upper_limit: Sequence,
    ) -> Self {
        Self::new(id, NodeBody::Sum { integrand, lower_limit, upper_limit })
    }

    /// Builds the default shape of a freshly added component of the given kind. The node and
    /// every placeholder inside it receive new identifiers from `ids`.
    ///
    /// Every child field starts with a single empty `text` placeholder, except the `index` of a
    /// `sqrt`, which starts empty so that the component is an ordinary square root.
    pub fn template(kind: NodeKind, ids: &mut impl IdGenerator) -> Self {
        let id = ids.next_id();
        match kind {
            NodeKind::Text => Self::text(id, ""),
            NodeKind::Fraction => Self::fraction(id, placeholder(ids), placeholder(ids)),
            NodeKind::Sqrt => Self::sqrt(id, placeholder(ids), Sequence::empty()),
            NodeKind::Power => Self::power(id, placeholder(ids), placeholder(ids)),
            NodeKind::Subscript => Self::subscript(id, placeholder(ids), placeholder(ids)),
            NodeKind::Sum => Self::sum(id, placeholder(ids), placeholder(ids), placeholder(ids)),
        }
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        self.body.kind()
    }

    /// Returns the content of a `text` node, or [`None`] for any other kind.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            NodeBody::Text { content } => Some(content),
            _ => None,
        }
    }

    /// Returns the child sequence stored in `field`, or [`None`] if this node's kind has no such
    /// field.
    pub fn field(&self, field: Field) -> Option<&Sequence> {
        self.body.field(field)
    }

    /// Returns an iterator over the child fields of this node, in the order given by
    /// [`NodeKind::fields`].
    pub fn children(&self) -> impl Iterator<Item = (Field, &Sequence)> + '_ {
        self.kind()
            .fields()
            .iter()
            .filter_map(move |&field| self.field(field).map(|seq| (field, seq)))
    }

    /// Returns a copy of this node with `field` replaced by `seq`. All other fields are shared
    /// with this node. Returns [`None`] if this node's kind has no such field.
    pub fn with_field(&self, field: Field, seq: Sequence) -> Option<Self> {
        let mut body = self.body.clone();
        *body.field_mut(field)? = seq;
        Some(Self::new(self.id.clone(), body))
    }

    /// Returns a copy of this `text` node with new content, or [`None`] for any other kind.
    pub fn with_content(&self, content: impl Into<String>) -> Option<Self> {
        match self.body {
            NodeBody::Text { .. } => Some(Self::text(self.id.clone(), content)),
            _ => None,
        }
    }

    /// Returns an iterator over this node and all of its descendants, in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(std::slice::from_ref(self))
    }
}

/// A sequence holding one empty `text` node.
fn placeholder(ids: &mut impl IdGenerator) -> Sequence {
    Sequence::from(vec![ExpressionNode::text(ids.next_id(), "")])
}

/// The top-level sequence of expression trees edited in one session.
///
/// An empty forest is valid: it is the state of a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Forest(Sequence);

impl Forest {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the top-level sequence of this forest.
    pub fn roots(&self) -> &Sequence {
        &self.0
    }

    /// Returns the number of top-level nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the top-level nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, ExpressionNode> {
        self.0.iter()
    }

    /// Returns an iterator over every node of the forest, in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(&self.0)
    }

    /// Finds the node with the given identifier, at any depth.
    pub fn find(&self, id: &NodeId) -> Option<&ExpressionNode> {
        self.descendants().find(|node| &node.id == id)
    }

    /// Returns true if a node with the given identifier exists at any depth.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Returns true if both forests share the same top-level sequence.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl From<Sequence> for Forest {
    fn from(seq: Sequence) -> Self {
        Self(seq)
    }
}

impl From<Vec<ExpressionNode>> for Forest {
    fn from(nodes: Vec<ExpressionNode>) -> Self {
        Self(Sequence::from(nodes))
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a ExpressionNode;
    type IntoIter = std::slice::Iter<'a, ExpressionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::id::SequentialIds;

    #[test]
    fn fraction_template() {
        let mut ids = SequentialIds::new();
        let node = ExpressionNode::template(NodeKind::Fraction, &mut ids);

        assert_eq!(node, ExpressionNode::fraction(
            "n1".into(),
            vec![ExpressionNode::text("n2".into(), "")].into(),
            vec![ExpressionNode::text("n3".into(), "")].into(),
        ));
    }

    #[test]
    fn sqrt_template_has_empty_index() {
        let mut ids = SequentialIds::new();
        let node = ExpressionNode::template(NodeKind::Sqrt, &mut ids);

        assert_eq!(node.field(Field::Index).map(|seq| seq.len()), Some(0));
        assert_eq!(node.field(Field::Radicand).map(|seq| seq.len()), Some(1));
    }

    #[test]
    fn template_ids_are_unique() {
        let mut ids = SequentialIds::new();
        let node = ExpressionNode::template(NodeKind::Sum, &mut ids);
        let collected = node.descendants().map(|node| node.id.clone()).collect::<Vec<_>>();

        assert_eq!(collected, vec!["n1".into(), "n2".into(), "n3".into(), "n4".into()]);
    }

    #[test]
    fn with_field_shares_other_fields() {
        let mut ids = SequentialIds::new();
        let node = ExpressionNode::template(NodeKind::Power, &mut ids);
        let exponent = vec![ExpressionNode::text("x".into(), "2")].into();
        let edited = node.with_field(Field::Exponent, exponent).unwrap();

        let (Some(old_base), Some(new_base)) = (node.field(Field::Base), edited.field(Field::Base)) else {
            panic!("power nodes have a base");
        };
        assert!(old_base.ptr_eq(new_base));
        assert_eq!(edited.field(Field::Exponent).unwrap()[0].content(), Some("2"));
    }

    #[test]
    fn with_field_rejects_foreign_field() {
        let node = ExpressionNode::text("t".into(), "x");
        assert_eq!(node.with_field(Field::Numerator, Sequence::empty()), None);

        let mut ids = SequentialIds::new();
        let frac = ExpressionNode::template(NodeKind::Fraction, &mut ids);
        assert_eq!(frac.with_field(Field::Exponent, Sequence::empty()), None);
    }

    #[test]
    fn find_nested_node() {
        let mut ids = SequentialIds::new();
        let forest = Forest::from(vec![
            ExpressionNode::template(NodeKind::Text, &mut ids),
            ExpressionNode::template(NodeKind::Fraction, &mut ids),
        ]);

        assert_eq!(forest.find(&"n3".into()).map(|node| node.kind()), Some(NodeKind::Text));
        assert!(forest.contains(&"n4".into()));
        assert!(!forest.contains(&"n5".into()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let mut ids = SequentialIds::new();
        let forest = Forest::from(vec![
            ExpressionNode::template(NodeKind::Sum, &mut ids),
            ExpressionNode::text("x".into(), "+ x"),
        ]);

        let json = serde_json::to_value(&forest).unwrap();
        assert_eq!(json[0]["type"], "sum");
        assert_eq!(json[0]["id"], "n1");
        assert_eq!(json[0]["lowerLimit"][0]["type"], "text");
        assert_eq!(json[0]["lowerLimit"][0]["content"], "");
        assert!(json[0].get("lower_limit").is_none());
        assert_eq!(json[1], serde_json::json!({ "id": "x", "type": "text", "content": "+ x" }));

        let parsed: Forest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, forest);
    }
}
