//! Identifier-addressed expression trees for visual math authoring.
//!
//! A math builder session edits a [`Forest`] of typed [`ExpressionNode`]s: fractions, roots,
//! powers, subscripts, sums and literal text. Nodes are addressed only by their [`NodeId`], never
//! by position. The [`ops`] module contains the pure structural edits, [`latex`] serializes a
//! forest to LaTeX, and [`Picker`] ties both together into the state machine a UI drives.

pub mod id;
pub mod iter;
pub mod kind;
pub mod latex;
pub mod node;
pub mod ops;
pub mod picker;
pub mod symbols;

pub use crate::{
    id::{IdGenerator, NodeId, SequentialIds, UuidIds},
    kind::{Field, NodeKind},
    latex::{to_latex, Latex},
    node::{ExpressionNode, Forest, NodeBody, Sequence},
    ops::EditError,
    picker::{EditingContext, Picker, PickerState},
    symbols::{Symbol, SymbolCategory},
};
