use crate::{
    id::{IdGenerator, NodeId, UuidIds},
    kind::{Field, NodeKind},
    latex::to_latex,
    node::{ExpressionNode, Forest},
    ops,
    symbols::Symbol,
};
use log::{trace, warn};

/// The field of a node that new components are inserted into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingContext {
    pub node_id: NodeId,
    pub field: Field,
}

/// The coarse state of a [`Picker`] session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    /// Nothing has been built and no editing context is set.
    Empty,

    /// The forest is non-empty, or an editing context is set.
    Editing,
}

/// One editing session of the visual math builder.
///
/// The picker owns the forest being built and the editing context that decides where the next
/// component lands. Every operation is total: edits that do not apply leave the session
/// unchanged.
///
/// ```
/// use mathpick_tree::{Field, NodeKind, Picker, SequentialIds};
///
/// let mut picker = Picker::with_ids(SequentialIds::new());
/// let frac = picker.add_component(NodeKind::Fraction);
/// picker.update_content(&"n2".into(), "1");
/// picker.update_content(&"n3".into(), "2");
///
/// picker.set_editing_context(frac, Field::Denominator);
/// let x = picker.add_component(NodeKind::Text);
/// picker.update_content(&x, "x");
///
/// assert_eq!(picker.commit(), "\\frac{1}{2 x}");
/// assert!(picker.forest().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Picker<G = UuidIds> {
    forest: Forest,
    context: Option<EditingContext>,
    ids: G,
}

impl Picker {
    /// Starts an empty session whose nodes receive random UUID identifiers.
    pub fn new() -> Self {
        Self::with_ids(UuidIds)
    }
}

impl Default for Picker {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> Picker<G> {
    /// Starts an empty session that takes node identifiers from `ids`.
    pub fn with_ids(ids: G) -> Self {
        Self {
            forest: Forest::new(),
            context: None,
            ids,
        }
    }

    /// The forest built so far.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// The current editing context, if any.
    pub fn editing_context(&self) -> Option<&EditingContext> {
        self.context.as_ref()
    }

    pub fn state(&self) -> PickerState {
        if self.forest.is_empty() && self.context.is_none() {
            PickerState::Empty
        } else {
            PickerState::Editing
        }
    }

    /// Makes `field` of the node `node_id` the target of subsequent insertions.
    ///
    /// Returns `false`, leaving the context unchanged, if the node does not exist or its kind has
    /// no such field.
    pub fn set_editing_context(&mut self, node_id: NodeId, field: Field) -> bool {
        match self.forest.find(&node_id) {
            Some(node) if node.kind().has_field(field) => {
                trace!("editing context set to {}.{}", node_id, field);
                self.context = Some(EditingContext { node_id, field });
                true
            },
            Some(node) => {
                warn!("cannot edit `{}` of {} node `{}`", field, node.kind(), node_id);
                false
            },
            None => {
                warn!("cannot edit `{}` of missing node `{}`", field, node_id);
                false
            },
        }
    }

    /// Returns to appending new components at the top level.
    pub fn clear_editing_context(&mut self) {
        trace!("editing context cleared");
        self.context = None;
    }

    /// Places `node` into the editing context, or at the top level if there is none.
    fn place(&mut self, node: ExpressionNode) {
        self.forest = match &self.context {
            Some(EditingContext { node_id, field }) => {
                ops::insert_child(&self.forest, node_id, *field, node)
            },
            None => ops::append(&self.forest, node),
        };
    }

    /// Adds a fresh component of the given kind and returns its identifier.
    ///
    /// The component gets its default shape (see [`ExpressionNode::template`]), with fresh
    /// identifiers for itself and all of its placeholders.
    pub fn add_component(&mut self, kind: NodeKind) -> NodeId {
        let node = ExpressionNode::template(kind, &mut self.ids);
        let id = node.id.clone();
        trace!("adding {} node `{}`", kind, id);
        self.place(node);
        id
    }

    /// Adds a `text` node holding the LaTeX source of a palette symbol, and returns its
    /// identifier.
    pub fn add_symbol(&mut self, symbol: &Symbol) -> NodeId {
        let node = ExpressionNode::text(self.ids.next_id(), symbol.latex);
        let id = node.id.clone();
        trace!("adding symbol `{}` as `{}`", symbol.name, id);
        self.place(node);
        id
    }

    /// Sets the content of a `text` node.
    pub fn update_content(&mut self, node_id: &NodeId, content: &str) {
        self.forest = ops::update_content(&self.forest, node_id, content);
    }

    /// Removes a node and its subtree.
    ///
    /// If the editing context pointed at the removed node, or at any node inside its subtree, the
    /// context is cleared.
    pub fn remove_node(&mut self, node_id: &NodeId) {
        self.forest = ops::remove_node(&self.forest, node_id);

        let dangling = self.context
            .as_ref()
            .is_some_and(|context| !self.forest.contains(&context.node_id));
        if dangling {
            self.clear_editing_context();
        }
    }

    /// Replaces a node, and its subtree, by a fresh component of the given kind at the same
    /// position. Returns the identifier of the new component, or [`None`] if `node_id` does not
    /// exist.
    ///
    /// The editing context is cleared if it pointed into the replaced subtree.
    pub fn replace_node(&mut self, node_id: &NodeId, kind: NodeKind) -> Option<NodeId> {
        if !self.forest.contains(node_id) {
            return None;
        }

        let node = ExpressionNode::template(kind, &mut self.ids);
        let id = node.id.clone();
        self.forest = ops::replace_node(&self.forest, node_id, node);

        let dangling = self.context
            .as_ref()
            .is_some_and(|context| !self.forest.contains(&context.node_id));
        if dangling {
            self.clear_editing_context();
        }
        Some(id)
    }

    /// Removes everything built so far and clears the editing context.
    pub fn clear_all(&mut self) {
        trace!("session cleared");
        self.forest = Forest::new();
        self.context = None;
    }

    /// The live LaTeX preview of the forest. This is display-only; it does not end the session.
    pub fn preview(&self) -> String {
        to_latex(&self.forest)
    }

    /// Serializes the forest and ends the session, leaving the picker empty.
    pub fn commit(&mut self) -> String {
        let latex = self.preview();
        trace!("committed `{}`", latex);
        self.clear_all();
        latex
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::{id::SequentialIds, symbols};

    fn picker() -> Picker<SequentialIds> {
        Picker::with_ids(SequentialIds::new())
    }

    #[test]
    fn new_session_is_empty() {
        let picker = picker();
        assert_eq!(picker.state(), PickerState::Empty);
        assert_eq!(picker.preview(), "");
    }

    #[test]
    fn top_level_append() {
        let mut picker = picker();
        let a = picker.add_component(NodeKind::Text);
        picker.update_content(&a, "a");
        let b = picker.add_component(NodeKind::Text);
        picker.update_content(&b, "+ b");

        assert_eq!(picker.state(), PickerState::Editing);
        assert_eq!(picker.preview(), "a + b");
    }

    #[test]
    fn insert_into_context() {
        let mut picker = picker();
        let power = picker.add_component(NodeKind::Power);
        assert!(picker.set_editing_context(power.clone(), Field::Exponent));

        let frac = picker.add_component(NodeKind::Fraction);
        assert_eq!(picker.forest().len(), 1);
        assert_eq!(picker.forest().find(&frac).map(|node| node.kind()), Some(NodeKind::Fraction));
        assert_eq!(picker.preview(), "{}^{ \\frac{}{}}");
    }

    #[test]
    fn invalid_context_is_rejected() {
        let mut picker = picker();
        let text = picker.add_component(NodeKind::Text);
        let frac = picker.add_component(NodeKind::Fraction);

        assert!(!picker.set_editing_context(text, Field::Numerator));
        assert!(!picker.set_editing_context(frac.clone(), Field::Exponent));
        assert!(!picker.set_editing_context("ghost".into(), Field::Numerator));
        assert_eq!(picker.editing_context(), None);

        assert!(picker.set_editing_context(frac.clone(), Field::Numerator));
        assert_eq!(picker.editing_context(), Some(&EditingContext { node_id: frac, field: Field::Numerator }));
    }

    #[test]
    fn context_only_session_is_editing() {
        let mut picker = picker();
        let frac = picker.add_component(NodeKind::Fraction);
        picker.set_editing_context(frac.clone(), Field::Numerator);
        picker.remove_node(&frac);

        assert_eq!(picker.editing_context(), None);
        assert_eq!(picker.state(), PickerState::Empty);
    }

    #[test]
    fn removing_ancestor_clears_context() {
        let mut picker = picker();
        let outer = picker.add_component(NodeKind::Fraction);
        picker.set_editing_context(outer.clone(), Field::Numerator);
        let inner = picker.add_component(NodeKind::Sqrt);
        picker.set_editing_context(inner, Field::Radicand);

        picker.remove_node(&outer);
        assert_eq!(picker.editing_context(), None);
        assert!(picker.forest().is_empty());
    }

    #[test]
    fn removing_unrelated_node_keeps_context() {
        let mut picker = picker();
        let frac = picker.add_component(NodeKind::Fraction);
        let other = picker.add_component(NodeKind::Text);
        picker.set_editing_context(frac.clone(), Field::Denominator);

        picker.remove_node(&other);
        assert_eq!(picker.editing_context().map(|c| &c.node_id), Some(&frac));
    }

    #[test]
    fn stale_context_insert_is_noop() {
        let mut picker = picker();
        let frac = picker.add_component(NodeKind::Fraction);
        picker.set_editing_context(frac.clone(), Field::Numerator);

        // the host dropped the node behind the picker's back; the next insertion must not panic
        picker.forest = ops::remove_node(&picker.forest, &frac);
        picker.add_component(NodeKind::Text);
        assert!(picker.forest().is_empty());
    }

    #[test]
    fn symbols_are_text_nodes() {
        let mut picker = picker();
        let pi = symbols::lookup("pi").unwrap();
        let id = picker.add_symbol(pi);

        assert_eq!(picker.forest().find(&id).and_then(|node| node.content()), Some("\\pi"));
        assert_eq!(picker.preview(), "\\pi");
    }

    #[test]
    fn replace_with_template() {
        let mut picker = picker();
        let a = picker.add_component(NodeKind::Text);
        picker.update_content(&a, "x");
        let sqrt = picker.replace_node(&a, NodeKind::Sqrt).unwrap();

        picker.update_content(&"n3".into(), "2");
        assert_eq!(picker.forest().roots()[0].id, sqrt);
        assert_eq!(picker.preview(), "\\sqrt{2}");
        assert_eq!(picker.replace_node(&a, NodeKind::Text), None);
    }

    #[test]
    fn commit_resets_session() {
        let mut picker = picker();
        let sum = picker.add_component(NodeKind::Sum);
        picker.set_editing_context(sum, Field::UpperLimit);
        picker.update_content(&"n2".into(), "k");
        picker.update_content(&"n3".into(), "k=1");
        picker.update_content(&"n4".into(), "n");

        assert_eq!(picker.commit(), "\\sum_{k=1}^{n} k");
        assert_eq!(picker.state(), PickerState::Empty);
        assert_eq!(picker.editing_context(), None);
        assert_eq!(picker.commit(), "");
    }

    #[test]
    fn ids_are_never_reused_after_clear() {
        let mut picker = picker();
        let first = picker.add_component(NodeKind::Text);
        picker.clear_all();
        let second = picker.add_component(NodeKind::Text);

        assert_ne!(first, second);
    }
}
