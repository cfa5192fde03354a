//! Structural, identifier-addressed edits of a [`Forest`].
//!
//! Every operation is pure: it borrows a forest and returns a new one, leaving its input
//! untouched. Sequences that an edit does not reach are shared between the input and the output,
//! so an edit costs time proportional to the path from the root to the edited node (plus the
//! search), not to the size of the forest.
//!
//! Each operation comes in two flavors. The `try_*` functions report why an edit could not be
//! applied. The plain functions are permissive: an edit that cannot be applied returns the input
//! forest unchanged, because the host UI may race a stale identifier against a node that was just
//! deleted.

use crate::{
    id::NodeId,
    kind::{Field, NodeKind},
    node::{ExpressionNode, Forest, Sequence},
};
use log::{debug, warn};
use std::{collections::HashSet, fmt};

/// The reason an edit could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// No node with this identifier exists anywhere in the forest.
    NotFound(NodeId),

    /// The addressed node's kind has no such child field.
    InvalidField {
        id: NodeId,
        kind: NodeKind,
        field: Field,
    },

    /// The addressed node is not a `text` node, so it has no content to update.
    NotText {
        id: NodeId,
        kind: NodeKind,
    },

    /// The inserted node contains an identifier that already exists in the forest.
    DuplicateId(NodeId),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "no node with id `{}`", id),
            Self::InvalidField { id, kind, field } => {
                write!(f, "node `{}` is a {} node, which has no `{}` field", id, kind, field)
            },
            Self::NotText { id, kind } => {
                write!(f, "node `{}` is a {} node, which has no content", id, kind)
            },
            Self::DuplicateId(id) => write!(f, "id `{}` is already used in the forest", id),
        }
    }
}

impl std::error::Error for EditError {}

/// What to do with a node encountered while rewriting a sequence.
enum Visit {
    /// Leave the node and its subtree as they are.
    Keep,

    /// Look for edits inside the node's child fields.
    Descend,

    /// Put this node in place of the visited one.
    Replace(ExpressionNode),

    /// Drop the visited node together with its subtree.
    Remove,
}

/// Rewrites a sequence according to `visit`. Returns [`None`] if nothing changed, so that the
/// caller can keep sharing the original sequence.
fn rewrite_sequence<F>(seq: &Sequence, visit: &mut F) -> Option<Sequence>
where
    F: FnMut(&ExpressionNode) -> Visit,
{
    let mut changed = false;
    let mut out = Vec::with_capacity(seq.len());

    for node in seq.iter() {
        match visit(node) {
            Visit::Keep => out.push(node.clone()),
            Visit::Descend => match rewrite_node(node, visit) {
                Some(edited) => {
                    changed = true;
                    out.push(edited);
                },
                None => out.push(node.clone()),
            },
            Visit::Replace(replacement) => {
                changed = true;
                out.push(replacement);
            },
            Visit::Remove => changed = true,
        }
    }

    changed.then(|| Sequence::from(out))
}

/// Rewrites every child field of `node`. Returns [`None`] if no field changed.
fn rewrite_node<F>(node: &ExpressionNode, visit: &mut F) -> Option<ExpressionNode>
where
    F: FnMut(&ExpressionNode) -> Visit,
{
    let mut edited: Option<ExpressionNode> = None;
    for (field, seq) in node.children() {
        if let Some(seq) = rewrite_sequence(seq, visit) {
            edited = edited.as_ref().unwrap_or(node).with_field(field, seq);
        }
    }
    edited
}

/// Puts `replacement` in place of the first node with identifier `id`.
fn substitute(forest: &Forest, id: &NodeId, replacement: ExpressionNode) -> Forest {
    let mut replacement = Some(replacement);
    let roots = rewrite_sequence(forest.roots(), &mut |node| {
        if replacement.is_none() {
            Visit::Keep
        } else if node.id == *id {
            replacement.take().map_or(Visit::Keep, Visit::Replace)
        } else {
            Visit::Descend
        }
    });
    roots.map_or_else(|| forest.clone(), Forest::from)
}

/// Checks that no identifier inside `node` is already used in the forest, nor used twice inside
/// `node` itself. Identifiers inside `replaced` are about to leave the forest and may be reused.
fn ensure_fresh(
    forest: &Forest,
    node: &ExpressionNode,
    replaced: Option<&ExpressionNode>,
) -> Result<(), EditError> {
    let leaving = replaced
        .into_iter()
        .flat_map(ExpressionNode::descendants)
        .map(|node| &node.id)
        .collect::<HashSet<_>>();
    let mut taken = forest
        .descendants()
        .map(|node| &node.id)
        .filter(|id| !leaving.contains(id))
        .collect::<HashSet<_>>();

    for descendant in node.descendants() {
        if !taken.insert(&descendant.id) {
            return Err(EditError::DuplicateId(descendant.id.clone()));
        }
    }

    Ok(())
}

/// Logs why a permissive edit was skipped.
fn skipped(err: EditError) {
    match err {
        EditError::NotFound(_) => debug!("edit skipped: {}", err),
        _ => warn!("edit skipped: {}", err),
    }
}

/// Appends `node` to the end of the `field` sequence of the node with identifier `parent_id`,
/// wherever that node is in the forest.
pub fn try_insert_child(
    forest: &Forest,
    parent_id: &NodeId,
    field: Field,
    node: ExpressionNode,
) -> Result<Forest, EditError> {
    let parent = forest.find(parent_id).ok_or_else(|| EditError::NotFound(parent_id.clone()))?;
    let invalid_field = || EditError::InvalidField {
        id: parent_id.clone(),
        kind: parent.kind(),
        field,
    };
    let seq = parent.field(field).ok_or_else(invalid_field)?;
    ensure_fresh(forest, &node, None)?;

    let new_parent = parent.with_field(field, seq.pushed(node)).ok_or_else(invalid_field)?;
    Ok(substitute(forest, parent_id, new_parent))
}

/// Permissive form of [`try_insert_child`].
pub fn insert_child(forest: &Forest, parent_id: &NodeId, field: Field, node: ExpressionNode) -> Forest {
    try_insert_child(forest, parent_id, field, node).unwrap_or_else(|err| {
        skipped(err);
        forest.clone()
    })
}

/// Appends `node` to the end of the top-level sequence.
pub fn try_append(forest: &Forest, node: ExpressionNode) -> Result<Forest, EditError> {
    ensure_fresh(forest, &node, None)?;
    Ok(Forest::from(forest.roots().pushed(node)))
}

/// Permissive form of [`try_append`].
pub fn append(forest: &Forest, node: ExpressionNode) -> Forest {
    try_append(forest, node).unwrap_or_else(|err| {
        skipped(err);
        forest.clone()
    })
}

/// Sets the content of the `text` node with identifier `node_id`.
pub fn try_update_content(
    forest: &Forest,
    node_id: &NodeId,
    content: &str,
) -> Result<Forest, EditError> {
    let node = forest.find(node_id).ok_or_else(|| EditError::NotFound(node_id.clone()))?;
    let updated = node.with_content(content).ok_or_else(|| EditError::NotText {
        id: node_id.clone(),
        kind: node.kind(),
    })?;
    Ok(substitute(forest, node_id, updated))
}

/// Permissive form of [`try_update_content`].
pub fn update_content(forest: &Forest, node_id: &NodeId, content: &str) -> Forest {
    try_update_content(forest, node_id, content).unwrap_or_else(|err| {
        skipped(err);
        forest.clone()
    })
}

/// Removes the node with identifier `node_id` from whichever sequence holds it, together with its
/// entire subtree. Descendants of the removed node are never promoted into its place.
pub fn try_remove_node(forest: &Forest, node_id: &NodeId) -> Result<Forest, EditError> {
    if !forest.contains(node_id) {
        return Err(EditError::NotFound(node_id.clone()));
    }

    let roots = rewrite_sequence(forest.roots(), &mut |node| {
        if node.id == *node_id {
            Visit::Remove
        } else {
            Visit::Descend
        }
    });
    Ok(roots.map_or_else(|| forest.clone(), Forest::from))
}

/// Permissive form of [`try_remove_node`].
pub fn remove_node(forest: &Forest, node_id: &NodeId) -> Forest {
    try_remove_node(forest, node_id).unwrap_or_else(|err| {
        skipped(err);
        forest.clone()
    })
}

/// Replaces the node with identifier `node_id`, and its subtree, by `node`, keeping its position
/// among its siblings.
///
/// Identifiers of the replaced subtree may be reused by `node`; any other identifier of `node`
/// must be new to the forest.
pub fn try_replace_node(
    forest: &Forest,
    node_id: &NodeId,
    node: ExpressionNode,
) -> Result<Forest, EditError> {
    let old = forest.find(node_id).ok_or_else(|| EditError::NotFound(node_id.clone()))?;
    ensure_fresh(forest, &node, Some(old))?;
    Ok(substitute(forest, node_id, node))
}

/// Permissive form of [`try_replace_node`].
pub fn replace_node(forest: &Forest, node_id: &NodeId, node: ExpressionNode) -> Forest {
    try_replace_node(forest, node_id, node).unwrap_or_else(|err| {
        skipped(err);
        forest.clone()
    })
}
