use crate::node::ExpressionNode;
use std::slice::Iter;

/// An iterator that traverses a sequence of nodes and all of their descendants in left-to-right
/// pre-order (i.e. depth-first, parents before children). Child fields are visited in the order
/// given by [`NodeKind::fields`](crate::kind::NodeKind::fields).
///
/// This iterator is created by [`Forest::descendants`](crate::node::Forest::descendants) and
/// [`ExpressionNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<Iter<'a, ExpressionNode>>,
}

impl<'a> Descendants<'a> {
    /// Creates a new iterator over the given nodes and their descendants.
    pub fn new(nodes: &'a [ExpressionNode]) -> Self {
        Self { stack: vec![nodes.iter()] }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ExpressionNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(node) => {
                    // pushed in reverse so that the first field is on top of the stack
                    let fields = node.kind().fields();
                    for field in fields.iter().rev() {
                        if let Some(seq) = node.field(*field) {
                            self.stack.push(seq.iter());
                        }
                    }
                    return Some(node);
                },
                None => {
                    self.stack.pop();
                },
            }
        }
    }
}
