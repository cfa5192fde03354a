use std::fmt;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An opaque identifier for an [`ExpressionNode`](crate::node::ExpressionNode).
///
/// Identifiers are the only way tree operations address nodes. They are assigned once, when the
/// node is created by an [`IdGenerator`], and are never reused within an editing session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NodeId(String);

impl NodeId {
    /// Wraps an existing identifier string, e.g. one received back from the host UI.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A source of fresh, never-repeating [`NodeId`]s.
pub trait IdGenerator {
    /// Returns an identifier that this generator has never returned before.
    fn next_id(&mut self) -> NodeId;
}

/// Generates random version 4 UUIDs. This is the default generator of a
/// [`Picker`](crate::picker::Picker).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> NodeId {
        NodeId(Uuid::new_v4().to_string())
    }
}

/// Generates short, human-typeable identifiers of the form `<prefix><n>`, counting up from 1.
///
/// Useful when identifiers have to be typed back by a person, or when tests need to know the
/// identifiers in advance.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Creates a generator that produces `n1`, `n2`, ...
    pub fn new() -> Self {
        Self::with_prefix("n")
    }

    /// Creates a generator that produces `<prefix>1`, `<prefix>2`, ...
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: 1 }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::with_prefix("q");
        assert_eq!(ids.next_id().as_str(), "q1");
        assert_eq!(ids.next_id().as_str(), "q2");
        assert_eq!(ids.next_id().as_str(), "q3");
    }

    #[test]
    fn uuid_ids_are_distinct() {
        let mut ids = UuidIds;
        let generated = (0..64).map(|_| ids.next_id()).collect::<HashSet<_>>();
        assert_eq!(generated.len(), 64);
    }
}
