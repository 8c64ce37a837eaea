use std::fmt;
use std::slice;

use crate::attribute::AttributeId;

/// Index into a `Vec<Node>` arena, identifying a specific node in a decision tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Create a new node index from a zero-based arena position.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in a decision tree arena.
///
/// A `Decision` node tests one attribute and owns one `Branch` per value of
/// that attribute's domain. Each `Branch` carries the value that leads to it
/// and owns exactly one child: a `Leaf` or a further `Decision`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Node {
    /// An interior node choosing a branch by the value of `attribute`.
    Decision {
        /// Attribute tested at this node.
        attribute: AttributeId,
        /// One branch per domain value, in domain order.
        branches: Vec<NodeIndex>,
        /// Number of training examples that reached this node.
        n_samples: usize,
    },
    /// A value-tagged wrapper between a decision node and its subtree.
    Branch {
        /// Attribute tested by the parent decision node.
        attribute: AttributeId,
        /// The attribute value that selects this branch.
        value: String,
        /// The single subtree under this branch.
        child: NodeIndex,
        /// Number of training examples carrying `value`.
        n_samples: usize,
    },
    /// A terminal node carrying a class label.
    Leaf {
        /// Predicted class label.
        label: String,
        /// Number of training examples in this leaf.
        n_samples: usize,
        /// `true` when no training example reached this leaf and the label is
        /// the parent subset's majority.
        fallback: bool,
    },
}

impl Node {
    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Return the attribute tested at (or leading to) this node.
    #[must_use]
    pub fn attribute(&self) -> Option<AttributeId> {
        match self {
            Node::Decision { attribute, .. } | Node::Branch { attribute, .. } => Some(*attribute),
            Node::Leaf { .. } => None,
        }
    }

    /// Return the parent attribute value that leads to this node.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Branch { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Return the class label of a leaf.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Node::Leaf { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Return the children of this node in order.
    #[must_use]
    pub fn children(&self) -> &[NodeIndex] {
        match self {
            Node::Decision { branches, .. } => branches,
            Node::Branch { child, .. } => slice::from_ref(child),
            Node::Leaf { .. } => &[],
        }
    }

    /// Return the number of training examples that reached this node.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        match self {
            Node::Decision { n_samples, .. }
            | Node::Branch { n_samples, .. }
            | Node::Leaf { n_samples, .. } => *n_samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_leaf() -> Node {
        Node::Leaf {
            label: "Yes".to_string(),
            n_samples: 4,
            fallback: false,
        }
    }

    fn make_branch() -> Node {
        Node::Branch {
            attribute: AttributeId::new(0),
            value: "Overcast".to_string(),
            child: NodeIndex::new(3),
            n_samples: 4,
        }
    }

    fn make_decision() -> Node {
        Node::Decision {
            attribute: AttributeId::new(0),
            branches: vec![NodeIndex::new(1), NodeIndex::new(2)],
            n_samples: 14,
        }
    }

    #[test]
    fn node_index_roundtrip() {
        let ni = NodeIndex::new(42);
        assert_eq!(ni.index(), 42);
        assert_eq!(format!("{ni}"), "42");
    }

    #[test]
    fn leaf_accessors() {
        let leaf = make_leaf();
        assert!(leaf.is_leaf());
        assert_eq!(leaf.label(), Some("Yes"));
        assert_eq!(leaf.attribute(), None);
        assert_eq!(leaf.value(), None);
        assert!(leaf.children().is_empty());
        assert_eq!(leaf.n_samples(), 4);
    }

    #[test]
    fn branch_has_single_child() {
        let branch = make_branch();
        assert!(!branch.is_leaf());
        assert_eq!(branch.value(), Some("Overcast"));
        assert_eq!(branch.label(), None);
        assert_eq!(branch.children(), &[NodeIndex::new(3)]);
    }

    #[test]
    fn decision_children_in_order() {
        let decision = make_decision();
        assert!(!decision.is_leaf());
        assert_eq!(decision.attribute(), Some(AttributeId::new(0)));
        assert_eq!(decision.value(), None);
        assert_eq!(decision.children(), &[NodeIndex::new(1), NodeIndex::new(2)]);
        assert_eq!(decision.n_samples(), 14);
    }
}
