use std::fmt;

use tracing::{debug, info, instrument};

use crate::{
    Id3Error,
    attribute::{AttributeId, Domain, DomainTable, Schema},
    example::{ClassCounts, Example},
    node::{Node, NodeIndex},
};

/// Policy for choosing the majority label when several labels are equally frequent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TieBreak {
    /// The tied label encountered first in the example order wins.
    #[default]
    FirstSeen,
    /// The lexicographically smallest tied label wins, independent of example order.
    Lexicographic,
}

impl TieBreak {
    fn majority<'a>(self, counts: &ClassCounts<'a>) -> Option<&'a str> {
        match self {
            TieBreak::FirstSeen => counts.most_common(),
            TieBreak::Lexicographic => counts.most_common_lexicographic(),
        }
    }
}

/// Configuration for ID3 decision tree induction.
///
/// Construct via [`Id3Config::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter   | Default     |
/// |-------------|-------------|
/// | `tie_break` | `FirstSeen` |
#[derive(Debug, Clone, Default)]
pub struct Id3Config {
    pub(crate) tie_break: TieBreak,
}

impl Id3Config {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tie_break: TieBreak::FirstSeen,
        }
    }

    /// Set the majority-label tie-break policy.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Return the majority-label tie-break policy.
    #[must_use]
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Induce a decision tree from `examples` described by `schema`.
    ///
    /// Among equally informative attributes the one earliest in the schema is
    /// chosen.
    ///
    /// # Errors
    ///
    /// | Variant                              | When                                          |
    /// |--------------------------------------|-----------------------------------------------|
    /// | [`Id3Error::EmptyDataset`]           | `examples` is empty                           |
    /// | [`Id3Error::FeatureCountMismatch`]   | an example's value count differs from the schema |
    #[instrument(skip(self, schema, examples), fields(n_examples = examples.len(), n_features = schema.n_features()))]
    pub fn fit(&self, schema: &Schema, examples: &[Example]) -> Result<DecisionTree, Id3Error> {
        if examples.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }

        let n_features = schema.n_features();
        for (example_index, example) in examples.iter().enumerate() {
            if example.n_values() != n_features {
                return Err(Id3Error::FeatureCountMismatch {
                    expected: n_features,
                    got: example.n_values(),
                    example_index,
                });
            }
        }

        let class_labels = Domain::discover_labels(examples);
        debug!(n_classes = class_labels.len(), "class domain discovered");

        let remaining: Vec<AttributeId> = schema.feature_attributes().iter().map(|a| a.id()).collect();
        let subset: Vec<&Example> = examples.iter().collect();

        let mut builder = Builder {
            schema,
            tie_break: self.tie_break,
            domains: DomainTable::new(n_features),
            arena: Vec::new(),
        };
        let root = builder.build(&remaining, &subset, 0);
        debug_assert_eq!(root.map(NodeIndex::index), Some(0));

        let tree = DecisionTree {
            nodes: builder.arena,
            schema: schema.clone(),
            class_labels,
            n_samples: examples.len(),
        };

        info!(
            n_nodes = tree.n_nodes(),
            n_leaves = tree.n_leaves(),
            depth = tree.depth(),
            "decision tree built"
        );

        Ok(tree)
    }
}

/// Recursion state for one induction run.
struct Builder<'s> {
    schema: &'s Schema,
    tie_break: TieBreak,
    domains: DomainTable,
    arena: Vec<Node>,
}

impl Builder<'_> {
    /// Build the subtree for `examples` over the `remaining` feature attributes.
    ///
    /// Returns `None` for an empty subset; the caller substitutes a fallback leaf.
    fn build(&mut self, remaining: &[AttributeId], examples: &[&Example], depth: usize) -> Option<NodeIndex> {
        let counts = ClassCounts::from_examples(examples);
        let majority = self.tie_break.majority(&counts)?;
        let n_samples = examples.len();

        if counts.is_pure() || remaining.is_empty() {
            return Some(self.push_leaf(majority, n_samples, false));
        }

        let (best, gain) = self.select_attribute(remaining, examples);
        debug!(
            attribute = self.schema.attribute(best).name(),
            gain,
            depth,
            n_samples,
            "split selected"
        );

        let values: Vec<String> = self
            .domains
            .get(best)
            .map(|d| d.values().to_vec())
            .unwrap_or_default();
        let child_remaining: Vec<AttributeId> = remaining.iter().copied().filter(|&a| a != best).collect();

        // Reserve the decision slot so the subtree root keeps the lower index.
        let node_idx = self.arena.len();
        self.arena.push(Node::Decision {
            attribute: best,
            branches: Vec::with_capacity(values.len()),
            n_samples,
        });

        let mut branches = Vec::with_capacity(values.len());
        for value in values {
            let partition: Vec<&Example> = examples.iter().copied().filter(|e| e.value(best) == value).collect();

            let branch_idx = self.arena.len();
            self.arena.push(Node::Leaf {
                label: String::new(),
                n_samples: 0,
                fallback: true,
            });

            let child = match self.build(&child_remaining, &partition, depth + 1) {
                Some(child) => child,
                None => {
                    debug!(
                        attribute = self.schema.attribute(best).name(),
                        value = value.as_str(),
                        label = majority,
                        "empty partition, using parent majority"
                    );
                    self.push_leaf(majority, 0, true)
                }
            };

            self.arena[branch_idx] = Node::Branch {
                attribute: best,
                value,
                child,
                n_samples: partition.len(),
            };
            branches.push(NodeIndex::new(branch_idx));
        }

        if let Node::Decision { branches: slot, .. } = &mut self.arena[node_idx] {
            *slot = branches;
        }

        Some(NodeIndex::new(node_idx))
    }

    /// Pick the remaining attribute with strictly maximal information gain.
    ///
    /// Discovers each candidate's domain on first use. Ties keep the earlier
    /// candidate.
    fn select_attribute(&mut self, remaining: &[AttributeId], examples: &[&Example]) -> (AttributeId, f64) {
        let mut best = remaining[0];
        let mut best_gain = -1.0_f64;
        for &id in remaining {
            let domain = self.domains.get_or_discover(id, examples);
            let gain = self.schema.attribute(id).information_gain(domain, examples);
            if gain > best_gain {
                best_gain = gain;
                best = id;
            }
        }
        (best, best_gain)
    }

    fn push_leaf(&mut self, label: &str, n_samples: usize, fallback: bool) -> NodeIndex {
        let idx = self.arena.len();
        self.arena.push(Node::Leaf {
            label: label.to_string(),
            n_samples,
            fallback,
        });
        NodeIndex::new(idx)
    }
}

/// A fitted ID3 decision tree.
///
/// Stored as an arena-based `Vec<Node>` with the root at index 0. Every node
/// is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecisionTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) schema: Schema,
    pub(crate) class_labels: Domain,
    pub(crate) n_samples: usize,
}

impl DecisionTree {
    /// Return the index of the root node.
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }

    /// Return the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this tree.
    #[must_use]
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.index()]
    }

    /// Return every node in arena order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return the schema the tree was trained on.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Return the class labels observed in training, in first-seen order.
    #[must_use]
    pub fn class_labels(&self) -> &[String] {
        self.class_labels.values()
    }

    /// Return the name of the attribute with id `id`.
    #[must_use]
    pub fn attribute_name(&self, id: AttributeId) -> &str {
        self.schema.attribute(id).name()
    }

    /// Return the number of training examples.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Return the total number of nodes (decisions, branches, and leaves).
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of leaf nodes.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Return the largest number of decision nodes on any root-to-leaf path.
    ///
    /// A single-leaf tree has depth 0. Never exceeds the number of feature
    /// attributes, since each attribute is tested at most once per path.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0usize;
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((idx, d)) = stack.pop() {
            let node = self.node(idx);
            let d = if matches!(node, Node::Decision { .. }) { d + 1 } else { d };
            max_depth = max_depth.max(d);
            stack.extend(node.children().iter().map(|&c| (c, d)));
        }
        max_depth
    }

    /// Check the arena invariants every accessor relies on.
    ///
    /// Children always sit after their parent in the arena, so a tree that
    /// passes has no cycles. Returns a description of the first violation.
    pub(crate) fn check_structure(&self) -> Result<(), String> {
        if self.schema.attributes().is_empty() {
            return Err("schema has no attributes".to_string());
        }
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        let n_features = self.schema.n_features();
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(attribute) = node.attribute()
                && attribute.index() >= n_features
            {
                return Err(format!(
                    "node {i} tests attribute {attribute}, schema has {n_features} features"
                ));
            }
            for &child in node.children() {
                if child.index() <= i || child.index() >= self.nodes.len() {
                    return Err(format!("node {i} has out-of-order child {child}"));
                }
                let child_node = &self.nodes[child.index()];
                let shape_ok = match node {
                    Node::Decision { .. } => matches!(child_node, Node::Branch { .. }),
                    _ => !matches!(child_node, Node::Branch { .. }),
                };
                if !shape_ok {
                    return Err(format!("node {i} has child {child} of the wrong kind"));
                }
            }
        }
        Ok(())
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, idx: NodeIndex, indent: &str) -> fmt::Result {
        match self.node(idx) {
            Node::Decision { branches, .. } => {
                for &branch in branches {
                    self.write_node(f, branch, indent)?;
                }
                Ok(())
            }
            Node::Branch {
                attribute,
                value,
                child,
                ..
            } => {
                writeln!(f, "{indent}[{} = {value}]", self.attribute_name(*attribute))?;
                self.write_node(f, *child, &format!("{indent}  "))
            }
            Node::Leaf { label, .. } => writeln!(f, "{indent}-> {label}"),
        }
    }
}

/// Pre-order text rendering: each branch prints `[attribute = value]` and
/// indents its subtree by two spaces; leaves print `-> label`.
impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root(), "")
    }
}
