//! ID3 decision tree induction over categorical data.
//!
//! Builds a decision tree from labeled examples by greedily splitting on the
//! attribute with the highest information gain. Provides the attribute and
//! example data model, entropy and gain computation, the arena-based tree
//! with text rendering, classification, evaluation, and model serialization.
//! No file parsing happens here.

mod attribute;
mod confusion;
mod entropy;
mod error;
mod example;
mod node;
mod predict;
mod serialize;
mod tree;

pub use attribute::{Attribute, AttributeId, Domain, Schema};
pub use confusion::{ClassMetrics, ConfusionMatrix};
pub use entropy::{entropy, entropy_from_counts};
pub use error::Id3Error;
pub use example::{ClassCounts, Example};
pub use node::{Node, NodeIndex};
pub use tree::{DecisionTree, Id3Config, TieBreak};
