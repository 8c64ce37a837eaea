//! Depth-first layout walk for drawing a decision tree.

use arbor_id3::{DecisionTree, Node, NodeIndex};
use serde::Serialize;

/// Vertical distance between consecutive siblings.
const Y_OFFSET: f64 = 1.5;

/// Role of a laid-out node, used by renderers to pick a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// A node testing one attribute.
    Decision,
    /// A value-tagged edge node under a decision.
    Branch,
    /// A terminal node carrying a class label.
    Leaf,
}

/// One node of the drawing: identifier, position, label, and parent edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    /// `root` for the root, `{parent}_h{i}` for the `i`-th child of `parent`.
    pub id: String,
    /// Identifier of the parent node, `None` for the root.
    pub parent: Option<String>,
    /// Class label for leaves, `{attribute}` for decisions, `{attribute} = {value}` for branches.
    pub label: String,
    /// Which kind of tree node this entry draws.
    pub kind: LayoutKind,
    /// Horizontal position: one unit per level below the root.
    pub x: f64,
    /// Vertical position: `1.5` units per sibling below the parent.
    pub y: f64,
    /// Number of edges from the root.
    pub depth: usize,
}

/// Walk `tree` depth-first and assign every node an id, position, and label.
///
/// Child `i` of a node at `(x, y)` is placed at `(x + 1, y - 1.5 * (i + 1))`.
/// Entries are returned in pre-order, so a parent always precedes its children.
#[must_use]
pub fn layout(tree: &DecisionTree) -> Vec<LayoutNode> {
    let mut out = Vec::with_capacity(tree.n_nodes());
    place(tree, tree.root(), None, "root".to_string(), 0.0, 0.0, 0, &mut out);
    out
}

#[allow(clippy::too_many_arguments)]
fn place(
    tree: &DecisionTree,
    idx: NodeIndex,
    parent: Option<&str>,
    id: String,
    x: f64,
    y: f64,
    depth: usize,
    out: &mut Vec<LayoutNode>,
) {
    let node = tree.node(idx);
    let (label, kind) = match node {
        Node::Leaf { label, .. } => (label.clone(), LayoutKind::Leaf),
        Node::Decision { attribute, .. } => (tree.attribute_name(*attribute).to_string(), LayoutKind::Decision),
        Node::Branch { attribute, value, .. } => (
            format!("{} = {}", tree.attribute_name(*attribute), value),
            LayoutKind::Branch,
        ),
    };

    out.push(LayoutNode {
        id: id.clone(),
        parent: parent.map(String::from),
        label,
        kind,
        x,
        y,
        depth,
    });

    for (i, &child) in node.children().iter().enumerate() {
        let child_id = format!("{id}_h{i}");
        let child_y = y - Y_OFFSET * (i + 1) as f64;
        place(tree, child, Some(&id), child_id, x + 1.0, child_y, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_id3::{Example, Id3Config, Schema};

    fn wind_tree() -> DecisionTree {
        let schema = Schema::new(["Wind", "Play"]).unwrap();
        let examples = vec![
            Example::new(vec!["Weak".into()], "Yes"),
            Example::new(vec!["Strong".into()], "No"),
        ];
        Id3Config::new().fit(&schema, &examples).unwrap()
    }

    #[test]
    fn ids_labels_and_positions() {
        let nodes = layout(&wind_tree());
        let summary: Vec<(&str, &str, f64, f64)> = nodes
            .iter()
            .map(|n| (n.id.as_str(), n.label.as_str(), n.x, n.y))
            .collect();
        assert_eq!(
            summary,
            [
                ("root", "Wind", 0.0, 0.0),
                ("root_h0", "Wind = Weak", 1.0, -1.5),
                ("root_h0_h0", "Yes", 2.0, -3.0),
                ("root_h1", "Wind = Strong", 1.0, -3.0),
                ("root_h1_h0", "No", 2.0, -4.5),
            ]
        );
    }

    #[test]
    fn parents_precede_children() {
        let nodes = layout(&wind_tree());
        assert_eq!(nodes[0].parent, None);
        for (i, node) in nodes.iter().enumerate().skip(1) {
            let parent = node.parent.as_deref().unwrap();
            let parent_pos = nodes.iter().position(|n| n.id == parent).unwrap();
            assert!(parent_pos < i);
            assert_eq!(nodes[parent_pos].depth + 1, node.depth);
        }
    }

    #[test]
    fn single_leaf_tree() {
        let schema = Schema::new(["Wind", "Play"]).unwrap();
        let examples = vec![Example::new(vec!["Weak".into()], "Yes")];
        let tree = Id3Config::new().fit(&schema, &examples).unwrap();
        let nodes = layout(&tree);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind, LayoutKind::Leaf);
        assert_eq!(nodes[0].label, "Yes");
    }
}
