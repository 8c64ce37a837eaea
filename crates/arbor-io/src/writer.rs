//! JSON and Graphviz result writers for trained trees and evaluations.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use arbor_id3::{ClassMetrics, ConfusionMatrix, DecisionTree};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::experiment::ExperimentName;
use crate::layout::{layout, LayoutKind, LayoutNode};
use crate::IoError;

/// Writes tree and evaluation artifacts for one experiment.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_tree.json`, `{experiment}_tree.dot`,
/// `{experiment}_evaluate.json`, and `{experiment}_model.bin`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Write the tree summary and layout to `{experiment}_tree.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_tree(&self, tree: &DecisionTree) -> Result<PathBuf, IoError> {
        let path = self.artifact_path("tree.json");

        let artifact = TreeArtifact {
            experiment: self.experiment.as_str(),
            attributes: tree.schema().attributes().iter().map(|a| a.name()).collect(),
            class_labels: tree.class_labels(),
            n_samples: tree.n_samples(),
            n_nodes: tree.n_nodes(),
            n_leaves: tree.n_leaves(),
            depth: tree.depth(),
            text: tree.to_string(),
            nodes: layout(tree),
        };

        self.write_json(&path, &artifact)?;
        info!(path = %path.display(), "tree written");
        Ok(path)
    }

    /// Write the tree as a Graphviz digraph to `{experiment}_tree.dot`.
    ///
    /// Node positions from [`layout`] are emitted as pinned `pos` attributes,
    /// so `neato -n` reproduces the layout exactly.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_dot(&self, tree: &DecisionTree) -> Result<PathBuf, IoError> {
        let path = self.artifact_path("tree.dot");
        let dot = render_dot(self.experiment.as_str(), &layout(tree));

        fs::write(&path, dot).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "dot graph written");
        Ok(path)
    }

    /// Write evaluation results to `{experiment}_evaluate.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_evaluation(&self, n_examples: usize, confusion: &ConfusionMatrix) -> Result<PathBuf, IoError> {
        let path = self.artifact_path("evaluate.json");

        let artifact = EvaluateArtifact {
            experiment: self.experiment.as_str(),
            n_examples,
            accuracy: confusion.accuracy(),
            n_unclassified: confusion.n_unclassified(),
            class_labels: confusion.class_labels(),
            confusion_matrix: confusion.as_rows(),
            class_metrics: confusion.class_metrics(),
        };

        self.write_json(&path, &artifact)?;
        info!(path = %path.display(), "evaluation result written");
        Ok(path)
    }

    /// Return the path where the model binary should be saved.
    ///
    /// Does not write anything, just computes `{output_dir}/{experiment}_model.bin`.
    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        self.artifact_path("model.bin")
    }

    fn artifact_path(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(self.experiment.file_name(suffix))
    }

    fn write_json<T: Serialize>(&self, path: &Path, artifact: &T) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(artifact).map_err(|e| IoError::EncodeJson {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, json).map_err(|e| IoError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn render_dot(name: &str, nodes: &[LayoutNode]) -> String {
    let mut dot = String::new();
    // Writing into a String never fails.
    let _ = writeln!(dot, "digraph \"{}\" {{", escape(name));
    let _ = writeln!(dot, "  node [fontsize=10];");
    for node in nodes {
        let shape = match node.kind {
            LayoutKind::Decision => "ellipse",
            LayoutKind::Branch => "box",
            LayoutKind::Leaf => "box, style=filled, fillcolor=lightblue",
        };
        let _ = writeln!(
            dot,
            "  \"{}\" [label=\"{}\", shape={shape}, pos=\"{},{}!\"];",
            node.id,
            escape(&node.label),
            node.x,
            node.y
        );
    }
    for node in nodes {
        if let Some(parent) = &node.parent {
            let _ = writeln!(dot, "  \"{parent}\" -> \"{}\";", node.id);
        }
    }
    dot.push_str("}\n");
    dot
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct TreeArtifact<'a> {
    experiment: &'a str,
    attributes: Vec<&'a str>,
    class_labels: &'a [String],
    n_samples: usize,
    n_nodes: usize,
    n_leaves: usize,
    depth: usize,
    text: String,
    nodes: Vec<LayoutNode>,
}

#[derive(Serialize)]
struct EvaluateArtifact<'a> {
    experiment: &'a str,
    n_examples: usize,
    accuracy: f64,
    n_unclassified: usize,
    class_labels: &'a [String],
    confusion_matrix: &'a [Vec<usize>],
    class_metrics: Vec<ClassMetrics>,
}
