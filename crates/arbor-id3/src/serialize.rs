//! Model serialization and deserialization via bincode.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::error::Id3Error;
use crate::tree::DecisionTree;

/// Current binary format version.
const FORMAT_VERSION: u32 = 1;

/// Versioned envelope for the serialized model.
#[derive(serde::Serialize, serde::Deserialize)]
struct ModelEnvelope {
    /// Format version for compatibility checking.
    format_version: u32,
    /// Number of nodes in the tree.
    n_nodes: usize,
    /// Number of class labels seen in training.
    n_classes: usize,
    /// The serialized tree.
    tree: DecisionTree,
}

impl DecisionTree {
    /// Save the tree to a binary file.
    ///
    /// Uses bincode encoding wrapped in a versioned envelope.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::SerializeModel`] | bincode encoding failed |
    /// | [`Id3Error::WriteModel`] | file write failed |
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Id3Error> {
        let path = path.as_ref();

        let envelope = ModelEnvelope {
            format_version: FORMAT_VERSION,
            n_nodes: self.n_nodes(),
            n_classes: self.class_labels().len(),
            tree: self.clone(),
        };

        let bytes = bincode::serialize(&envelope).map_err(|e| Id3Error::SerializeModel { source: e })?;

        std::fs::write(path, &bytes).map_err(|e| Id3Error::WriteModel {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(size_bytes = bytes.len(), n_nodes = envelope.n_nodes, "model saved");

        Ok(())
    }

    /// Load a tree from a binary file written by [`DecisionTree::save`].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::ReadModel`] | file read failed |
    /// | [`Id3Error::DeserializeModel`] | bincode decoding failed |
    /// | [`Id3Error::IncompatibleModelVersion`] | format version mismatch |
    /// | [`Id3Error::CorruptModel`] | node indices or attribute ids are inconsistent |
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Id3Error> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| Id3Error::ReadModel {
            path: path.to_path_buf(),
            source: e,
        })?;

        let envelope: ModelEnvelope = bincode::deserialize(&bytes).map_err(|e| Id3Error::DeserializeModel {
            path: path.to_path_buf(),
            source: e,
        })?;

        if envelope.format_version != FORMAT_VERSION {
            return Err(Id3Error::IncompatibleModelVersion {
                expected: FORMAT_VERSION,
                found: envelope.format_version,
                path: path.to_path_buf(),
            });
        }

        envelope
            .tree
            .check_structure()
            .map_err(|reason| Id3Error::CorruptModel {
                path: path.to_path_buf(),
                reason,
            })?;

        debug!(n_nodes = envelope.n_nodes, n_classes = envelope.n_classes, "model loaded");

        Ok(envelope.tree)
    }
}
