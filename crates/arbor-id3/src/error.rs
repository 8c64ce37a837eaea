use std::path::PathBuf;

/// Errors from decision tree induction, classification, and model persistence.
#[derive(Debug, thiserror::Error)]
pub enum Id3Error {
    /// Returned when a schema is built from an empty attribute list.
    #[error("attribute list is empty; at least the class attribute is required")]
    NoAttributes,

    /// Returned when induction is invoked with zero examples.
    #[error("training dataset has zero examples")]
    EmptyDataset,

    /// Returned when an example carries a different number of values than the schema has features.
    #[error("example {example_index} has {got} values, expected {expected}")]
    FeatureCountMismatch {
        /// The number of feature attributes in the schema.
        expected: usize,
        /// The number of values the example carries.
        got: usize,
        /// The zero-based index of the offending example.
        example_index: usize,
    },

    /// Returned when a row handed to classification has the wrong number of values.
    #[error("classification input has {got} values, expected {expected}")]
    PredictionFeatureMismatch {
        /// The number of feature attributes in the schema.
        expected: usize,
        /// The number of values supplied.
        got: usize,
    },

    /// Returned when classification reaches a decision on a value the tree never saw.
    #[error("no branch for value \"{value}\" of attribute \"{attribute}\"")]
    UnknownValue {
        /// Name of the attribute tested at the decision node.
        attribute: String,
        /// The value carried by the row being classified.
        value: String,
    },

    /// Returned when a confusion matrix is built over zero predictions.
    #[error("cannot evaluate over zero examples")]
    EmptyEvaluation,

    /// Returned when model serialization fails.
    #[error("failed to serialize model")]
    SerializeModel {
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when model deserialization fails.
    #[error("failed to deserialize model from {path}")]
    DeserializeModel {
        /// Path to the model file that could not be deserialized.
        path: PathBuf,
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when writing the model file fails.
    #[error("failed to write model to {path}")]
    WriteModel {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when reading the model file fails.
    #[error("failed to read model from {path}")]
    ReadModel {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when loading a model with an incompatible format version.
    #[error("incompatible model version in {path}: expected {expected}, found {found}")]
    IncompatibleModelVersion {
        /// The model format version this build expects.
        expected: u32,
        /// The model format version found in the file.
        found: u32,
        /// Path to the model file with the incompatible version.
        path: PathBuf,
    },

    /// Returned when a model file decodes but describes an inconsistent tree.
    #[error("corrupt model in {path}: {reason}")]
    CorruptModel {
        /// Path to the model file.
        path: PathBuf,
        /// Which structural check failed.
        reason: String,
    },
}
