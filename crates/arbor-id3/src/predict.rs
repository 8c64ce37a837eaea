//! Classification with a fitted decision tree.

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::confusion::ConfusionMatrix;
use crate::error::Id3Error;
use crate::example::Example;
use crate::node::{Node, NodeIndex};
use crate::tree::DecisionTree;

impl DecisionTree {
    /// Predict the class label for one row of feature values.
    ///
    /// At each decision node, follows the branch whose value equals the row's
    /// value for the tested attribute.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::PredictionFeatureMismatch`] | `values.len()` differs from the schema's feature count |
    /// | [`Id3Error::UnknownValue`] | a tested value has no branch |
    pub fn classify<S: AsRef<str>>(&self, values: &[S]) -> Result<&str, Id3Error> {
        let leaf = self.leaf_for(values)?;
        match self.node(leaf) {
            Node::Leaf { label, .. } => Ok(label),
            _ => unreachable!("leaf_for always ends at a leaf"),
        }
    }

    /// Predict class labels for a batch of rows in parallel.
    ///
    /// # Errors
    ///
    /// Returns the first error any row produces.
    pub fn classify_batch<S>(&self, rows: &[Vec<S>]) -> Result<Vec<&str>, Id3Error>
    where
        S: AsRef<str> + Sync,
    {
        rows.par_iter().map(|row| self.classify(row.as_slice())).collect()
    }

    /// Classify every example and tabulate the outcome against its label.
    ///
    /// Examples that cannot be classified (unseen value or wrong arity) are
    /// counted in [`ConfusionMatrix::n_unclassified`] rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::EmptyEvaluation`] when `examples` is empty.
    pub fn evaluate(&self, examples: &[Example]) -> Result<ConfusionMatrix, Id3Error> {
        let predictions: Vec<Option<&str>> = examples
            .par_iter()
            .map(|e| self.classify(e.values()).ok())
            .collect();
        let truth: Vec<&str> = examples.iter().map(Example::label).collect();
        ConfusionMatrix::from_labels(&truth, &predictions, self.class_labels())
    }

    /// Walk from the root to the leaf selected by `values`.
    fn leaf_for<S: AsRef<str>>(&self, values: &[S]) -> Result<NodeIndex, Id3Error> {
        let expected = self.schema.n_features();
        if values.len() != expected {
            return Err(Id3Error::PredictionFeatureMismatch {
                expected,
                got: values.len(),
            });
        }

        let mut idx = self.root();
        loop {
            match self.node(idx) {
                Node::Leaf { .. } => return Ok(idx),
                Node::Branch { child, .. } => idx = *child,
                Node::Decision {
                    attribute,
                    branches,
                    ..
                } => {
                    let value = values[attribute.index()].as_ref();
                    idx = branches
                        .iter()
                        .copied()
                        .find(|&b| self.node(b).value() == Some(value))
                        .ok_or_else(|| Id3Error::UnknownValue {
                            attribute: self.attribute_name(*attribute).to_string(),
                            value: value.to_string(),
                        })?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Example, Id3Config, Id3Error, Schema};

    fn ex(values: &[&str], label: &str) -> Example {
        Example::new(values.iter().map(|v| v.to_string()).collect(), label)
    }

    fn wind_tree() -> crate::DecisionTree {
        let schema = Schema::new(["Outlook", "Wind", "Play"]).unwrap();
        let examples = vec![
            ex(&["Sunny", "Weak"], "Yes"),
            ex(&["Sunny", "Strong"], "No"),
            ex(&["Rain", "Weak"], "Yes"),
            ex(&["Rain", "Strong"], "No"),
        ];
        Id3Config::new().fit(&schema, &examples).unwrap()
    }

    #[test]
    fn classify_follows_matching_branch() {
        let tree = wind_tree();
        assert_eq!(tree.classify(&["Sunny", "Weak"]).unwrap(), "Yes");
        assert_eq!(tree.classify(&["Rain", "Strong"]).unwrap(), "No");
    }

    #[test]
    fn classify_unknown_value() {
        let tree = wind_tree();
        let err = tree.classify(&["Sunny", "Gale"]).unwrap_err();
        assert!(matches!(err, Id3Error::UnknownValue { ref attribute, ref value }
            if attribute == "Wind" && value == "Gale"));
    }

    #[test]
    fn classify_feature_mismatch() {
        let tree = wind_tree();
        let err = tree.classify(&["Sunny"]).unwrap_err();
        assert!(matches!(
            err,
            Id3Error::PredictionFeatureMismatch { expected: 2, got: 1 }
        ));
    }

    #[test]
    fn batch_matches_single() {
        let tree = wind_tree();
        let rows = vec![
            vec!["Sunny".to_string(), "Weak".to_string()],
            vec!["Rain".to_string(), "Strong".to_string()],
        ];
        let labels = tree.classify_batch(&rows).unwrap();
        assert_eq!(labels, ["Yes", "No"]);
    }

    #[test]
    fn evaluate_counts_unclassified() {
        let tree = wind_tree();
        let holdout = vec![
            ex(&["Sunny", "Weak"], "Yes"),
            ex(&["Rain", "Strong"], "Yes"),
            ex(&["Fog", "Gale"], "Yes"),
        ];
        let cm = tree.evaluate(&holdout).unwrap();
        assert_eq!(cm.n_unclassified(), 1);
        assert_eq!(cm.total(), 3);
        assert!((cm.accuracy() - 1.0 / 3.0).abs() < 1e-12);
    }
}
