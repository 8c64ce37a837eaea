//! Confusion matrix and per-class classification metrics.

use std::fmt;

use crate::error::Id3Error;

/// A confusion matrix over named class labels.
///
/// Entry `matrix[true_class][predicted_class]` counts how many examples with
/// true label `labels[true_class]` were predicted as `labels[predicted_class]`.
/// Examples the tree could not classify are counted separately.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    matrix: Vec<Vec<usize>>,
    n_unclassified: usize,
}

/// Per-class precision, recall, and F1 score.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ClassMetrics {
    /// The class label.
    pub label: String,
    /// Precision: TP / (TP + FP). 0.0 if no predictions for this class.
    pub precision: f64,
    /// Recall: TP / (TP + FN). 0.0 if no true examples for this class.
    pub recall: f64,
    /// F1: 2 * precision * recall / (precision + recall). 0.0 if both are zero.
    pub f1: f64,
    /// Number of true examples in this class.
    pub support: usize,
}

impl ConfusionMatrix {
    /// Build a confusion matrix from true labels and optional predictions.
    ///
    /// `class_labels` fixes the row/column order; true labels missing from it
    /// are appended in first-seen order. A `None` prediction counts as
    /// unclassified and as a miss.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::EmptyEvaluation`] | Zero labels provided |
    pub fn from_labels(
        true_labels: &[&str],
        predicted: &[Option<&str>],
        class_labels: &[String],
    ) -> Result<Self, Id3Error> {
        if true_labels.is_empty() {
            return Err(Id3Error::EmptyEvaluation);
        }

        let mut labels: Vec<String> = class_labels.to_vec();
        for &t in true_labels {
            if !labels.iter().any(|l| l == t) {
                labels.push(t.to_string());
            }
        }

        let n_classes = labels.len();
        let position = |label: &str| labels.iter().position(|l| l == label);
        let mut matrix = vec![vec![0usize; n_classes]; n_classes];
        let mut n_unclassified = 0;
        for (&t, p) in true_labels.iter().zip(predicted.iter()) {
            match (position(t), p.and_then(position)) {
                (Some(ti), Some(pi)) => matrix[ti][pi] += 1,
                _ => n_unclassified += 1,
            }
        }

        Ok(Self {
            labels,
            matrix,
            n_unclassified,
        })
    }

    /// Overall accuracy: correct predictions over all examples, unclassified included.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..self.n_classes()).map(|i| self.matrix[i][i]).sum();
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        }
    }

    /// Per-class precision, recall, F1, and support.
    #[must_use]
    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        let n = self.n_classes();
        (0..n)
            .map(|c| {
                let tp = self.matrix[c][c];
                let fp: usize = (0..n).filter(|&i| i != c).map(|i| self.matrix[i][c]).sum();
                let fn_: usize = (0..n).filter(|&j| j != c).map(|j| self.matrix[c][j]).sum();
                let support = tp + fn_;
                let precision = if tp + fp == 0 {
                    0.0
                } else {
                    tp as f64 / (tp + fp) as f64
                };
                let recall = if support == 0 {
                    0.0
                } else {
                    tp as f64 / support as f64
                };
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    label: self.labels[c].clone(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect()
    }

    /// Return the underlying matrix rows.
    #[must_use]
    pub fn as_rows(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// Return the class labels in row/column order.
    #[must_use]
    pub fn class_labels(&self) -> &[String] {
        &self.labels
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Return the number of examples the tree could not classify.
    #[must_use]
    pub fn n_unclassified(&self) -> usize {
        self.n_unclassified
    }

    /// Return the number of evaluated examples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum::<usize>() + self.n_unclassified
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.labels.iter().map(String::len).max().unwrap_or(0).max(5);

        write!(f, "{:>width$}", "")?;
        for label in &self.labels {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f)?;

        for (label, row) in self.labels.iter().zip(&self.matrix) {
            write!(f, "{label:>width$}")?;
            for val in row {
                write!(f, " {val:>width$}")?;
            }
            writeln!(f)?;
        }

        if self.n_unclassified > 0 {
            writeln!(f, "unclassified: {}", self.n_unclassified)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn perfect_predictions() {
        let truth = ["a", "a", "b", "b", "c", "c"];
        let predicted: Vec<Option<&str>> = truth.iter().copied().map(Some).collect();
        let cm = ConfusionMatrix::from_labels(&truth, &predicted, &labels(&["a", "b", "c"])).unwrap();
        assert!((cm.accuracy() - 1.0).abs() < f64::EPSILON);

        for m in cm.class_metrics() {
            assert!((m.precision - 1.0).abs() < f64::EPSILON);
            assert!((m.recall - 1.0).abs() < f64::EPSILON);
            assert!((m.f1 - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn known_confusion_matrix() {
        let truth = ["a", "a", "a", "b", "b", "b", "c", "c", "c"];
        let predicted = [
            Some("a"), Some("a"), Some("b"),
            Some("b"), Some("b"), Some("c"),
            Some("c"), Some("c"), Some("a"),
        ];
        let cm = ConfusionMatrix::from_labels(&truth, &predicted, &labels(&["a", "b", "c"])).unwrap();

        // Class a: TP=2, FP=1 (from c), FN=1 (to b)
        let metrics = cm.class_metrics();
        assert_eq!(metrics[0].label, "a");
        assert!((metrics[0].precision - 2.0 / 3.0).abs() < 1e-10);
        assert!((metrics[0].recall - 2.0 / 3.0).abs() < 1e-10);
        assert_eq!(metrics[0].support, 3);

        assert!((cm.accuracy() - 6.0 / 9.0).abs() < 1e-10);
    }

    #[test]
    fn empty_labels_error() {
        let err = ConfusionMatrix::from_labels(&[], &[], &labels(&["a"])).unwrap_err();
        assert!(matches!(err, Id3Error::EmptyEvaluation));
    }

    #[test]
    fn unseen_true_label_gets_a_row() {
        let cm = ConfusionMatrix::from_labels(
            &["Yes", "Maybe"],
            &[Some("Yes"), Some("Yes")],
            &labels(&["No", "Yes"]),
        )
        .unwrap();
        assert_eq!(cm.class_labels(), ["No", "Yes", "Maybe"]);
        assert_eq!(cm.as_rows()[2], vec![0, 1, 0]);
        assert!((cm.accuracy() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unclassified_counts_as_miss() {
        let cm = ConfusionMatrix::from_labels(&["a", "a"], &[Some("a"), None], &labels(&["a"])).unwrap();
        assert_eq!(cm.n_unclassified(), 1);
        assert_eq!(cm.total(), 2);
        assert!((cm.accuracy() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn display_formatting() {
        let cm = ConfusionMatrix::from_labels(&["No", "Yes"], &[Some("No"), None], &labels(&["No", "Yes"])).unwrap();
        let output = format!("{cm}");
        assert!(output.contains("Yes"));
        assert!(output.contains("unclassified: 1"));
    }
}
