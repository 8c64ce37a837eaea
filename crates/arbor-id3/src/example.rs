//! Training examples and class label frequency tables.

use crate::attribute::AttributeId;

/// A single labeled training example.
///
/// `values[i]` is the value of the feature attribute with id `i`; the class
/// label is stored separately. Examples are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Example {
    values: Vec<String>,
    label: String,
}

impl Example {
    /// Create a new example from its feature values and class label.
    pub fn new(values: Vec<String>, label: impl Into<String>) -> Self {
        Self {
            values,
            label: label.into(),
        }
    }

    /// Return the value of the given feature attribute.
    ///
    /// # Panics
    ///
    /// Panics if `attribute` is out of range for this example. Induction
    /// validates arity up front, so in-crate callers never hit this.
    #[must_use]
    pub fn value(&self, attribute: AttributeId) -> &str {
        &self.values[attribute.index()]
    }

    /// Return all feature values in attribute order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Return the class label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Return the number of feature values.
    #[must_use]
    pub fn n_values(&self) -> usize {
        self.values.len()
    }
}

/// Class label frequencies over a collection of examples.
///
/// Labels are kept in first-seen order so that tie-breaking on equal counts
/// is deterministic for a fixed input order.
#[derive(Debug, Clone, Default)]
pub struct ClassCounts<'a> {
    counts: Vec<(&'a str, usize)>,
    total: usize,
}

impl<'a> ClassCounts<'a> {
    /// Count the class labels of `examples`.
    pub fn from_examples(examples: &[&'a Example]) -> Self {
        let mut counts = Self::default();
        for example in examples {
            counts.add(example.label());
        }
        counts
    }

    fn add(&mut self, label: &'a str) {
        self.total += 1;
        match self.counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, c)) => *c += 1,
            None => self.counts.push((label, 1)),
        }
    }

    /// Return `(label, count)` pairs in first-seen order.
    #[must_use]
    pub fn as_slice(&self) -> &[(&'a str, usize)] {
        &self.counts
    }

    /// Return the number of examples counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Return the number of distinct labels.
    #[must_use]
    pub fn n_labels(&self) -> usize {
        self.counts.len()
    }

    /// Return `true` when every counted example shares one label.
    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.counts.len() == 1
    }

    /// Return the most frequent label, earliest seen on ties.
    #[must_use]
    pub fn most_common(&self) -> Option<&'a str> {
        let mut best: Option<(&'a str, usize)> = None;
        for &(label, count) in &self.counts {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label)
    }

    /// Return the most frequent label, lexicographically smallest on ties.
    #[must_use]
    pub fn most_common_lexicographic(&self) -> Option<&'a str> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|&(label, _)| label)
    }
}
