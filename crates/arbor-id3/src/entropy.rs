//! Shannon entropy of class label distributions.

use crate::example::{ClassCounts, Example};

/// Shannon entropy, in bits, of the class labels of `examples`.
///
/// `H = -Σ p_c · log2(p_c)` over the observed labels `c`. Returns `0.0`
/// when every example shares one label.
///
/// # Panics
///
/// Panics if `examples` is empty: entropy of an empty collection is undefined
/// and induction never asks for it.
#[must_use]
pub fn entropy(examples: &[&Example]) -> f64 {
    entropy_from_counts(&ClassCounts::from_examples(examples))
}

/// Shannon entropy, in bits, of a precomputed label frequency table.
///
/// # Panics
///
/// Panics if `counts` is empty.
#[must_use]
pub fn entropy_from_counts(counts: &ClassCounts<'_>) -> f64 {
    assert!(counts.total() > 0, "entropy of an empty example collection is undefined");
    let n = counts.total() as f64;
    -counts
        .as_slice()
        .iter()
        .map(|&(_, c)| {
            let p = c as f64 / n;
            p * p.log2()
        })
        .sum::<f64>()
}
