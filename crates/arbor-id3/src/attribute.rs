//! Attributes, the schema arena, and attribute value domains.

use std::fmt;

use crate::entropy::{entropy, entropy_from_counts};
use crate::error::Id3Error;
use crate::example::{ClassCounts, Example};

/// Zero-based position of an attribute in the schema.
///
/// This is the identity of an attribute: two attributes with the same name
/// but different positions are distinct.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct AttributeId(usize);

impl AttributeId {
    /// Create an attribute id from a zero-based schema position.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based schema position.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named dimension of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attribute {
    id: AttributeId,
    name: String,
}

impl Attribute {
    /// Return the attribute id.
    #[must_use]
    pub fn id(&self) -> AttributeId {
        self.id
    }

    /// Return the attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Information gain of splitting `examples` on this attribute.
    ///
    /// Computes `H(S) - Σ (|S_v| / |S|) · H(S_v)` over the values `v` of
    /// `domain`, skipping empty partitions. The result lies in
    /// `[0, H(S)]` up to floating-point rounding.
    ///
    /// # Panics
    ///
    /// Panics if `examples` is empty.
    #[must_use]
    pub fn information_gain(&self, domain: &Domain, examples: &[&Example]) -> f64 {
        let total_entropy = entropy(examples);
        let total = examples.len() as f64;

        let conditional: f64 = domain
            .values()
            .iter()
            .map(|value| {
                let partition: Vec<&Example> = examples
                    .iter()
                    .copied()
                    .filter(|e| e.value(self.id) == value)
                    .collect();
                if partition.is_empty() {
                    return 0.0;
                }
                let counts = ClassCounts::from_examples(&partition);
                (partition.len() as f64 / total) * entropy_from_counts(&counts)
            })
            .sum();

        total_entropy - conditional
    }
}

/// The ordered attribute list of a dataset.
///
/// The last attribute is the class attribute; every other attribute is a
/// feature attribute whose id indexes into [`Example::values`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Schema {
    attributes: Vec<Attribute>,
}

impl Schema {
    /// Build a schema from attribute names in column order.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::NoAttributes`] if `names` is empty.
    pub fn new<I, S>(names: I) -> Result<Self, Id3Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes: Vec<Attribute> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Attribute {
                id: AttributeId::new(i),
                name: name.into(),
            })
            .collect();
        if attributes.is_empty() {
            return Err(Id3Error::NoAttributes);
        }
        Ok(Self { attributes })
    }

    /// Return every attribute, class attribute last.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Return the feature attributes (all but the class attribute).
    #[must_use]
    pub fn feature_attributes(&self) -> &[Attribute] {
        &self.attributes[..self.attributes.len() - 1]
    }

    /// Return the class attribute.
    #[must_use]
    pub fn class_attribute(&self) -> &Attribute {
        &self.attributes[self.attributes.len() - 1]
    }

    /// Return the number of feature attributes.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.attributes.len() - 1
    }

    /// Return the attribute with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this schema.
    #[must_use]
    pub fn attribute(&self, id: AttributeId) -> &Attribute {
        &self.attributes[id.index()]
    }

    /// Return the first attribute with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// The distinct values an attribute takes, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Domain {
    values: Vec<String>,
}

impl Domain {
    /// Collect the distinct values of `attribute` across `examples`.
    #[must_use]
    pub fn discover(attribute: AttributeId, examples: &[&Example]) -> Self {
        Self::from_values(examples.iter().map(|e| e.value(attribute)))
    }

    /// Collect the distinct class labels across `examples`.
    #[must_use]
    pub fn discover_labels(examples: &[Example]) -> Self {
        Self::from_values(examples.iter().map(Example::label))
    }

    fn from_values<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let mut domain = Self::default();
        for value in values {
            if domain.position(value).is_none() {
                domain.values.push(value.to_string());
            }
        }
        domain
    }

    /// Return the values in first-seen order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Return the position of `value` in the domain.
    #[must_use]
    pub fn position(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Return the number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` when no value has been discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Feature attribute domains, discovered lazily during one induction run.
///
/// A domain is filled the first time its attribute is queried and stays fixed
/// afterwards. The root node queries every feature attribute, so all domains
/// are discovered over the full training set.
#[derive(Debug)]
pub(crate) struct DomainTable {
    domains: Vec<Option<Domain>>,
}

impl DomainTable {
    pub(crate) fn new(n_features: usize) -> Self {
        Self {
            domains: vec![None; n_features],
        }
    }

    /// Return the domain of `attribute`, discovering it from `examples` if unset.
    pub(crate) fn get_or_discover(&mut self, attribute: AttributeId, examples: &[&Example]) -> &Domain {
        self.domains[attribute.index()].get_or_insert_with(|| Domain::discover(attribute, examples))
    }

    /// Return the domain of `attribute` if it has been discovered.
    pub(crate) fn get(&self, attribute: AttributeId) -> Option<&Domain> {
        self.domains[attribute.index()].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ex(values: &[&str], label: &str) -> Example {
        Example::new(values.iter().map(|v| v.to_string()).collect(), label)
    }

    fn tennis() -> Vec<Example> {
        vec![
            ex(&["Sunny", "Hot"], "No"),
            ex(&["Sunny", "Cool"], "Yes"),
            ex(&["Overcast", "Hot"], "Yes"),
            ex(&["Rain", "Cool"], "Yes"),
            ex(&["Rain", "Hot"], "No"),
        ]
    }

    #[test]
    fn schema_splits_class_attribute() {
        let schema = Schema::new(["Outlook", "Temp", "PlayTennis"]).unwrap();
        assert_eq!(schema.n_features(), 2);
        assert_eq!(schema.class_attribute().name(), "PlayTennis");
        assert_eq!(schema.class_attribute().id(), AttributeId::new(2));
        let names: Vec<&str> = schema.feature_attributes().iter().map(Attribute::name).collect();
        assert_eq!(names, ["Outlook", "Temp"]);
        assert_eq!(schema.find("Temp").map(Attribute::id), Some(AttributeId::new(1)));
        assert!(schema.find("Humidity").is_none());
    }

    #[test]
    fn schema_rejects_empty_list() {
        let err = Schema::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, Id3Error::NoAttributes));
    }

    #[test]
    fn class_only_schema_has_no_features() {
        let schema = Schema::new(["Label"]).unwrap();
        assert_eq!(schema.n_features(), 0);
        assert!(schema.feature_attributes().is_empty());
    }

    #[test]
    fn duplicate_names_stay_distinct_by_id() {
        let schema = Schema::new(["Color", "Color", "Class"]).unwrap();
        let features = schema.feature_attributes();
        assert_ne!(features[0], features[1]);
        assert_eq!(features[0].name(), features[1].name());
    }

    #[test]
    fn domain_first_seen_order() {
        let data = tennis();
        let refs: Vec<&Example> = data.iter().collect();
        let domain = Domain::discover(AttributeId::new(0), &refs);
        assert_eq!(domain.values(), ["Sunny", "Overcast", "Rain"]);
        assert_eq!(domain.position("Rain"), Some(2));
        assert_eq!(domain.position("Snow"), None);

        let labels = Domain::discover_labels(&data);
        assert_eq!(labels.values(), ["No", "Yes"]);
    }

    #[test]
    fn outlook_gain_matches_hand_computation() {
        let data = tennis();
        let refs: Vec<&Example> = data.iter().collect();
        let schema = Schema::new(["Outlook", "Temp", "PlayTennis"]).unwrap();
        let outlook = &schema.feature_attributes()[0];
        let domain = Domain::discover(outlook.id(), &refs);

        // H(S) = 0.971; conditional = 2/5 * 1 + 1/5 * 0 + 2/5 * 1 = 0.8
        let gain = outlook.information_gain(&domain, &refs);
        assert!((gain - 0.170_950_594).abs() < 1e-6, "gain = {gain}");
    }

    #[test]
    fn gain_skips_values_absent_from_subset() {
        let data = tennis();
        let refs: Vec<&Example> = data.iter().collect();
        let schema = Schema::new(["Outlook", "Temp", "PlayTennis"]).unwrap();
        let outlook = &schema.feature_attributes()[0];
        let domain = Domain::discover(outlook.id(), &refs);

        let sunny: Vec<&Example> = refs.iter().copied().filter(|e| e.value(outlook.id()) == "Sunny").collect();
        let gain = outlook.information_gain(&domain, &sunny);
        assert!(gain.abs() < 1e-12);
    }

    #[test]
    fn domain_table_discovers_once() {
        let data = tennis();
        let refs: Vec<&Example> = data.iter().collect();
        let mut table = DomainTable::new(2);
        let outlook = AttributeId::new(0);
        assert!(table.get(outlook).is_none());

        assert_eq!(table.get_or_discover(outlook, &refs).len(), 3);
        // A later query over a narrower subset keeps the first domain.
        assert_eq!(table.get_or_discover(outlook, &refs[..1]).len(), 3);
        assert_eq!(table.get(outlook).map(Domain::len), Some(3));
    }
}
