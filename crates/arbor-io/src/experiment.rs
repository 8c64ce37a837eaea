//! Experiment naming for output artifacts.

use std::str::FromStr;

use crate::IoError;

/// A validated experiment name, used as the stem of every output file.
///
/// Must match `[a-zA-Z0-9_-]+`, so it can never escape the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        let valid = !name.is_empty()
            && name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name for the artifact with the given suffix: `{name}_{suffix}`.
    #[must_use]
    pub fn file_name(&self, suffix: &str) -> String {
        format!("{}_{suffix}", self.0)
    }
}

impl FromStr for ExperimentName {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_name() {
        let name: ExperimentName = "play-tennis_01".parse().unwrap();
        assert_eq!(name.as_str(), "play-tennis_01");
        assert_eq!(name.file_name("tree.dot"), "play-tennis_01_tree.dot");
    }

    #[test]
    fn rejects_empty() {
        let name = ExperimentName::new(String::new());
        assert!(matches!(name, Err(IoError::InvalidExperimentName { .. })));
    }

    #[test]
    fn rejects_path_separators() {
        for bad in ["../tree", "a/b", "with space", "ünï"] {
            let err = bad.parse::<ExperimentName>().unwrap_err();
            assert!(matches!(err, IoError::InvalidExperimentName { ref name } if name == bad));
        }
    }
}
