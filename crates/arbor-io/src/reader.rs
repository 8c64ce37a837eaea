//! Example row reader with input validation.

use std::path::{Path, PathBuf};

use arbor_id3::{Example, Schema};
use tracing::{debug, info, instrument};

use crate::IoError;

/// Reads labeled example rows from a comma-separated text file.
///
/// Expected format:
/// - No header row
/// - One example per line, values aligned to the attribute order
/// - The last value on each line is the class label
///
/// Blank lines are skipped and surrounding whitespace is trimmed from every value.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero example rows |
/// | [`IoError::InconsistentRowLength`] | Row value count differs from the attribute count |
pub struct ExampleReader<'s> {
    path: PathBuf,
    schema: &'s Schema,
}

impl<'s> ExampleReader<'s> {
    /// Create a new reader for the given file, validated against `schema`.
    pub fn new(path: &Path, schema: &'s Schema) -> Self {
        Self {
            path: path.to_path_buf(),
            schema,
        }
    }

    /// Read and validate the file, returning one [`Example`] per row.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Vec<Example>, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so that short or long rows surface as InconsistentRowLength
        // rather than a generic CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let expected = self.schema.attributes().len();
        debug!(expected, "reading example rows");

        let mut examples = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            if record.len() != expected {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    line: record.position().map_or(0, |p| p.line()),
                    expected,
                    got: record.len(),
                });
            }

            let mut values: Vec<String> = record.iter().map(String::from).collect();
            let label = values.pop().unwrap_or_default();
            examples.push(Example::new(values, label));
        }

        if examples.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(n_examples = examples.len(), "examples loaded");

        Ok(examples)
    }
}
