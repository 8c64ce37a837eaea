//! Attribute header reader.

use std::path::{Path, PathBuf};

use arbor_id3::Schema;
use tracing::{debug, info, instrument};

use crate::IoError;

/// Reads attribute names from the first line of a text file.
///
/// Expected format: one comma-separated line, e.g.
/// `Outlook,Temperature,Humidity,Wind,PlayTennis`. The last name is the class
/// attribute. Surrounding whitespace is trimmed; later lines are ignored.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed header line |
/// | [`IoError::NoAttributes`] | File has no header line |
/// | [`IoError::EmptyAttributeName`] | A name in the header is blank |
pub struct AttributeReader {
    path: PathBuf,
}

impl AttributeReader {
    /// Create a new reader for the given file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read the header line and return the attribute [`Schema`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Schema, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut record = csv::StringRecord::new();
        let found = rdr.read_record(&mut record).map_err(|e| IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        })?;
        if !found {
            return Err(IoError::NoAttributes {
                path: self.path.clone(),
            });
        }
        debug!(n_columns = record.len(), "read attribute header");

        if let Some(position) = record.iter().position(str::is_empty) {
            return Err(IoError::EmptyAttributeName {
                path: self.path.clone(),
                position,
            });
        }

        let schema = Schema::new(record.iter().map(String::from)).map_err(|_| IoError::NoAttributes {
            path: self.path.clone(),
        })?;

        info!(
            n_features = schema.n_features(),
            class = schema.class_attribute().name(),
            "attribute schema loaded"
        );

        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn read_valid_header() {
        let f = write_file("Outlook, Temp ,PlayTennis\n");
        let schema = AttributeReader::new(f.path()).read().unwrap();
        let names: Vec<&str> = schema.attributes().iter().map(|a| a.name()).collect();
        assert_eq!(names, ["Outlook", "Temp", "PlayTennis"]);
        assert_eq!(schema.n_features(), 2);
        assert_eq!(schema.class_attribute().name(), "PlayTennis");
    }

    #[test]
    fn only_first_line_is_read() {
        let f = write_file("A,B,Class\nignored,line\n");
        let schema = AttributeReader::new(f.path()).read().unwrap();
        assert_eq!(schema.attributes().len(), 3);
    }

    #[test]
    fn empty_file_error() {
        let f = write_file("");
        let err = AttributeReader::new(f.path()).read().unwrap_err();
        assert!(matches!(err, IoError::NoAttributes { .. }));
    }

    #[test]
    fn blank_name_error() {
        let f = write_file("A,,Class\n");
        let err = AttributeReader::new(f.path()).read().unwrap_err();
        assert!(matches!(err, IoError::EmptyAttributeName { position: 1, .. }));
    }

    #[test]
    fn missing_file_error() {
        let err = AttributeReader::new(Path::new("/tmp/arbor_missing_attributes.txt"))
            .read()
            .unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
