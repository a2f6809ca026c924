//! Delimited text reader producing a [`Dataset`].

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::dataset::{Dataset, DatasetBuilder};
use crate::{BayesError, ReadError};

/// Default field separator.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Reads a categorical table from a delimited text file.
///
/// Expected format:
/// - One record per line, fields separated by `delimiter` (`;` by default)
/// - An optional header row naming the features; without one, features are
///   named by column position (`"0"`, `"1"`, ...)
/// - Every row as wide as the first; blank lines are skipped
///
/// Field values are kept verbatim (no trimming, no quote handling).
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ReadError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`ReadError::CsvParse`] | Malformed record |
/// | [`ReadError::InvalidDataset`] | Duplicate header or ragged row |
#[derive(Debug, Clone)]
pub struct DatasetReader {
    path: PathBuf,
    delimiter: u8,
    has_headers: bool,
}

impl DatasetReader {
    /// Create a reader for `path` with a `;` delimiter and a header row.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            delimiter: DEFAULT_DELIMITER,
            has_headers: true,
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Whether the first record names the features.
    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file and read it into a [`Dataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Dataset, ReadError> {
        let file = std::fs::File::open(&self.path).map_err(|e| ReadError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;
        self.read_from(file)
    }

    /// Read records from any byte source. Errors are labeled with this
    /// reader's path.
    pub fn read_from<R: Read>(&self, source: R) -> Result<Dataset, ReadError> {
        // The header is handled here rather than by the csv crate, so the
        // numbered-header case can use the first record's width. Rows are
        // flexible so the ragged-row check is ours, not a CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(source);

        let mut builder: Option<DatasetBuilder> = None;
        for result in rdr.records() {
            let record = result.map_err(|e| self.parse_error(e))?;

            if let Some(builder) = builder.as_mut() {
                self.checked(builder.push_row(record.iter()))?;
                continue;
            }

            if self.has_headers {
                let headers = self.checked(DatasetBuilder::new(record.iter()))?;
                debug!(columns = headers.n_columns(), "read header");
                builder = Some(headers);
            } else {
                let numbered = (0..record.len()).map(|i| i.to_string());
                let mut first = self.checked(DatasetBuilder::new(numbered))?;
                self.checked(first.push_row(record.iter()))?;
                builder = Some(first);
            }
        }

        let dataset = builder.map_or_else(Dataset::default, DatasetBuilder::build);

        info!(
            n_rows = dataset.n_rows(),
            n_features = dataset.headers().len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    fn checked<T>(&self, result: Result<T, BayesError>) -> Result<T, ReadError> {
        result.map_err(|source| ReadError::InvalidDataset {
            path: self.path.clone(),
            source,
        })
    }

    fn parse_error(&self, e: csv::Error) -> ReadError {
        ReadError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
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

    fn read_str(content: &str, reader: DatasetReader) -> Result<Dataset, ReadError> {
        reader.read_from(content.as_bytes())
    }

    #[test]
    fn reads_header_and_rows() {
        let f = write_file("colour;size\nred;small\nblue;large\nred;large\n");
        let ds = DatasetReader::new(f.path()).read().unwrap();
        assert_eq!(ds.headers(), ["colour", "size"]);
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.value_count("colour", "red").unwrap(), 2);
        assert_eq!(ds.rows()[1], ["blue", "large"]);
    }

    #[test]
    fn numbers_headers_when_absent() {
        let reader = DatasetReader::new(Path::new("inline")).with_headers(false);
        let ds = read_str("a;x\nb;y\n", reader).unwrap();
        assert_eq!(ds.headers(), ["0", "1"]);
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.rows()[0], ["a", "x"]);
    }

    #[test]
    fn custom_delimiter() {
        let reader = DatasetReader::new(Path::new("inline")).with_delimiter(b',');
        let ds = read_str("a,b\n1,2\n", reader).unwrap();
        assert_eq!(ds.headers(), ["a", "b"]);
        assert_eq!(ds.value_count("b", "2").unwrap(), 1);
    }

    #[test]
    fn values_not_trimmed() {
        let reader = DatasetReader::new(Path::new("inline"));
        let ds = read_str("a;b\n x;y \n", reader).unwrap();
        assert_eq!(ds.rows()[0], [" x", "y "]);
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let ds = read_str("a;b\n", DatasetReader::new(Path::new("inline"))).unwrap();
        assert_eq!(ds.headers(), ["a", "b"]);
        assert_eq!(ds.n_rows(), 0);
    }

    #[test]
    fn empty_file_has_no_columns() {
        let ds = read_str("", DatasetReader::new(Path::new("inline"))).unwrap();
        assert!(ds.headers().is_empty());
    }

    #[test]
    fn ragged_row_rejected() {
        let err = read_str("a;b\n1;2\n3\n", DatasetReader::new(Path::new("inline"))).unwrap_err();
        assert!(matches!(
            err,
            ReadError::InvalidDataset {
                source: BayesError::RowLength { row_index: 1, expected: 2, got: 1 },
                ..
            }
        ));
    }

    #[test]
    fn duplicate_header_rejected() {
        let err = read_str("a;a\n1;2\n", DatasetReader::new(Path::new("inline"))).unwrap_err();
        assert!(matches!(
            err,
            ReadError::InvalidDataset {
                source: BayesError::DuplicateFeature { .. },
                ..
            }
        ));
    }

    #[test]
    fn missing_file() {
        let err = DatasetReader::new(Path::new("/nonexistent/data.txt"))
            .read()
            .unwrap_err();
        assert!(matches!(err, ReadError::FileNotFound { .. }));
    }
}
