//! CSV/TSV loader with delimiter detection.

use std::fs::File;
use std::cmp::Reverse;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{Column, Dataset, SourceMetadata, Value};
use crate::error::{DatadocError, Result};

/// Delimiters to try when auto-detecting, in order of preference.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Records read when detecting the delimiter.
const DETECTION_SAMPLE: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Loads delimited files into a [`Dataset`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and its source metadata.
    ///
    /// The dataset is named after the file stem.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |e| DatadocError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => self.detect_delimiter(&contents)?,
        };

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        let dataset = self.parse_bytes(&name, &contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        tracing::debug!(
            file = %path.display(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            format = %format,
            "loaded delimited file"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, source))
    }

    /// Parse bytes directly.
    pub fn parse_bytes(&self, name: &str, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let headers: Vec<String> = if self.config.has_header {
            match records.next() {
                Some(record) => record?.iter().map(|s| s.trim().to_string()).collect(),
                None => return Err(DatadocError::EmptyData("No header row found".to_string())),
            }
        } else {
            Vec::new()
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (row_idx, result) in records.enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        let headers = if self.config.has_header {
            headers
        } else {
            let width = rows.first().map(Vec::len).unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(DatadocError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|h| Column {
                name: h,
                values: Vec::with_capacity(rows.len()),
            })
            .collect();

        for mut row in rows {
            // Pad short rows, truncate long ones
            row.resize(expected_cols, String::new());
            for (column, cell) in columns.iter_mut().zip(row) {
                column.values.push(Value::from_text(&cell));
            }
        }

        Dataset::new(name, columns)
    }

    /// Pick the delimiter that splits the sampled records into a consistent
    /// width, then the widest, then the earliest in [`DELIMITERS`]. A file
    /// no candidate splits is read as a single comma-separated column.
    fn detect_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(DatadocError::EmptyData("No lines to analyze".to_string()));
        }

        let best = DELIMITERS
            .iter()
            .enumerate()
            .filter_map(|(rank, &delimiter)| {
                let widths = self.sample_widths(bytes, delimiter);
                let header = *widths.first()?;
                if header < 2 {
                    return None;
                }
                let consistent = widths.iter().all(|&w| w == header);
                Some(((consistent, header, Reverse(rank)), delimiter))
            })
            .max_by_key(|(key, _)| *key)
            .map(|(_, delimiter)| delimiter);

        Ok(best.unwrap_or(b','))
    }

    /// Field counts of the first records under `delimiter`.
    fn sample_widths(&self, bytes: &[u8], delimiter: u8) -> Vec<usize> {
        csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes)
            .records()
            .take(DETECTION_SAMPLE)
            .filter_map(|record| record.ok())
            .filter(|record| !(record.len() == 1 && record[0].trim().is_empty()))
            .map(|record| record.len())
            .collect()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_commas() {
        let data = b"name;city\n\"Smith, J\";Paris\n\"Doe, A\";Rome";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_prefers_consistent_width() {
        // Pipes split the header wider, but only commas are consistent
        let data = b"a,b|c|d|e\n1,2\n3,4";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b',');

        // Equal widths fall back to preference order
        let data = b"a\tb|c\n1\t2|3";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_single_column_and_empty() {
        assert_eq!(Parser::new().detect_delimiter(b"id\n1\n2").unwrap(), b',');
        assert!(Parser::new().detect_delimiter(b"  \n").is_err());
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,NA,LA";
        let ds = parser.parse_bytes("people", data, b',').unwrap();

        assert_eq!(ds.column_names(), vec!["name", "age", "city"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.name(), "people");
        assert_eq!(ds.columns()[0].values[0], Value::from("Alice"));
        assert_eq!(ds.columns()[1].values[1], Value::Null);
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let parser = Parser::new();
        let ds = parser.parse_bytes("t", b"a,b\n", b',').unwrap();

        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.row_count(), 0);
    }

    #[test]
    fn test_pads_short_rows() {
        let parser = Parser::new();
        let ds = parser.parse_bytes("t", b"a,b,c\n1,2\n3,4,5,6", b',').unwrap();

        assert_eq!(ds.columns()[2].values, vec![Value::Null, Value::from("5")]);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let ds = parser.parse_bytes("t", b"a\n1\n2\n3", b',').unwrap();

        assert_eq!(ds.row_count(), 1);
    }

    #[test]
    fn test_no_header() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let ds = parser.parse_bytes("t", b"1,2\n3,4", b',').unwrap();

        assert_eq!(ds.column_names(), vec!["column_1", "column_2"]);
        assert_eq!(ds.row_count(), 2);
    }
}
