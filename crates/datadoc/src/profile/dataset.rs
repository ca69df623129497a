//! Dataset-level profile document and its persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::column::ColumnProfile;
use super::types::Severity;
use crate::error::{DatadocError, Result};
use crate::input::SourceMetadata;

/// Kind of data-quality problem found in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Null percentage above the configured ceiling.
    HighNullRate,
    /// Fewer distinct values than the configured minimum.
    LowCardinality,
    /// A categorical-shaped column with more distinct values than allowed.
    ExcessiveCardinality,
    /// An identifier-shaped column containing duplicates or nulls.
    NotUnique,
    /// Values that do not parse as the inferred type.
    InvalidValues,
    /// Several formats coexisting within one inferred type.
    MixedFormats,
}

impl IssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::HighNullRate => "High Null Rate",
            IssueKind::LowCardinality => "Low Cardinality",
            IssueKind::ExcessiveCardinality => "Excessive Cardinality",
            IssueKind::NotUnique => "Not Unique",
            IssueKind::InvalidValues => "Invalid Values",
            IssueKind::MixedFormats => "Mixed Formats",
        }
    }
}

/// A data-quality problem attached to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub column: String,
    #[serde(rename = "issue")]
    pub kind: IssueKind,
    pub severity: Severity,
    /// Human-readable detail, e.g. the offending percentage.
    pub detail: String,
}

/// Pearson coefficient for one pair of numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub column_1: String,
    pub column_2: String,
    /// `None` when the pair shares too few rows or has no variance on them.
    pub coefficient: Option<f64>,
}

/// Pairwise correlations across the numeric columns of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    /// Numeric columns included in the matrix, in dataset order.
    pub columns: Vec<String>,
    /// Upper triangle of the matrix, row-major.
    pub pairs: Vec<CorrelationPair>,
    /// Pairs whose absolute coefficient exceeds the strong-correlation cutoff.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strong_correlations: Vec<CorrelationPair>,
    /// Numeric columns excluded for having fewer than two values or zero variance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insufficient_data: Vec<String>,
}

impl CorrelationReport {
    /// Look up the coefficient for two columns, in either order.
    pub fn coefficient(&self, a: &str, b: &str) -> Option<f64> {
        if a == b && self.columns.iter().any(|c| c == a) {
            return Some(1.0);
        }
        self.pairs
            .iter()
            .find(|p| (p.column_1 == a && p.column_2 == b) || (p.column_1 == b && p.column_2 == a))
            .and_then(|p| p.coefficient)
    }
}

/// Immutable profile of a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub dataset_name: String,
    /// When the profile was generated.
    pub generated_at: DateTime<Utc>,
    /// Rows analyzed (after sampling).
    pub row_count: usize,
    pub column_count: usize,
    pub estimated_size_bytes: usize,
    pub duplicate_row_count: usize,
    /// Row count before sampling, if the dataset was sampled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampled_from: Option<usize>,
    pub total_null_cells: usize,
    /// Percentage of non-null cells.
    pub overall_completeness: f64,
    /// Mean of the column quality scores, 0-100.
    pub quality_score: f64,
    pub columns: Vec<ColumnProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlations: Option<CorrelationReport>,
    #[serde(default)]
    pub quality_issues: Vec<QualityIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
}

impl DatasetProfile {
    /// Attach metadata about the file the dataset was loaded from.
    pub fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = Some(source);
        self
    }

    /// Get a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of columns flagged as PII.
    pub fn pii_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.pii_flag)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Number of columns with at least one null value.
    pub fn columns_with_nulls(&self) -> usize {
        self.columns.iter().filter(|c| c.null_count > 0).count()
    }

    /// Plain-text summary of the profile.
    pub fn summary(&self) -> String {
        let separator = "=".repeat(60);
        format!(
            "Data Profile Summary: {name}\n\
             {separator}\n\
             Dataset Information:\n  \
             - Rows: {rows}\n  \
             - Columns: {columns}\n  \
             - Estimated Size: {size:.2} MB\n  \
             - Duplicate Rows: {duplicates}\n\
             \n\
             Data Quality:\n  \
             - Overall Completeness: {completeness:.2}%\n  \
             - Columns with Nulls: {with_nulls}\n  \
             - Total Null Cells: {nulls}\n  \
             - Quality Score: {score:.1}/100\n  \
             - Quality Issues Found: {issues}\n\
             {separator}\n",
            name = self.dataset_name,
            rows = self.row_count,
            columns = self.column_count,
            size = self.estimated_size_bytes as f64 / (1024.0 * 1024.0),
            duplicates = self.duplicate_row_count,
            completeness = self.overall_completeness,
            with_nulls = self.columns_with_nulls(),
            nulls = self.total_null_cells,
            score = self.quality_score,
            issues = self.quality_issues.len(),
        )
    }

    /// Save the profile as a JSON snapshot document.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self, "dataset profile")
    }

    /// Load a profile snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref(), "dataset profile")
    }
}

/// Write a value as pretty JSON, creating the parent directory if needed.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                DatadocError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|e| {
        DatadocError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
    })?;

    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)
        .map_err(|e| DatadocError::Persistence(format!("Failed to serialize {}: {}", what, e)))?;

    tracing::debug!(path = %path.display(), "wrote {}", what);
    Ok(())
}

/// Read a JSON document written by [`write_json`].
pub(crate) fn read_json<T: for<'de> Deserialize<'de>>(path: &Path, what: &str) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        DatadocError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        DatadocError::Persistence(format!(
            "Failed to parse {} '{}': {}",
            what,
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficient_lookup_is_symmetric() {
        let report = CorrelationReport {
            columns: vec!["a".into(), "b".into()],
            pairs: vec![CorrelationPair {
                column_1: "a".into(),
                column_2: "b".into(),
                coefficient: Some(0.5),
            }],
            ..CorrelationReport::default()
        };

        assert_eq!(report.coefficient("b", "a"), Some(0.5));
        assert_eq!(report.coefficient("a", "a"), Some(1.0));
        assert_eq!(report.coefficient("a", "c"), None);
    }
}
