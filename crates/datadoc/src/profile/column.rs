//! Column profile definition and distribution records.

use serde::{Deserialize, Serialize};

use super::types::{DetectedPattern, InferredType, PiiSignal};

/// Statistics for numeric columns. `None` means undefined (no values, or the
/// computation did not produce a finite number).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericDistribution {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Population standard deviation.
    pub std_dev: Option<f64>,
    /// First quartile (25th percentile).
    pub q1: Option<f64>,
    /// Third quartile (75th percentile).
    pub q3: Option<f64>,
    pub zeros_count: usize,
}

impl NumericDistribution {
    /// Calculate the interquartile range.
    pub fn iqr(&self) -> Option<f64> {
        Some(self.q3? - self.q1?)
    }

    /// Returns true if every statistic is undefined.
    pub fn is_undefined(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.mean.is_none()
            && self.median.is_none()
            && self.std_dev.is_none()
            && self.q1.is_none()
            && self.q3.is_none()
    }
}

/// One entry of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueFrequency {
    pub value: String,
    pub count: usize,
}

/// Frequency summary for string and boolean columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalDistribution {
    /// Top-K values by descending count, ties in first-seen order.
    pub top_values: Vec<ValueFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_common: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub least_common: Option<String>,
    /// Whether the cardinality is low enough to treat as a category.
    pub is_categorical: bool,
}

/// Range summary for date columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalDistribution {
    /// Earliest date, ISO-8601.
    pub min_date: Option<String>,
    /// Latest date, ISO-8601.
    pub max_date: Option<String>,
    pub range_days: Option<i64>,
}

/// Per-type distribution of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    Numeric(NumericDistribution),
    Categorical(CategoricalDistribution),
    Temporal(TemporalDistribution),
    /// The column has no values to summarize.
    Undefined,
}

impl Distribution {
    pub fn as_numeric(&self) -> Option<&NumericDistribution> {
        match self {
            Distribution::Numeric(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalDistribution> {
        match self {
            Distribution::Categorical(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_temporal(&self) -> Option<&TemporalDistribution> {
        match self {
            Distribution::Temporal(t) => Some(t),
            _ => None,
        }
    }
}

/// The four weighted sub-scores behind a column's quality score, each 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityBreakdown {
    pub completeness: f64,
    pub uniqueness: f64,
    pub validity: f64,
    pub consistency: f64,
}

/// Full statistical and quality summary for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the dataset.
    pub position: usize,
    pub inferred_type: InferredType,
    /// Total number of values, including nulls.
    pub row_count: usize,
    pub null_count: usize,
    pub non_null_count: usize,
    /// `null_count / row_count`, 0.0 for a column with no rows.
    pub null_rate: f64,
    /// Number of distinct non-null values.
    pub unique_count: usize,
    pub is_unique: bool,
    pub distribution: Distribution,
    /// First non-null values in row order, for display.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_pattern: Option<DetectedPattern>,
    pub pii_flag: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pii_signals: Vec<PiiSignal>,
    pub quality: QualityBreakdown,
    /// Weighted quality score, 0-100.
    pub quality_score: f64,
}

impl ColumnProfile {
    /// Get the null percentage.
    pub fn null_percentage(&self) -> f64 {
        self.null_rate * 100.0
    }

    /// Distinct values as a share of non-null values.
    pub fn unique_rate(&self) -> f64 {
        if self.non_null_count == 0 {
            0.0
        } else {
            self.unique_count as f64 / self.non_null_count as f64
        }
    }
}
