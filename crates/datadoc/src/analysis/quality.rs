//! Quality scoring and issue detection.

use serde::{Deserialize, Serialize};

use super::patterns::name_tokens;
use super::statistical::StatisticalAnalysis;
use crate::profile::{DetectedPattern, InferredType, IssueKind, QualityBreakdown, QualityIssue, Severity};

/// Sub-score weights: completeness, uniqueness, validity, consistency.
pub const QUALITY_WEIGHTS: [f64; 4] = [0.4, 0.2, 0.2, 0.2];

/// Name tokens that mark a column as an identifier expected to be unique.
const IDENTIFIER_TOKENS: &[&str] = &["id", "uuid", "guid", "key", "pk"];

/// Null percentage above which a high-null issue is escalated to high severity.
const SEVERE_NULL_PERCENTAGE: f64 = 50.0;

/// Thresholds that drive cardinality and completeness checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Null percentage above which a column is flagged.
    pub max_null_percentage: f64,
    /// Fewest distinct values a non-identifier column should have.
    pub min_unique_values: usize,
    /// Most distinct values a categorical-shaped column should have.
    pub max_cardinality: usize,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            max_null_percentage: 10.0,
            min_unique_values: 2,
            max_cardinality: 50,
        }
    }
}

/// Scores and issues for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityAssessment {
    pub breakdown: QualityBreakdown,
    pub score: f64,
    pub issues: Vec<QualityIssue>,
}

/// Round to a number of decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Returns true if the column is expected to hold one distinct value per row.
pub fn is_identifier_shaped(name: &str, pattern: Option<DetectedPattern>) -> bool {
    pattern == Some(DetectedPattern::IdCode)
        || name_tokens(name)
            .iter()
            .any(|t| IDENTIFIER_TOKENS.contains(&t.as_str()))
}

/// Computes weighted quality scores from column statistics.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    thresholds: QualityThresholds,
    precision: u32,
}

impl QualityScorer {
    pub fn new(thresholds: QualityThresholds, precision: u32) -> Self {
        Self {
            thresholds,
            precision,
        }
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Score one column and list its quality issues.
    pub fn assess(
        &self,
        name: &str,
        stats: &StatisticalAnalysis,
        pattern: Option<DetectedPattern>,
    ) -> QualityAssessment {
        let identifier = is_identifier_shaped(name, pattern);
        let categorical_shaped = pattern.is_none()
            && matches!(stats.inferred_type, InferredType::String | InferredType::Boolean);

        let breakdown = if stats.non_null_count == 0 {
            QualityBreakdown::default()
        } else {
            let non_null = stats.non_null_count as f64;
            let null_rate = stats.null_count as f64 / stats.row_count as f64;
            QualityBreakdown {
                completeness: 100.0 * (1.0 - null_rate),
                uniqueness: self.uniqueness(stats, identifier, categorical_shaped),
                validity: 100.0 * stats.valid_count as f64 / non_null,
                consistency: if stats.valid_count == 0 {
                    0.0
                } else {
                    100.0 * stats.dominant_format_count as f64 / stats.valid_count as f64
                },
            }
        };

        let [w_complete, w_unique, w_valid, w_consistent] = QUALITY_WEIGHTS;
        let raw = w_complete * breakdown.completeness
            + w_unique * breakdown.uniqueness
            + w_valid * breakdown.validity
            + w_consistent * breakdown.consistency;

        QualityAssessment {
            breakdown,
            score: round_to(raw.clamp(0.0, 100.0), self.precision),
            issues: self.issues(name, stats, identifier, categorical_shaped),
        }
    }

    /// Penalize identifiers that repeat, categories with too many values, and
    /// columns with too few distinct values. The lowest applicable score wins.
    fn uniqueness(&self, stats: &StatisticalAnalysis, identifier: bool, categorical: bool) -> f64 {
        let unique = stats.unique_count as f64;
        let mut score: f64 = 100.0;

        if identifier {
            score = score.min(100.0 * unique / stats.non_null_count as f64);
        }
        if categorical && stats.unique_count > self.thresholds.max_cardinality {
            score = score.min(100.0 * self.thresholds.max_cardinality as f64 / unique);
        }
        if !identifier
            && self.thresholds.min_unique_values > 0
            && stats.unique_count < self.thresholds.min_unique_values
        {
            score = score.min(100.0 * unique / self.thresholds.min_unique_values as f64);
        }

        score
    }

    fn issues(
        &self,
        name: &str,
        stats: &StatisticalAnalysis,
        identifier: bool,
        categorical: bool,
    ) -> Vec<QualityIssue> {
        let mut issues = Vec::new();
        if stats.row_count == 0 {
            return issues;
        }

        let issue = |kind, severity, detail: String| QualityIssue {
            column: name.to_string(),
            kind,
            severity,
            detail,
        };

        let null_percentage = 100.0 * stats.null_count as f64 / stats.row_count as f64;
        if null_percentage > self.thresholds.max_null_percentage {
            let severity = if null_percentage > SEVERE_NULL_PERCENTAGE {
                Severity::High
            } else {
                Severity::Medium
            };
            issues.push(issue(
                IssueKind::HighNullRate,
                severity,
                format!("{:.1}% null values", null_percentage),
            ));
        }

        if stats.non_null_count == 0 {
            return issues;
        }

        if !identifier && stats.unique_count < self.thresholds.min_unique_values {
            issues.push(issue(
                IssueKind::LowCardinality,
                Severity::Low,
                format!("only {} distinct value(s)", stats.unique_count),
            ));
        }

        if categorical && stats.unique_count > self.thresholds.max_cardinality {
            issues.push(issue(
                IssueKind::ExcessiveCardinality,
                Severity::Low,
                format!(
                    "{} distinct values exceeds {}",
                    stats.unique_count, self.thresholds.max_cardinality
                ),
            ));
        }

        if identifier && (stats.unique_count < stats.non_null_count || stats.null_count > 0) {
            issues.push(issue(
                IssueKind::NotUnique,
                Severity::Medium,
                format!(
                    "{} distinct of {} values, {} null",
                    stats.unique_count, stats.non_null_count, stats.null_count
                ),
            ));
        }

        let invalid = stats.non_null_count - stats.valid_count;
        if invalid > 0 {
            issues.push(issue(
                IssueKind::InvalidValues,
                Severity::Medium,
                format!(
                    "{} value(s) do not parse as {}",
                    invalid,
                    stats.inferred_type.label()
                ),
            ));
        }

        if stats.format_counts.len() > 1 {
            let formats: Vec<&str> = stats.format_counts.keys().map(String::as_str).collect();
            issues.push(issue(
                IssueKind::MixedFormats,
                Severity::Low,
                format!("formats: {}", formats.join(", ")),
            ));
        }

        issues
    }

    /// Dataset score: unweighted mean of column scores.
    pub fn aggregate(&self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        round_to(mean.clamp(0.0, 100.0), self.precision)
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new(QualityThresholds::default(), 2)
    }
}
