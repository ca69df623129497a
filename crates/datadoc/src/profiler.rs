//! The profiling engine: turns a dataset into a [`DatasetProfile`].

use std::path::Path;

use chrono::Utc;
use rayon::prelude::*;

use crate::analysis::{
    CorrelationAnalyzer, PatternDetector, QualityScorer, QualityThresholds, StatisticalAnalyzer,
    STRONG_CORRELATION,
};
use crate::error::{DatadocError, Result};
use crate::input::{Column, Dataset, Parser, SamplingPolicy};
use crate::profile::{ColumnProfile, DatasetProfile, QualityIssue};

/// Settings for one profiling run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilerConfig {
    /// Row sampling applied once before analysis.
    pub sampling: SamplingPolicy,
    /// Size of each column's frequency table.
    pub top_k_values: usize,
    /// Number of sample values kept per column.
    pub sample_values: usize,
    /// Whether to compute the correlation matrix.
    pub correlation_analysis: bool,
    /// Absolute coefficient above which a pair is reported as strong.
    pub strong_correlation: f64,
    /// Decimal places kept on quality scores.
    pub score_precision: u32,
    pub thresholds: QualityThresholds,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingPolicy::none(),
            top_k_values: 10,
            sample_values: 5,
            correlation_analysis: true,
            strong_correlation: STRONG_CORRELATION,
            score_precision: 2,
            thresholds: QualityThresholds::default(),
        }
    }
}

impl ProfilerConfig {
    /// Check that every threshold is in range.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if !t.max_null_percentage.is_finite() || !(0.0..=100.0).contains(&t.max_null_percentage) {
            return Err(DatadocError::Configuration(format!(
                "max_null_percentage must be between 0 and 100, got {}",
                t.max_null_percentage
            )));
        }
        if t.max_cardinality < t.min_unique_values {
            return Err(DatadocError::Configuration(format!(
                "max_cardinality ({}) must not be below min_unique_values ({})",
                t.max_cardinality, t.min_unique_values
            )));
        }
        if self.top_k_values == 0 {
            return Err(DatadocError::Configuration(
                "top_k_values must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.strong_correlation) {
            return Err(DatadocError::Configuration(format!(
                "strong_correlation must be between 0 and 1, got {}",
                self.strong_correlation
            )));
        }
        if self.score_precision > 10 {
            return Err(DatadocError::Configuration(format!(
                "score_precision must be at most 10, got {}",
                self.score_precision
            )));
        }
        Ok(())
    }
}

/// The profiling engine.
///
/// A profiler holds only its configuration, so one instance can profile
/// independent datasets concurrently.
#[derive(Debug, Clone)]
pub struct Profiler {
    config: ProfilerConfig,
    statistics: StatisticalAnalyzer,
    patterns: PatternDetector,
    scorer: QualityScorer,
    correlation: CorrelationAnalyzer,
}

impl Profiler {
    /// Create a profiler with default configuration.
    pub fn new() -> Self {
        Self::build(ProfilerConfig::default())
    }

    /// Create a profiler, rejecting out-of-range configuration.
    pub fn with_config(config: ProfilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ProfilerConfig) -> Self {
        let statistics = StatisticalAnalyzer::with_limits(
            config.top_k_values,
            config.sample_values,
            config.thresholds.max_cardinality,
        );
        let scorer = QualityScorer::new(config.thresholds.clone(), config.score_precision);
        let correlation = CorrelationAnalyzer::with_strong_threshold(config.strong_correlation);

        Self {
            config,
            statistics,
            patterns: PatternDetector::new(),
            scorer,
            correlation,
        }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Load a delimited file and profile it, attaching its source metadata.
    pub fn profile_file(&self, path: impl AsRef<Path>) -> Result<DatasetProfile> {
        let (dataset, source) = Parser::new().parse_file(path)?;
        Ok(self.profile(&dataset)?.with_source(source))
    }

    /// Profile a dataset.
    ///
    /// Fails only when the dataset has no columns. A dataset with no rows
    /// yields columns with undefined statistics.
    pub fn profile(&self, dataset: &Dataset) -> Result<DatasetProfile> {
        if dataset.column_count() == 0 {
            return Err(DatadocError::DataValidation(format!(
                "dataset '{}' has no columns",
                dataset.name()
            )));
        }

        let sampled = self.config.sampling.apply(dataset);
        let sampled_from = sampled.as_ref().map(|_| dataset.row_count());
        let working = sampled.as_ref().unwrap_or(dataset);

        tracing::info!(
            dataset = %working.name(),
            rows = working.row_count(),
            columns = working.column_count(),
            sampled_from = ?sampled_from,
            "profiling dataset"
        );

        let results: Vec<(ColumnProfile, Vec<QualityIssue>)> = working
            .columns()
            .par_iter()
            .enumerate()
            .map(|(position, column)| self.profile_column(position, column))
            .collect();

        let (columns, issues): (Vec<ColumnProfile>, Vec<Vec<QualityIssue>>) =
            results.into_iter().unzip();

        let correlations = if self.config.correlation_analysis {
            let numeric: Vec<&Column> = working
                .columns()
                .iter()
                .zip(&columns)
                .filter(|(_, profile)| profile.inferred_type.is_numeric())
                .map(|(column, _)| column)
                .collect();
            (!numeric.is_empty()).then(|| self.correlation.analyze(&numeric))
        } else {
            None
        };

        let row_count = working.row_count();
        let total_cells = row_count * columns.len();
        let total_null_cells: usize = columns.iter().map(|c| c.null_count).sum();
        let overall_completeness = if total_cells == 0 {
            0.0
        } else {
            100.0 * (1.0 - total_null_cells as f64 / total_cells as f64)
        };

        let scores: Vec<f64> = columns.iter().map(|c| c.quality_score).collect();
        let quality_score = self.scorer.aggregate(&scores);

        let profile = DatasetProfile {
            dataset_name: working.name().to_string(),
            generated_at: Utc::now(),
            row_count,
            column_count: columns.len(),
            estimated_size_bytes: working.estimated_size_bytes(),
            duplicate_row_count: working.duplicate_row_count(),
            sampled_from,
            total_null_cells,
            overall_completeness,
            quality_score,
            columns,
            correlations,
            quality_issues: issues.into_iter().flatten().collect(),
            source: None,
        };

        tracing::info!(
            dataset = %profile.dataset_name,
            quality_score = profile.quality_score,
            issues = profile.quality_issues.len(),
            "profiling complete"
        );

        Ok(profile)
    }

    fn profile_column(&self, position: usize, column: &Column) -> (ColumnProfile, Vec<QualityIssue>) {
        let stats = self.statistics.analyze_column(column);
        let patterns = self.patterns.analyze(&column.name, column.non_null());
        let assessment = self
            .scorer
            .assess(&column.name, &stats, patterns.detected_pattern);

        let null_rate = if stats.row_count == 0 {
            0.0
        } else {
            stats.null_count as f64 / stats.row_count as f64
        };

        tracing::debug!(
            column = %column.name,
            inferred_type = stats.inferred_type.label(),
            quality_score = assessment.score,
            "profiled column"
        );

        let profile = ColumnProfile {
            name: column.name.clone(),
            position,
            inferred_type: stats.inferred_type,
            row_count: stats.row_count,
            null_count: stats.null_count,
            non_null_count: stats.non_null_count,
            null_rate,
            unique_count: stats.unique_count,
            is_unique: stats.unique_count == stats.non_null_count && stats.null_count == 0,
            distribution: stats.distribution,
            sample_values: stats.sample_values,
            detected_pattern: patterns.detected_pattern,
            pii_flag: patterns.pii_flag,
            pii_signals: patterns.pii_signals,
            quality: assessment.breakdown,
            quality_score: assessment.score,
        };

        (profile, assessment.issues)
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;
    use crate::profile::{DetectedPattern, InferredType};

    fn make_dataset() -> Dataset {
        Dataset::new(
            "customers",
            vec![
                Column::new("customer_id", [1i64, 2, 3, 4]),
                Column::new(
                    "customer_email",
                    [Some("a@b.com"), Some("c@d.com"), None, Some("e@f.com")],
                ),
                Column::new("spend", [10.0, 20.0, 30.0, 40.5]),
                Column::new("visits", [1i64, 2, 3, 4]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_profile_basic() {
        let profile = Profiler::new().profile(&make_dataset()).unwrap();

        assert_eq!(profile.dataset_name, "customers");
        assert_eq!(profile.row_count, 4);
        assert_eq!(profile.column_count, 4);
        assert_eq!(
            profile.column_names(),
            vec!["customer_id", "customer_email", "spend", "visits"]
        );
        assert_eq!(profile.total_null_cells, 1);
        assert_eq!(profile.overall_completeness, 93.75);
        assert!(profile.sampled_from.is_none());
    }

    #[test]
    fn test_email_column() {
        let profile = Profiler::new().profile(&make_dataset()).unwrap();
        let email = profile.column("customer_email").unwrap();

        assert_eq!(email.null_rate, 0.25);
        assert_eq!(email.inferred_type, InferredType::String);
        assert_eq!(email.detected_pattern, Some(DetectedPattern::Email));
        assert!(email.pii_flag);
        assert!(!email.is_unique);
    }

    #[test]
    fn test_correlations_over_numeric_columns() {
        let profile = Profiler::new().profile(&make_dataset()).unwrap();
        let report = profile.correlations.unwrap();

        assert_eq!(report.columns, vec!["customer_id", "spend", "visits"]);
        assert!((report.coefficient("customer_id", "visits").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlations_disabled() {
        let config = ProfilerConfig {
            correlation_analysis: false,
            ..ProfilerConfig::default()
        };
        let profile = Profiler::with_config(config)
            .unwrap()
            .profile(&make_dataset())
            .unwrap();
        assert!(profile.correlations.is_none());
    }

    #[test]
    fn test_zero_columns_rejected() {
        let dataset = Dataset::new("empty", vec![]).unwrap();
        let err = Profiler::new().profile(&dataset).unwrap_err();
        assert!(err.is_data_validation());
    }

    #[test]
    fn test_zero_rows_is_valid() {
        let dataset = Dataset::new(
            "empty",
            vec![Column::new("a", Vec::<Value>::new()), Column::new("b", Vec::<Value>::new())],
        )
        .unwrap();
        let profile = Profiler::new().profile(&dataset).unwrap();

        assert_eq!(profile.row_count, 0);
        assert_eq!(profile.columns.len(), 2);
        assert_eq!(profile.columns[0].inferred_type, InferredType::Unknown);
        assert_eq!(profile.columns[0].null_rate, 0.0);
        assert!(profile.correlations.is_none());
    }

    #[test]
    fn test_sampling_records_provenance() {
        let config = ProfilerConfig {
            sampling: SamplingPolicy::first(2),
            ..ProfilerConfig::default()
        };
        let profile = Profiler::with_config(config)
            .unwrap()
            .profile(&make_dataset())
            .unwrap();

        assert_eq!(profile.row_count, 2);
        assert_eq!(profile.sampled_from, Some(4));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ProfilerConfig {
            top_k_values: 0,
            ..ProfilerConfig::default()
        };
        assert!(Profiler::with_config(config).unwrap_err().is_configuration());

        let mut config = ProfilerConfig::default();
        config.thresholds.max_null_percentage = -1.0;
        assert!(Profiler::with_config(config).unwrap_err().is_configuration());
    }

    #[test]
    fn test_input_not_mutated() {
        let dataset = make_dataset();
        let before = dataset.clone();
        Profiler::new().profile(&dataset).unwrap();
        assert_eq!(dataset, before);
    }
}
