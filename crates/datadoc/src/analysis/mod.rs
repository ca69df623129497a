//! Column and dataset analysis used by the profiler.

mod correlation;
mod patterns;
mod quality;
mod statistical;

pub use correlation::{pearson, CorrelationAnalyzer, STRONG_CORRELATION};
pub use patterns::{
    name_tokens, PatternAnalysis, PatternDetector, PATTERN_MATCH_THRESHOLD, PATTERN_SAMPLE_SIZE,
    PII_NAME_TOKENS,
};
pub use quality::{
    is_identifier_shaped, round_to, QualityAssessment, QualityScorer, QualityThresholds,
    QUALITY_WEIGHTS,
};
pub use statistical::{
    frequency_table, infer_type, numeric_distribution, quantile, temporal_distribution,
    DateFormat, StatisticalAnalysis, StatisticalAnalyzer, TypeInference, DATE_FORMATS,
    DATE_MATCH_THRESHOLD,
};
