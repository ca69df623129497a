//! Profile documents produced by the profiling engine.

mod column;
mod dataset;
mod types;

pub use column::{
    CategoricalDistribution, ColumnProfile, Distribution, NumericDistribution,
    QualityBreakdown, TemporalDistribution, ValueFrequency,
};
pub use dataset::{CorrelationPair, CorrelationReport, DatasetProfile, IssueKind, QualityIssue};
pub use types::{DetectedPattern, InferredType, PiiSignal, Severity};

pub(crate) use dataset::{read_json, write_json};
