//! Core type definitions for profile documents.

use serde::{Deserialize, Serialize};

/// Inferred storage type for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferredType {
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Text values.
    String,
    /// Boolean tokens (true/false, yes/no, 0/1).
    Boolean,
    /// Calendar dates, with or without a time component.
    Date,
    /// No non-null values to infer from.
    #[default]
    Unknown,
}

impl InferredType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, InferredType::Integer | InferredType::Float)
    }

    pub fn label(&self) -> &'static str {
        match self {
            InferredType::Integer => "integer",
            InferredType::Float => "float",
            InferredType::String => "string",
            InferredType::Boolean => "boolean",
            InferredType::Date => "date",
            InferredType::Unknown => "unknown",
        }
    }
}

/// Content pattern detected across a column's values.
///
/// Variants are declared in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectedPattern {
    Email,
    Phone,
    IdCode,
    DateLike,
}

impl DetectedPattern {
    /// All patterns in priority order.
    pub const PRIORITY: [DetectedPattern; 4] = [
        DetectedPattern::Email,
        DetectedPattern::Phone,
        DetectedPattern::IdCode,
        DetectedPattern::DateLike,
    ];

    /// Returns true for patterns that identify a person.
    pub fn is_pii(&self) -> bool {
        matches!(self, DetectedPattern::Email | DetectedPattern::Phone)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DetectedPattern::Email => "email",
            DetectedPattern::Phone => "phone",
            DetectedPattern::IdCode => "id_code",
            DetectedPattern::DateLike => "date_like",
        }
    }
}

/// Why a column was flagged as PII.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PiiSignal {
    /// A token of the column name is PII-indicative.
    NameToken { token: String },
    /// The detected content pattern is PII-shaped.
    Pattern { pattern: DetectedPattern },
    /// Most values look like social security numbers.
    SsnLike,
    /// Most values look like personal names.
    PersonName,
}

/// Severity of a quality issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}
