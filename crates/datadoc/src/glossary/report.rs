//! Per-dataset glossary coverage report.

use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::resolution::{MatchRecord, MatchResult, MatchType};
use crate::error::Result;
use crate::profile::{read_json, write_json};

/// Owner label for columns without one.
pub const UNASSIGNED_OWNER: &str = "Unassigned";

/// Glossary coverage and ownership for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryReport {
    pub dataset_name: String,
    pub generated_at: DateTime<Utc>,
    pub total_columns: usize,
    pub mapped_columns: usize,
    pub unmapped_columns: usize,
    /// Mapped columns as a percentage of all columns.
    pub coverage_percentage: f64,
    /// Columns whose matched term is marked PII.
    pub pii_columns: Vec<String>,
    /// Columns grouped by term owner, in first-seen order.
    pub columns_by_owner: IndexMap<String, Vec<String>>,
    pub missing_definitions: Vec<String>,
    pub missing_owners: Vec<String>,
    /// One record per column, in column order.
    pub mappings: Vec<MatchRecord>,
}

impl GlossaryReport {
    /// Summarize match results.
    pub fn from_results(dataset_name: &str, results: &[MatchResult]) -> Self {
        let mappings: Vec<MatchRecord> = results.iter().map(MatchResult::to_record).collect();

        let total_columns = mappings.len();
        let mapped_columns = mappings
            .iter()
            .filter(|m| m.match_type != MatchType::Unmatched)
            .count();

        let mut columns_by_owner: IndexMap<String, Vec<String>> = IndexMap::new();
        for m in &mappings {
            let owner = m.owner.as_deref().unwrap_or(UNASSIGNED_OWNER);
            columns_by_owner
                .entry(owner.to_string())
                .or_default()
                .push(m.column_name.clone());
        }

        let names = |pred: fn(&MatchRecord) -> bool| -> Vec<String> {
            mappings
                .iter()
                .filter(|m| pred(m))
                .map(|m| m.column_name.clone())
                .collect()
        };

        Self {
            dataset_name: dataset_name.to_string(),
            generated_at: Utc::now(),
            total_columns,
            mapped_columns,
            unmapped_columns: total_columns - mapped_columns,
            coverage_percentage: if total_columns == 0 {
                0.0
            } else {
                100.0 * mapped_columns as f64 / total_columns as f64
            },
            pii_columns: names(|m| m.pii),
            missing_definitions: names(|m| m.definition.as_deref().is_none_or(|d| d.trim().is_empty())),
            missing_owners: names(|m| m.owner.is_none()),
            columns_by_owner,
            mappings,
        }
    }

    /// Records for columns that did not resolve to a term.
    pub fn unmapped(&self) -> impl Iterator<Item = &MatchRecord> {
        self.mappings
            .iter()
            .filter(|m| m.match_type == MatchType::Unmatched)
    }

    /// Save the report as a JSON snapshot document.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self, "glossary report")
    }

    /// Load a report snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref(), "glossary report")
    }
}
