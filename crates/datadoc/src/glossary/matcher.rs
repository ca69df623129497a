//! The glossary mapper: resolves column names to glossary terms.

use serde::{Deserialize, Serialize};

use super::report::GlossaryReport;
use super::resolution::{MatchResult, Resolution};
use super::similarity::{humanize, normalize_key, similarity};
use super::term::{GlossaryTerm, TermDictionary};
use crate::error::{DatadocError, Result};

/// Default minimum similarity for a fuzzy match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Glossary matching settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryConfig {
    /// Minimum similarity, in [0, 1], to accept a fuzzy match.
    pub fuzzy_threshold: f64,
    /// Enables the fuzzy stage.
    pub auto_mapping: bool,
    /// Also score each term by its business name during fuzzy matching.
    pub compare_business_names: bool,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            auto_mapping: true,
            compare_business_names: true,
        }
    }
}

impl GlossaryConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(DatadocError::Configuration(format!(
                "fuzzy_threshold must be between 0 and 1, got {}",
                self.fuzzy_threshold
            )));
        }
        Ok(())
    }
}

/// Best fuzzy candidate so far.
struct Candidate<'a> {
    key: &'a str,
    term: &'a GlossaryTerm,
    score: f64,
}

impl Candidate<'_> {
    /// Higher score wins, then the shorter key, then the lexically smaller key.
    fn beats(&self, other: &Candidate<'_>) -> bool {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.key.chars().count().cmp(&self.key.chars().count()))
            .then_with(|| other.key.cmp(self.key))
            .is_gt()
    }
}

/// Resolves column names against a term dictionary. Never fails: every
/// column resolves to at least an unmatched outcome.
#[derive(Debug, Clone, Default)]
pub struct GlossaryMapper {
    config: GlossaryConfig,
}

impl GlossaryMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GlossaryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GlossaryConfig {
        &self.config
    }

    /// Resolve one column name: exact, then normalized, then fuzzy, then
    /// unmatched. The first stage to succeed wins.
    pub fn resolve(&self, dictionary: &TermDictionary, column: &str) -> MatchResult {
        let resolution = self.resolution(dictionary, column);
        tracing::debug!(
            column,
            match_type = resolution.match_type().label(),
            confidence = resolution.confidence(),
            "resolved glossary term"
        );
        MatchResult {
            column_name: column.to_string(),
            resolution,
        }
    }

    fn resolution(&self, dictionary: &TermDictionary, column: &str) -> Resolution {
        if let Some((key, term)) = dictionary.get_key_value(column) {
            return Resolution::Exact {
                key: key.clone(),
                term: term.clone(),
            };
        }

        let normalized = normalize_key(column);

        let normalized_hit = dictionary
            .iter()
            .filter(|(key, _)| normalize_key(key) == normalized)
            .min_by(|(a, _), (b, _)| a.chars().count().cmp(&b.chars().count()).then_with(|| a.cmp(b)));
        if let Some((key, term)) = normalized_hit {
            return Resolution::Normalized {
                key: key.clone(),
                term: term.clone(),
            };
        }

        if self.config.auto_mapping {
            if let Some(best) = self.best_fuzzy(dictionary, &normalized) {
                if best.score >= self.config.fuzzy_threshold {
                    return Resolution::Fuzzy {
                        key: best.key.to_string(),
                        term: best.term.clone(),
                        score: best.score,
                    };
                }
            }
        }

        Resolution::Unmatched {
            business_name: humanize(column),
        }
    }

    fn best_fuzzy<'a>(&self, dictionary: &'a TermDictionary, normalized: &str) -> Option<Candidate<'a>> {
        let mut best: Option<Candidate<'a>> = None;

        for (key, term) in dictionary.iter() {
            let mut score = similarity(normalized, &normalize_key(key));
            if self.config.compare_business_names {
                score = score.max(similarity(normalized, &normalize_key(&term.business_name)));
            }

            let candidate = Candidate {
                key: key.as_str(),
                term,
                score,
            };
            if best.as_ref().is_none_or(|b| candidate.beats(b)) {
                best = Some(candidate);
            }
        }

        best
    }

    /// Resolve every column, in order.
    pub fn map_columns<S: AsRef<str>>(&self, dictionary: &TermDictionary, columns: &[S]) -> Vec<MatchResult> {
        columns
            .iter()
            .map(|c| self.resolve(dictionary, c.as_ref()))
            .collect()
    }

    /// Resolve every column and summarize the results.
    pub fn build_report<S: AsRef<str>>(
        &self,
        dataset_name: &str,
        dictionary: &TermDictionary,
        columns: &[S],
    ) -> GlossaryReport {
        let results = self.map_columns(dictionary, columns);
        let report = GlossaryReport::from_results(dataset_name, &results);
        tracing::info!(
            dataset = dataset_name,
            mapped = report.mapped_columns,
            unmapped = report.unmapped_columns,
            "glossary mapping complete"
        );
        report
    }
}
