//! Match outcomes for glossary resolution.

use serde::{Deserialize, Serialize};

use super::term::GlossaryTerm;

/// Which resolution stage produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Normalized,
    Fuzzy,
    Unmatched,
}

impl MatchType {
    pub fn label(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Normalized => "normalized",
            MatchType::Fuzzy => "fuzzy",
            MatchType::Unmatched => "unmatched",
        }
    }
}

/// Terminal outcome of resolving one column name.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The column name is a dictionary key.
    Exact { key: String, term: GlossaryTerm },
    /// The column name equals a key after normalization.
    Normalized { key: String, term: GlossaryTerm },
    /// The closest key cleared the similarity threshold.
    Fuzzy {
        key: String,
        term: GlossaryTerm,
        score: f64,
    },
    /// Nothing matched; the business name is generated from the column name.
    Unmatched { business_name: String },
}

impl Resolution {
    pub fn match_type(&self) -> MatchType {
        match self {
            Resolution::Exact { .. } => MatchType::Exact,
            Resolution::Normalized { .. } => MatchType::Normalized,
            Resolution::Fuzzy { .. } => MatchType::Fuzzy,
            Resolution::Unmatched { .. } => MatchType::Unmatched,
        }
    }

    /// Confidence in [0, 1].
    pub fn confidence(&self) -> f64 {
        match self {
            Resolution::Exact { .. } => 1.0,
            Resolution::Normalized { .. } => 0.9,
            Resolution::Fuzzy { score, .. } => score.clamp(0.0, 1.0),
            Resolution::Unmatched { .. } => 0.0,
        }
    }

    /// The matched dictionary key and term, if any.
    pub fn term(&self) -> Option<(&str, &GlossaryTerm)> {
        match self {
            Resolution::Exact { key, term }
            | Resolution::Normalized { key, term }
            | Resolution::Fuzzy { key, term, .. } => Some((key.as_str(), term)),
            Resolution::Unmatched { .. } => None,
        }
    }
}

/// Resolution of one column. Serializes as a flat [`MatchRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "MatchRecord")]
pub struct MatchResult {
    pub column_name: String,
    pub resolution: Resolution,
}

impl MatchResult {
    pub fn business_name(&self) -> &str {
        match &self.resolution {
            Resolution::Unmatched { business_name } => business_name,
            other => other
                .term()
                .map(|(_, t)| t.business_name.as_str())
                .unwrap_or_default(),
        }
    }

    pub fn match_type(&self) -> MatchType {
        self.resolution.match_type()
    }

    pub fn confidence(&self) -> f64 {
        self.resolution.confidence()
    }

    pub fn is_matched(&self) -> bool {
        self.match_type() != MatchType::Unmatched
    }

    pub fn term(&self) -> Option<&GlossaryTerm> {
        self.resolution.term().map(|(_, t)| t)
    }

    pub fn owner(&self) -> Option<&str> {
        self.term().and_then(|t| t.owner.as_deref())
    }

    pub fn definition(&self) -> Option<&str> {
        self.term().and_then(|t| t.definition.as_deref())
    }

    pub fn pii(&self) -> bool {
        self.term().is_some_and(|t| t.pii)
    }

    /// Flatten into the persisted record.
    pub fn to_record(&self) -> MatchRecord {
        MatchRecord {
            column_name: self.column_name.clone(),
            business_name: self.business_name().to_string(),
            match_type: self.match_type(),
            confidence: self.confidence(),
            owner: self.owner().map(str::to_string),
            pii: self.pii(),
            definition: self.definition().map(str::to_string),
            matched_term: self.resolution.term().map(|(k, _)| k.to_string()),
            data_type: self.term().and_then(|t| t.data_type.clone()),
            examples: self.term().map(|t| t.examples.clone()).unwrap_or_default(),
        }
    }
}

impl From<MatchResult> for MatchRecord {
    fn from(result: MatchResult) -> Self {
        result.to_record()
    }
}

/// Flat, persisted form of a [`MatchResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub column_name: String,
    pub business_name: String,
    pub match_type: MatchType,
    pub confidence: f64,
    pub owner: Option<String>,
    pub pii: bool,
    pub definition: Option<String>,
    /// Dictionary key the column resolved to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}
