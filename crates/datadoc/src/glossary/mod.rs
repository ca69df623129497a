//! Business glossary mapping.
//!
//! Column names resolve through four ordered stages: an exact key match, a
//! match after normalizing case and separators, a fuzzy match above a
//! similarity threshold, and finally an unmatched outcome carrying a
//! generated business name.

mod matcher;
mod report;
mod resolution;
mod similarity;
mod term;

pub use matcher::{GlossaryConfig, GlossaryMapper, DEFAULT_FUZZY_THRESHOLD};
pub use report::{GlossaryReport, UNASSIGNED_OWNER};
pub use resolution::{MatchRecord, MatchResult, MatchType, Resolution};
pub use similarity::{humanize, levenshtein, normalize_key, similarity};
pub use term::{GlossaryTerm, TermDictionary};
