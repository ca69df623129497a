//! Content pattern detection and PII flagging.
//!
//! Patterns are checked against a bounded sample of non-null values and
//! accepted by majority vote. PII signals from the column name and from
//! content are OR-ed, so a column is flagged when any one of them fires.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::Value;
use crate::profile::{DetectedPattern, PiiSignal};

/// Share of sampled values a pattern must match to be detected.
pub const PATTERN_MATCH_THRESHOLD: f64 = 0.8;

/// Maximum number of non-null values inspected per column.
pub const PATTERN_SAMPLE_SIZE: usize = 100;

/// Lower-cased column-name tokens that indicate personal data.
pub const PII_NAME_TOKENS: &[&str] = &[
    "name",
    "firstname",
    "lastname",
    "fullname",
    "surname",
    "email",
    "mail",
    "phone",
    "mobile",
    "cell",
    "fax",
    "ssn",
    "address",
    "addr",
    "street",
    "zip",
    "zipcode",
    "postcode",
    "dob",
    "birth",
    "birthdate",
    "birthday",
    "passport",
    "license",
    "ip",
];

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?1?\d{9,15}|\+?1?[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4})$").unwrap()
});

static ID_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,5}[-_]?\d{3,10}$").unwrap());

static DATE_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}[-/]\d{1,2}[-/]\d{4})([T ]\d{1,2}:\d{2}(:\d{2})?)?$",
    )
    .unwrap()
});

static SSN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}-\d{2}-\d{4}$").unwrap());

static PERSON_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+(?:[ '-][A-Z][a-z]+)+$").unwrap());

fn pattern_regex(pattern: DetectedPattern) -> &'static Regex {
    match pattern {
        DetectedPattern::Email => &EMAIL,
        DetectedPattern::Phone => &PHONE,
        DetectedPattern::IdCode => &ID_CODE,
        DetectedPattern::DateLike => &DATE_LIKE,
    }
}

/// Result of pattern and PII analysis for one column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternAnalysis {
    pub detected_pattern: Option<DetectedPattern>,
    pub pii_flag: bool,
    pub pii_signals: Vec<PiiSignal>,
}

/// Split a column name into lower-cased alphanumeric tokens.
pub fn name_tokens(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Detects content patterns and PII.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    threshold: f64,
    sample_size: usize,
}

impl PatternDetector {
    pub fn new() -> Self {
        Self {
            threshold: PATTERN_MATCH_THRESHOLD,
            sample_size: PATTERN_SAMPLE_SIZE,
        }
    }

    /// Analyze a column's name and non-null values.
    pub fn analyze<'a>(
        &self,
        name: &str,
        values: impl IntoIterator<Item = &'a Value>,
    ) -> PatternAnalysis {
        let sample: Vec<String> = values
            .into_iter()
            .take(self.sample_size)
            .map(|v| v.render().trim().to_string())
            .collect();

        let detected_pattern = self.detect_pattern(&sample);

        let mut pii_signals: Vec<PiiSignal> = name_tokens(name)
            .into_iter()
            .filter(|t| PII_NAME_TOKENS.contains(&t.as_str()))
            .map(|token| PiiSignal::NameToken { token })
            .collect();

        if let Some(pattern) = detected_pattern.filter(DetectedPattern::is_pii) {
            pii_signals.push(PiiSignal::Pattern { pattern });
        }
        if self.matches_majority(&SSN, &sample) {
            pii_signals.push(PiiSignal::SsnLike);
        }
        if self.matches_majority(&PERSON_NAME, &sample) {
            pii_signals.push(PiiSignal::PersonName);
        }

        PatternAnalysis {
            detected_pattern,
            pii_flag: !pii_signals.is_empty(),
            pii_signals,
        }
    }

    /// First pattern, in priority order, matched by enough of the sample.
    pub fn detect_pattern(&self, sample: &[String]) -> Option<DetectedPattern> {
        DetectedPattern::PRIORITY
            .into_iter()
            .find(|&p| self.matches_majority(pattern_regex(p), sample))
    }

    fn matches_majority(&self, regex: &Regex, sample: &[String]) -> bool {
        if sample.is_empty() {
            return false;
        }
        let matched = sample.iter().filter(|v| regex.is_match(v)).count();
        matched as f64 / sample.len() as f64 >= self.threshold
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}
