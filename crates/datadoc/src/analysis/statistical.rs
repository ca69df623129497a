//! Statistical analysis: type inference, distributions and frequency tables.

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

use crate::input::{Column, Value};
use crate::profile::{
    CategoricalDistribution, Distribution, InferredType, NumericDistribution,
    TemporalDistribution, ValueFrequency,
};

/// Share of non-null values a date format must parse to win inference.
pub const DATE_MATCH_THRESHOLD: f64 = 0.95;

/// An accepted date layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pub name: &'static str,
    /// `chrono` format string.
    pub pattern: &'static str,
    pub has_time: bool,
}

impl DateFormat {
    const fn new(name: &'static str, pattern: &'static str, has_time: bool) -> Self {
        Self {
            name,
            pattern,
            has_time,
        }
    }

    /// Parse a value in this format, keeping only the calendar date.
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if self.has_time {
            NaiveDateTime::parse_from_str(text, self.pattern)
                .ok()
                .map(|dt| dt.date())
        } else {
            NaiveDate::parse_from_str(text, self.pattern).ok()
        }
    }
}

/// Accepted date formats, tried in order. The first to reach
/// [`DATE_MATCH_THRESHOLD`] wins.
pub static DATE_FORMATS: [DateFormat; 9] = [
    DateFormat::new("iso_date", "%Y-%m-%d", false),
    DateFormat::new("iso_datetime", "%Y-%m-%dT%H:%M:%S", true),
    DateFormat::new("iso_datetime_space", "%Y-%m-%d %H:%M:%S", true),
    DateFormat::new("ymd_slash", "%Y/%m/%d", false),
    DateFormat::new("us_date", "%m/%d/%Y", false),
    DateFormat::new("eu_date", "%d/%m/%Y", false),
    DateFormat::new("eu_date_dash", "%d-%m-%Y", false),
    DateFormat::new("day_month_name", "%d %b %Y", false),
    DateFormat::new("month_name_day", "%b %d, %Y", false),
];

// =============================================================================
// VALUE INTERPRETATION
// =============================================================================

/// Interpret a value as an integer without lossy coercion.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Interpret a value as a float. Overflowing numeric text parses to infinity
/// and is accepted; `inf`/`nan` words are not numbers.
pub(crate) fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Float(f) if !f.is_nan() => Some(*f),
        Value::Text(s) => {
            let trimmed = s.trim();
            if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| !f.is_nan())
        }
        _ => None,
    }
}

/// Interpret a value as a boolean token: true/false, yes/no or 0/1,
/// case-insensitive.
pub(crate) fn as_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::Integer(0) => Some(false),
        Value::Integer(1) => Some(true),
        Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Parse a date with the first accepted format that succeeds.
fn first_date_match(text: &str) -> Option<(&'static DateFormat, NaiveDate)> {
    DATE_FORMATS
        .iter()
        .find_map(|f| f.parse(text).map(|d| (f, d)))
}

fn is_padded(text: &str) -> bool {
    text.trim().len() != text.len()
}

/// Formatting signature of a value under a given type, used to detect mixed
/// formats within one inferred type.
fn format_signature(value: &Value, inferred: InferredType) -> &'static str {
    let text = match value {
        Value::Text(s) => s.as_str(),
        Value::Boolean(_) => return "true_false",
        Value::Integer(_) if inferred == InferredType::Boolean => return "binary",
        Value::Integer(_) if inferred == InferredType::Integer => return "plain",
        Value::Integer(_) | Value::Float(_) if inferred == InferredType::Float => return "decimal",
        _ => return "native",
    };

    if is_padded(text) {
        return "padded";
    }

    match inferred {
        InferredType::Integer => {
            let digits = text.trim_start_matches(['+', '-']);
            if digits.len() > 1 && digits.starts_with('0') {
                "zero_padded"
            } else {
                "plain"
            }
        }
        InferredType::Float => {
            if text.contains(['e', 'E']) {
                "scientific"
            } else {
                "decimal"
            }
        }
        InferredType::Boolean => match text.to_ascii_lowercase().as_str() {
            "yes" | "no" => "yes_no",
            "0" | "1" => "binary",
            _ => "true_false",
        },
        InferredType::Date => first_date_match(text).map(|(f, _)| f.name).unwrap_or("invalid"),
        InferredType::String | InferredType::Unknown => "plain",
    }
}

// =============================================================================
// TYPE INFERENCE
// =============================================================================

/// Outcome of type inference over a column's non-null values.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeInference {
    pub inferred_type: InferredType,
    /// Values that parse as the inferred type without coercion failure.
    pub valid_count: usize,
    /// Count of valid values per formatting signature, in first-seen order.
    pub format_counts: IndexMap<&'static str, usize>,
}

impl TypeInference {
    /// Count of the most frequent formatting signature.
    pub fn dominant_format_count(&self) -> usize {
        self.format_counts.values().copied().max().unwrap_or(0)
    }
}

/// Infer the narrowest type that interprets every non-null value:
/// integer, then float, then boolean, then date (first format parsing at
/// least 95% of values), otherwise string.
pub fn infer_type(values: &[&Value]) -> TypeInference {
    if values.is_empty() {
        return TypeInference {
            inferred_type: InferredType::Unknown,
            valid_count: 0,
            format_counts: IndexMap::new(),
        };
    }

    let total = values.len();

    let (inferred_type, valid_count) = if values.iter().all(|v| as_integer(v).is_some()) {
        (InferredType::Integer, total)
    } else if values.iter().all(|v| as_float(v).is_some()) {
        (InferredType::Float, total)
    } else if values.iter().all(|v| as_boolean(v).is_some()) {
        (InferredType::Boolean, total)
    } else if let Some(valid) = date_valid_count(values) {
        (InferredType::Date, valid)
    } else {
        (InferredType::String, total)
    };

    let mut format_counts: IndexMap<&'static str, usize> = IndexMap::new();
    for value in values {
        let signature = format_signature(value, inferred_type);
        if signature != "invalid" {
            *format_counts.entry(signature).or_insert(0) += 1;
        }
    }

    TypeInference {
        inferred_type,
        valid_count,
        format_counts,
    }
}

/// If some date format parses enough values, the number of values that parse
/// under any accepted format.
fn date_valid_count(values: &[&Value]) -> Option<usize> {
    let texts: Vec<&str> = values
        .iter()
        .filter_map(|v| match v {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    if texts.len() != values.len() {
        return None;
    }

    let total = texts.len() as f64;
    let winner = DATE_FORMATS.iter().find(|f| {
        let parsed = texts.iter().filter(|t| f.parse(t).is_some()).count();
        parsed as f64 / total >= DATE_MATCH_THRESHOLD
    })?;

    tracing::trace!(format = winner.name, "date format selected");
    Some(texts.iter().filter(|t| first_date_match(t).is_some()).count())
}

// =============================================================================
// DISTRIBUTIONS
// =============================================================================

/// Welford accumulator for mean and population variance in a single pass.
#[derive(Debug, Clone, Default)]
struct RunningMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    fn std_dev(&self) -> Option<f64> {
        (self.count > 0).then(|| (self.m2 / self.count as f64).sqrt())
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Percentile by linear interpolation between the closest ranks.
/// `sorted` must be non-empty and ascending; `p` in [0, 1].
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Population statistics over numeric values. Any statistic that is not a
/// finite number is reported as undefined.
pub fn numeric_distribution(values: &[f64]) -> NumericDistribution {
    if values.is_empty() {
        return NumericDistribution::default();
    }

    let mut moments = RunningMoments::default();
    for &v in values {
        moments.add(v);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    NumericDistribution {
        min: finite(sorted[0]),
        max: finite(sorted[sorted.len() - 1]),
        mean: moments.mean().and_then(finite),
        median: finite(quantile(&sorted, 0.5)),
        std_dev: moments.std_dev().and_then(finite),
        q1: finite(quantile(&sorted, 0.25)),
        q3: finite(quantile(&sorted, 0.75)),
        zeros_count: values.iter().filter(|&&v| v == 0.0).count(),
    }
}

/// Frequency table over raw values: case- and whitespace-sensitive, top-K by
/// descending count with ties in first-seen order.
pub fn frequency_table(
    counts: &IndexMap<Cow<'_, str>, usize>,
    top_k: usize,
    max_cardinality: usize,
) -> CategoricalDistribution {
    let mut ranked: Vec<(&Cow<'_, str>, &usize)> = counts.iter().collect();
    // Stable sort keeps first-seen order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(a.1));

    let top_values = ranked
        .iter()
        .take(top_k)
        .map(|(value, count)| ValueFrequency {
            value: value.to_string(),
            count: **count,
        })
        .collect();

    let mut least: Option<(&Cow<'_, str>, usize)> = None;
    for (value, &count) in counts {
        if least.is_none_or(|(_, c)| count < c) {
            least = Some((value, count));
        }
    }

    CategoricalDistribution {
        top_values,
        most_common: ranked.first().map(|(v, _)| v.to_string()),
        least_common: least.map(|(v, _)| v.to_string()),
        is_categorical: counts.len() < max_cardinality,
    }
}

/// Earliest and latest dates across the values that parse.
pub fn temporal_distribution(values: &[&Value]) -> TemporalDistribution {
    let dates: Vec<NaiveDate> = values
        .iter()
        .filter_map(|v| match v {
            Value::Text(s) => first_date_match(s).map(|(_, d)| d),
            _ => None,
        })
        .collect();

    let min = dates.iter().min();
    let max = dates.iter().max();

    TemporalDistribution {
        min_date: min.map(|d| d.format("%Y-%m-%d").to_string()),
        max_date: max.map(|d| d.format("%Y-%m-%d").to_string()),
        range_days: min.zip(max).map(|(lo, hi)| (*hi - *lo).num_days()),
    }
}

// =============================================================================
// COLUMN ANALYSIS
// =============================================================================

/// Statistical summary of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticalAnalysis {
    pub inferred_type: InferredType,
    pub row_count: usize,
    pub null_count: usize,
    pub non_null_count: usize,
    /// Distinct non-null values, compared by their text rendering.
    pub unique_count: usize,
    pub valid_count: usize,
    pub dominant_format_count: usize,
    pub format_counts: IndexMap<String, usize>,
    pub distribution: Distribution,
    pub sample_values: Vec<String>,
}

/// Computes per-column statistics.
#[derive(Debug, Clone)]
pub struct StatisticalAnalyzer {
    /// Size of the frequency table.
    top_k: usize,
    /// Number of sample values kept for display.
    sample_size: usize,
    /// Cardinality below which a column counts as categorical.
    max_cardinality: usize,
}

impl StatisticalAnalyzer {
    /// Create a new statistical analyzer with default settings.
    pub fn new() -> Self {
        Self {
            top_k: 10,
            sample_size: 5,
            max_cardinality: 50,
        }
    }

    pub fn with_limits(top_k: usize, sample_size: usize, max_cardinality: usize) -> Self {
        Self {
            top_k,
            sample_size,
            max_cardinality,
        }
    }

    /// Analyze a column and return its statistical summary.
    pub fn analyze_column(&self, column: &Column) -> StatisticalAnalysis {
        let non_null: Vec<&Value> = column.non_null().collect();
        let row_count = column.len();
        let non_null_count = non_null.len();

        let mut counts: IndexMap<Cow<'_, str>, usize> = IndexMap::new();
        for value in &non_null {
            *counts.entry(value.render()).or_insert(0) += 1;
        }

        let inference = infer_type(&non_null);

        let distribution = match inference.inferred_type {
            InferredType::Integer | InferredType::Float => {
                let numbers: Vec<f64> = non_null.iter().filter_map(|v| as_float(v)).collect();
                let numeric = numeric_distribution(&numbers);
                if numeric.is_undefined() || numeric.mean.is_none() || numeric.std_dev.is_none() {
                    tracing::warn!(
                        column = %column.name,
                        "numeric statistics overflowed; affected fields left undefined"
                    );
                }
                Distribution::Numeric(numeric)
            }
            InferredType::String | InferredType::Boolean => Distribution::Categorical(
                frequency_table(&counts, self.top_k, self.max_cardinality),
            ),
            InferredType::Date => Distribution::Temporal(temporal_distribution(&non_null)),
            InferredType::Unknown => Distribution::Undefined,
        };

        let sample_values = non_null
            .iter()
            .take(self.sample_size)
            .map(|v| v.render().into_owned())
            .collect();

        StatisticalAnalysis {
            inferred_type: inference.inferred_type,
            row_count,
            null_count: row_count - non_null_count,
            non_null_count,
            unique_count: counts.len(),
            valid_count: inference.valid_count,
            dominant_format_count: inference.dominant_format_count(),
            format_counts: inference
                .format_counts
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            distribution,
            sample_values,
        }
    }
}

impl Default for StatisticalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(values: Vec<Value>) -> StatisticalAnalysis {
        StatisticalAnalyzer::new().analyze_column(&Column {
            name: "c".to_string(),
            values,
        })
    }

    fn texts(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::from_text(v)).collect()
    }

    #[test]
    fn test_infer_integer_type() {
        let result = analyze(texts(&["1", "2", "3", "100"]));
        assert_eq!(result.inferred_type, InferredType::Integer);
    }

    #[test]
    fn test_infer_float_type() {
        let result = analyze(texts(&["1.5", "2.7", "3", "0.5"]));
        assert_eq!(result.inferred_type, InferredType::Float);
    }

    #[test]
    fn test_binary_digits_infer_integer() {
        let result = analyze(texts(&["0", "1", "1", "0"]));
        assert_eq!(result.inferred_type, InferredType::Integer);
    }

    #[test]
    fn test_infer_boolean_type() {
        let result = analyze(texts(&["true", "FALSE", "yes", "No", "1"]));
        assert_eq!(result.inferred_type, InferredType::Boolean);
        // true_false, yes_no and binary tokens all present
        assert_eq!(result.format_counts.len(), 3);
        assert_eq!(result.dominant_format_count, 2);
    }

    #[test]
    fn test_infer_date_type() {
        let result = analyze(texts(&["2024-01-15", "2024-02-20", "2024-03-25"]));
        assert_eq!(result.inferred_type, InferredType::Date);

        let temporal = result.distribution.as_temporal().unwrap();
        assert_eq!(temporal.min_date.as_deref(), Some("2024-01-15"));
        assert_eq!(temporal.max_date.as_deref(), Some("2024-03-25"));
        assert_eq!(temporal.range_days, Some(70));
    }

    #[test]
    fn test_date_threshold_boundary() {
        // 19 of 20 ISO dates is exactly 95%
        let mut values: Vec<String> = (1..=19).map(|d| format!("2024-01-{:02}", d)).collect();
        values.push("01/20/2024".to_string());
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let result = analyze(texts(&refs));

        assert_eq!(result.inferred_type, InferredType::Date);
        assert_eq!(result.valid_count, 20);
        assert_eq!(result.dominant_format_count, 19);

        // 18 of 20 is below the threshold
        let mut values: Vec<String> = (1..=18).map(|d| format!("2024-01-{:02}", d)).collect();
        values.push("soon".to_string());
        values.push("later".to_string());
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        assert_eq!(analyze(texts(&refs)).inferred_type, InferredType::String);
    }

    #[test]
    fn test_mixed_text_falls_back_to_string() {
        let result = analyze(texts(&["1", "two", "3"]));
        assert_eq!(result.inferred_type, InferredType::String);
        assert_eq!(result.valid_count, 3);
    }

    #[test]
    fn test_all_null_is_unknown() {
        let result = analyze(vec![Value::Null; 10]);
        assert_eq!(result.inferred_type, InferredType::Unknown);
        assert_eq!(result.null_count, 10);
        assert_eq!(result.distribution, Distribution::Undefined);
    }

    #[test]
    fn test_numeric_distribution() {
        let dist = numeric_distribution(&[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(dist.min, Some(1.0));
        assert_eq!(dist.max, Some(4.0));
        assert_eq!(dist.mean, Some(2.5));
        assert_eq!(dist.median, Some(2.5));
        assert_eq!(dist.q1, Some(1.75));
        assert_eq!(dist.q3, Some(3.25));
        let std = dist.std_dev.unwrap();
        assert!((std - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_numeric_distribution_empty_is_undefined() {
        assert!(numeric_distribution(&[]).is_undefined());
    }

    #[test]
    fn test_overflow_degrades_to_undefined() {
        let result = analyze(texts(&["1e308", "1e308", "1e400"]));
        assert_eq!(result.inferred_type, InferredType::Float);

        let numeric = result.distribution.as_numeric().unwrap();
        assert_eq!(numeric.min, Some(1e308));
        assert_eq!(numeric.max, None);
        assert_eq!(numeric.mean, None);
    }

    #[test]
    fn test_frequency_table_ties_first_seen() {
        let result = analyze(texts(&["b", "a", "a", "b", "c", "B"]));
        let cat = result.distribution.as_categorical().unwrap();

        assert_eq!(cat.top_values[0].value, "b");
        assert_eq!(cat.top_values[1].value, "a");
        assert_eq!(cat.top_values[2].value, "c");
        assert_eq!(cat.top_values[3].value, "B");
        assert_eq!(cat.most_common.as_deref(), Some("b"));
        assert_eq!(cat.least_common.as_deref(), Some("c"));
        assert_eq!(result.unique_count, 4);
    }

    #[test]
    fn test_frequency_table_is_whitespace_sensitive() {
        let result = analyze(texts(&["x", " x", "x"]));
        assert_eq!(result.unique_count, 2);
        assert_eq!(result.format_counts.get("padded"), Some(&1));
    }

    #[test]
    fn test_top_k_limit() {
        let analyzer = StatisticalAnalyzer::with_limits(2, 5, 50);
        let result = analyzer.analyze_column(&Column::new("c", ["a", "b", "c", "a"]));
        let cat = result.distribution.as_categorical().unwrap();

        assert_eq!(cat.top_values.len(), 2);
        assert_eq!(cat.top_values[0], ValueFrequency { value: "a".into(), count: 2 });
    }

    #[test]
    fn test_sample_values_in_row_order() {
        let result = analyze(texts(&["", "z", "y", "NA", "x", "w", "v", "u"]));
        assert_eq!(result.sample_values, vec!["z", "y", "x", "w", "v"]);
    }

    #[test]
    fn test_zero_padded_integers_are_inconsistent() {
        let result = analyze(texts(&["007", "8", "9", "10"]));
        assert_eq!(result.inferred_type, InferredType::Integer);
        assert_eq!(result.dominant_format_count, 3);
    }

    #[test]
    fn test_native_values() {
        let result = analyze(vec![Value::Integer(3), Value::Float(1.5), Value::Null]);
        assert_eq!(result.inferred_type, InferredType::Float);
        assert_eq!(result.non_null_count, 2);
    }
}
