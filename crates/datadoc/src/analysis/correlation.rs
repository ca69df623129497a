//! Pairwise Pearson correlation across numeric columns.

use super::statistical::as_float;
use crate::input::Column;
use crate::profile::{CorrelationPair, CorrelationReport};

/// Default absolute coefficient above which a pair is reported as strong.
pub const STRONG_CORRELATION: f64 = 0.7;

/// Builds the correlation matrix for numeric columns.
#[derive(Debug, Clone)]
pub struct CorrelationAnalyzer {
    strong_threshold: f64,
}

impl CorrelationAnalyzer {
    pub fn new() -> Self {
        Self {
            strong_threshold: STRONG_CORRELATION,
        }
    }

    pub fn with_strong_threshold(strong_threshold: f64) -> Self {
        Self { strong_threshold }
    }

    /// Correlate the given numeric columns.
    ///
    /// Columns with fewer than two finite values or no variance are listed in
    /// `insufficient_data` and left out of the matrix. Pairs are computed on
    /// rows where both values are present.
    pub fn analyze(&self, columns: &[&Column]) -> CorrelationReport {
        let mut report = CorrelationReport::default();
        let mut series: Vec<(&str, Vec<Option<f64>>)> = Vec::new();

        for column in columns {
            let values: Vec<Option<f64>> = column
                .values
                .iter()
                .map(|v| if v.is_null() { None } else { as_float(v) })
                .map(|v| v.filter(|f| f.is_finite()))
                .collect();

            let present: Vec<f64> = values.iter().flatten().copied().collect();
            if present.len() < 2 || is_constant(present.iter().copied()) {
                tracing::debug!(column = %column.name, "insufficient data for correlation");
                report.insufficient_data.push(column.name.clone());
            } else {
                report.columns.push(column.name.clone());
                series.push((column.name.as_str(), values));
            }
        }

        for (i, (name_a, a)) in series.iter().enumerate() {
            for (name_b, b) in &series[i + 1..] {
                let pair = CorrelationPair {
                    column_1: name_a.to_string(),
                    column_2: name_b.to_string(),
                    coefficient: pearson(a, b),
                };
                if pair
                    .coefficient
                    .is_some_and(|r| r.abs() > self.strong_threshold)
                {
                    report.strong_correlations.push(pair.clone());
                }
                report.pairs.push(pair);
            }
        }

        report
    }
}

impl Default for CorrelationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// True when every value equals the first.
fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

/// Pearson coefficient over pairwise-complete rows, clamped to [-1, 1].
pub fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2
        || is_constant(pairs.iter().map(|p| p.0))
        || is_constant(pairs.iter().map(|p| p.1))
    {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
