//! YAML configuration file.
//!
//! ```yaml
//! profiling:
//!   sample_size: 10000
//!   sampling: random
//!   seed: 42
//!   quality_thresholds:
//!     max_null_percentage: 10.0
//!     min_unique_values: 2
//!     max_cardinality: 50
//! glossary:
//!   fuzzy_threshold: 0.8
//!   auto_mapping: true
//! ```
//!
//! Every field is optional. Values are validated before any analysis runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{QualityThresholds, STRONG_CORRELATION};
use crate::error::{DatadocError, Result};
use crate::glossary::GlossaryConfig;
use crate::input::{SampleStrategy, SamplingPolicy};
use crate::profiler::ProfilerConfig;

/// The `profiling` section as written in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilingSettings {
    /// Rows to keep, 0 for no sampling. Signed so that a negative value is
    /// reported as a configuration error rather than a parse error.
    pub sample_size: i64,
    pub sampling: SampleStrategy,
    pub seed: u64,
    pub top_k_values: usize,
    pub sample_values: usize,
    pub correlation_analysis: bool,
    pub strong_correlation: f64,
    pub score_precision: u32,
    pub quality_thresholds: QualityThresholds,
}

impl Default for ProfilingSettings {
    fn default() -> Self {
        Self {
            sample_size: 0,
            sampling: SampleStrategy::First,
            seed: 0,
            top_k_values: 10,
            sample_values: 5,
            correlation_analysis: true,
            strong_correlation: STRONG_CORRELATION,
            score_precision: 2,
            quality_thresholds: QualityThresholds::default(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatadocConfig {
    pub profiling: ProfilingSettings,
    pub glossary: GlossaryConfig,
}

impl DatadocConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DatadocError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_yaml_str(&text)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(text)?;

        // An empty document parses as null and means "all defaults"
        let config: Self = if raw.is_null() {
            Self::default()
        } else {
            for section in ["profiling", "glossary"] {
                if raw.get(section).is_none() {
                    tracing::warn!(section, "configuration section missing, using defaults");
                }
            }
            serde_yaml::from_value(raw)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<()> {
        self.profiler_config()?.validate()?;
        self.glossary.validate()
    }

    /// Build the profiling engine's configuration.
    pub fn profiler_config(&self) -> Result<ProfilerConfig> {
        let p = &self.profiling;
        let size = usize::try_from(p.sample_size).map_err(|_| {
            DatadocError::Configuration(format!(
                "sample_size must not be negative, got {}",
                p.sample_size
            ))
        })?;

        let sampling = match (size, p.sampling) {
            (0, _) => SamplingPolicy::none(),
            (n, SampleStrategy::First) => SamplingPolicy::first(n),
            (n, SampleStrategy::Random) => SamplingPolicy::random(n, p.seed),
        };

        Ok(ProfilerConfig {
            sampling,
            top_k_values: p.top_k_values,
            sample_values: p.sample_values,
            correlation_analysis: p.correlation_analysis,
            strong_correlation: p.strong_correlation,
            score_precision: p.score_precision,
            thresholds: p.quality_thresholds.clone(),
        })
    }
}
