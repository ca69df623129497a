//! datadoc: automatic documentation for tabular datasets.
//!
//! datadoc profiles a dataset column by column and links technical column
//! names to business terminology.
//!
//! # Components
//!
//! - **Profiler**: infers column types, computes distributions, detects
//!   content patterns and PII, and scores data quality 0-100.
//! - **Glossary mapper**: resolves each column name against a curated term
//!   dictionary by exact, normalized and fuzzy matching.
//!
//! Both produce immutable documents that can be saved as JSON snapshots.
//!
//! # Example
//!
//! ```no_run
//! use datadoc::{GlossaryMapper, Profiler, TermDictionary};
//!
//! let profile = Profiler::new().profile_file("customers.csv").unwrap();
//! println!("Quality score: {}", profile.quality_score);
//!
//! let dictionary = TermDictionary::load("glossary.yaml").unwrap();
//! let report = GlossaryMapper::new().build_report(
//!     &profile.dataset_name,
//!     &dictionary,
//!     &profile.column_names(),
//! );
//! println!("Coverage: {:.1}%", report.coverage_percentage);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod glossary;
pub mod input;
pub mod profile;

mod profiler;

pub use crate::profiler::{Profiler, ProfilerConfig};
pub use config::DatadocConfig;
pub use error::{DatadocError, Result};
pub use glossary::{
    GlossaryConfig, GlossaryMapper, GlossaryReport, GlossaryTerm, MatchResult, MatchType,
    Resolution, TermDictionary,
};
pub use input::{Column, Dataset, Parser, SamplingPolicy, SourceMetadata, Value};
pub use profile::{ColumnProfile, DatasetProfile, InferredType};
