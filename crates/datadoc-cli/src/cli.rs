//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// datadoc: automatic profiling and glossary documentation for tabular data
#[derive(Parser)]
#[command(name = "datadoc")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (YAML)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a data file and save the profile as JSON
    Profile {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the profile (default: <file>.profile.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows to sample before profiling (overrides the config file)
        #[arg(long)]
        sample_size: Option<usize>,

        /// Print the profile JSON to stdout instead of saving it
        #[arg(long)]
        json: bool,
    },

    /// Map column names to business glossary terms
    Glossary {
        /// Data file (CSV/TSV) or a saved profile (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Term dictionary (YAML or JSON)
        #[arg(short, long, value_name = "TERMS")]
        terms: PathBuf,

        /// Output path for the report (default: <file>.glossary.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum similarity for fuzzy matches (overrides the config file)
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the report JSON to stdout instead of saving it
        #[arg(long)]
        json: bool,
    },

    /// Show a summary of a data file or a saved profile
    Summary {
        /// Data file (CSV/TSV) or a saved profile (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
