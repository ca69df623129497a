//! CLI command implementations.

pub mod glossary;
pub mod profile;
pub mod summary;

use std::path::{Path, PathBuf};

use datadoc::{DatadocConfig, DatasetProfile, Profiler};
use tracing::debug;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load the configuration file if one was given, else defaults.
pub fn load_config(path: Option<&Path>) -> Result<DatadocConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            if !p.exists() {
                return Err(format!("Config file not found: {}", p.display()).into());
            }
            Ok(DatadocConfig::load(p)?)
        }
        None => Ok(DatadocConfig::default()),
    }
}

/// `<dir>/<stem>.<suffix>` next to the input file.
pub fn default_output(file: &Path, suffix: &str) -> PathBuf {
    let mut p = file.to_path_buf();
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    p.set_file_name(format!("{}.{}", stem, suffix));
    p
}

pub fn is_json(path: &Path) -> bool {
    path.extension().map(|e| e == "json").unwrap_or(false)
}

/// Load a saved profile, or profile a data file on the fly.
pub fn obtain_profile(
    file: &Path,
    config: &DatadocConfig,
) -> Result<DatasetProfile, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    if is_json(file) {
        debug!("Loading saved profile from {}", file.display());
        Ok(DatasetProfile::load(file)?)
    } else {
        debug!("Profiling {}", file.display());
        let profiler = Profiler::with_config(config.profiler_config()?)?;
        Ok(profiler.profile_file(file)?)
    }
}
