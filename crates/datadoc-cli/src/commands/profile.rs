//! Profile command - profile a data file and save the profile.

use std::path::PathBuf;

use colored::Colorize;
use datadoc::input::SamplingPolicy;
use datadoc::profile::Severity;
use datadoc::Profiler;

use super::{default_output, load_config, CommandResult};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    sample_size: Option<usize>,
    json_output: bool,
    verbose: bool,
) -> CommandResult {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = load_config(config_path.as_deref())?;
    let mut profiler_config = config.profiler_config()?;
    if let Some(n) = sample_size {
        profiler_config.sampling = SamplingPolicy {
            size: n,
            ..profiler_config.sampling
        };
    }
    let profiler = Profiler::with_config(profiler_config)?;

    if !json_output {
        println!(
            "{} {}",
            "Profiling".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let profile = profiler.profile_file(&file)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    if verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for col in &profile.columns {
            let pii = if col.pii_flag { "PII".red().to_string() } else { String::new() };
            println!(
                "  {:24} {:10} {:>6.1}% null  {:>7.2} {}",
                col.name,
                col.inferred_type.label(),
                col.null_percentage(),
                col.quality_score,
                pii
            );
        }
        println!();
    }

    let high = profile
        .quality_issues
        .iter()
        .filter(|i| i.severity == Severity::High)
        .count();
    let medium = profile
        .quality_issues
        .iter()
        .filter(|i| i.severity == Severity::Medium)
        .count();
    let low = profile.quality_issues.len() - high - medium;

    println!(
        "Profiled {} rows x {} columns{}",
        profile.row_count.to_string().white().bold(),
        profile.column_count.to_string().white().bold(),
        match profile.sampled_from {
            Some(n) => format!(" (sampled from {})", n),
            None => String::new(),
        }
    );
    println!(
        "Found {} quality issues ({} high, {} medium, {} low)",
        profile.quality_issues.len().to_string().white().bold(),
        high.to_string().red(),
        medium.to_string().yellow(),
        low.to_string().blue()
    );

    let pii = profile.pii_columns();
    if !pii.is_empty() {
        println!("{} {}", "PII columns:".red().bold(), pii.join(", "));
    }

    let output_path = output.unwrap_or_else(|| default_output(&file, "profile.json"));
    profile.save(&output_path)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );
    println!("Quality score: {:.1}/100", profile.quality_score);

    Ok(())
}
