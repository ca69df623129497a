//! Glossary command - map column names to business terms.

use std::path::PathBuf;

use colored::Colorize;
use datadoc::{GlossaryMapper, MatchType, TermDictionary};

use super::{default_output, load_config, obtain_profile, CommandResult};

pub fn run(
    file: PathBuf,
    terms: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    threshold: Option<f64>,
    json_output: bool,
) -> CommandResult {
    if !terms.exists() {
        return Err(format!("Term dictionary not found: {}", terms.display()).into());
    }

    let config = load_config(config_path.as_deref())?;
    let mut glossary_config = config.glossary.clone();
    if let Some(t) = threshold {
        glossary_config.fuzzy_threshold = t;
    }
    let mapper = GlossaryMapper::with_config(glossary_config)?;

    let dictionary = TermDictionary::load(&terms)?;
    let profile = obtain_profile(&file, &config)?;
    let report = mapper.build_report(&profile.dataset_name, &dictionary, &profile.column_names());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} terms)",
        "Glossary mapping for".cyan().bold(),
        profile.dataset_name.white(),
        dictionary.len()
    );
    println!();

    for m in &report.mappings {
        let kind = match m.match_type {
            MatchType::Exact => m.match_type.label().green(),
            MatchType::Normalized => m.match_type.label().blue(),
            MatchType::Fuzzy => m.match_type.label().yellow(),
            MatchType::Unmatched => m.match_type.label().red(),
        };
        println!(
            "  {:24} -> {:28} {:10} {:.2}",
            m.column_name, m.business_name, kind, m.confidence
        );
    }

    println!();
    println!(
        "Mapped {}/{} columns ({:.1}% coverage)",
        report.mapped_columns.to_string().white().bold(),
        report.total_columns,
        report.coverage_percentage
    );
    if !report.pii_columns.is_empty() {
        println!("{} {}", "PII columns:".red().bold(), report.pii_columns.join(", "));
    }
    if !report.missing_owners.is_empty() {
        println!(
            "{} {}",
            "Missing owners:".yellow(),
            report.missing_owners.join(", ")
        );
    }

    let output_path = output.unwrap_or_else(|| default_output(&file, "glossary.json"));
    report.save(&output_path)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}
