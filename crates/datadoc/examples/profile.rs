//! Example: profile a delimited file and map its columns to a glossary.
//!
//! Usage:
//!   cargo run --example profile -- <file_path> [glossary.yaml]

use std::env;
use std::path::Path;

use datadoc::{GlossaryMapper, Profiler, TermDictionary};

fn main() -> datadoc::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example profile -- <file_path> [glossary.yaml]");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let profile = Profiler::new().profile_file(path)?;
    print!("{}", profile.summary());

    println!();
    println!("## Columns");
    for column in &profile.columns {
        println!(
            "  {:<24} {:<8} nulls {:>5.1}%  unique {:>6}  score {:>6.2}{}",
            column.name,
            column.inferred_type.label(),
            column.null_percentage(),
            column.unique_count,
            column.quality_score,
            if column.pii_flag { "  [PII]" } else { "" }
        );
    }

    if !profile.quality_issues.is_empty() {
        println!();
        println!("## Quality Issues");
        for issue in &profile.quality_issues {
            println!(
                "  [{}] {}: {} ({})",
                issue.severity.label(),
                issue.column,
                issue.kind.label(),
                issue.detail
            );
        }
    }

    if let Some(glossary) = args.get(2) {
        let dictionary = TermDictionary::load(glossary)?;
        let report =
            GlossaryMapper::new().build_report(&profile.dataset_name, &dictionary, &profile.column_names());

        println!();
        println!("## Glossary ({:.1}% coverage)", report.coverage_percentage);
        for mapping in &report.mappings {
            println!(
                "  {:<24} -> {:<28} {:<10} {:.2}",
                mapping.column_name,
                mapping.business_name,
                mapping.match_type.label(),
                mapping.confidence
            );
        }
    }

    Ok(())
}
