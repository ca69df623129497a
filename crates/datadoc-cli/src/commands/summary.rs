//! Summary command - print a profile summary.

use std::path::PathBuf;

use colored::Colorize;

use super::{load_config, obtain_profile, CommandResult};

pub fn run(file: PathBuf, config_path: Option<PathBuf>, json_output: bool) -> CommandResult {
    let config = load_config(config_path.as_deref())?;
    let profile = obtain_profile(&file, &config)?;

    if json_output {
        let summary = serde_json::json!({
            "dataset_name": profile.dataset_name,
            "generated_at": profile.generated_at,
            "row_count": profile.row_count,
            "column_count": profile.column_count,
            "estimated_size_bytes": profile.estimated_size_bytes,
            "duplicate_row_count": profile.duplicate_row_count,
            "overall_completeness": profile.overall_completeness,
            "columns_with_nulls": profile.columns_with_nulls(),
            "total_null_cells": profile.total_null_cells,
            "quality_score": profile.quality_score,
            "quality_issues": profile.quality_issues.len(),
            "pii_columns": profile.pii_columns(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print!("{}", profile.summary());
    println!(
        "Generated: {}",
        profile
            .generated_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .dimmed()
    );

    if !profile.quality_issues.is_empty() {
        println!();
        println!("{}", "Quality issues:".yellow().bold());
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

    Ok(())
}
