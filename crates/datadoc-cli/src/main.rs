//! datadoc CLI - dataset profiling and business glossary mapping.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    // RUST_LOG wins; otherwise warnings only, or debug with --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Profile {
            file,
            output,
            sample_size,
            json,
        } => commands::profile::run(file, output, cli.config, sample_size, json, cli.verbose),

        Commands::Glossary {
            file,
            terms,
            output,
            threshold,
            json,
        } => commands::glossary::run(file, terms, output, cli.config, threshold, json),

        Commands::Summary { file, json } => commands::summary::run(file, cli.config, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
