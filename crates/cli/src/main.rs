//! API Doc Toolkit CLI
//!
//! Command-line interface for listing and merging API specification files.

mod logging;

use anyhow::{Context, Result};
use api_doc_toolkit_common::Settings;
use api_doc_toolkit_locator::SpecLocator;
use api_doc_toolkit_merger::{
    ConflictPolicy, MergeOptions, MergeReport, SkipReason, SourceFormats, SpecMerger,
};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "api-doc-toolkit")]
#[command(version, about = "Locate, validate and merge API specification files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (overrides LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the spec files found in a directory
    #[command(after_help = "EXAMPLES:\n  \
        # List specs in SPEC_DIR\n  \
        api-doc-toolkit list\n\n  \
        # Group specs by extension\n  \
        api-doc-toolkit list --dir ./specs --group")]
    List {
        /// Directory containing spec files (defaults to SPEC_DIR)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Group files by extension
        #[arg(short, long)]
        group: bool,
    },

    /// Merge the spec files of a directory into one document
    #[command(after_help = "EXAMPLES:\n  \
        # Merge SPEC_DIR into CONFIG_DIR/merged_spec.yaml\n  \
        api-doc-toolkit merge\n\n  \
        # Merge YAML and JSON sources, refusing duplicate definitions\n  \
        api-doc-toolkit merge \\\n    \
        --dir ./specs \\\n    \
        --output ./openapi.yaml \\\n    \
        --include-json \\\n    \
        --fail-on-conflict")]
    Merge {
        /// Directory containing spec files (defaults to SPEC_DIR)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Output file; `.json` writes JSON, anything else YAML
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also merge `.json` sources
        #[arg(long)]
        include_json: bool,

        /// Abort when two files define the same path or schema
        #[arg(long)]
        fail_on_conflict: bool,

        /// Base configuration file name inside the spec directory
        #[arg(long)]
        base_config: Option<String>,

        /// Comma-separated file names never merged, in addition to the base
        /// configuration and readiness probe
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Print the merge report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env();

    let level_name = if cli.verbose {
        "debug"
    } else {
        cli.log_level.as_deref().unwrap_or(&settings.log_level)
    };
    let level = logging::parse_level(level_name).unwrap_or_else(|| {
        eprintln!(
            "{} Unknown log level {:?}, using info",
            "⚠".yellow(),
            level_name
        );
        Level::INFO
    });
    logging::init(level)?;

    info!("Starting API Documentation Toolkit...");

    match cli.command {
        Commands::List { dir, group } => {
            let dir = dir.unwrap_or_else(|| settings.spec_dir.clone());
            list_command(&dir, group, cli.verbose)?;
        }
        Commands::Merge {
            dir,
            output,
            include_json,
            fail_on_conflict,
            base_config,
            exclude,
            json,
        } => {
            let options = build_options(include_json, fail_on_conflict, base_config, exclude);
            merge_command(MergeConfig {
                spec_dir: &dir.unwrap_or_else(|| settings.spec_dir.clone()),
                output: &output.unwrap_or_else(|| settings.default_output()),
                options,
                json,
                verbose: cli.verbose,
            })?;
        }
    }

    Ok(())
}

fn list_command(dir: &Path, group: bool, verbose: bool) -> Result<()> {
    println!(
        "{} Scanning directory for specs: {}",
        "→".cyan(),
        dir.display()
    );

    let locator = SpecLocator::new(dir).context("Failed to open spec directory")?;

    if group {
        let grouped = locator
            .group_by_extension()
            .context("Failed to list spec files")?;
        for (extension, files) in grouped {
            println!("\n{} ({})", extension.to_string().bold(), files.len());
            for file in files {
                println!("  • {}", file.file_name().cyan());
            }
        }
    } else {
        let files = locator.spec_files().context("Failed to list spec files")?;
        println!("{} Discovered {} spec files", "✓".green(), files.len());
        for file in &files {
            if verbose {
                println!("  • {} ({})", file.path().display(), file.format());
            } else {
                println!("  • {}", file.file_name().cyan());
            }
        }
    }

    if locator.has_multiple_spec_files()? {
        println!("\n{} Multiple spec files found, merge required", "→".cyan());
    } else {
        println!("\n{} Single spec file, nothing to merge", "→".cyan());
    }

    Ok(())
}

fn build_options(
    include_json: bool,
    fail_on_conflict: bool,
    base_config: Option<String>,
    exclude: Option<Vec<String>>,
) -> MergeOptions {
    let mut options = MergeOptions::default();

    if include_json {
        options = options.with_sources(SourceFormats::All);
    }
    if fail_on_conflict {
        options = options.with_conflict_policy(ConflictPolicy::Fail);
    }
    if let Some(base_config) = base_config {
        options = options.with_base_config_file(base_config);
    }
    if let Some(exclude) = exclude {
        options = options.with_excluded_files(exclude);
    }

    options
}

/// Configuration for the merge command
struct MergeConfig<'a> {
    spec_dir: &'a Path,
    output: &'a Path,
    options: MergeOptions,
    json: bool,
    verbose: bool,
}

fn merge_command(config: MergeConfig) -> Result<()> {
    if !config.json {
        println!(
            "{} Merging specs from {} into {}",
            "→".cyan(),
            config.spec_dir.display(),
            config.output.display()
        );
    }

    let report = SpecMerger::new(config.spec_dir, config.output)
        .context("Failed to open spec directory")?
        .with_options(config.options)
        .merge()
        .with_context(|| format!("Failed to merge specs from {}", config.spec_dir.display()))?;

    if config.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize merge report")?
        );
    } else {
        print_summary(&report, config.verbose);
    }

    Ok(())
}

fn print_summary(report: &MergeReport, verbose: bool) {
    if verbose {
        for file in &report.merged {
            println!(
                "{} Merged {} ({} paths, {} schemas)",
                "✓".green(),
                file.path.display(),
                file.paths,
                file.schemas
            );
        }
        for file in &report.skipped {
            let reason = match file.reason {
                SkipReason::Excluded => "excluded",
                SkipReason::FormatNotMerged => "format not merged, use --include-json",
            };
            println!("  Skipped {} ({})", file.path.display(), reason);
        }
    }

    for collision in &report.collisions {
        eprintln!("{} {}", "⚠".yellow(), collision);
    }

    match &report.base_config {
        Some(path) => println!("{} Applied base configuration {}", "✓".green(), path.display()),
        None => println!("{} No base configuration found", "→".cyan()),
    }

    println!("\n{}", "✓ Merge complete!".green().bold());
    println!("  Files merged: {}", report.merged.len());
    println!("  Files skipped: {}", report.skipped.len());
    println!("  Paths: {}", report.total_paths.to_string().yellow());
    println!("  Schemas: {}", report.total_schemas.to_string().yellow());
    if report.has_collisions() {
        println!(
            "  {} {} duplicate definition(s) dropped",
            "⚠".yellow(),
            report.collisions.len()
        );
    }
    println!("  📄 {}", report.output.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_merge_flags() {
        let cli = Cli::try_parse_from([
            "api-doc-toolkit",
            "merge",
            "--dir",
            "specs",
            "--exclude",
            "health.yaml,ready.yaml",
            "--include-json",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Merge {
                dir,
                exclude,
                include_json,
                fail_on_conflict,
                ..
            } => {
                assert_eq!(dir, Some(PathBuf::from("specs")));
                assert_eq!(
                    exclude,
                    Some(vec!["health.yaml".to_string(), "ready.yaml".to_string()])
                );
                assert!(include_json);
                assert!(!fail_on_conflict);
            }
            Commands::List { .. } => panic!("expected merge command"),
        }
    }

    #[test]
    fn test_build_options() {
        let options = build_options(true, true, Some("base.yaml".to_string()), None);
        assert_eq!(options.sources, SourceFormats::All);
        assert_eq!(options.conflict_policy, ConflictPolicy::Fail);
        assert!(options.is_excluded("base.yaml"));
        assert!(options.is_excluded("ready_probe.yaml"));

        assert_eq!(build_options(false, false, None, None), MergeOptions::default());
    }
}
