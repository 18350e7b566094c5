use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use deadwood_unused_files::{CheckResult, Config, OutputFormat};
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "deadwood")]
#[command(about = "Find and remove dead code in JavaScript/TypeScript projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find source files that no Next.js entry point imports
    UnusedFiles(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::UnusedFiles(cfg) => {
            info!("Running unused file check with {:?} router", cfg.router);
            debug!("Config: root={:?}, entries={:?}", cfg.root, cfg.entries);

            let format = cfg.format;
            let (delete, yes, dry_run) = (cfg.delete, cfg.yes, cfg.dry_run);

            let result = deadwood_unused_files::run_unused_files_check(cfg)?;
            debug!("Found {} unused files", result.unused_files.len());

            let elapsed_ms = start.elapsed().as_millis();

            match format {
                OutputFormat::Json => {
                    deadwood_unused_files::print_json_report(&mut stdout, &result)?
                }
                OutputFormat::Text if result.unused_files.is_empty() => {
                    deadwood_unused_files::print_no_unused_message(&mut stdout, &result)?
                }
                OutputFormat::Text => {
                    deadwood_unused_files::print_unused_files(&mut stdout, &result)?
                }
            }
            if format == OutputFormat::Text {
                print_footer(&mut stdout, &result, elapsed_ms)?;
            }

            if result.unused_files.is_empty() {
                return Ok(());
            }

            if dry_run || !delete {
                if dry_run {
                    info!("Dry run, no files deleted");
                }
                // Non-zero exit to fail CI
                std::process::exit(1);
            }

            if !yes {
                // The prompt goes to stderr so JSON output on stdout stays parseable.
                let mut stderr = std::io::stderr();
                let mut stdin = std::io::stdin().lock();
                let confirmed = deadwood_unused_files::confirm_deletion(
                    &mut stdin,
                    &mut stderr,
                    result.unused_files.len(),
                )?;
                if !confirmed {
                    info!("Deletion declined");
                    std::process::exit(1);
                }
            }

            let summary = deadwood_unused_files::delete_files(&result.unused_files);
            let mut stderr = std::io::stderr();
            writeln!(
                stderr,
                "{} Deleted {} files.",
                "✓".green().bold(),
                summary.deleted.len().to_string().cyan()
            )?;
            if !summary.failed.is_empty() {
                writeln!(
                    stderr,
                    "{} Failed to delete {} files.",
                    "✗".red().bold(),
                    summary.failed.len().to_string().red()
                )?;
                std::process::exit(1);
            }

            Ok(())
        }
    }
}

fn print_footer<W: Write>(writer: &mut W, result: &CheckResult, elapsed_ms: u128) -> Result<()> {
    writeln!(
        writer,
        "\n{} Finished in {}ms on {} files ({} entry points).",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        result.files_analyzed.to_string().cyan(),
        result.entry_points.len().to_string().cyan()
    )?;
    writer.flush()?;
    Ok(())
}
