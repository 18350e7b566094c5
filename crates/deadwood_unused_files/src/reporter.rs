use std::io::{self, Write};

use colored::Colorize;
use log::debug;
use serde::Serialize;

use crate::types::CheckResult;

pub fn print_no_unused_message<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("No unused files detected");
    writeln!(
        writer,
        "{} No unused files found ({} files reachable from {} entry points).",
        "✓".green().bold(),
        result.files_analyzed,
        result.entry_points.len()
    )?;
    print_file_warnings(writer, result)?;
    writer.flush()?;
    Ok(())
}

pub fn print_unused_files<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("Printing {} unused files", result.unused_files.len());
    writeln!(
        writer,
        "{} Found {} unused files.\n",
        "⚠".yellow().bold(),
        result.unused_files.len().to_string().yellow()
    )?;

    for (idx, file) in result.unused_files.iter().enumerate() {
        let is_last = idx == result.unused_files.len() - 1;
        let prefix = if is_last { "└──" } else { "├──" };
        writeln!(writer, "{}  {}", prefix.dimmed(), result.display_path(file).blue())?;
    }

    print_file_warnings(writer, result)?;
    writer.flush()?;
    Ok(())
}

/// Lists files that were skipped because they could not be read or parsed.
fn print_file_warnings<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    if result.file_errors.is_empty() {
        return Ok(());
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "{} {} files could not be analyzed and contribute no imports:",
        "!".yellow().bold(),
        result.file_errors.len()
    )?;
    for err in &result.file_errors {
        writeln!(writer, "    {}", err.to_string().dimmed())?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport {
    unused_files: Vec<String>,
    file_errors: Vec<JsonFileError>,
    files_analyzed: usize,
    entry_points: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonFileError {
    path: String,
    message: String,
}

pub fn print_json_report<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    let report = JsonReport {
        unused_files: result.unused_files.iter().map(|f| result.display_path(f)).collect(),
        file_errors: result
            .file_errors
            .iter()
            .map(|e| JsonFileError { path: result.display_path(e.path()), message: e.to_string() })
            .collect(),
        files_analyzed: result.files_analyzed,
        entry_points: result.entry_points.iter().map(|f| result.display_path(f)).collect(),
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
