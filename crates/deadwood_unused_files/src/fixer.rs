use log::{info, warn};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

/// Asks whether to delete `count` files. Only an explicit `y`/`yes` confirms.
pub fn confirm_deletion<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    count: usize,
) -> io::Result<bool> {
    write!(writer, "Delete {} unused files? [y/N] ", count)?;
    writer.flush()?;

    let mut answer = String::new();
    reader.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[derive(Debug, Default)]
pub struct DeletionSummary {
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, io::Error)>,
}

/// Removes each file in turn. A failure is logged and the rest are still
/// attempted.
pub fn delete_files(files: &[PathBuf]) -> DeletionSummary {
    let mut summary = DeletionSummary::default();
    for file in files {
        match fs::remove_file(file) {
            Ok(()) => {
                info!("Deleted {}", file.display());
                summary.deleted.push(file.clone());
            }
            Err(e) => {
                warn!("Failed to delete {}: {}", file.display(), e);
                summary.failed.push((file.clone(), e));
            }
        }
    }
    summary
}
