use deadwood_core::FileError;
use std::path::PathBuf;

#[derive(Debug)]
pub struct CheckResult {
    pub root: PathBuf,
    /// Canonical paths of unreachable files, in discovery order.
    pub unused_files: Vec<PathBuf>,
    /// Files that were read or parsed unsuccessfully. Reported as warnings.
    pub file_errors: Vec<FileError>,
    pub entry_points: Vec<PathBuf>,
    pub files_analyzed: usize,
}

impl CheckResult {
    /// `path` relative to the project root, for display.
    pub fn display_path(&self, path: &std::path::Path) -> String {
        path.strip_prefix(&self.root).unwrap_or(path).to_string_lossy().to_string()
    }
}
