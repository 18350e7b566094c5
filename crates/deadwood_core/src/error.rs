use std::path::PathBuf;

/// Problems with the run's inputs. Any of these aborts the run before the
/// dependency graph is traversed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No entry points were supplied; cannot determine which files are unused")]
    NoEntryPoints,
    #[error("Project root {0} does not exist or is inaccessible")]
    RootNotFound(PathBuf),
    #[error("Project root {0} is not a directory")]
    RootNotDirectory(PathBuf),
    #[error("Router directory {0} does not exist. Check the --router and --src-dir options")]
    RouterDirMissing(PathBuf),
    #[error("Entry point {0} does not exist")]
    EntryNotFound(PathBuf),
    #[error("Failed to read alias config {path}: {source}")]
    AliasConfig { path: PathBuf, source: std::io::Error },
}

/// A single file that could not contribute edges to the graph. The run
/// continues; the file simply has no outgoing references.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl FileError {
    pub fn path(&self) -> &PathBuf {
        match self {
            FileError::Read { path, .. } | FileError::Parse { path, .. } => path,
        }
    }
}
