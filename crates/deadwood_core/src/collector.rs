use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace, warn};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_SKIPPED_DIRS, SOURCE_EXTENSIONS};

pub struct DiscoveryConfig {
    pub root: PathBuf,
    /// Directory names skipped in addition to [`DEFAULT_SKIPPED_DIRS`].
    pub skipped_dirs: Vec<String>,
}

impl DiscoveryConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), skipped_dirs: Vec::new() }
    }
}

/// Returns `true` if `path` has one of the recognized source extensions,
/// ignoring case.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

/// Lists every source file under the root, skipping build output and
/// dependency directories. Ignore files are not consulted, so generated but
/// gitignored sources are still graph nodes. Entries the walk cannot read are
/// logged and skipped. Paths are canonicalized and sorted so runs are
/// reproducible.
pub fn discover_source_files(cfg: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let root = &cfg.root;
    debug!("Walking directory tree from root: {}", root.display());

    let skipped: Vec<String> = DEFAULT_SKIPPED_DIRS
        .iter()
        .map(|s| s.to_string())
        .chain(cfg.skipped_dirs.iter().cloned())
        .collect();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .filter_entry(move |dent| {
            let is_dir = dent.file_type().is_some_and(|ft| ft.is_dir());
            let name = dent.file_name().to_string_lossy();
            !(is_dir && dent.depth() > 0 && skipped.iter().any(|s| *s == name))
        })
        .build();

    let mut files: Vec<PathBuf> = Vec::new();
    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Skipping unreadable entry during discovery: {}", e);
                continue;
            }
        };
        let p = dent.path();
        if !dent.file_type().is_some_and(|ft| ft.is_file()) || !is_source_file(p) {
            continue;
        }
        trace!("Discovered source file: {}", p.display());
        files.push(p.canonicalize().unwrap_or_else(|_| p.to_path_buf()));
    }

    files.sort();
    files.dedup();
    debug!("Discovered {} source files", files.len());
    Ok(files)
}
