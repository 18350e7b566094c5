use anyhow::{Context, Result};
use deadwood_core::{
    AliasConfig, ConfigError, DiscoveryConfig, FileError, Resolver, discover_source_files,
};
use log::{debug, info, warn};
use rayon::ThreadPoolBuilder;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    entries::collect_entry_points,
    graph::build_dependency_graph,
    reachability::{reachable_files, unused_files},
    types::CheckResult,
};

/// Everything the reachability engine needs for one run.
#[derive(Debug, Clone)]
pub struct UnusedFilesInput {
    pub project_root: PathBuf,
    /// Graph nodes, in the order unused files should be reported.
    pub discovered_files: Vec<PathBuf>,
    pub entry_points: Vec<PathBuf>,
    pub aliases: AliasConfig,
}

#[derive(Debug)]
pub struct UnusedFilesOutcome {
    /// Canonical paths of discovered files no entry point reaches, in
    /// discovered order.
    pub unused_files: Vec<PathBuf>,
    pub reachable: HashSet<PathBuf>,
    pub file_errors: Vec<FileError>,
    pub edge_count: usize,
}

/// Builds the dependency graph for `input` and returns the files no entry
/// point reaches.
///
/// Configuration problems are reported before any source file is read.
/// Unreadable or unparsable files never fail the run; they are returned in
/// [`UnusedFilesOutcome::file_errors`].
pub fn find_unused_files(input: &UnusedFilesInput) -> Result<UnusedFilesOutcome, ConfigError> {
    if input.entry_points.is_empty() {
        return Err(ConfigError::NoEntryPoints);
    }
    let root = &input.project_root;
    if !root.exists() {
        return Err(ConfigError::RootNotFound(root.clone()));
    }
    if !root.is_dir() {
        return Err(ConfigError::RootNotDirectory(root.clone()));
    }

    let nodes: Vec<PathBuf> = input.discovered_files.iter().map(|f| canonical(f)).collect();
    let entry_points: Vec<PathBuf> = input.entry_points.iter().map(|f| canonical(f)).collect();

    let resolver = Resolver::new(root, input.aliases.clone());
    let build = build_dependency_graph(&nodes, &resolver);
    debug!("Resolver cache holds {} entries", resolver.cache_len());

    if build.graph.is_empty() {
        warn!("No source files discovered under {}", root.display());
    }
    for entry in entry_points.iter().filter(|e| !build.graph.contains(e)) {
        warn!(
            "Entry point {} is not among the discovered files; its imports are not followed",
            entry.display()
        );
    }

    let reachable = reachable_files(&build.graph, &entry_points)?;

    Ok(UnusedFilesOutcome {
        unused_files: unused_files(&nodes, &reachable),
        reachable,
        file_errors: build.file_errors,
        edge_count: build.graph.edge_count(),
    })
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

pub fn run_unused_files_check(mut cfg: Config) -> Result<CheckResult> {
    info!("Starting unused file check");

    cfg.initialize()?;
    let root = cfg.root()?.clone();

    let entry_points = collect_entry_points(&cfg)?;
    info!("Found {} entry points", entry_points.len());

    let discovery =
        DiscoveryConfig { root: root.clone(), skipped_dirs: cfg.exclude_dirs.clone() };
    let discovered_files = discover_source_files(&discovery)?;
    info!("Discovered {} source files", discovered_files.len());

    let pool = ThreadPoolBuilder::new()
        .num_threads(cfg.jobs.unwrap_or(0))
        .build()
        .context("Failed to build worker pool")?;
    info!("Parsing files on {} threads", pool.current_num_threads());

    let input = UnusedFilesInput {
        project_root: root.clone(),
        discovered_files,
        entry_points,
        aliases: cfg.aliases.clone(),
    };
    let outcome = pool.install(|| find_unused_files(&input))?;

    info!(
        "Unused file check complete. {} of {} files unused ({} reachable, {} edges)",
        outcome.unused_files.len(),
        input.discovered_files.len(),
        outcome.reachable.len(),
        outcome.edge_count
    );

    Ok(CheckResult {
        root,
        unused_files: outcome.unused_files,
        file_errors: outcome.file_errors,
        entry_points: input.entry_points,
        files_analyzed: input.discovered_files.len(),
    })
}
