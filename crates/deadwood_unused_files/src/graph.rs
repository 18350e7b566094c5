use deadwood_core::{FileError, Resolver, references_for};
use log::{debug, trace, warn};
use rayon::prelude::*;
use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    thread,
};

/// Import edges between project files.
///
/// Every discovered file is a key, files without references map to an empty
/// list. Edge lists keep source order and duplicates.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: HashMap<PathBuf, Vec<PathBuf>>,
}

impl DependencyGraph {
    /// Outgoing edges of `file`, or `None` if it is not a node.
    pub fn edges(&self, file: &Path) -> Option<&[PathBuf]> {
        self.edges.get(file).map(Vec::as_slice)
    }

    pub fn contains(&self, file: &Path) -> bool {
        self.edges.contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub(crate) fn insert(&mut self, file: PathBuf, targets: Vec<PathBuf>) {
        self.edges.insert(file, targets);
    }
}

impl FromIterator<(PathBuf, Vec<PathBuf>)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (PathBuf, Vec<PathBuf>)>>(iter: I) -> Self {
        Self { edges: iter.into_iter().collect() }
    }
}

#[derive(Debug, Default)]
pub struct GraphBuild {
    pub graph: DependencyGraph,
    /// Files that could not be read or parsed. They are still nodes, just
    /// without outgoing edges.
    pub file_errors: Vec<FileError>,
}

/// Builds the dependency graph over `files` on the current rayon pool.
///
/// Each file is read, parsed and resolved independently. An edge is kept only
/// when its target resolves inside the project and is itself one of `files`.
pub fn build_dependency_graph(files: &[PathBuf], resolver: &Resolver) -> GraphBuild {
    debug!("Building dependency graph over {} files", files.len());
    let discovered: HashSet<&Path> = files.iter().map(PathBuf::as_path).collect();

    let per_file: Vec<(PathBuf, Result<Vec<PathBuf>, FileError>)> = files
        .par_iter()
        .map(|file| {
            trace!("Thread {:?} processing: {}", thread::current().id(), file.display());
            (file.clone(), edges_for(file, resolver, &discovered))
        })
        .collect();

    let mut build = GraphBuild::default();
    for (file, result) in per_file {
        match result {
            Ok(targets) => build.graph.insert(file, targets),
            Err(e) => {
                warn!("{}", e);
                build.graph.insert(file, Vec::new());
                build.file_errors.push(e);
            }
        }
    }

    debug!(
        "Dependency graph has {} nodes and {} edges ({} files failed)",
        build.graph.len(),
        build.graph.edge_count(),
        build.file_errors.len()
    );
    build
}

fn edges_for(
    file: &Path,
    resolver: &Resolver,
    discovered: &HashSet<&Path>,
) -> Result<Vec<PathBuf>, FileError> {
    let references = references_for(file)?;
    let targets = references
        .iter()
        .filter_map(|r| resolver.resolve(file, &r.specifier).internal())
        .filter(|target| {
            let known = discovered.contains(target.as_path());
            if !known {
                trace!("Dropping edge to undiscovered file: {}", target.display());
            }
            known
        })
        .collect();
    Ok(targets)
}
