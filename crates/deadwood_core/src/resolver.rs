use dashmap::DashMap;
use log::{debug, trace};
use path_clean::clean;
use std::{
    ffi::OsStr,
    fs,
    path::{Component, Path, PathBuf},
};

use crate::{
    constants::{INDEX_FILES, NODE_MODULES, RESOLVE_EXTENSIONS},
    types::Resolution,
};

/// Path aliases in tsconfig `compilerOptions.paths` form.
///
/// Each pattern holds at most one `*`. Targets are templates relative to the
/// config's `baseUrl` and may hold a `*` that receives whatever the pattern's
/// wildcard captured. The capture is substituted before joining, so a `*` in
/// the base directory itself is left alone.
#[derive(Debug, Clone, Default)]
pub struct AliasConfig {
    rules: Vec<AliasRule>,
}

#[derive(Debug, Clone)]
struct AliasRule {
    pattern: String,
    prefix: String,
    suffix: Option<String>,
    base_dir: PathBuf,
    targets: Vec<String>,
}

impl AliasRule {
    /// Returns the wildcard capture when `specifier` matches this rule.
    fn capture<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        match &self.suffix {
            None => (specifier == self.prefix).then_some(""),
            Some(suffix) => {
                if specifier.len() < self.prefix.len() + suffix.len() {
                    return None;
                }
                specifier
                    .strip_prefix(self.prefix.as_str())
                    .and_then(|rest| rest.strip_suffix(suffix.as_str()))
            }
        }
    }
}

impl AliasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `pattern` (e.g. `@/*`) with target templates relative to
    /// `base_dir` (e.g. `src/*`). Later registrations of the same pattern
    /// replace earlier ones.
    pub fn insert<S: AsRef<str>>(&mut self, base_dir: &Path, pattern: &str, targets: &[S]) {
        let targets: Vec<String> = targets.iter().map(|t| t.as_ref().to_string()).collect();
        if targets.is_empty() {
            return;
        }

        let (prefix, suffix) = match pattern.split_once('*') {
            Some((prefix, suffix)) => (prefix.to_string(), Some(suffix.to_string())),
            None => (pattern.to_string(), None),
        };
        trace!("Registering alias '{}' -> {:?}", pattern, targets);

        self.rules.retain(|r| r.pattern != pattern);
        self.rules.push(AliasRule {
            pattern: pattern.to_string(),
            prefix,
            suffix,
            base_dir: base_dir.to_path_buf(),
            targets,
        });
        // Longest prefix wins, as in tsc's own path mapping.
        self.rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Candidate paths for `specifier` from the most specific matching
    /// pattern, or `None` when no pattern matches.
    pub fn candidates(&self, specifier: &str) -> Option<Vec<PathBuf>> {
        self.rules.iter().find_map(|rule| {
            let captured = rule.capture(specifier)?;
            trace!("Matched alias '{}' for '{}'", rule.pattern, specifier);
            Some(
                rule.targets
                    .iter()
                    .map(|t| clean(rule.base_dir.join(t.replacen('*', captured, 1))))
                    .collect(),
            )
        })
    }
}

/// Resolves module specifiers to files on disk, classifying each result as
/// inside or outside the project.
///
/// Results are memoized per (requesting directory, specifier) and the cache
/// is safe to share between worker threads.
pub struct Resolver {
    root: PathBuf,
    aliases: AliasConfig,
    cache: DashMap<(PathBuf, String), Resolution>,
}

impl Resolver {
    pub fn new(root: &Path, aliases: AliasConfig) -> Self {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        Self { root, aliases, cache: DashMap::new() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn resolve(&self, from_file: &Path, specifier: &str) -> Resolution {
        let from_dir = from_file.parent().unwrap_or(&self.root);
        let key = (from_dir.to_path_buf(), specifier.to_string());
        if let Some(v) = self.cache.get(&key) {
            trace!("Cache hit for resolve: '{}' from {}", specifier, from_dir.display());
            return v.clone();
        }

        let resolved = self.resolve_uncached(from_dir, specifier);
        match &resolved {
            Resolution::Internal(p) => {
                debug!("Resolved '{}' from {} to {}", specifier, from_file.display(), p.display())
            }
            Resolution::External(p) => trace!("'{}' is external ({})", specifier, p.display()),
            Resolution::Unresolved => trace!("Could not resolve '{}'", specifier),
        }
        self.cache.insert(key, resolved.clone());
        resolved
    }

    fn resolve_uncached(&self, from_dir: &Path, specifier: &str) -> Resolution {
        if let Some(candidates) = self.aliases.candidates(specifier) {
            for candidate in candidates {
                if let Some(found) = resolve_file(&candidate) {
                    return self.classify(found);
                }
            }
            trace!("No alias target exists for '{}', falling back", specifier);
        }

        if is_path_like(specifier) {
            let candidate = clean(from_dir.join(specifier));
            return resolve_file(&candidate).map_or(Resolution::Unresolved, |p| self.classify(p));
        }

        resolve_node_module_from_dir(from_dir, specifier)
            .map_or(Resolution::Unresolved, |p| self.classify(p))
    }

    fn classify(&self, path: PathBuf) -> Resolution {
        let path = path.canonicalize().unwrap_or(path);
        let node_modules = Component::Normal(OsStr::new(NODE_MODULES));
        match path.strip_prefix(&self.root) {
            Ok(rel) if !rel.components().any(|c| c == node_modules) => Resolution::Internal(path),
            _ => Resolution::External(path),
        }
    }
}

fn is_path_like(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || Path::new(specifier).is_absolute()
}

/// Exact file, then extensions, then directory `main`/index.
fn resolve_file(p: &Path) -> Option<PathBuf> {
    resolve_as_file(p).or_else(|| resolve_as_directory(p))
}

fn resolve_as_file(p: &Path) -> Option<PathBuf> {
    if p.is_file() {
        return Some(p.to_path_buf());
    }
    RESOLVE_EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("{}.{}", p.display(), ext)))
        .find(|candidate| candidate.is_file())
}

fn resolve_as_directory(dir: &Path) -> Option<PathBuf> {
    if !dir.is_dir() {
        return None;
    }

    if let Some(main) = package_main(dir) {
        let target = clean(dir.join(main));
        let found = resolve_as_file(&target)
            .or_else(|| if target.as_path() != dir { resolve_index(&target) } else { None });
        if found.is_some() {
            return found;
        }
    }

    resolve_index(dir)
}

fn resolve_index(dir: &Path) -> Option<PathBuf> {
    INDEX_FILES.iter().map(|index_file| dir.join(index_file)).find(|c| c.is_file())
}

fn package_main(dir: &Path) -> Option<String> {
    let txt = fs::read_to_string(dir.join("package.json")).ok()?;
    let v = serde_json::from_str::<serde_json::Value>(&txt).ok()?;
    v.get("main").and_then(|m| m.as_str()).map(str::to_string)
}

/// Walks up from `start_dir` looking for `node_modules/<specifier>`.
fn resolve_node_module_from_dir(start_dir: &Path, specifier: &str) -> Option<PathBuf> {
    trace!("Walking up from {:?} to find node_modules for '{}'", start_dir, specifier);
    start_dir
        .ancestors()
        .map(|dir| dir.join(NODE_MODULES).join(specifier))
        .find_map(|candidate| resolve_file(&candidate))
}
