use anyhow::Result;
use deadwood_core::{ConfigError, DiscoveryConfig, discover_source_files};
use log::{debug, trace, warn};
use std::path::{Component, Path, PathBuf};

use crate::config::{Config, RouterKind};

/// Extensions Next.js accepts for page and layout files.
const PAGE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Route handlers never render JSX.
const ROUTE_EXTENSIONS: &[&str] = &["js", "ts"];

/// Collects the entry points for `cfg`: router convention files plus any
/// `--entry` paths. Fails if nothing qualifies.
pub fn collect_entry_points(cfg: &Config) -> Result<Vec<PathBuf>> {
    let root = cfg.root()?;
    let router_dir = cfg.router_dir()?;

    let mut entries = if router_dir.is_dir() {
        router_entry_points(&router_dir, cfg.router)?
    } else if cfg.entries.is_empty() {
        return Err(ConfigError::RouterDirMissing(router_dir).into());
    } else {
        warn!("Router directory {} does not exist, using --entry only", router_dir.display());
        Vec::new()
    };

    for entry in &cfg.entries {
        let path = root.join(entry);
        let path = path.canonicalize().map_err(|_| ConfigError::EntryNotFound(path.clone()))?;
        trace!("Adding explicit entry point: {}", path.display());
        entries.push(path);
    }

    entries.sort();
    entries.dedup();
    if entries.is_empty() {
        warn!("No entry points found in {}", router_dir.display());
        return Err(ConfigError::NoEntryPoints.into());
    }
    debug!("Collected {} entry points", entries.len());
    Ok(entries)
}

/// Files under `router_dir` that Next.js loads directly.
pub fn router_entry_points(router_dir: &Path, router: RouterKind) -> Result<Vec<PathBuf>> {
    let files = discover_source_files(&DiscoveryConfig::new(router_dir))?;
    let router_dir = router_dir.canonicalize().unwrap_or_else(|_| router_dir.to_path_buf());

    let entries: Vec<PathBuf> = files
        .into_iter()
        .filter(|f| {
            let rel = f.strip_prefix(&router_dir).unwrap_or(f);
            let is_entry = match router {
                RouterKind::App => is_app_router_entry(rel),
                RouterKind::Pages => has_extension(rel, PAGE_EXTENSIONS),
            };
            if is_entry {
                trace!("Matched {:?} router entry: {}", router, rel.display());
            }
            is_entry
        })
        .collect();

    debug!("Found {} entry files in {}", entries.len(), router_dir.display());
    Ok(entries)
}

/// `page`, `layout` and `route` files outside private (`_`-prefixed) folders.
fn is_app_router_entry(rel: &Path) -> bool {
    let in_private_folder = rel.parent().is_some_and(|dir| {
        dir.components().any(|c| match c {
            Component::Normal(name) => name.to_string_lossy().starts_with('_'),
            _ => false,
        })
    });
    if in_private_folder {
        return false;
    }

    let stem = rel.file_stem().map(|s| s.to_string_lossy().to_ascii_lowercase());
    match stem.as_deref() {
        Some("page") | Some("layout") => has_extension(rel, PAGE_EXTENSIONS),
        Some("route") => has_extension(rel, ROUTE_EXTENSIONS),
        _ => false,
    }
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}
