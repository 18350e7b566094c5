//! Constants for file extensions and resolution strategies.
//!
//! Discovery, resolution and index lookup all draw from the same extension
//! list so that anything the resolver can land on is also a graph node.
//!
//! ## Supported Extensions
//!
//! - **JavaScript**: `.js`, `.jsx`, `.mjs` (ES module), `.cjs` (CommonJS)
//! - **TypeScript**: `.ts`, `.tsx`, `.mts` (ES module), `.cts` (CommonJS)

/// Extensions tried when resolving module imports, in priority order.
///
/// Plain JavaScript comes first, matching node's `require.resolve` with
/// `extensions: [".js", ".jsx", ".ts", ".tsx"]`.
pub const RESOLVE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

/// Extensions of files that are picked up as graph nodes during discovery.
/// Matched case-insensitively.
pub const SOURCE_EXTENSIONS: &[&str] = RESOLVE_EXTENSIONS;

/// Index file names to try when resolving directory imports
pub const INDEX_FILES: &[&str] = &[
    "index.js",
    "index.jsx",
    "index.ts",
    "index.tsx",
    "index.mjs",
    "index.cjs",
    "index.mts",
    "index.cts",
];

/// Directory names never descended into during discovery.
pub const DEFAULT_SKIPPED_DIRS: &[&str] = &["node_modules", ".next", "build", ".git"];

/// Name of the directory holding installed packages. Anything below one of
/// these is outside the project graph.
pub const NODE_MODULES: &str = "node_modules";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_files_uses_all_extensions() {
        assert_eq!(INDEX_FILES.len(), RESOLVE_EXTENSIONS.len());
        for (index_file, ext) in INDEX_FILES.iter().zip(RESOLVE_EXTENSIONS) {
            assert_eq!(*index_file, format!("index.{}", ext));
        }
    }

    #[test]
    fn test_javascript_resolves_before_typescript() {
        let js = RESOLVE_EXTENSIONS.iter().position(|e| *e == "js").unwrap();
        let ts = RESOLVE_EXTENSIONS.iter().position(|e| *e == "ts").unwrap();
        assert!(js < ts);
    }

    #[test]
    fn test_skipped_dirs_include_build_outputs() {
        assert!(DEFAULT_SKIPPED_DIRS.contains(&"node_modules"));
        assert!(DEFAULT_SKIPPED_DIRS.contains(&".next"));
        assert!(DEFAULT_SKIPPED_DIRS.contains(&"build"));
    }
}
