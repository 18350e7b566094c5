//! Core building blocks for deadwood.
//!
//! This crate provides the per-file pieces of the unused-file analysis for
//! JavaScript/TypeScript projects:
//! - Extracting module references (`import`, `export ... from`, `import()`,
//!   `require()`) from a file's syntax tree
//! - Resolving specifiers to project files (relative paths, tsconfig path
//!   aliases, extension and index inference, node_modules classification)
//! - Discovering candidate source files under a project root
//! - Loading path aliases from `tsconfig.json`/`jsconfig.json`

mod collector;
mod config;
mod constants;
mod error;
mod parser;
mod resolver;
mod types;

// Re-export public API
pub use collector::{DiscoveryConfig, discover_source_files, is_source_file};
pub use config::read_path_aliases;
pub use constants::{DEFAULT_SKIPPED_DIRS, INDEX_FILES, RESOLVE_EXTENSIONS, SOURCE_EXTENSIONS};
pub use error::{ConfigError, FileError};
pub use parser::{extract_references, references_for};
pub use resolver::{AliasConfig, Resolver};
pub use types::{ModuleReference, ReferenceKind, Resolution};
