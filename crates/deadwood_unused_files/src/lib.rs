//! Unused file detection for Next.js projects.
//!
//! Every source file under the project root becomes a node in a dependency
//! graph. Edges come from `import`, `export ... from`, `require()` and
//! `import()` references that resolve to other project files. Files that no
//! router entry point (or `--entry` path) can reach are reported as unused.
//!
//! # Examples
//!
//! ```no_run
//! use deadwood_unused_files::{Config, run_unused_files_check};
//! use clap::Parser;
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut cfg = Config::parse_from(["unused-files", "--router", "app"]);
//! cfg.root = Some(std::path::PathBuf::from("/path/to/project"));
//!
//! let result = run_unused_files_check(cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! if result.unused_files.is_empty() {
//!     deadwood_unused_files::print_no_unused_message(&mut stdout, &result)?;
//! } else {
//!     deadwood_unused_files::print_unused_files(&mut stdout, &result)?;
//! }
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```
//!
//! The engine can also be driven without the CLI layer through
//! [`find_unused_files`].

mod checker;
mod config;
mod entries;
mod fixer;
mod graph;
mod reachability;
mod reporter;
mod types;

// Re-export public API
pub use checker::{UnusedFilesInput, UnusedFilesOutcome, find_unused_files, run_unused_files_check};
pub use config::{Config, OutputFormat, RouterKind};
pub use entries::{collect_entry_points, router_entry_points};
pub use fixer::{DeletionSummary, confirm_deletion, delete_files};
pub use graph::{DependencyGraph, GraphBuild, build_dependency_graph};
pub use reachability::{reachable_files, unused_files};
pub use reporter::{print_json_report, print_no_unused_message, print_unused_files};
pub use types::CheckResult;
