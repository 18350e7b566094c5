use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use deadwood_core::{AliasConfig, ConfigError, read_path_aliases};
use log::{debug, info};
use std::{env, fs, path::PathBuf};

/// Which Next.js router convention decides the entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RouterKind {
    /// `app/` directory: `page`, `layout` and `route` files
    App,
    /// `pages/` directory: every source file
    Pages,
}

impl RouterKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            RouterKind::App => "app",
            RouterKind::Pages => "pages",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "unused-files")]
#[command(about = "Find source files no entry point can reach in a Next.js project")]
pub struct Config {
    /// Root directory of the project (defaults to the current directory)
    #[arg(long, short = 'p')]
    pub root: Option<PathBuf>,

    /// Router whose files are the entry points
    #[arg(long, value_enum, default_value_t = RouterKind::App)]
    pub router: RouterKind,

    /// The router directory lives under `src/`
    #[arg(long)]
    pub src_dir: bool,

    /// Config file holding `compilerOptions.paths` aliases
    #[arg(long, default_value = "tsconfig.json", value_parser = ["tsconfig.json", "jsconfig.json"])]
    pub config_file: String,

    /// Additional entry point, relative to the root (repeatable)
    #[arg(long = "entry")]
    pub entries: Vec<PathBuf>,

    /// Extra directory name to skip during discovery (repeatable)
    #[arg(long = "exclude-dir")]
    pub exclude_dirs: Vec<String>,

    /// Number of worker threads used to parse files (defaults to one per core)
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Delete unused files after confirmation
    #[arg(long, short = 'd')]
    pub delete: bool,

    /// Skip the deletion confirmation prompt
    #[arg(long, short = 'y', requires = "delete")]
    pub yes: bool,

    /// List unused files without deleting anything
    #[arg(long, conflicts_with = "yes")]
    pub dry_run: bool,

    #[clap(skip)]
    pub aliases: AliasConfig,
}

impl Config {
    /// Initialize the config by resolving the root directory and loading path aliases
    pub fn initialize(&mut self) -> Result<()> {
        let root = match self.root.take() {
            Some(r) => {
                debug!("Using provided root directory: {:?}", r);
                r
            }
            None => {
                debug!("No root provided, using current directory");
                env::current_dir()?
            }
        };

        let metadata = fs::metadata(&root).map_err(|_| ConfigError::RootNotFound(root.clone()))?;
        if !metadata.is_dir() {
            return Err(ConfigError::RootNotDirectory(root).into());
        }
        let root = root.canonicalize()?;
        info!("Using root directory: {}", root.display());

        self.aliases = read_path_aliases(&root, &self.config_file)?;
        debug!("Found {} path aliases in {}", self.aliases.len(), self.config_file);

        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    /// `<root>[/src]/<app|pages>`
    pub fn router_dir(&self) -> Result<PathBuf> {
        let root = self.root()?;
        let base = if self.src_dir { root.join("src") } else { root.clone() };
        Ok(base.join(self.router.dir_name()))
    }
}
