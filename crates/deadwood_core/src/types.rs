use std::path::PathBuf;

/// A raw module specifier found in a source file, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference {
    pub specifier: String,
    pub kind: ReferenceKind,
}

impl ModuleReference {
    pub fn new(specifier: impl Into<String>, kind: ReferenceKind) -> Self {
        Self { specifier: specifier.into(), kind }
    }
}

/// The syntactic form a module reference was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `import x from "y"`, `import "y"`, `import type { T } from "y"`
    Import,
    /// `export { a } from "y"`, `export * from "y"`
    ReExport,
    /// `import("y")`
    DynamicImport,
    /// `require("y")`
    Require,
}

/// Outcome of resolving one specifier from one requesting file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A file inside the project root, outside any `node_modules` directory.
    Internal(PathBuf),
    /// A file that exists but belongs to an installed package or lies outside
    /// the project root.
    External(PathBuf),
    /// Nothing on disk matched.
    Unresolved,
}

impl Resolution {
    /// The resolved path when it may become a graph edge.
    pub fn internal(self) -> Option<PathBuf> {
        match self {
            Resolution::Internal(p) => Some(p),
            Resolution::External(_) | Resolution::Unresolved => None,
        }
    }
}
