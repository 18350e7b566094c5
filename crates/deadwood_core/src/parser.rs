use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::{fs, path::Path};

use crate::{
    error::FileError,
    types::{ModuleReference, ReferenceKind},
};

/// Reads `file` and returns every module it references, in source order.
pub fn references_for(file: &Path) -> Result<Vec<ModuleReference>, FileError> {
    trace!("Parsing file for references: {}", file.display());
    let src = fs::read_to_string(file)
        .map_err(|source| FileError::Read { path: file.to_path_buf(), source })?;
    extract_references(file, &src)
}

/// Extracts module references from already-loaded source text.
///
/// JSX and TypeScript syntax are both enabled regardless of the file
/// extension, since Next.js projects freely mix them. Any syntax error fails
/// the whole file.
pub fn extract_references(file: &Path, src: &str) -> Result<Vec<ModuleReference>, FileError> {
    let allocator = Allocator::default();
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(&allocator, src, source_type()).parse();

    if panicked || !errors.is_empty() {
        let message = errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(FileError::Parse { path: file.to_path_buf(), message });
    }

    let mut collector = ReferenceCollector::default();
    collector.visit_program(&program);

    debug!("Found {} module references in {}", collector.references.len(), file.display());
    Ok(collector.references)
}

fn source_type() -> SourceType {
    SourceType::default().with_module(true).with_typescript(true).with_jsx(true)
}

#[derive(Default)]
struct ReferenceCollector {
    references: Vec<ModuleReference>,
}

impl ReferenceCollector {
    fn push(&mut self, specifier: &str, kind: ReferenceKind) {
        trace!("Found {:?} reference: '{}'", kind, specifier);
        self.references.push(ModuleReference::new(specifier, kind));
    }
}

impl<'a> Visit<'a> for ReferenceCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        // Type-only imports still count: deleting the target breaks the build.
        self.push(decl.source.value.as_str(), ReferenceKind::Import);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            self.push(source.value.as_str(), ReferenceKind::ReExport);
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.push(decl.source.value.as_str(), ReferenceKind::ReExport);
    }

    fn visit_ts_import_equals_declaration(&mut self, decl: &TSImportEqualsDeclaration<'a>) {
        // import fs = require("fs")
        if let TSModuleReference::ExternalModuleReference(ext) = &decl.module_reference {
            self.push(ext.expression.value.as_str(), ReferenceKind::Require);
        }
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Expression::Identifier(callee) = &call.callee
            && callee.name.as_str() == "require"
            && call.arguments.len() == 1
            && let Some(Expression::StringLiteral(sl)) = call.arguments[0].as_expression()
        {
            self.push(sl.value.as_str(), ReferenceKind::Require);
        }
        walk::walk_call_expression(self, call);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        // Only the single-argument form; `import(x, { with })` is skipped.
        if expr.options.is_none()
            && let Expression::StringLiteral(sl) = &expr.source
        {
            self.push(sl.value.as_str(), ReferenceKind::DynamicImport);
        }
        walk::walk_import_expression(self, expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn extract(src: &str) -> Vec<ModuleReference> {
        extract_references(Path::new("test.tsx"), src).unwrap()
    }

    fn specifiers(src: &str) -> Vec<String> {
        extract(src).into_iter().map(|r| r.specifier).collect()
    }

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_static_import_forms() {
        let refs = extract(
            "import foo from './foo';\n\
             import { bar, baz } from './utils';\n\
             import * as ns from './ns';\n\
             import './polyfills';",
        );
        assert_eq!(
            refs,
            vec![
                ModuleReference::new("./foo", ReferenceKind::Import),
                ModuleReference::new("./utils", ReferenceKind::Import),
                ModuleReference::new("./ns", ReferenceKind::Import),
                ModuleReference::new("./polyfills", ReferenceKind::Import),
            ]
        );
    }

    #[test]
    fn test_type_only_import_is_kept() {
        assert_eq!(specifiers("import type { Foo } from './types';"), vec!["./types"]);
    }

    #[test]
    fn test_re_exports() {
        let refs = extract(
            "export { a } from './a';\n\
             export * from './b';\n\
             export * as c from './c';\n\
             export const local = 1;",
        );
        assert_eq!(
            refs,
            vec![
                ModuleReference::new("./a", ReferenceKind::ReExport),
                ModuleReference::new("./b", ReferenceKind::ReExport),
                ModuleReference::new("./c", ReferenceKind::ReExport),
            ]
        );
    }

    #[test]
    fn test_dynamic_import_nested_in_function() {
        let refs = extract(
            "export async function load() {\n\
               const mod = await import('./lazy');\n\
               return mod;\n\
             }",
        );
        assert_eq!(refs, vec![ModuleReference::new("./lazy", ReferenceKind::DynamicImport)]);
    }

    #[test]
    fn test_next_dynamic_wrapper() {
        let src = "import dynamic from 'next/dynamic';\n\
                   const Chart = dynamic(() => import('../components/Chart'), { ssr: false });";
        assert_eq!(specifiers(src), vec!["next/dynamic", "../components/Chart"]);
    }

    #[test]
    fn test_require_anywhere() {
        let src = "const a = require('./a');\n\
                   function f() { return { b: require('./b') }; }\n\
                   module.exports = cond ? require('./c') : null;";
        assert_eq!(specifiers(src), vec!["./a", "./b", "./c"]);
    }

    #[test]
    fn test_ts_import_equals_require() {
        let refs = extract("import fs = require('./fs-shim');");
        assert_eq!(refs, vec![ModuleReference::new("./fs-shim", ReferenceKind::Require)]);
    }

    #[test]
    fn test_non_literal_arguments_ignored() {
        let src = "const name = './x';\n\
                   require(name);\n\
                   require(`./tpl`);\n\
                   import('./a' + name);\n\
                   require('./two', 'args');\n\
                   module.require('./member');\n\
                   notRequire('./other');";
        assert!(extract(src).is_empty());
    }

    #[test]
    fn test_dynamic_import_with_options_ignored() {
        let src = "import('./data.json', { with: { type: 'json' } });\n\
                   import('./plain');";
        assert_eq!(specifiers(src), vec!["./plain"]);
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let src = "import a from './dup';\nconst b = require('./dup');\nimport('./dup');";
        assert_eq!(specifiers(src), vec!["./dup", "./dup", "./dup"]);
    }

    #[test]
    fn test_jsx_and_types_in_js_file() {
        let src = "import Button from './Button';\n\
                   type Props = { label: string };\n\
                   export default function Page(props: Props) {\n\
                     return <Button onClick={() => import('./analytics')}>{props.label}</Button>;\n\
                   }";
        let refs = extract_references(Path::new("page.js"), src).unwrap();
        let specs: Vec<&str> = refs.iter().map(|r| r.specifier.as_str()).collect();
        assert_eq!(specs, vec!["./Button", "./analytics"]);
    }

    #[test]
    fn test_syntax_error_fails_file() {
        let err = extract_references(Path::new("broken.ts"), "import { from './x';").unwrap_err();
        assert!(matches!(err, FileError::Parse { .. }));
        assert_eq!(err.path(), &PathBuf::from("broken.ts"));
    }

    #[test]
    fn test_no_references() {
        assert!(extract("const x = 42;").is_empty());
    }

    #[test]
    fn test_references_for_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(temp_dir.path(), "index.ts", "export * from './lib';");
        let refs = references_for(&file).unwrap();
        assert_eq!(refs, vec![ModuleReference::new("./lib", ReferenceKind::ReExport)]);
    }

    #[test]
    fn test_references_for_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = references_for(&temp_dir.path().join("gone.ts")).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
    }
}
