//! Idempotent editing of import declarations.

use std::path::PathBuf;

use crate::paths::{ImportLocation, relative_import_path};
use crate::source::{ImportDecl, SourceFile};

/// What module an import should refer to.
#[derive(Debug, Clone)]
pub enum ModuleRef {
    /// A module specifier used literally, e.g. `@vendure/core`.
    Specifier(String),
    /// Another file in the model; resolved to a relative import path from
    /// the file being edited.
    File(PathBuf),
}

/// Options for [`SourceFile::add_imports`].
#[derive(Debug, Clone)]
pub struct AddImport {
    module: ModuleRef,
    named_imports: Vec<String>,
    namespace_import: Option<String>,
    order: Option<i32>,
}

impl AddImport {
    /// Import from a literal module specifier.
    pub fn specifier(specifier: impl Into<String>) -> Self {
        Self {
            module: ModuleRef::Specifier(specifier.into()),
            named_imports: Vec::new(),
            namespace_import: None,
            order: None,
        }
    }

    /// Import from another file in the model.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            module: ModuleRef::File(path.into()),
            named_imports: Vec::new(),
            namespace_import: None,
            order: None,
        }
    }

    /// Add a named import.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named_imports.push(name.into());
        self
    }

    /// Add a namespace import (`import * as name`).
    pub fn namespace(mut self, name: impl Into<String>) -> Self {
        self.namespace_import = Some(name.into());
        self
    }

    /// Pin the declaration's position among the file's imports.
    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

impl SourceFile {
    /// Ensure this file imports the requested pieces from a module.
    ///
    /// An existing declaration for the same specifier is merged into, never
    /// duplicated: named imports are appended only when absent, and a
    /// namespace import is only added when the declaration has neither a
    /// namespace nor a default import already. Calling this twice with the
    /// same arguments leaves the file unchanged the second time.
    pub fn add_imports(&mut self, import: AddImport) {
        let specifier = match &import.module {
            ModuleRef::Specifier(specifier) => specifier.clone(),
            ModuleRef::File(path) => {
                relative_import_path(ImportLocation::File(path), ImportLocation::File(self.path()))
            }
        };

        let imports = self.imports_mut();
        let existing = imports
            .iter()
            .position(|i| i.module_specifier == specifier);
        match existing {
            Some(index) => {
                let existing = &mut imports[index];
                if let Some(ns) = import.namespace_import
                    && existing.namespace_import.is_none()
                    && existing.default_import.is_none()
                {
                    existing.namespace_import = Some(ns);
                }
                // IndexSet keeps the first occurrence, so re-adding an
                // existing name is a no-op.
                for name in import.named_imports {
                    existing.named.insert(name);
                }
            }
            None => {
                let mut decl = ImportDecl::new(specifier);
                decl.namespace_import = import.namespace_import;
                for name in import.named_imports {
                    decl.named.insert(name);
                }
                decl.order = import.order;
                match import.order {
                    Some(order) if order >= 0 && (order as usize) <= imports.len() => {
                        imports.insert(order as usize, decl);
                    }
                    _ => imports.push(decl),
                }
            }
        }
    }
}
