//! In-memory TypeScript project manipulation for the Sprig scaffolding CLI.
//!
//! The CLI drives these helpers to wire generated code into an existing
//! project: load the program model from `tsconfig.json`, find the plugin
//! classes and the Vendure config object, stage template files, and add
//! import statements, then hand the mutated model back for persistence.

mod error;
mod find;
mod imports;
mod naming;
mod paths;
mod project;
mod scan;
mod source;
mod template;

pub use error::{Error, Result};
pub use find::{
    CONFIG_FILE_NAME, CONFIG_TYPE_NAME, ConfigScan, PLUGIN_DECORATOR, classes_with_decorator,
    find_plugin_classes, find_vendure_config,
};
pub use imports::{AddImport, ModuleRef};
pub use naming::to_kebab_case;
pub use paths::{ImportLocation, SRC_DIR, TEMP_DIR, relative_import_path, to_module_path};
pub use project::{CONFIG_FILE, Project};
pub use source::{
    ClassDecl, Decorator, ImportDecl, Initializer, ObjectLiteral, SourceFile, VarDecl,
};
pub use template::create_from_template;
