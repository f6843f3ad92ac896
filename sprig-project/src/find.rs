//! Lookups over the program model: plugin classes and the Vendure config.

use std::path::PathBuf;

use crate::paths;
use crate::project::Project;
use crate::source::{ClassDecl, ObjectLiteral};

/// Decorator marking a plugin class.
pub const PLUGIN_DECORATOR: &str = "VendurePlugin";

/// Declared type of the config variable.
pub const CONFIG_TYPE_NAME: &str = "VendureConfig";

/// Conventional file name holding the config variable.
pub const CONFIG_FILE_NAME: &str = "vendure-config.ts";

/// Substring used when scanning `src/` for the config file.
const CONFIG_FILE_HINT: &str = "vendure-config";

/// All classes decorated with [`PLUGIN_DECORATOR`], in file order then
/// declaration order. Empty when the project has none.
pub fn find_plugin_classes(project: &Project) -> Vec<&ClassDecl> {
    classes_with_decorator(project, PLUGIN_DECORATOR)
}

/// Classes carrying a decorator with the given name.
pub fn classes_with_decorator<'a>(project: &'a Project, name: &str) -> Vec<&'a ClassDecl> {
    project
        .source_files()
        .flat_map(|file| file.classes())
        .filter(|class| class.has_decorator(name))
        .collect()
}

/// Options for [`find_vendure_config`].
#[derive(Debug, Clone)]
pub struct ConfigScan {
    /// Only consider files whose path ends with [`CONFIG_FILE_NAME`].
    pub check_file_name: bool,
}

impl Default for ConfigScan {
    fn default() -> Self {
        Self {
            check_file_name: true,
        }
    }
}

/// Locate the object literal assigned to the `VendureConfig`-typed variable.
///
/// Searches the loaded files first; when nothing matches, makes a one-shot
/// attempt to load a conventionally named file from the project's `src/`
/// directory (non-recursive, entries sorted by name) and searches again.
/// When several declarations match, the first one in file-iteration order
/// wins. Returns `None` when no match exists anywhere; that is not an
/// error, callers must handle absence.
pub fn find_vendure_config<'a>(
    project: &'a mut Project,
    scan: &ConfigScan,
) -> Option<&'a mut ObjectLiteral> {
    if !has_config_var(project, scan) {
        if let Some(path) = conventional_config_file(project) {
            // Best-effort: an unreadable file just leaves the model as-is.
            let _ = project.add_source_file(path);
        }
    }
    config_var_mut(project, scan)
}

fn has_config_var(project: &Project, scan: &ConfigScan) -> bool {
    project
        .source_files()
        .filter(|file| !scan.check_file_name || file_name_matches(file.path()))
        .flat_map(|file| file.vars())
        .any(|var| var.type_name() == CONFIG_TYPE_NAME)
}

fn config_var_mut<'a>(project: &'a mut Project, scan: &ConfigScan) -> Option<&'a mut ObjectLiteral> {
    let check = scan.check_file_name;
    project
        .source_files_mut()
        .filter(|file| !check || file_name_matches(file.path()))
        .flat_map(|file| file.vars_mut())
        .find(|var| var.type_name() == CONFIG_TYPE_NAME)
        .and_then(|var| var.initializer_mut())
        .and_then(|init| init.as_object_mut())
}

fn file_name_matches(path: &std::path::Path) -> bool {
    path.to_string_lossy().ends_with(CONFIG_FILE_NAME)
}

/// First file in `<root>/src` whose name contains the config hint.
fn conventional_config_file(project: &Project) -> Option<PathBuf> {
    let src = project.root_dir().join(paths::SRC_DIR);
    let entries = std::fs::read_dir(src).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.file_name()
                    .is_some_and(|name| name.to_string_lossy().contains(CONFIG_FILE_HINT))
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}
