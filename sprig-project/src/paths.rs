//! Path constants and module-style import path computation.

use std::path::{Component, Path, PathBuf};

/// Source directory scanned for the conventional config file.
pub const SRC_DIR: &str = "src";

/// Virtual directory prefix for staged template files.
pub const TEMP_DIR: &str = "/.sprig-tmp";

/// Quote style applied to rendered import statements.
pub const QUOTE_STYLE: &str = "single";

/// Extensions stripped when converting a file path to a module path.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mts", "cts"];

/// A location an import path can be computed between.
#[derive(Debug, Clone, Copy)]
pub enum ImportLocation<'a> {
    /// A source file, identified by its file path.
    File(&'a Path),
    /// A directory.
    Dir(&'a Path),
}

impl<'a> ImportLocation<'a> {
    fn path(&self) -> &'a Path {
        match self {
            ImportLocation::File(path) | ImportLocation::Dir(path) => path,
        }
    }

    /// The directory the relative path is resolved against.
    fn base(&self) -> &'a Path {
        match self {
            ImportLocation::File(path) => path.parent().unwrap_or(Path::new("")),
            ImportLocation::Dir(path) => path,
        }
    }
}

/// Compute the module-style import path that refers to `from` out of `to`.
///
/// The result is the filesystem-relative path from `to`'s directory to
/// `from`, converted to import form: forward slashes, no extension, a `./`
/// prefix. Malformed inputs produce a syntactically valid but meaningless
/// path; nothing is validated here.
pub fn relative_import_path(from: ImportLocation<'_>, to: ImportLocation<'_>) -> String {
    let relative = relative_to(from.path(), to.base());
    to_module_path(&relative.to_string_lossy())
}

/// Convert a filesystem path into a module import path.
///
/// Idempotent on already-converted input.
pub fn to_module_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let (dir, file) = match normalized.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", normalized.as_str()),
    };
    let stem = match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && SOURCE_EXTENSIONS.contains(&ext) => stem,
        _ => file,
    };

    let mut joined = format!("./{}/{}", dir, stem);
    while joined.contains("//") {
        joined = joined.replace("//", "/");
    }
    // Guard against a doubled "./" when the input already carried one.
    while let Some(rest) = joined.strip_prefix("././") {
        joined = format!("./{}", rest);
    }
    joined
}

/// Filesystem-relative path from `base` to `path`.
///
/// std offers no relative-path helper, so walk the common prefix and climb
/// with `..` components for the remainder.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_components: Vec<Component> = path.components().collect();
    let base_components: Vec<Component> = base.components().collect();

    let common = path_components
        .iter()
        .zip(base_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component);
    }
    relative
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_import_path_between_sibling_files() {
        let from = Path::new("/proj/src/plugins/my-plugin/my.plugin.ts");
        let to = Path::new("/proj/src/vendure-config.ts");
        let result =
            relative_import_path(ImportLocation::File(from), ImportLocation::File(to));
        assert_eq!(result, "./plugins/my-plugin/my.plugin");
    }

    #[test]
    fn test_relative_import_path_climbs_directories() {
        let from = Path::new("/proj/src/index.ts");
        let to = Path::new("/proj/src/plugins/my-plugin/my.plugin.ts");
        let result =
            relative_import_path(ImportLocation::File(from), ImportLocation::File(to));
        assert_eq!(result, "./../../index");
    }

    #[test]
    fn test_relative_import_path_from_directory() {
        let from = Path::new("/proj/src/services/cart.service.ts");
        let to = Path::new("/proj/src");
        let result = relative_import_path(ImportLocation::File(from), ImportLocation::Dir(to));
        assert_eq!(result, "./services/cart.service");
    }

    #[test]
    fn test_to_module_path_normalizes_backslashes() {
        assert_eq!(to_module_path(r"plugins\my-plugin\plugin.ts"), "./plugins/my-plugin/plugin");
    }

    #[test]
    fn test_to_module_path_is_idempotent() {
        let first = to_module_path("plugins/plugin.helper.ts");
        assert_eq!(to_module_path(&first), first);
    }

    #[test]
    fn test_to_module_path_shape() {
        for input in ["a/b/c.ts", "a\\b\\c.ts", "./a//b/c.ts", "c.ts", "c"] {
            let result = to_module_path(input);
            assert!(result.starts_with("./"), "{result} must start with ./");
            assert!(!result.contains('\\'));
            assert!(!result.contains("//"));
        }
    }
}
