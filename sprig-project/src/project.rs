//! Program model and project loader.
//!
//! [`Project`] is the in-memory representation of a TypeScript project for
//! one CLI invocation: the source files named by `tsconfig.json`, parsed
//! into declaration views, plus the merged compiler options. The model is
//! mutated in place by the other helpers and handed back to the caller for
//! persistence; it never writes itself to disk.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::paths;
use crate::source::SourceFile;

/// The build-configuration file looked up at the project root.
pub const CONFIG_FILE: &str = "tsconfig.json";

#[derive(Debug, Default, Deserialize)]
struct TsConfig {
    #[serde(default, rename = "compilerOptions")]
    compiler_options: Map<String, Value>,

    /// Explicit file list, relative to the project root.
    #[serde(default)]
    files: Vec<String>,

    /// Included directories or glob patterns; only the directory prefix is
    /// honored (non-recursive).
    #[serde(default)]
    include: Vec<String>,
}

/// In-memory program model for one project.
#[derive(Debug)]
pub struct Project {
    root_dir: PathBuf,
    compiler_options: Map<String, Value>,
    files: Vec<SourceFile>,
}

impl Project {
    /// Load the project whose `tsconfig.json` sits in `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_options(dir, Map::new())
    }

    /// Load a project, overriding compiler options.
    ///
    /// Option precedence, lowest to highest: tsconfig `compilerOptions`,
    /// fixed manipulation defaults, caller `overrides`.
    pub fn load_with_options(dir: impl AsRef<Path>, overrides: Map<String, Value>) -> Result<Self> {
        let dir = dir.as_ref();
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.is_file() {
            return Err(Error::config_not_found(dir));
        }

        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| Error::io(&config_path, e))?;
        let mut config: TsConfig =
            serde_json::from_str(&content).map_err(|e| Error::config_parse(&config_path, e))?;

        let mut compiler_options = std::mem::take(&mut config.compiler_options);
        for (key, value) in manipulation_defaults() {
            compiler_options.insert(key, value);
        }
        for (key, value) in overrides {
            compiler_options.insert(key, value);
        }

        let mut project = Self {
            root_dir: dir.to_path_buf(),
            compiler_options,
            files: Vec::new(),
        };
        project.seed_from_config(&config)?;
        Ok(project)
    }

    /// An empty model rooted at `dir`, with no configuration lookup.
    pub fn empty(dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: dir.into(),
            compiler_options: manipulation_defaults().into_iter().collect(),
            files: Vec::new(),
        }
    }

    fn seed_from_config(&mut self, config: &TsConfig) -> Result<()> {
        for file in &config.files {
            let path = self.root_dir.join(file);
            self.add_source_file(&path)?;
        }
        for entry in &config.include {
            let dir = self.root_dir.join(include_prefix(entry));
            // Included directories are best-effort: a missing or unreadable
            // directory just contributes no files.
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            let mut paths: Vec<PathBuf> = entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "ts"))
                .collect();
            paths.sort();
            for path in paths {
                if self.source_file(&path).is_none() {
                    let _ = self.add_source_file(&path);
                }
            }
        }
        Ok(())
    }

    /// Project root directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Merged compiler options.
    pub fn compiler_options(&self) -> &Map<String, Value> {
        &self.compiler_options
    }

    /// Source files in load order.
    pub fn source_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    pub(crate) fn source_files_mut(&mut self) -> impl Iterator<Item = &mut SourceFile> {
        self.files.iter_mut()
    }

    /// Look up a file by its exact path.
    pub fn source_file(&self, path: impl AsRef<Path>) -> Option<&SourceFile> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path() == path)
    }

    /// Mutable lookup by exact path.
    pub fn source_file_mut(&mut self, path: impl AsRef<Path>) -> Option<&mut SourceFile> {
        let path = path.as_ref();
        self.files.iter_mut().find(|f| f.path() == path)
    }

    /// Read a file from disk and add it to the model.
    pub fn add_source_file(&mut self, path: impl AsRef<Path>) -> Result<&SourceFile> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(self.insert(SourceFile::parse(path, &text)))
    }

    /// Insert a virtual file, overwriting any file already at `path`.
    pub fn create_source_file(
        &mut self,
        path: impl Into<PathBuf>,
        text: impl AsRef<str>,
    ) -> &SourceFile {
        self.insert(SourceFile::parse(path.into(), text.as_ref()))
    }

    fn insert(&mut self, file: SourceFile) -> &SourceFile {
        if let Some(index) = self.files.iter().position(|f| f.path() == file.path()) {
            self.files[index] = file;
            &self.files[index]
        } else {
            self.files.push(file);
            self.files.last().expect("files is non-empty after push")
        }
    }
}

/// Fixed formatting/compiler settings applied to every loaded project.
fn manipulation_defaults() -> Vec<(String, Value)> {
    vec![
        ("skipLibCheck".to_string(), Value::Bool(true)),
        ("noEmit".to_string(), Value::Bool(true)),
        (
            "quoteStyle".to_string(),
            Value::String(paths::QUOTE_STYLE.to_string()),
        ),
    ]
}

/// The directory prefix of an `include` entry, with any glob suffix dropped.
fn include_prefix(entry: &str) -> &str {
    let end = entry.find('*').unwrap_or(entry.len());
    entry[..end].trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_without_tsconfig_fails_fast() {
        let temp = TempDir::new().unwrap();
        // A stray source file must not be touched when the config is absent.
        write(temp.path(), "index.ts", "const x = 1;\n");

        let err = Project::load(temp.path()).unwrap_err();
        assert!(matches!(*err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_seeds_declared_files() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "tsconfig.json",
            r#"{ "files": ["index.ts"], "compilerOptions": { "strict": true } }"#,
        );
        write(temp.path(), "index.ts", "export class App {}\n");

        let project = Project::load(temp.path()).unwrap();
        assert_eq!(project.source_files().count(), 1);
        let file = project.source_file(temp.path().join("index.ts")).unwrap();
        assert_eq!(file.classes()[0].name(), "App");
    }

    #[test]
    fn test_load_seeds_include_dirs_non_recursively() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "tsconfig.json", r#"{ "include": ["src/**/*"] }"#);
        write(temp.path(), "src/a.ts", "const a: number = 1;\n");
        write(temp.path(), "src/b.ts", "const b: number = 2;\n");
        write(temp.path(), "src/nested/deep.ts", "const d: number = 3;\n");
        write(temp.path(), "src/readme.md", "not a source file\n");

        let project = Project::load(temp.path()).unwrap();
        let paths: Vec<_> = project
            .source_files()
            .map(|f| f.path().file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(paths, vec!["a.ts", "b.ts"]);
    }

    #[test]
    fn test_load_merges_compiler_option_overrides() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "tsconfig.json",
            r#"{ "compilerOptions": { "strict": true, "noEmit": false } }"#,
        );

        let mut overrides = Map::new();
        overrides.insert("strict".to_string(), Value::Bool(false));
        let project = Project::load_with_options(temp.path(), overrides).unwrap();

        let options = project.compiler_options();
        // Caller override wins over tsconfig.
        assert_eq!(options["strict"], Value::Bool(false));
        // Fixed defaults win over tsconfig.
        assert_eq!(options["noEmit"], Value::Bool(true));
        assert_eq!(options["skipLibCheck"], Value::Bool(true));
    }

    #[test]
    fn test_load_rejects_malformed_config() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "tsconfig.json", "{ not json ");

        let err = Project::load(temp.path()).unwrap_err();
        assert!(matches!(*err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_create_source_file_overwrites_by_path() {
        let mut project = Project::empty("/proj");
        project.create_source_file("/proj/src/x.ts", "const a: number = 1;\n");
        project.create_source_file("/proj/src/x.ts", "const b: number = 2;\n");

        assert_eq!(project.source_files().count(), 1);
        let file = project.source_file("/proj/src/x.ts").unwrap();
        assert_eq!(file.vars()[0].name(), "b");
    }
}
