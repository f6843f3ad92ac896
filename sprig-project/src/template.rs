//! Staging of template files into the program model.

use std::path::Path;

use crate::error::{Error, Result};
use crate::paths;
use crate::project::Project;
use crate::source::SourceFile;

/// Read a template from disk and stage it as a virtual file.
///
/// The file is inserted at [`paths::TEMP_DIR`] joined with the template
/// path, overwriting any earlier file staged at the same location, and
/// lives only in the model until the caller persists it. A read failure is
/// fatal to the scaffolding run: it surfaces as [`Error::TemplateRead`] for
/// the caller to report and exit on.
pub fn create_from_template<'a>(
    project: &'a mut Project,
    template_path: &Path,
) -> Result<&'a SourceFile> {
    let content = std::fs::read_to_string(template_path)
        .map_err(|e| Error::template_read(template_path, e))?;

    Ok(project.create_source_file(virtual_path(template_path), content))
}

/// The in-model path a template is staged at.
fn virtual_path(template_path: &Path) -> String {
    let relative = template_path
        .to_string_lossy()
        .replace('\\', "/")
        .trim_start_matches('/')
        .to_string();
    format!("{}/{}", paths::TEMP_DIR, relative)
}
