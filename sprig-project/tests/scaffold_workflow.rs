//! End-to-end test of the scaffolding workflow: load a project, find the
//! plugin classes and the config object, stage a template, and wire up
//! imports the way the CLI does before persisting.

use std::fs;
use std::path::Path;

use sprig_project::{
    AddImport, ConfigScan, Error, Project, create_from_template, find_plugin_classes,
    find_vendure_config, to_kebab_case,
};
use tempfile::TempDir;

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn scaffold_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(
        root,
        "tsconfig.json",
        r#"{ "include": ["src"], "compilerOptions": { "strict": true } }"#,
    );
    write(
        root,
        "src/vendure-config.ts",
        concat!(
            "import { VendureConfig } from '@vendure/core';\n",
            "\n",
            "export const config: VendureConfig = {\n",
            "    apiOptions: { port: 3000 },\n",
            "    plugins: [],\n",
            "};\n",
        ),
    );
    write(
        root,
        "src/reviews.plugin.ts",
        concat!(
            "import { PluginCommonModule } from '@vendure/core';\n",
            "\n",
            "@VendurePlugin({\n",
            "    imports: [PluginCommonModule],\n",
            "})\n",
            "export class ReviewsPlugin {}\n",
        ),
    );
    write(
        root,
        "templates/entity.ts.template",
        "export class ScaffoldedEntity {}\n",
    );

    temp
}

#[test]
fn test_full_scaffold_pass() {
    let temp = scaffold_project();
    let root = temp.path();

    let mut project = Project::load(root).unwrap();

    // The existing plugin is visible through the model.
    let plugins = find_plugin_classes(&project);
    assert_eq!(plugins.len(), 1);
    assert_eq!(plugins[0].name(), "ReviewsPlugin");

    // The config object is found through the conventional file name.
    let config = find_vendure_config(&mut project, &ConfigScan::default()).unwrap();
    assert!(config.property_names().contains(&"plugins".to_string()));

    // Stage a template as a virtual file.
    let staged = create_from_template(&mut project, &root.join("templates/entity.ts.template"))
        .unwrap();
    assert_eq!(staged.classes()[0].name(), "ScaffoldedEntity");

    // Wire the plugin file into the config file, twice to prove idempotence.
    let config_path = root.join("src/vendure-config.ts");
    let plugin_path = root.join("src/reviews.plugin.ts");
    for _ in 0..2 {
        let config_file = project.source_file_mut(&config_path).unwrap();
        config_file.add_imports(
            AddImport::file(&plugin_path)
                .named("ReviewsPlugin")
                .order(0),
        );
        config_file.add_imports(AddImport::specifier("@vendure/core").named("VendurePlugin"));
    }

    let config_file = project.source_file(&config_path).unwrap();
    assert_eq!(config_file.imports().len(), 2);

    let text = config_file.text();
    assert!(text.contains("import { ReviewsPlugin } from './reviews.plugin';"));
    assert!(
        text.contains("import { VendureConfig, VendurePlugin } from '@vendure/core';"),
        "named imports must merge into the existing declaration:\n{text}"
    );
    assert!(text.contains("export const config: VendureConfig = {"));

    // The staged file name feeds kebab-cased identifiers.
    assert_eq!(to_kebab_case("ScaffoldedEntity"), "scaffolded-entity");
}

#[test]
fn test_missing_tsconfig_is_terminal() {
    let temp = TempDir::new().unwrap();
    let err = Project::load(temp.path()).unwrap_err();
    assert!(matches!(*err, Error::ConfigNotFound { .. }));
}
