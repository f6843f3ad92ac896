//! In-memory source file model.
//!
//! A [`SourceFile`] holds the declarations the scanner extracted from a
//! TypeScript file: the import header as structured [`ImportDecl`]s, plus
//! read-only views of class and variable declarations. The body text after
//! the import header is kept verbatim so the file can be rendered back for
//! persistence by the caller.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::scan;

/// A single source file inside a [`Project`](crate::Project).
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    imports: Vec<ImportDecl>,
    classes: Vec<ClassDecl>,
    vars: Vec<VarDecl>,
    body: String,
}

impl SourceFile {
    /// Parse source text into the file model.
    pub(crate) fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let scanned = scan::scan_source(text);
        Self {
            path: path.into(),
            imports: scanned.imports,
            classes: scanned.classes,
            vars: scanned.vars,
            body: scanned.body,
        }
    }

    /// Absolute path identifying this file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Import declarations, in header order.
    pub fn imports(&self) -> &[ImportDecl] {
        &self.imports
    }

    pub(crate) fn imports_mut(&mut self) -> &mut Vec<ImportDecl> {
        &mut self.imports
    }

    /// Class declarations, in declaration order.
    pub fn classes(&self) -> &[ClassDecl] {
        &self.classes
    }

    /// Variable declarations, in declaration order.
    pub fn vars(&self) -> &[VarDecl] {
        &self.vars
    }

    pub(crate) fn vars_mut(&mut self) -> &mut [VarDecl] {
        &mut self.vars
    }

    /// Text of the file after the import header.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Render the file back to source text: the import header (explicit
    /// `order` indices win, otherwise header order is preserved) followed
    /// by the body.
    pub fn text(&self) -> String {
        let mut ordered: Vec<(usize, &ImportDecl)> = self.imports.iter().enumerate().collect();
        ordered.sort_by_key(|(position, import)| {
            (import.order.unwrap_or(*position as i32), *position)
        });

        let mut out = String::new();
        for (_, import) in &ordered {
            out.push_str(&import.render());
            out.push('\n');
        }
        if !ordered.is_empty() && !self.body.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.body);
        out
    }
}

/// An import statement in a source file.
#[derive(Debug, Clone)]
pub struct ImportDecl {
    pub(crate) module_specifier: String,
    pub(crate) default_import: Option<String>,
    pub(crate) namespace_import: Option<String>,
    pub(crate) named: IndexSet<String>,
    pub(crate) order: Option<i32>,
}

impl ImportDecl {
    pub(crate) fn new(module_specifier: impl Into<String>) -> Self {
        Self {
            module_specifier: module_specifier.into(),
            default_import: None,
            namespace_import: None,
            named: IndexSet::new(),
            order: None,
        }
    }

    /// The module this import refers to.
    pub fn module_specifier(&self) -> &str {
        &self.module_specifier
    }

    pub fn default_import(&self) -> Option<&str> {
        self.default_import.as_deref()
    }

    pub fn namespace_import(&self) -> Option<&str> {
        self.namespace_import.as_deref()
    }

    /// Named imports, unique, in insertion order.
    pub fn named_imports(&self) -> impl Iterator<Item = &str> {
        self.named.iter().map(String::as_str)
    }

    /// Explicit ordering index relative to other imports in the file.
    pub fn order(&self) -> Option<i32> {
        self.order
    }

    /// Render the declaration as a TypeScript import statement.
    pub fn render(&self) -> String {
        let named = self
            .named
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        match (&self.default_import, &self.namespace_import, self.named.is_empty()) {
            (Some(def), Some(ns), _) => {
                format!("import {}, * as {} from '{}';", def, ns, self.module_specifier)
            }
            (None, Some(ns), _) => {
                format!("import * as {} from '{}';", ns, self.module_specifier)
            }
            (Some(def), None, true) => {
                format!("import {} from '{}';", def, self.module_specifier)
            }
            (Some(def), None, false) => {
                format!("import {}, {{ {} }} from '{}';", def, named, self.module_specifier)
            }
            (None, None, false) => {
                format!("import {{ {} }} from '{}';", named, self.module_specifier)
            }
            (None, None, true) => {
                format!("import '{}';", self.module_specifier)
            }
        }
    }
}

/// A class declaration. Read-only in this crate.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub(crate) name: String,
    pub(crate) decorators: Vec<Decorator>,
}

impl ClassDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }

    /// Whether the class carries a decorator with the given name.
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }
}

/// A decorator attached to a class declaration.
#[derive(Debug, Clone)]
pub struct Decorator {
    pub(crate) name: String,
    pub(crate) arguments: Option<String>,
}

impl Decorator {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw argument text between the decorator's parentheses, if called.
    pub fn arguments(&self) -> Option<&str> {
        self.arguments.as_deref()
    }
}

/// A variable declaration with a type annotation.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub(crate) name: String,
    pub(crate) type_name: String,
    pub(crate) initializer: Option<Initializer>,
}

impl VarDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Textual rendering of the declared type annotation.
    ///
    /// Matching against this is deliberately a plain string comparison, not
    /// a structural type check.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn initializer(&self) -> Option<&Initializer> {
        self.initializer.as_ref()
    }

    pub(crate) fn initializer_mut(&mut self) -> Option<&mut Initializer> {
        self.initializer.as_mut()
    }
}

/// The initializer expression of a variable declaration.
#[derive(Debug, Clone)]
pub enum Initializer {
    /// An object literal, inspectable by key.
    Object(ObjectLiteral),
    /// Any other expression, kept as raw text.
    Other(String),
}

impl Initializer {
    pub fn as_object(&self) -> Option<&ObjectLiteral> {
        match self {
            Initializer::Object(obj) => Some(obj),
            Initializer::Other(_) => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectLiteral> {
        match self {
            Initializer::Object(obj) => Some(obj),
            Initializer::Other(_) => None,
        }
    }
}

/// An object-literal expression, kept as raw text with key lookup.
#[derive(Debug, Clone)]
pub struct ObjectLiteral {
    pub(crate) text: String,
}

impl ObjectLiteral {
    /// Full literal text, including the outer braces.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the literal text wholesale.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Names of the top-level properties, in source order.
    pub fn property_names(&self) -> Vec<String> {
        let inner = self
            .text
            .trim()
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(&self.text);

        let mut names = Vec::new();
        let mut depth = 0u32;
        let mut at_key = true;
        let mut key = String::new();
        for c in inner.chars() {
            match c {
                '{' | '[' | '(' => depth += 1,
                '}' | ']' | ')' => depth = depth.saturating_sub(1),
                ':' if depth == 0 && at_key => {
                    let name = key.trim().to_string();
                    if !name.is_empty() {
                        names.push(name);
                    }
                    at_key = false;
                }
                ',' if depth == 0 => {
                    key.clear();
                    at_key = true;
                    continue;
                }
                _ => {}
            }
            if at_key && !matches!(c, '{' | '[' | '(') {
                key.push(c);
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_named_import() {
        let mut decl = ImportDecl::new("./utils");
        decl.named.insert("foo".to_string());
        decl.named.insert("bar".to_string());
        assert_eq!(decl.render(), "import { foo, bar } from './utils';");
    }

    #[test]
    fn test_render_default_and_named_import() {
        let mut decl = ImportDecl::new("react");
        decl.default_import = Some("React".to_string());
        decl.named.insert("useState".to_string());
        assert_eq!(decl.render(), "import React, { useState } from 'react';");
    }

    #[test]
    fn test_render_namespace_import() {
        let mut decl = ImportDecl::new("path");
        decl.namespace_import = Some("path".to_string());
        assert_eq!(decl.render(), "import * as path from 'path';");
    }

    #[test]
    fn test_render_side_effect_import() {
        let decl = ImportDecl::new("./polyfill");
        assert_eq!(decl.render(), "import './polyfill';");
    }

    #[test]
    fn test_text_orders_imports_by_explicit_index() {
        let mut file = SourceFile::parse(
            "/src/index.ts",
            "import { a } from './a';\nimport { b } from './b';\n\nconst x = 1;\n",
        );
        file.imports_mut()[1].order = Some(-1);

        let text = file.text();
        let b_pos = text.find("./b").unwrap();
        let a_pos = text.find("./a").unwrap();
        assert!(b_pos < a_pos);
        assert!(text.ends_with("const x = 1;\n"));
    }

    #[test]
    fn test_object_literal_property_names() {
        let obj = ObjectLiteral {
            text: "{ apiOptions: { port: 3000 }, plugins: [], authOptions: {} }".to_string(),
        };
        assert_eq!(obj.property_names(), vec!["apiOptions", "plugins", "authOptions"]);
    }

    #[test]
    fn test_object_literal_empty() {
        let obj = ObjectLiteral { text: "{}".to_string() };
        assert!(obj.property_names().is_empty());
    }
}
