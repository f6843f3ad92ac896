//! Lightweight declaration scanner.
//!
//! Extracts just enough structure from TypeScript source text for the rest
//! of the crate: import statements, class declarations with the decorators
//! above them, and typed variable declarations with their initializers.
//! This is not a parser; there is no type checking and brace matching does
//! not look inside string literals.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::source::{ClassDecl, Decorator, ImportDecl, Initializer, ObjectLiteral, VarDecl};

// import <clause> from '<specifier>'; the clause may span lines for
// multi-line named import lists.
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+([\w$*\s,{}]+?)\s+from\s+['"]([^'"]+)['"]\s*;?"#)
        .expect("import pattern is valid")
});

// import '<specifier>'; (side-effect only)
static BARE_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+['"]([^'"]+)['"]\s*;?"#).expect("bare import pattern is valid")
});

static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)")
        .expect("class pattern is valid")
});

static VAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*:\s*([^=\n]+?)\s*=")
        .expect("var pattern is valid")
});

static DECORATOR_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*@[\w$.]+").expect("decorator pattern is valid")
});

static DECORATOR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@([\w$.]+)").expect("decorator name pattern is valid"));

pub(crate) struct ScannedFile {
    pub imports: Vec<ImportDecl>,
    pub classes: Vec<ClassDecl>,
    pub vars: Vec<VarDecl>,
    pub body: String,
}

/// Scan source text into its import header and declaration views.
pub(crate) fn scan_source(text: &str) -> ScannedFile {
    let (imports, body) = split_imports(text);
    let classes = scan_classes(&body);
    let vars = scan_vars(&body);
    ScannedFile {
        imports,
        classes,
        vars,
        body,
    }
}

/// Extract import declarations and return the remaining body text.
fn split_imports(text: &str) -> (Vec<ImportDecl>, String) {
    let mut spans: Vec<(usize, usize, ImportDecl)> = Vec::new();

    for caps in IMPORT_RE.captures_iter(text) {
        let whole = caps.get(0).expect("regex match has a whole capture");
        let decl = parse_import_clause(&caps[1], &caps[2]);
        spans.push((whole.start(), whole.end(), decl));
    }
    for caps in BARE_IMPORT_RE.captures_iter(text) {
        let whole = caps.get(0).expect("regex match has a whole capture");
        spans.push((whole.start(), whole.end(), ImportDecl::new(&caps[1])));
    }
    spans.sort_by_key(|(start, _, _)| *start);

    let mut imports = Vec::new();
    let mut body = String::new();
    let mut cursor = 0;
    for (start, end, decl) in spans {
        if start < cursor {
            // Overlapping match (the bare pattern is a prefix of the full
            // one); the earlier match already consumed this text.
            continue;
        }
        body.push_str(&text[cursor..start]);
        cursor = end;
        // Swallow the newline that terminated the statement.
        if text[cursor..].starts_with('\n') {
            cursor += 1;
        }
        imports.push(decl);
    }
    body.push_str(&text[cursor..]);

    (imports, body.trim_start_matches('\n').to_string())
}

/// Parse the clause between `import` and `from` into a declaration.
fn parse_import_clause(clause: &str, specifier: &str) -> ImportDecl {
    let mut decl = ImportDecl::new(specifier);
    let clause = clause.trim();
    let clause = clause.strip_prefix("type ").unwrap_or(clause).trim();

    if let Some(brace) = clause.find('{') {
        let before = clause[..brace].trim().trim_end_matches(',').trim();
        if !before.is_empty() {
            decl.default_import = Some(before.to_string());
        }
        let inner = &clause[brace + 1..clause.rfind('}').unwrap_or(clause.len())];
        for name in inner.split(',') {
            let name = name.trim();
            if !name.is_empty() {
                decl.named.insert(name.to_string());
            }
        }
    } else if let Some(rest) = clause.strip_prefix('*') {
        decl.namespace_import = rest
            .trim()
            .strip_prefix("as")
            .map(|s| s.trim().to_string());
    } else if let Some((default, rest)) = clause.split_once(',') {
        decl.default_import = Some(default.trim().to_string());
        if let Some(ns) = rest.trim().strip_prefix('*') {
            decl.namespace_import = ns.trim().strip_prefix("as").map(|s| s.trim().to_string());
        }
    } else if !clause.is_empty() {
        decl.default_import = Some(clause.to_string());
    }

    decl
}

fn scan_classes(body: &str) -> Vec<ClassDecl> {
    let mut classes = Vec::new();
    let mut previous_end = 0;

    for caps in CLASS_RE.captures_iter(body) {
        let whole = caps.get(0).expect("regex match has a whole capture");
        let gap = &body[previous_end..whole.start()];
        classes.push(ClassDecl {
            name: caps[1].to_string(),
            decorators: trailing_decorators(gap),
        });
        previous_end = whole.end();
    }
    classes
}

/// Decorators attached to the declaration that follows `gap`.
///
/// A decorator chain only counts when it runs to the end of the gap with
/// nothing but whitespace and line comments between its entries; decorators
/// on members of an earlier class never reach that far.
fn trailing_decorators(gap: &str) -> Vec<Decorator> {
    for start in DECORATOR_START_RE.find_iter(gap) {
        let candidate = gap[start.start()..].trim_start();
        if let Some(chain) = decorator_chain(candidate) {
            return chain;
        }
    }
    Vec::new()
}

/// Parse a chain of decorators that spans the whole of `text`, or `None`.
fn decorator_chain(text: &str) -> Option<Vec<Decorator>> {
    let mut decorators = Vec::new();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        if rest.starts_with("//") {
            let line_end = rest.find('\n')?;
            rest = rest[line_end..].trim_start();
            continue;
        }

        let caps = DECORATOR_NAME_RE.captures(rest)?;
        let whole = caps.get(0).expect("regex match has a whole capture");
        let name = caps[1].to_string();
        let mut after = &rest[whole.end()..];

        let mut arguments = None;
        if after.starts_with('(') {
            let call = balanced_parens(after)?;
            arguments = Some(call[1..call.len() - 1].trim().to_string());
            after = &after[call.len()..];
        }

        decorators.push(Decorator { name, arguments });
        rest = after.trim_start();
    }

    if decorators.is_empty() {
        None
    } else {
        Some(decorators)
    }
}

fn scan_vars(body: &str) -> Vec<VarDecl> {
    let mut vars = Vec::new();

    for caps in VAR_RE.captures_iter(body) {
        let whole = caps.get(0).expect("regex match has a whole capture");
        let initializer = initializer_at(&body[whole.end()..]);
        vars.push(VarDecl {
            name: caps[1].to_string(),
            type_name: caps[2].trim().to_string(),
            initializer,
        });
    }
    vars
}

/// Capture the initializer expression starting at the given text.
fn initializer_at(text: &str) -> Option<Initializer> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('{') {
        balanced_braces(trimmed).map(|literal| {
            Initializer::Object(ObjectLiteral {
                text: literal.to_string(),
            })
        })
    } else {
        let end = trimmed
            .find(|c| c == ';' || c == '\n')
            .unwrap_or(trimmed.len());
        Some(Initializer::Other(trimmed[..end].trim().to_string()))
    }
}

/// The parenthesis-balanced prefix of a text starting with `(`.
fn balanced_parens(text: &str) -> Option<&str> {
    let mut depth = 0u32;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// The brace-balanced prefix of a text starting with `{`.
fn balanced_braces(text: &str) -> Option<&str> {
    let mut depth = 0u32;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
