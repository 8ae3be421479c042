use tera::Context;

use crate::metadata::ProjectMetadata;

/// Build a Tera context from project metadata.
///
/// The description is also provided pre-escaped as `description_literal` for
/// templates that embed it inside a double-quoted Python string.
pub fn build_context(metadata: &ProjectMetadata) -> Context {
    let mut context = Context::new();
    context.insert("name", &metadata.name);
    context.insert("platform", metadata.platform.as_str());
    context.insert("section", &metadata.section);
    context.insert("app_name", &metadata.app_name);
    context.insert("category", &metadata.category);
    context.insert("description", &metadata.description);
    context.insert(
        "description_literal",
        &escape_python_string(&metadata.description),
    );
    context.insert("version", &metadata.version);
    context.insert("revision", &metadata.revision);
    context
}

pub fn escape_python_string(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Inverse of [`escape_python_string`]. Unknown escapes are kept as written.
pub fn unescape_python_string(literal: &str) -> String {
    let mut raw = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            raw.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('\\' | '"')) => raw.push(next),
            Some(other) => {
                raw.push('\\');
                raw.push(other);
            }
            None => raw.push('\\'),
        }
    }
    raw
}
