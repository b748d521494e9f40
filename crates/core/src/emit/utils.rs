//! Naming and literal helpers shared by the TypeScript emitters.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde_json::Value;

use super::ts::{TsLiteral, TsPrimitive, TsType};

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` must be quoted to be used as an object key.
pub fn needs_quoting(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    !(first.is_ascii_alphabetic() || first == '_' || first == '$')
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for a double-quoted JavaScript string literal.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a property key unless it is already a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Sanitize a schema name into a valid TypeScript type identifier.
///
/// Separators (`-`, `.`, space) are dropped and the following letter is
/// uppercased; a leading digit or a reserved word gets a `_` prefix.
pub fn sanitize_ts_identifier(name: &str) -> String {
    let mut result = String::new();
    for (i, part) in name.split(['-', '.', ' ']).filter(|p| !p.is_empty()).enumerate() {
        if i == 0 {
            result.push_str(part);
        } else {
            result.push_str(&capitalize_first(part));
        }
    }

    if result.is_empty() {
        return "_empty".to_string();
    }
    if result.starts_with(|c: char| c.is_ascii_digit()) || TS_RESERVED_WORDS.contains(result.as_str()) {
        result.insert(0, '_');
    }
    result
}

/// PascalCase stem derived from a message name.
///
/// `ping` becomes `Ping` and `user-joined` becomes `UserJoined`; the stem
/// names the handler interface, registry method, and client callbacks for
/// that message.
pub fn message_stem(name: &str) -> String {
    let mut stem: String = name
        .split(['-', '.', ' ', '_'])
        .filter(|p| !p.is_empty())
        .map(capitalize_first)
        .collect();
    if stem.is_empty() {
        return "Message".to_string();
    }
    if stem.starts_with(|c: char| c.is_ascii_digit()) {
        stem.insert(0, '_');
    }
    stem
}

/// Convert a JSON value from `const`/`enum` to a TypeScript literal.
///
/// Arrays and objects have no literal type and yield `None`.
pub fn value_to_literal(v: &Value) -> Option<TsLiteral> {
    match v {
        Value::String(s) => Some(TsLiteral::String(s.clone())),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(TsLiteral::Int(i)),
            None => n.as_f64().map(TsLiteral::Number),
        },
        Value::Bool(b) => Some(TsLiteral::Bool(*b)),
        Value::Null => Some(TsLiteral::Null),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Create a `Record<string, unknown>` type.
pub fn make_unknown_record() -> TsType {
    TsType::Record {
        key: Box::new(TsType::Primitive(TsPrimitive::String)),
        value: Box::new(TsType::Primitive(TsPrimitive::Unknown)),
    }
}
