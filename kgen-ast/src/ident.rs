//! Jsonnet identifier rules.

/// Keywords of the Jsonnet language. None of these may appear as a bare
/// field name or variable.
pub const JSONNET_KEYWORDS: &[&str] = &[
    "assert",
    "else",
    "error",
    "false",
    "for",
    "function",
    "if",
    "import",
    "importstr",
    "in",
    "local",
    "null",
    "tailstrict",
    "then",
    "self",
    "super",
    "true",
];

/// Returns true if `name` is a Jsonnet keyword.
pub fn is_keyword(name: &str) -> bool {
    JSONNET_KEYWORDS.contains(&name)
}

/// Returns true if `name` matches `[_a-zA-Z][_a-zA-Z0-9]*`.
///
/// Keywords are lexically identifiers, so they pass this check; use
/// [`is_bare_identifier`] to also exclude them.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Returns true if `name` can be written unquoted as a field name.
pub fn is_bare_identifier(name: &str) -> bool {
    is_identifier(name) && !is_keyword(name)
}
