//! Derivation and validation of Rust identifiers for generated code.
use crate::error::{Error, Result};

/// Strict, reserved and edition-specific keywords that cannot name a module or function.
const KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Prefix given to derived names that would otherwise start with a digit.
const DIGIT_PREFIX: &str = "file_";

fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Derives a function name from a file path.
///
/// `prefix` is stripped from the front of `path` (the whole path is used if
/// nothing would remain), the result is lower-cased, every character outside
/// `[a-z0-9_]` becomes `_`, runs of underscores collapse to one and leading
/// underscores are dropped. Names starting with a digit are prefixed with
/// `file_`, keywords get a trailing `_`.
///
/// The result is deterministic, non-empty, never contains `__` and never
/// starts with a digit or an underscore.
///
/// # Errors
/// Returns [`Error::InvalidIdentifier`] if `path` contains no character that
/// can appear in an identifier.
///
/// # Example
/// ```
/// let name = bindata::sanitize("/assets/images/logo-32x32.PNG", "/assets/").unwrap();
/// assert_eq!(name, "images_logo_32x32_png");
/// ```
pub fn sanitize(path: &str, prefix: &str) -> Result<String> {
    let stripped = path
        .strip_prefix(prefix)
        .filter(|rest| !rest.is_empty())
        .unwrap_or(path);

    let mut name = String::with_capacity(stripped.len());
    for c in stripped.to_lowercase().chars() {
        let c = if c.is_ascii_alphanumeric() || c == '_' {
            c
        } else {
            '_'
        };
        if c == '_' && (name.is_empty() || name.ends_with('_')) {
            continue;
        }
        name.push(c);
    }

    if name.is_empty() {
        return Err(Error::invalid("function", path));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, DIGIT_PREFIX);
    }
    if is_keyword(&name) {
        name.push('_');
    }
    Ok(name)
}

/// Validates a user-supplied package or function name.
///
/// A leading ASCII digit is allowed and gets an `_` prepended. Returns the
/// normalized name.
///
/// # Errors
/// Returns [`Error::InvalidIdentifier`] if the name is empty, contains a
/// character outside `[A-Za-z0-9_]`, is `_` alone or is a Rust keyword.
pub fn validate(kind: &'static str, name: &str) -> Result<String> {
    let valid_chars = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if name.is_empty() || name == "_" || !valid_chars || is_keyword(name) {
        return Err(Error::invalid(kind, name));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        Ok(format!("_{name}"))
    } else {
        Ok(name.to_owned())
    }
}
