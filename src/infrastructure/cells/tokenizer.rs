use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::harmonized::CellValue;

static ARABIC_SCRIPT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{0600}-\x{06FF}]").unwrap());

// newline, comma, semicolon, or a run of two or more whitespace characters
static TOKEN_SEPARATOR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n,;]|\s{2,}").unwrap());

/// Split a cell into trimmed, non-empty tokens after stripping Arabic script.
/// Order and duplicates are preserved.
pub fn tokenize(value: &CellValue) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    tokenize_str(&value.to_text())
}

pub fn tokenize_str(text: &str) -> Vec<String> {
    let stripped = ARABIC_SCRIPT_PATTERN.replace_all(text, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return Vec::new();
    }

    TOKEN_SEPARATOR_PATTERN
        .split(stripped)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
