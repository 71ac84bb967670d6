//! String sanitization utilities for branch names and file paths

use regex::Regex;
use std::sync::LazyLock;

// Sequences git refuses anywhere in a ref name
static BRANCH_FORBIDDEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.\.|@\{|[~^:?*\[\]\\\x00-\x1F\x7F]").expect("branch pattern is valid")
});

/// Keep printable ASCII only and turn spaces into underscores
fn printable_with_underscores(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Sanitize a branch name so GitHub accepts it as `refs/heads/<name>`
///
/// Non-printable characters are dropped, spaces become underscores and
/// characters git forbids in ref names are removed. Leading `.`/`/` and
/// trailing `.`/`/`/`.lock` are stripped.
pub fn clean_branch_name(input: &str) -> String {
    let cleaned = printable_with_underscores(input);
    let mut cleaned = BRANCH_FORBIDDEN.replace_all(&cleaned, "").into_owned();

    loop {
        let before = cleaned.len();
        cleaned = cleaned
            .trim_start_matches(['.', '/'])
            .trim_end_matches(['.', '/'])
            .to_string();
        if let Some(stripped) = cleaned.strip_suffix(".lock") {
            cleaned = stripped.to_string();
        }
        if cleaned.len() == before {
            break;
        }
    }

    if cleaned == "@" {
        cleaned.clear();
    }
    cleaned
}

/// Sanitize a single file name component
///
/// Non-printable characters are dropped, spaces become underscores and
/// `\ / : " * ? < > |` are removed.
pub fn clean_file_name(input: &str) -> String {
    printable_with_underscores(input)
        .chars()
        .filter(|c| !matches!(c, '\\' | '/' | ':' | '"' | '*' | '?' | '<' | '>' | '|'))
        .collect()
}
