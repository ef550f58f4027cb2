//! Per-language single-line comment rules.

/// Single-line comment token for a fence language, if one is known.
pub fn comment_token(language: &str) -> Option<&'static str> {
    let token = match language.to_ascii_lowercase().as_str() {
        "go" | "rust" | "rs" | "javascript" | "js" | "typescript" | "ts" | "c" | "cpp"
        | "c++" | "java" | "kotlin" | "swift" => "//",
        "python" | "py" | "sh" | "bash" | "zsh" | "shell" | "ruby" | "rb" | "yaml" | "yml"
        | "toml" | "dockerfile" | "makefile" => "#",
        "sql" | "lua" | "haskell" => "--",
        _ => return None,
    };
    Some(token)
}

/// Whether a line is a whole-line comment in the given language.
///
/// Languages without a rule never match.
pub fn is_comment_line(line: &str, language: &str) -> bool {
    match comment_token(language) {
        Some(token) => line.trim_start().starts_with(token),
        None => false,
    }
}
