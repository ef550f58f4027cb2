//! Lexical path cleaning.
//!
//! Paths taken from a document are never resolved against the filesystem.
//! They are cleaned component by component so the result can be joined onto
//! an output root without escaping it.

use std::path::{Component, Path};

/// Lexically clean a path into a `/`-separated relative form.
///
/// Redundant separators and `.` segments are dropped, `name/..` pairs are
/// collapsed, and any root or drive prefix is removed so absolute paths are
/// re-rooted. Leading `..` segments that cannot be collapsed are kept.
pub fn clean_path(raw: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for component in Path::new(raw.trim()).components() {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => {
                if parts.last().is_some_and(|p| p != "..") {
                    parts.pop();
                } else {
                    parts.push("..".to_string());
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    parts.join("/")
}

/// Clean a path and return it only if it stays inside the output root.
///
/// Returns `None` when the cleaned path is empty or still contains a `..`
/// segment.
pub fn safe_relative_path(raw: &str) -> Option<String> {
    let cleaned = clean_path(raw);
    if cleaned.is_empty() || cleaned.split('/').any(|segment| segment == "..") {
        return None;
    }
    Some(cleaned)
}
