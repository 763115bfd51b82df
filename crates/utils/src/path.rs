use crate::UtilsError;
use std::path::{Path, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

/// Joins path segments with exactly one host separator between them.
///
/// `/` is rewritten to the host separator, and every segment after the first
/// loses its leading separators so rooted fragments never reset the join or
/// produce doubled separators. Empty segments are skipped.
pub fn combine<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();

    for (idx, segment) in segments.iter().enumerate() {
        let replaced = segment.as_ref().replace('/', MAIN_SEPARATOR_STR);
        let part = if idx > 0 {
            replaced.trim_start_matches(MAIN_SEPARATOR)
        } else {
            replaced.as_str()
        };

        if part.is_empty() {
            continue;
        }
        if !joined.is_empty() && !joined.ends_with(MAIN_SEPARATOR) {
            joined.push(MAIN_SEPARATOR);
        }
        joined.push_str(part);
    }

    joined
}

/// Reports whether `path` can be resolved to a full path on this host
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || path.chars().any(is_invalid_path_char) {
        return false;
    }
    std::path::absolute(path).is_ok()
}

/// Same check as [`is_valid_path`], surfaced as an error naming the path
pub fn ensure_valid_path(path: &str) -> Result<(), UtilsError> {
    if is_valid_path(path) {
        Ok(())
    } else {
        Err(UtilsError::PathError(path.to_string()))
    }
}

/// Rewrites host separators to `/`
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(windows)]
fn is_invalid_path_char(c: char) -> bool {
    c < ' ' || matches!(c, '"' | '<' | '>' | '|')
}

#[cfg(not(windows))]
fn is_invalid_path_char(c: char) -> bool {
    c == '\0'
}
