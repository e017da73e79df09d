//! Naive path helpers used by navigation state.
//!
//! Bridge paths are absolute `/`-separated strings. They are never resolved or validated; the
//! only normalization applied is collapsing doubled separators introduced by joining.

/// Replaces each non-overlapping `//` with `/` in a single left-to-right pass.
pub fn collapse_double_slashes(path: &str) -> String {
    path.replace("//", "/")
}

/// Joins a child entry name onto a directory path.
pub fn join_child_path(parent: &str, name: &str) -> String {
    collapse_double_slashes(&format!("{parent}/{name}"))
}

/// Returns the non-empty `/`-separated segments of `path`.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}
