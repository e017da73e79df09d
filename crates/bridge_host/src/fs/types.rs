//! Canonical directory-entry types produced by the listing normalizer.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Directory entry in canonical form, independent of the bridge response shape.
pub struct Entry {
    /// Base name of the entry (non-empty, never contains `/`).
    pub name: String,
    /// Whether the entry is a directory.
    #[serde(default)]
    pub is_directory: bool,
}

impl Entry {
    /// Builds a file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
        }
    }

    /// Builds a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
        }
    }

    /// Returns `true` when `name` can be used as a canonical entry name.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && !name.contains('/')
    }
}

/// Orders entries for display: directories first, then names in locale-like order.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.is_directory
        .cmp(&a.is_directory)
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Sorts entries in place using [`compare_entries`].
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(compare_entries);
}

fn compare_names(a: &str, b: &str) -> Ordering {
    // Case-only differences put lowercase first, as `localeCompare` does.
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
