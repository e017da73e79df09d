//! Directory-listing normalization.
//!
//! Listing payloads are matched against an ordered list of [`ListingStrategy`] rules. The first
//! rule that recognizes the payload produces the listing, so the order decides which shape wins
//! when a payload satisfies more than one rule.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::is_truthy;
use crate::error::BridgeError;
use crate::fs::types::Entry;

/// Object keys carrying bridge control data rather than entry names.
const RESERVED_KEYS: [&str; 3] = ["success", "error", "path"];
/// Sequence keys owned by the `files`/`folders` and `entries` rules.
const SEQUENCE_KEYS: [&str; 3] = ["files", "folders", "entries"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Payload shape that produced a listing.
pub enum ListingShape {
    /// `[{ name, isDirectory }, ...]`.
    EntryArray,
    /// `{ files: [...], folders: [...] }`.
    FilesAndFolders,
    /// `{ entries: ["dir/", "file", { name, isDirectory }, ...] }`.
    EntriesField,
    /// `{ "<name>": <value>, ... }` with composite values marking directories.
    KeyedObject,
}

impl ListingShape {
    /// Returns a stable label for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EntryArray => "entry-array",
            Self::FilesAndFolders => "files-and-folders",
            Self::EntriesField => "entries-field",
            Self::KeyedObject => "keyed-object",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Canonical listing together with the shape it was recognized from.
pub struct Listing {
    /// Shape that produced the entries.
    pub shape: ListingShape,
    /// Entries in payload order.
    pub entries: Vec<Entry>,
}

/// One listing-normalization rule.
pub trait ListingStrategy {
    /// Shape this rule recognizes.
    fn shape(&self) -> ListingShape;

    /// Returns `None` when the payload is not this rule's shape.
    ///
    /// `Some(vec![])` means the payload is this shape and legitimately empty: its sequence had no
    /// elements at all, not only unusable ones.
    fn recognize(&self, payload: &Value) -> Option<Vec<Entry>>;
}

struct EntryArrayRule;

impl ListingStrategy for EntryArrayRule {
    fn shape(&self) -> ListingShape {
        ListingShape::EntryArray
    }

    fn recognize(&self, payload: &Value) -> Option<Vec<Entry>> {
        let items = payload.as_array()?;
        let all_entry_shaped = items
            .iter()
            .all(|item| item.get("name").is_some_and(Value::is_string));
        if !all_entry_shaped {
            return None;
        }
        claim(items.len(), items.iter().filter_map(record_entry).collect())
    }
}

struct FilesAndFoldersRule;

impl ListingStrategy for FilesAndFoldersRule {
    fn shape(&self) -> ListingShape {
        ListingShape::FilesAndFolders
    }

    fn recognize(&self, payload: &Value) -> Option<Vec<Entry>> {
        let object = payload.as_object()?;
        let files = object.get("files").and_then(Value::as_array);
        let folders = object.get("folders").and_then(Value::as_array);
        if files.is_none() && folders.is_none() {
            return None;
        }

        let source_len = files.map_or(0, Vec::len) + folders.map_or(0, Vec::len);
        let files = files
            .into_iter()
            .flatten()
            .filter_map(|item| named_item(item).map(Entry::file));
        let folders = folders
            .into_iter()
            .flatten()
            .filter_map(|item| named_item(item).map(Entry::directory));
        claim(source_len, files.chain(folders).collect())
    }
}

struct EntriesFieldRule;

impl ListingStrategy for EntriesFieldRule {
    fn shape(&self) -> ListingShape {
        ListingShape::EntriesField
    }

    fn recognize(&self, payload: &Value) -> Option<Vec<Entry>> {
        let items = payload.as_object()?.get("entries")?.as_array()?;
        claim(
            items.len(),
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(raw) => match raw.strip_suffix('/') {
                        Some(dir) => valid(dir).map(Entry::directory),
                        None => valid(raw).map(Entry::file),
                    },
                    _ => record_entry(item),
                })
                .collect(),
        )
    }
}

struct KeyedObjectRule;

impl ListingStrategy for KeyedObjectRule {
    fn shape(&self) -> ListingShape {
        ListingShape::KeyedObject
    }

    fn recognize(&self, payload: &Value) -> Option<Vec<Entry>> {
        let object = payload.as_object()?;
        if SEQUENCE_KEYS
            .iter()
            .any(|key| object.get(*key).is_some_and(Value::is_array))
        {
            return None;
        }
        let entries = keyed_entries(object);
        // A fallback rule only claims payloads it can actually read.
        (!entries.is_empty()).then_some(entries)
    }
}

fn keyed_entries(object: &Map<String, Value>) -> Vec<Entry> {
    object
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .filter_map(|(key, value)| {
            let name = valid(key)?;
            Some(match value {
                Value::Array(_) | Value::Object(_) => Entry::directory(name),
                _ => Entry::file(name),
            })
        })
        .collect()
}

const RULES: [&(dyn ListingStrategy + Sync); 4] = [
    &EntryArrayRule,
    &FilesAndFoldersRule,
    &EntriesFieldRule,
    &KeyedObjectRule,
];

/// Normalizes a raw directory-listing payload into canonical entries.
///
/// Rules are tried in priority order: entry array, `files`/`folders`, `entries`, then the
/// keyed-object fallback that ignores the `success`, `error`, and `path` control keys. The input
/// is never mutated, so normalizing the same payload twice yields identical listings.
///
/// # Errors
///
/// Returns [`BridgeError::UnrecognizedListingShape`] when no rule recognizes the payload.
pub fn normalize_listing(payload: &Value) -> Result<Listing, BridgeError> {
    RULES
        .iter()
        .find_map(|rule| {
            rule.recognize(payload).map(|entries| Listing {
                shape: rule.shape(),
                entries,
            })
        })
        .ok_or(BridgeError::UnrecognizedListingShape)
}

/// Claims a sequence unless it had elements and every one of them was rejected.
fn claim(source_len: usize, entries: Vec<Entry>) -> Option<Vec<Entry>> {
    (source_len == 0 || !entries.is_empty()).then_some(entries)
}

fn record_entry(item: &Value) -> Option<Entry> {
    let name = valid(item.get("name")?.as_str()?)?;
    Some(Entry {
        name,
        is_directory: is_truthy(item.get("isDirectory")),
    })
}

fn named_item(item: &Value) -> Option<String> {
    match item {
        Value::String(name) => valid(name),
        _ => valid(item.get("name")?.as_str()?),
    }
}

fn valid(name: &str) -> Option<String> {
    Entry::is_valid_name(name).then(|| name.to_string())
}
