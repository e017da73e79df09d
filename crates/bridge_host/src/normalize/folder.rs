//! Folder-selection response normalization.

use serde_json::Value;

use crate::error::BridgeError;

/// JSON pointers probed, in order, for the selected folder path.
const FOLDER_PATH_POINTERS: [&str; 4] = ["/folderInfo/path", "/path", "/folderPath", "/directory"];

/// Extracts the selected folder path from a folder-selection response.
///
/// A bare string is the path itself; otherwise the first non-empty string found at
/// `folderInfo.path`, `path`, `folderPath`, or `directory` wins.
///
/// # Errors
///
/// Returns [`BridgeError::NoPathInResponse`] when no probe yields a non-empty string.
pub fn normalize_folder_path(payload: &Value) -> Result<String, BridgeError> {
    if let Value::String(path) = payload {
        return non_empty(path).ok_or(BridgeError::NoPathInResponse);
    }

    FOLDER_PATH_POINTERS
        .iter()
        .find_map(|pointer| payload.pointer(pointer).and_then(Value::as_str).and_then(non_empty))
        .ok_or(BridgeError::NoPathInResponse)
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
