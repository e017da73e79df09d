//! Lightweight preference storage contracts and adapters.

use std::collections::HashMap;

/// Host store for raw JSON preference values keyed by string.
///
/// Browser `localStorage` is synchronous, so the contract is too.
pub trait PrefsStore {
    /// Loads the raw JSON string stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unavailable.
    fn load_pref(&self, key: &str) -> Result<Option<String>, String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
pub struct MemoryPrefsStore {
    inner: HashMap<String, String>,
}

impl MemoryPrefsStore {
    /// Returns the store with `raw_json` saved under `key`.
    pub fn with_pref(mut self, key: impl Into<String>, raw_json: impl Into<String>) -> Self {
        self.inner.insert(key.into(), raw_json.into());
        self
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.get(key).cloned())
    }
}
