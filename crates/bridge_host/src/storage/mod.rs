//! Storage contracts used to load navigator configuration.

pub mod prefs;
