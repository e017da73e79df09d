//! Canonical entry model and path helpers shared by the normalizer and navigation state.

pub mod path;
pub mod types;
