//! Browser (`wasm32`) implementations of [`bridge_host`] contracts.
//!
//! This crate wires the navigator to the bridge extension's page global, detects when that global
//! becomes available, and reads configuration overrides from `localStorage`.
//!
//! Bridge bindings live under `bridge/`:
//! - `bridge::interop` (wasm/non-wasm transport glue)

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Factories assembling the browser bridge client and configuration.
pub mod adapters;
mod bridge;
pub mod detect;
pub mod storage;
pub mod transport;

pub use adapters::{browser_bridge_client, browser_navigator_config};
pub use detect::detect_bridge;
pub use storage::local_prefs::WebPrefsStore;
pub use transport::WebBridgeTransport;
