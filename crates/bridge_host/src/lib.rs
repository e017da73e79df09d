//! Typed contracts for the bridge folder navigator.
//!
//! This crate is the target-independent boundary between the navigator UI and the externally
//! installed bridge extension. It owns the canonical entry model, the response normalizer that
//! reconciles the bridge's shifting payload shapes, navigation-stack state, candidate call
//! sequences, and the [`BridgeClient`] that drives them. Browser transport lives in
//! `bridge_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod bridge;
pub mod config;
pub mod error;
pub mod events;
pub mod fs;
pub mod navigation;
pub mod normalize;
pub mod storage;

pub use bridge::candidates::{BridgeOperation, Candidate, CandidateSequences};
pub use bridge::client::{BridgeClient, ConnectionAck};
pub use bridge::transport::{
    BridgeCall, BridgeFuture, BridgePresence, BridgeTransport, NoopBridgeTransport,
    ScriptedBridgeTransport, CONNECT_METHOD, DISPATCH_METHOD,
};
pub use config::{
    load_navigator_config, ConfigError, ConnectionPolicy, NavigatorConfig, NAVIGATOR_CONFIG_KEY,
};
pub use error::{BridgeError, TransportError};
pub use events::{
    BridgeEvent, BridgeEventSink, ConsoleEventSink, EventLevel, MemoryEventSink, NoopEventSink,
};
pub use fs::path::{collapse_double_slashes, join_child_path, path_segments};
pub use fs::types::{sort_entries, Entry};
pub use navigation::{Breadcrumb, JumpOutcome, JumpPolicy, NavigationError, NavigationState};
pub use normalize::content::normalize_file_content;
pub use normalize::folder::normalize_folder_path;
pub use normalize::listing::{normalize_listing, Listing, ListingShape, ListingStrategy};
pub use storage::prefs::{MemoryPrefsStore, NoopPrefsStore, PrefsStore};
