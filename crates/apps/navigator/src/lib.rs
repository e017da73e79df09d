//! Folder navigator over the bridge extension.
//!
//! [`NavigatorProvider`] owns one session record mutated only through [`reduce_navigator`];
//! reducer-emitted [`NavigatorEffect`]s run against the [`bridge_host::BridgeClient`] and come back
//! as result actions. [`NavigatorApp`] renders the session.

mod components;
pub mod effect_executor;
pub mod model;
pub mod reducer;
mod runtime_context;

pub use components::NavigatorApp;
pub use model::*;
pub use reducer::{reduce_navigator, NavigatorAction, NavigatorEffect, ReducerError};
pub use runtime_context::{use_navigator_runtime, NavigatorProvider, NavigatorRuntimeContext};
