//! Target routing for bridge interop.

use bridge_host::{BridgePresence, TransportError};
use serde_json::Value;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub fn bridge_present(global_name: &str) -> bool {
    imp::bridge_present(global_name)
}

pub async fn invoke_method(
    global_name: &str,
    method: &str,
    arg: Option<&Value>,
) -> Result<Value, TransportError> {
    imp::invoke_method(global_name, method, arg).await
}

pub async fn wait_for_bridge(
    global_name: &str,
    ready_event: &str,
    timeout_ms: u32,
) -> BridgePresence {
    imp::wait_for_bridge(global_name, ready_event, timeout_ms).await
}
