//! Page-global bridge bindings for the browser transport.
//!
//! Calls are routed to the wasm implementation or to a non-wasm shim so host builds and tests
//! keep a uniform API.

mod interop;

use bridge_host::{BridgePresence, TransportError};
use serde_json::Value;

pub(crate) fn bridge_present(global_name: &str) -> bool {
    interop::bridge_present(global_name)
}

pub(crate) async fn invoke_method(
    global_name: &str,
    method: &str,
    arg: Option<&Value>,
) -> Result<Value, TransportError> {
    interop::invoke_method(global_name, method, arg).await
}

pub(crate) async fn wait_for_bridge(
    global_name: &str,
    ready_event: &str,
    timeout_ms: u32,
) -> BridgePresence {
    interop::wait_for_bridge(global_name, ready_event, timeout_ms).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn bridge_public_api_non_wasm_parity() {
        assert!(!bridge_present("Akitaki"));
        assert!(matches!(
            block_on(invoke_method("Akitaki", "connect", None)),
            Err(TransportError::Fault(_))
        ));
        assert_eq!(
            block_on(wait_for_bridge("Akitaki", "akitaki-bridge-ready", 2000)),
            BridgePresence::Missing
        );
    }
}
