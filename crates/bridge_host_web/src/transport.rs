//! Bridge transport over the extension's page global object.

use bridge_host::{BridgeCall, BridgeFuture, BridgeTransport, TransportError};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Transport calling methods on `window[global_name]`.
pub struct WebBridgeTransport {
    global_name: String,
}

impl WebBridgeTransport {
    /// Builds a transport for the bridge published as `window[global_name]`.
    pub fn new(global_name: impl Into<String>) -> Self {
        Self {
            global_name: global_name.into(),
        }
    }

    /// Returns the global object name.
    pub fn global_name(&self) -> &str {
        &self.global_name
    }
}

impl BridgeTransport for WebBridgeTransport {
    fn is_present(&self) -> bool {
        crate::bridge::bridge_present(&self.global_name)
    }

    fn invoke<'a>(&'a self, call: &'a BridgeCall) -> BridgeFuture<'a, Result<Value, TransportError>> {
        Box::pin(async move {
            let arg = call.argument();
            crate::bridge::invoke_method(&self.global_name, call.method_name(), arg.as_ref()).await
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn web_transport_reports_absent_bridge_off_browser() {
        let transport = WebBridgeTransport::new("Akitaki");
        let transport_obj: &dyn BridgeTransport = &transport;
        let call = BridgeCall::Dispatch {
            operation: "listContents".to_string(),
            path: Some("/".to_string()),
        };

        assert!(!transport_obj.is_present());
        assert!(matches!(
            block_on(transport_obj.invoke(&call)),
            Err(TransportError::Fault(_))
        ));
    }
}
