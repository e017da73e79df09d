use super::*;

fn unsupported() -> String {
    "The bridge extension is only reachable when compiled for wasm32".to_string()
}

pub fn bridge_present(_global_name: &str) -> bool {
    false
}

pub async fn invoke_method(
    _global_name: &str,
    _method: &str,
    _arg: Option<&Value>,
) -> Result<Value, TransportError> {
    Err(TransportError::Fault(unsupported()))
}

pub async fn wait_for_bridge(
    _global_name: &str,
    _ready_event: &str,
    _timeout_ms: u32,
) -> BridgePresence {
    BridgePresence::Missing
}
