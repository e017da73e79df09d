//! Bridge readiness detection.

use bridge_host::{BridgePresence, NavigatorConfig};

/// Resolves once the bridge is known to be present or known to be missing.
///
/// Resolves immediately with [`BridgePresence::Ready`] when the global already exists. Otherwise
/// waits for the configured ready event on `document`; if the detection timeout elapses first the
/// bridge is [`BridgePresence::Missing`] for the rest of the session.
pub async fn detect_bridge(config: &NavigatorConfig) -> BridgePresence {
    crate::bridge::wait_for_bridge(
        &config.global_name,
        &config.ready_event,
        config.detection_timeout_ms,
    )
    .await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn detection_reports_missing_off_browser() {
        assert_eq!(
            block_on(detect_bridge(&NavigatorConfig::default())),
            BridgePresence::Missing
        );
    }
}
