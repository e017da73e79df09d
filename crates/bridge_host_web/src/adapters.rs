use std::rc::Rc;

use bridge_host::{
    load_navigator_config, BridgeClient, ConfigError, ConsoleEventSink, NavigatorConfig,
};

use crate::{WebBridgeTransport, WebPrefsStore};

/// Loads the navigator configuration override from `localStorage`.
///
/// # Errors
///
/// Returns an error when storage is unavailable or the saved override does not parse.
pub fn browser_navigator_config() -> Result<NavigatorConfig, ConfigError> {
    load_navigator_config(&WebPrefsStore)
}

/// Builds a bridge client over `window[config.global_name]` logging to the browser console.
pub fn browser_bridge_client(config: &NavigatorConfig) -> BridgeClient {
    BridgeClient::from_config(
        Rc::new(WebBridgeTransport::new(config.global_name.clone())),
        Rc::new(ConsoleEventSink::new(config.log_prefix.clone())),
        config,
    )
}
