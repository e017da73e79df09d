//! Effect-queue executor turning reducer-emitted effects into bridge calls and result actions.

use bridge_host::BridgeClient;
use leptos::*;

use crate::reducer::{NavigatorAction, NavigatorEffect};
use crate::runtime_context::NavigatorRuntimeContext;

/// Executes one effect against the bridge and returns the action carrying its outcome.
pub async fn run_effect(client: &BridgeClient, effect: NavigatorEffect) -> NavigatorAction {
    match effect {
        NavigatorEffect::Connect => NavigatorAction::Connected(client.connect().await.map(|_| ())),
        NavigatorEffect::SelectFolder => NavigatorAction::FolderSelected(client.select_folder().await),
        NavigatorEffect::LoadListing(path) => {
            let result = client.browse(&path).await.map(|listing| listing.entries);
            NavigatorAction::ListingLoaded { path, result }
        }
        NavigatorEffect::ReadFile(path) => {
            let result = client.read_text(&path).await;
            NavigatorAction::FileLoaded { path, result }
        }
    }
}

/// Installs the executor that drains reducer-emitted effects in order.
pub fn install(runtime: NavigatorRuntimeContext) {
    // Clear the queue before spawning so result dispatches enqueue a fresh batch.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            let client = runtime.client.get_value();
            spawn_local(async move {
                let action = run_effect(&client, effect).await;
                runtime.dispatch_action(action);
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use bridge_host::{
        BridgeError, BridgeOperation, Entry, MemoryEventSink, ScriptedBridgeTransport,
    };
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn client_for(transport: ScriptedBridgeTransport) -> BridgeClient {
        BridgeClient::new(Rc::new(transport), Rc::new(MemoryEventSink::default()))
    }

    #[test]
    fn connect_effect_reports_handshake() {
        let client = client_for(
            ScriptedBridgeTransport::default().respond("connect", json!({"success": true})),
        );

        assert_eq!(
            block_on(run_effect(&client, NavigatorEffect::Connect)),
            NavigatorAction::Connected(Ok(()))
        );
    }

    #[test]
    fn connect_effect_reports_missing_bridge() {
        let client = client_for(ScriptedBridgeTransport::absent());

        assert_eq!(
            block_on(run_effect(&client, NavigatorEffect::Connect)),
            NavigatorAction::Connected(Err(BridgeError::BridgeUnavailable))
        );
    }

    #[test]
    fn select_folder_effect_returns_path() {
        let client = client_for(
            ScriptedBridgeTransport::default()
                .respond("selectFolder", json!({"folderInfo": {"path": "/home/u"}})),
        );

        assert_eq!(
            block_on(run_effect(&client, NavigatorEffect::SelectFolder)),
            NavigatorAction::FolderSelected(Ok("/home/u".to_string()))
        );
    }

    #[test]
    fn listing_effect_carries_requested_path() {
        let client = client_for(ScriptedBridgeTransport::default().respond(
            "processFile:listContents@/r",
            json!({"files": ["a.txt"], "folders": ["src"]}),
        ));

        let action = block_on(run_effect(
            &client,
            NavigatorEffect::LoadListing("/r".to_string()),
        ));

        assert_eq!(
            action,
            NavigatorAction::ListingLoaded {
                path: "/r".to_string(),
                result: Ok(vec![Entry::file("a.txt"), Entry::directory("src")]),
            }
        );
    }

    #[test]
    fn read_effect_reports_exhausted_candidates() {
        let client = client_for(ScriptedBridgeTransport::default());

        let action = block_on(run_effect(
            &client,
            NavigatorEffect::ReadFile("/r/a.txt".to_string()),
        ));

        let NavigatorAction::FileLoaded { path, result } = action else {
            panic!("expected file result");
        };
        assert_eq!(path, "/r/a.txt");
        assert!(matches!(
            result,
            Err(BridgeError::NoSupportedOperation {
                operation: BridgeOperation::ReadFile,
                ..
            })
        ));
    }
}
