//! Runtime provider and context wiring for the navigator.
//!
//! The provider owns the session signal, the effect queue, and the bridge client; bridge
//! detection starts as soon as it mounts. UI composition stays in [`crate::components`].

use bridge_host::{BridgeClient, BridgePresence, NavigatorConfig};
use leptos::*;

use crate::{
    effect_executor,
    model::NavigatorState,
    reducer::{reduce_navigator, NavigatorAction, NavigatorEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading the navigator session and dispatching [`NavigatorAction`] values.
pub struct NavigatorRuntimeContext {
    /// Bridge client executing effects.
    pub client: StoredValue<BridgeClient>,
    /// Reactive session state signal.
    pub state: RwSignal<NavigatorState>,
    /// Queue of effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<NavigatorEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<NavigatorAction>,
}

impl NavigatorRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: NavigatorAction) {
        self.dispatch.call(action);
    }
}

fn install_bridge_detection(runtime: NavigatorRuntimeContext, config: NavigatorConfig) {
    spawn_local(async move {
        match bridge_host_web::detect_bridge(&config).await {
            BridgePresence::Ready => runtime.dispatch_action(NavigatorAction::BridgeDetected),
            BridgePresence::Missing => runtime.dispatch_action(NavigatorAction::DetectionTimedOut),
            BridgePresence::Detecting => {}
        }
    });
}

#[component]
/// Provides [`NavigatorRuntimeContext`] to descendant components and starts bridge detection.
pub fn NavigatorProvider(
    /// Bridge client assembled by the entry layer.
    client: BridgeClient,
    /// Effective configuration (defaults merged with any saved override).
    config: NavigatorConfig,
    children: Children,
) -> impl IntoView {
    let client = store_value(client);
    let state = create_rw_signal(NavigatorState::new(&config));
    let effects = create_rw_signal(Vec::<NavigatorEffect>::new());
    let log_prefix = config.log_prefix.clone();

    let dispatch = Callback::new(move |action: NavigatorAction| {
        let mut session = state.get_untracked();
        let previous = session.clone();

        match reduce_navigator(&mut session, action) {
            Ok(new_effects) => {
                if session != previous {
                    state.set(session);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("{log_prefix} navigator reducer error: {err}"),
        }
    });

    let runtime = NavigatorRuntimeContext {
        client,
        state,
        effects,
        dispatch,
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    install_bridge_detection(runtime, config);

    children().into_view()
}

/// Returns the current [`NavigatorRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`NavigatorProvider`].
pub fn use_navigator_runtime() -> NavigatorRuntimeContext {
    use_context::<NavigatorRuntimeContext>().expect("NavigatorRuntimeContext not provided")
}
