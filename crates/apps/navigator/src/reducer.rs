//! Navigator session reducer: actions in, state mutation and bridge effects out.

use bridge_host::{sort_entries, BridgeError, BridgePresence, Entry, NavigationError, NavigationState};
use thiserror::Error;

use crate::model::{
    FileView, ListingView, NavigatorState, StatusLine, CONNECTED_STATUS, CONNECT_FIRST_STATUS,
    DETECTED_STATUS, MISSING_STATUS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inputs to [`reduce_navigator`], from user controls and from completed bridge effects.
pub enum NavigatorAction {
    /// The bridge global appeared (presence check or ready event).
    BridgeDetected,
    /// The detection window elapsed.
    DetectionTimedOut,
    /// The Connect control was clicked.
    ConnectRequested,
    /// The capability handshake finished.
    Connected(Result<(), BridgeError>),
    /// The Select Folder control was clicked.
    SelectFolderRequested,
    /// The folder picker finished.
    FolderSelected(Result<String, BridgeError>),
    /// A listing row was clicked.
    OpenEntry(Entry),
    /// The Go Back control was clicked.
    GoBack,
    /// The Home breadcrumb was clicked.
    GoHome,
    /// An intermediate breadcrumb was clicked.
    JumpTo(String),
    /// A listing request finished.
    ListingLoaded {
        /// Directory the request targeted.
        path: String,
        /// Normalized entries or the failure.
        result: Result<Vec<Entry>, BridgeError>,
    },
    /// A file read finished.
    FileLoaded {
        /// File the request targeted.
        path: String,
        /// Content text or the failure.
        result: Result<String, BridgeError>,
    },
    /// The help control was clicked.
    ToggleHelp,
    /// The help overlay was dismissed (close control, backdrop, or Escape).
    CloseHelp,
    /// The manual-picker instructions were dismissed.
    DismissManualPicker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Bridge work requested by the reducer and executed by [`crate::effect_executor`].
pub enum NavigatorEffect {
    /// Perform the capability handshake.
    Connect,
    /// Open the bridge folder picker.
    SelectFolder,
    /// List the directory at the given path.
    LoadListing(String),
    /// Read the file at the given path.
    ReadFile(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Reducer-level errors for invalid transitions.
pub enum ReducerError {
    /// A navigation action arrived before any folder was selected.
    #[error("no folder selected")]
    NoFolderSelected,
    /// The navigation stack refused the jump.
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Applies a [`NavigatorAction`] to the session and collects resulting bridge effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when the action is invalid for the current session. The state is left
/// untouched in that case.
pub fn reduce_navigator(
    state: &mut NavigatorState,
    action: NavigatorAction,
) -> Result<Vec<NavigatorEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        NavigatorAction::BridgeDetected => {
            if state.presence != BridgePresence::Missing {
                state.presence = BridgePresence::Ready;
                if !state.connected {
                    state.status = StatusLine::neutral(DETECTED_STATUS);
                }
            }
        }
        NavigatorAction::DetectionTimedOut => {
            if state.presence != BridgePresence::Ready {
                state.presence = BridgePresence::Missing;
                state.install_guide_open = true;
                state.status = StatusLine::error(MISSING_STATUS);
            }
        }
        NavigatorAction::ConnectRequested => {
            if state.presence == BridgePresence::Missing {
                state.status = StatusLine::error(BridgeError::BridgeUnavailable.to_string());
            } else {
                effects.push(NavigatorEffect::Connect);
            }
        }
        NavigatorAction::Connected(Ok(())) => {
            state.connected = true;
            state.consecutive_failures = 0;
            state.status = StatusLine::connected(CONNECTED_STATUS);
        }
        NavigatorAction::Connected(Err(err)) => {
            record_failure(state, err.to_string());
        }
        NavigatorAction::SelectFolderRequested => {
            if state.connected {
                state.manual_picker_open = false;
                effects.push(NavigatorEffect::SelectFolder);
            } else {
                state.status = StatusLine::error(CONNECT_FIRST_STATUS);
            }
        }
        NavigatorAction::FolderSelected(Ok(path)) => {
            state.consecutive_failures = 0;
            state.manual_picker_open = false;
            state.status = state.info_status(format!("Selected folder: {path}"));
            state.navigation = Some(NavigationState::new(path.clone()));
            load_listing(state, path, &mut effects);
        }
        NavigatorAction::FolderSelected(Err(err)) => {
            if err.needs_manual_picker() {
                state.manual_picker_open = true;
            }
            record_failure(state, format!("Folder selection error: {err}"));
        }
        NavigatorAction::OpenEntry(entry) => {
            let navigation = state
                .navigation
                .as_mut()
                .ok_or(ReducerError::NoFolderSelected)?;
            if entry.is_directory {
                let path = navigation.descend(&entry.name).to_string();
                load_listing(state, path, &mut effects);
            } else {
                let path = navigation.child_path(&entry.name);
                state.pending_read = Some(path.clone());
                effects.push(NavigatorEffect::ReadFile(path));
            }
        }
        NavigatorAction::GoBack => {
            let navigation = state
                .navigation
                .as_mut()
                .ok_or(ReducerError::NoFolderSelected)?;
            if navigation.ascend() {
                let path = navigation.current_path().to_string();
                load_listing(state, path, &mut effects);
            }
        }
        NavigatorAction::GoHome => {
            let navigation = state
                .navigation
                .as_mut()
                .ok_or(ReducerError::NoFolderSelected)?;
            navigation.jump_home();
            let path = navigation.current_path().to_string();
            load_listing(state, path, &mut effects);
        }
        NavigatorAction::JumpTo(target) => {
            let policy = state.jump_policy;
            let navigation = state
                .navigation
                .as_mut()
                .ok_or(ReducerError::NoFolderSelected)?;
            navigation.jump_to(&target, policy)?;
            let path = navigation.current_path().to_string();
            load_listing(state, path, &mut effects);
        }
        NavigatorAction::ListingLoaded { path, result } => {
            if state.current_path() != Some(path.as_str()) {
                return Ok(effects);
            }
            match result {
                Ok(mut entries) => {
                    sort_entries(&mut entries);
                    state.consecutive_failures = 0;
                    state.listing = ListingView::Ready { path, entries };
                }
                Err(err) => {
                    state.listing = ListingView::Failed { path };
                    record_failure(state, format!("Error loading folder contents: {err}"));
                }
            }
        }
        NavigatorAction::FileLoaded { path, result } => {
            if state.pending_read.as_deref() != Some(path.as_str()) {
                return Ok(effects);
            }
            state.pending_read = None;
            match result {
                Ok(text) => {
                    state.consecutive_failures = 0;
                    state.file = Some(FileView { path, text });
                }
                Err(err) => {
                    record_failure(state, format!("Error reading file: {err}"));
                }
            }
        }
        NavigatorAction::ToggleHelp => {
            state.help_open = !state.help_open;
        }
        NavigatorAction::CloseHelp => {
            state.help_open = false;
        }
        NavigatorAction::DismissManualPicker => {
            state.manual_picker_open = false;
        }
    }

    Ok(effects)
}

fn load_listing(state: &mut NavigatorState, path: String, effects: &mut Vec<NavigatorEffect>) {
    state.file = None;
    state.pending_read = None;
    state.listing = ListingView::Loading { path: path.clone() };
    effects.push(NavigatorEffect::LoadListing(path));
}

fn record_failure(state: &mut NavigatorState, message: String) {
    state.consecutive_failures = state.consecutive_failures.saturating_add(1);
    if state.connected
        && state
            .connection_policy
            .should_demote(state.consecutive_failures)
    {
        state.connected = false;
        state.status = StatusLine::error(format!("{message} Reconnect to continue."));
    } else {
        state.status = StatusLine::error(message);
    }
}

#[cfg(test)]
mod tests {
    use bridge_host::{BridgeOperation, ConnectionPolicy, JumpPolicy, NavigatorConfig};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::StatusTone;

    fn reduce(state: &mut NavigatorState, action: NavigatorAction) -> Vec<NavigatorEffect> {
        reduce_navigator(state, action).expect("reduce")
    }

    fn connected_state() -> NavigatorState {
        let mut state = NavigatorState::default();
        reduce(&mut state, NavigatorAction::BridgeDetected);
        reduce(&mut state, NavigatorAction::Connected(Ok(())));
        state
    }

    fn browsing(root: &str) -> NavigatorState {
        let mut state = connected_state();
        reduce(&mut state, NavigatorAction::FolderSelected(Ok(root.to_string())));
        state
    }

    fn stack(state: &NavigatorState) -> Vec<String> {
        state
            .navigation
            .as_ref()
            .map(|navigation| navigation.stack().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn detection_readies_connect_control() {
        let mut state = NavigatorState::default();

        let effects = reduce(&mut state, NavigatorAction::BridgeDetected);

        assert!(effects.is_empty());
        assert!(state.can_connect());
        assert_eq!(state.status, StatusLine::neutral(DETECTED_STATUS));
    }

    #[test]
    fn detection_timeout_shows_install_guide() {
        let mut state = NavigatorState::default();

        reduce(&mut state, NavigatorAction::DetectionTimedOut);

        assert_eq!(state.presence, BridgePresence::Missing);
        assert!(state.install_guide_open);
        assert_eq!(state.status, StatusLine::error(MISSING_STATUS));
    }

    #[test]
    fn detection_timeout_after_ready_is_ignored() {
        let mut state = NavigatorState::default();
        reduce(&mut state, NavigatorAction::BridgeDetected);

        reduce(&mut state, NavigatorAction::DetectionTimedOut);

        assert_eq!(state.presence, BridgePresence::Ready);
        assert!(!state.install_guide_open);
    }

    #[test]
    fn missing_bridge_stays_missing() {
        let mut state = NavigatorState::default();
        reduce(&mut state, NavigatorAction::DetectionTimedOut);

        reduce(&mut state, NavigatorAction::BridgeDetected);
        let effects = reduce(&mut state, NavigatorAction::ConnectRequested);

        assert!(effects.is_empty());
        assert_eq!(state.presence, BridgePresence::Missing);
        assert_eq!(
            state.status,
            StatusLine::error(BridgeError::BridgeUnavailable.to_string())
        );
    }

    #[test]
    fn connect_request_emits_handshake_effect() {
        let mut state = NavigatorState::default();
        reduce(&mut state, NavigatorAction::BridgeDetected);

        let effects = reduce(&mut state, NavigatorAction::ConnectRequested);

        assert_eq!(effects, vec![NavigatorEffect::Connect]);
    }

    #[test]
    fn successful_handshake_connects() {
        let state = connected_state();

        assert!(state.connected);
        assert!(state.can_select_folder());
        assert_eq!(state.status, StatusLine::connected(CONNECTED_STATUS));
    }

    #[test]
    fn rejected_handshake_keeps_session_disconnected() {
        let mut state = NavigatorState::default();
        reduce(&mut state, NavigatorAction::BridgeDetected);

        reduce(
            &mut state,
            NavigatorAction::Connected(Err(BridgeError::HandshakeRejected(
                "denied".to_string(),
            ))),
        );

        assert!(!state.connected);
        assert_eq!(state.status, StatusLine::error("Connection error: denied"));
    }

    #[test]
    fn select_folder_requires_connection() {
        let mut state = NavigatorState::default();

        let effects = reduce(&mut state, NavigatorAction::SelectFolderRequested);

        assert!(effects.is_empty());
        assert_eq!(state.status, StatusLine::error(CONNECT_FIRST_STATUS));
    }

    #[test]
    fn selected_folder_becomes_root_and_loads_listing() {
        let mut state = connected_state();
        let effects = reduce(&mut state, NavigatorAction::SelectFolderRequested);
        assert_eq!(effects, vec![NavigatorEffect::SelectFolder]);

        let effects = reduce(
            &mut state,
            NavigatorAction::FolderSelected(Ok("/home/u/docs".to_string())),
        );

        assert_eq!(
            effects,
            vec![NavigatorEffect::LoadListing("/home/u/docs".to_string())]
        );
        assert_eq!(stack(&state), vec!["/home/u/docs".to_string()]);
        assert_eq!(
            state.listing,
            ListingView::Loading {
                path: "/home/u/docs".to_string()
            }
        );
        assert_eq!(
            state.status,
            StatusLine::connected("Selected folder: /home/u/docs")
        );
    }

    #[test]
    fn missing_folder_path_shows_manual_picker() {
        let mut state = connected_state();

        reduce(
            &mut state,
            NavigatorAction::FolderSelected(Err(BridgeError::NoPathInResponse)),
        );

        assert!(state.manual_picker_open);
        assert_eq!(state.status.tone, StatusTone::Error);
        assert!(state.navigation.is_none());

        reduce(&mut state, NavigatorAction::DismissManualPicker);
        assert!(!state.manual_picker_open);
    }

    #[test]
    fn exhausted_folder_selection_reports_attempts() {
        let mut state = connected_state();
        let err = BridgeError::NoSupportedOperation {
            operation: BridgeOperation::SelectFolder,
            attempted: vec!["selectFolder".to_string()],
            last_failure: Some("cancelled".to_string()),
        };

        reduce(&mut state, NavigatorAction::FolderSelected(Err(err.clone())));

        assert!(!state.manual_picker_open);
        assert_eq!(
            state.status,
            StatusLine::error(format!("Folder selection error: {err}"))
        );
    }

    #[test]
    fn opening_directory_descends_and_loads() {
        let mut state = browsing("/r");

        let effects = reduce(
            &mut state,
            NavigatorAction::OpenEntry(Entry::directory("a")),
        );

        assert_eq!(effects, vec![NavigatorEffect::LoadListing("/r/a".to_string())]);
        assert_eq!(stack(&state), vec!["/r".to_string(), "/r/a".to_string()]);
    }

    #[test]
    fn opening_file_reads_without_navigating() {
        let mut state = browsing("/r");

        let effects = reduce(
            &mut state,
            NavigatorAction::OpenEntry(Entry::file("notes.txt")),
        );

        assert_eq!(
            effects,
            vec![NavigatorEffect::ReadFile("/r/notes.txt".to_string())]
        );
        assert_eq!(stack(&state), vec!["/r".to_string()]);
    }

    #[test]
    fn go_back_at_root_does_nothing() {
        let mut state = browsing("/r");
        reduce(
            &mut state,
            NavigatorAction::ListingLoaded {
                path: "/r".to_string(),
                result: Ok(Vec::new()),
            },
        );
        let before = state.clone();

        let effects = reduce(&mut state, NavigatorAction::GoBack);

        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn go_back_pops_and_reloads_parent() {
        let mut state = browsing("/r");
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::directory("a")));

        let effects = reduce(&mut state, NavigatorAction::GoBack);

        assert_eq!(effects, vec![NavigatorEffect::LoadListing("/r".to_string())]);
        assert_eq!(stack(&state), vec!["/r".to_string()]);
    }

    #[test]
    fn go_home_resets_to_root() {
        let mut state = browsing("/r");
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::directory("a")));
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::directory("b")));

        let effects = reduce(&mut state, NavigatorAction::GoHome);

        assert_eq!(effects, vec![NavigatorEffect::LoadListing("/r".to_string())]);
        assert_eq!(stack(&state), vec!["/r".to_string()]);
    }

    #[test]
    fn jump_truncates_after_first_occurrence() {
        let mut state = browsing("/r");
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::directory("a")));
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::directory("b")));

        let effects = reduce(&mut state, NavigatorAction::JumpTo("/r/a".to_string()));

        assert_eq!(effects, vec![NavigatorEffect::LoadListing("/r/a".to_string())]);
        assert_eq!(stack(&state), vec!["/r".to_string(), "/r/a".to_string()]);
    }

    #[test]
    fn jump_to_unknown_path_resets_by_default() {
        let mut state = browsing("/r");
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::directory("a")));

        let effects = reduce(&mut state, NavigatorAction::JumpTo("/elsewhere".to_string()));

        assert_eq!(effects, vec![NavigatorEffect::LoadListing("/r".to_string())]);
        assert_eq!(stack(&state), vec!["/r".to_string()]);
    }

    #[test]
    fn jump_to_unknown_path_can_be_rejected() {
        let config = NavigatorConfig {
            jump_policy: JumpPolicy::Reject,
            ..NavigatorConfig::default()
        };
        let mut state = NavigatorState::new(&config);
        reduce(&mut state, NavigatorAction::BridgeDetected);
        reduce(&mut state, NavigatorAction::Connected(Ok(())));
        reduce(&mut state, NavigatorAction::FolderSelected(Ok("/r".to_string())));
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::directory("a")));
        let before = state.clone();

        let err = reduce_navigator(&mut state, NavigatorAction::JumpTo("/x".to_string()))
            .expect_err("jump should be rejected");

        assert_eq!(
            err,
            ReducerError::Navigation(NavigationError::PathNotInHistory("/x".to_string()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn navigation_before_folder_selection_is_an_error() {
        let mut state = connected_state();
        let before = state.clone();

        for action in [
            NavigatorAction::GoBack,
            NavigatorAction::GoHome,
            NavigatorAction::JumpTo("/r".to_string()),
            NavigatorAction::OpenEntry(Entry::directory("a")),
        ] {
            assert_eq!(
                reduce_navigator(&mut state, action),
                Err(ReducerError::NoFolderSelected)
            );
        }
        assert_eq!(state, before);
    }

    #[test]
    fn listing_is_sorted_directories_first() {
        let mut state = browsing("/r");

        reduce(
            &mut state,
            NavigatorAction::ListingLoaded {
                path: "/r".to_string(),
                result: Ok(vec![
                    Entry::file("b.txt"),
                    Entry::directory("Zeta"),
                    Entry::file("A.txt"),
                    Entry::directory("alpha"),
                ]),
            },
        );

        assert_eq!(
            state.listing.entries(),
            Some(
                &[
                    Entry::directory("alpha"),
                    Entry::directory("Zeta"),
                    Entry::file("A.txt"),
                    Entry::file("b.txt"),
                ][..]
            )
        );
    }

    #[test]
    fn empty_listing_is_ready_not_failed() {
        let mut state = browsing("/r");

        reduce(
            &mut state,
            NavigatorAction::ListingLoaded {
                path: "/r".to_string(),
                result: Ok(Vec::new()),
            },
        );

        assert_eq!(state.listing.entries(), Some(&[][..]));
        assert_eq!(state.status.tone, StatusTone::Connected);
    }

    #[test]
    fn stale_listing_is_discarded() {
        let mut state = browsing("/r");
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::directory("a")));
        let before = state.clone();

        let effects = reduce(
            &mut state,
            NavigatorAction::ListingLoaded {
                path: "/r".to_string(),
                result: Ok(vec![Entry::file("old.txt")]),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn listing_failure_surfaces_error() {
        let mut state = browsing("/r");

        reduce(
            &mut state,
            NavigatorAction::ListingLoaded {
                path: "/r".to_string(),
                result: Err(BridgeError::UnrecognizedListingShape),
            },
        );

        assert_eq!(
            state.listing,
            ListingView::Failed {
                path: "/r".to_string()
            }
        );
        assert_eq!(
            state.status,
            StatusLine::error("Error loading folder contents: Invalid folder contents returned")
        );
        assert!(state.connected);
    }

    fn read(state: &mut NavigatorState, name: &str, result: Result<String, BridgeError>) {
        let effects = reduce(state, NavigatorAction::OpenEntry(Entry::file(name)));
        let [NavigatorEffect::ReadFile(path)] = effects.as_slice() else {
            panic!("expected a single read effect, got {effects:?}");
        };
        reduce(
            state,
            NavigatorAction::FileLoaded {
                path: path.clone(),
                result,
            },
        );
    }

    #[test]
    fn file_content_is_shown_and_hidden_by_navigation() {
        let mut state = browsing("/r");

        read(&mut state, "a.txt", Ok("hello".to_string()));
        assert_eq!(
            state.file,
            Some(FileView {
                path: "/r/a.txt".to_string(),
                text: "hello".to_string(),
            })
        );
        assert_eq!(state.pending_read, None);

        reduce(&mut state, NavigatorAction::GoHome);
        assert_eq!(state.file, None);
    }

    #[test]
    fn file_result_after_leaving_its_folder_is_discarded() {
        let mut state = browsing("/r");
        reduce(
            &mut state,
            NavigatorAction::OpenEntry(Entry::file("old.txt")),
        );
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::directory("a")));
        let before = state.clone();

        for result in [Ok("stale".to_string()), Err(BridgeError::UnreadableContent)] {
            let effects = reduce(
                &mut state,
                NavigatorAction::FileLoaded {
                    path: "/r/old.txt".to_string(),
                    result,
                },
            );
            assert!(effects.is_empty());
        }

        assert_eq!(state, before);
        assert_eq!(state.file, None);
    }

    #[test]
    fn only_the_latest_file_read_is_shown() {
        let mut state = browsing("/r");
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::file("first.txt")));
        reduce(&mut state, NavigatorAction::OpenEntry(Entry::file("second.txt")));

        reduce(
            &mut state,
            NavigatorAction::FileLoaded {
                path: "/r/first.txt".to_string(),
                result: Ok("first".to_string()),
            },
        );
        assert_eq!(state.file, None);

        reduce(
            &mut state,
            NavigatorAction::FileLoaded {
                path: "/r/second.txt".to_string(),
                result: Ok("second".to_string()),
            },
        );
        assert_eq!(
            state.file.map(|file| file.text),
            Some("second".to_string())
        );
    }

    #[test]
    fn file_failure_surfaces_error() {
        let mut state = browsing("/r");

        read(&mut state, "a.bin", Err(BridgeError::UnreadableContent));

        assert_eq!(state.file, None);
        assert_eq!(
            state.status,
            StatusLine::error("Error reading file: Unreadable file content returned")
        );
    }

    #[test]
    fn sticky_connection_survives_repeated_failures() {
        let mut state = browsing("/r");

        for _ in 0..5 {
            read(&mut state, "a", Err(BridgeError::UnreadableContent));
        }

        assert!(state.connected);
        assert_eq!(state.consecutive_failures, 5);
    }

    #[test]
    fn demote_policy_disconnects_after_consecutive_failures() {
        let mut state = browsing("/r");
        state.connection_policy = ConnectionPolicy::DemoteAfter { failures: 2 };

        read(&mut state, "a", Err(BridgeError::UnreadableContent));
        assert!(state.connected);
        read(&mut state, "b", Ok("ok".to_string()));
        read(&mut state, "a", Err(BridgeError::UnreadableContent));
        assert!(state.connected);
        read(&mut state, "a", Err(BridgeError::UnreadableContent));

        assert!(!state.connected);
        assert!(!state.can_select_folder());
        assert_eq!(state.status.tone, StatusTone::Error);
    }

    #[test]
    fn help_overlay_toggles_and_closes() {
        let mut state = NavigatorState::default();

        reduce(&mut state, NavigatorAction::ToggleHelp);
        assert!(state.help_open);
        reduce(&mut state, NavigatorAction::ToggleHelp);
        assert!(!state.help_open);
        reduce(&mut state, NavigatorAction::ToggleHelp);
        reduce(&mut state, NavigatorAction::CloseHelp);
        assert!(!state.help_open);
    }
}
