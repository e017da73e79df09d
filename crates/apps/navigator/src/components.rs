//! Navigator views: status line, toolbar, breadcrumb, listing, content viewer, and overlays.

use bridge_host::Entry;
use leptos::*;

use crate::{
    model::{ListingView, NavigatorState},
    reducer::NavigatorAction,
    runtime_context::use_navigator_runtime,
};

#[component]
/// Navigator page body. Must be rendered inside [`crate::NavigatorProvider`].
pub fn NavigatorApp() -> impl IntoView {
    let runtime = use_navigator_runtime();
    let state = runtime.state;

    let escape_listener = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && state.with_untracked(|s| s.help_open) {
            runtime.dispatch_action(NavigatorAction::CloseHelp);
        }
    });
    on_cleanup(move || escape_listener.remove());

    view! {
        <div class="app-shell navigator-shell">
            <header class="navigator-header">
                <h1>"Bridge Folder Navigator"</h1>
                <button
                    type="button"
                    class="help-toggle"
                    aria-label="Help"
                    on:click=move |_| runtime.dispatch_action(NavigatorAction::ToggleHelp)
                >
                    "?"
                </button>
            </header>

            <div class=move || state.with(|s| s.status.css_class()) role="status">
                {move || state.with(|s| s.status.text.clone())}
            </div>

            <div class="app-toolbar">
                <button
                    type="button"
                    disabled=move || state.with(|s| !s.can_connect())
                    on:click=move |_| runtime.dispatch_action(NavigatorAction::ConnectRequested)
                >
                    "Connect"
                </button>
                <button
                    type="button"
                    disabled=move || state.with(|s| !s.can_select_folder())
                    on:click=move |_| runtime.dispatch_action(NavigatorAction::SelectFolderRequested)
                >
                    "Select Folder"
                </button>
                <button
                    type="button"
                    disabled=move || state.with(|s| !s.can_go_back())
                    on:click=move |_| runtime.dispatch_action(NavigatorAction::GoBack)
                >
                    "Go Back"
                </button>
            </div>

            <Show when=move || state.with(|s| s.install_guide_open) fallback=|| ()>
                <InstallationGuide />
            </Show>

            <Show when=move || state.with(|s| s.manual_picker_open) fallback=|| ()>
                <ManualPickerPanel />
            </Show>

            <Show when=move || state.with(|s| s.navigation.is_some()) fallback=|| ()>
                <section class="file-browser">
                    <BreadcrumbTrail />
                    <ul class="file-list">
                        <ListingRows />
                    </ul>
                    <FileContent />
                </section>
            </Show>

            <Show when=move || state.with(|s| s.help_open) fallback=|| ()>
                <HelpOverlay />
            </Show>
        </div>
    }
}

#[component]
fn BreadcrumbTrail() -> impl IntoView {
    let runtime = use_navigator_runtime();

    view! {
        <nav class="breadcrumb" aria-label="Current folder">
            {move || {
                runtime
                    .state
                    .with(NavigatorState::breadcrumbs)
                    .into_iter()
                    .enumerate()
                    .map(|(index, crumb)| {
                        let separator = (index > 0).then_some(" / ");
                        let label = crumb.label;
                        let crumb_view = match crumb.target {
                            Some(target) => {
                                let action = if index == 0 {
                                    NavigatorAction::GoHome
                                } else {
                                    NavigatorAction::JumpTo(target)
                                };
                                view! {
                                    <button
                                        type="button"
                                        class="crumb crumb-link"
                                        on:click=move |_| runtime.dispatch_action(action.clone())
                                    >
                                        {label}
                                    </button>
                                }
                                .into_view()
                            }
                            None => view! { <span class="crumb crumb-current">{label}</span> }.into_view(),
                        };
                        view! {
                            <span class="crumb-separator">{separator}</span>
                            {crumb_view}
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}

#[component]
fn ListingRows() -> impl IntoView {
    let runtime = use_navigator_runtime();

    move || match runtime.state.with(|s| s.listing.clone()) {
        ListingView::Loading { .. } => {
            view! { <li class="file-list-status">"Loading..."</li> }.into_view()
        }
        ListingView::Ready { entries, .. } if entries.is_empty() => {
            view! { <li class="file-list-status">"This folder is empty."</li> }.into_view()
        }
        ListingView::Ready { entries, .. } => entries
            .into_iter()
            .map(|entry| view! { <EntryRow entry=entry /> })
            .collect_view(),
        ListingView::Idle | ListingView::Failed { .. } => ().into_view(),
    }
}

#[component]
fn EntryRow(entry: Entry) -> impl IntoView {
    let runtime = use_navigator_runtime();
    let (glyph, class) = if entry.is_directory {
        ("[+]", "file-item folder")
    } else {
        ("[-]", "file-item file")
    };
    let label = entry.name.clone();

    view! {
        <li class=class on:click=move |_| runtime.dispatch_action(NavigatorAction::OpenEntry(entry.clone()))>
            <span class="file-glyph">{glyph}</span>
            <span class="file-name">{label}</span>
        </li>
    }
}

#[component]
fn FileContent() -> impl IntoView {
    let state = use_navigator_runtime().state;

    view! {
        <Show when=move || state.with(|s| s.file.is_some()) fallback=|| ()>
            <div class="file-content">
                <div class="file-content-title">
                    {move || state.with(|s| s.file.as_ref().map(|file| file.path.clone()))}
                </div>
                <pre>{move || state.with(|s| s.file.as_ref().map(|file| file.text.clone()))}</pre>
            </div>
        </Show>
    }
}

#[component]
fn HelpOverlay() -> impl IntoView {
    let runtime = use_navigator_runtime();

    view! {
        <div
            class="help-backdrop"
            on:click=move |_| runtime.dispatch_action(NavigatorAction::CloseHelp)
        >
            <div
                class="help-dialog"
                role="dialog"
                aria-label="Help"
                on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                <button
                    type="button"
                    class="help-close"
                    aria-label="Close help"
                    on:click=move |_| runtime.dispatch_action(NavigatorAction::CloseHelp)
                >
                    "x"
                </button>
                <h2>"Using the navigator"</h2>
                <ol>
                    <li>"Click \"Connect\" once the bridge extension is detected."</li>
                    <li>"Click \"Select Folder\" and choose a folder in the picker."</li>
                    <li>"Click a folder to open it, or a file to view its contents."</li>
                    <li>"Use the breadcrumb or \"Go Back\" to return to a parent folder."</li>
                </ol>
                <p>"Press Escape or click outside this panel to close it."</p>
            </div>
        </div>
    }
}

#[component]
fn InstallationGuide() -> impl IntoView {
    view! {
        <section class="install-guide">
            <h2>"Install the bridge extension"</h2>
            <ol>
                <li>"Install the Akitaki bridge extension for your browser."</li>
                <li>"Allow it to run on this page."</li>
                <li>"Reload this page."</li>
            </ol>
        </section>
    }
}

#[component]
fn ManualPickerPanel() -> impl IntoView {
    let runtime = use_navigator_runtime();

    view! {
        <section class="manual-picker">
            <h2>"Choose a folder manually"</h2>
            <p>
                "The bridge did not report which folder was picked. Open the folder picker from "
                "the bridge extension's own menu, then click \"Select Folder\" again."
            </p>
            <button
                type="button"
                on:click=move |_| runtime.dispatch_action(NavigatorAction::DismissManualPicker)
            >
                "Dismiss"
            </button>
        </section>
    }
}
