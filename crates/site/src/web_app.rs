use bridge_host::NavigatorConfig;
use bridge_host_web::{browser_bridge_client, browser_navigator_config};
use leptos::*;
use leptos_meta::*;
use navigator_app::{NavigatorApp, NavigatorProvider};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Bridge Folder Navigator" />
        <Meta name="description" content="Browse local folders through the Akitaki bridge extension." />

        <main class="site-root">
            <NavigatorEntry />
        </main>
    }
}

#[component]
pub fn NavigatorEntry() -> impl IntoView {
    let config = browser_navigator_config().unwrap_or_else(|err| {
        let defaults = NavigatorConfig::default();
        logging::warn!(
            "{} ignoring saved configuration: {err}",
            defaults.log_prefix
        );
        defaults
    });
    let client = browser_bridge_client(&config);

    view! {
        <NavigatorProvider client=client config=config>
            <NavigatorApp />
        </NavigatorProvider>
    }
}
