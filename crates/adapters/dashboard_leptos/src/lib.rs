use std::sync::Arc;

use homehub_app::services::control_service::ControlService;
use homehub_domain::settings::{DashboardSettings, NavStrategy};
use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

pub mod api;
mod components;
pub mod dom;
mod pages;
pub mod status_sync;

use api::HttpBackend;
use components::{Loading, NavPanel, ToastContainer, attach_to_existing};
use pages::{Events, Home, NotFound, Relays};
use status_sync::StatusSync;

/// Root application component.
///
/// Loads the settings served by the host, then renders the dashboard.
#[component]
pub fn App() -> impl IntoView {
    let settings = LocalResource::new(api::fetch_settings_or_default);

    view! {
        <ToastContainer>
            <Router>
                <Suspense fallback=|| view! { <Loading message="Loading dashboard\u{2026}"/> }>
                    {move || {
                        settings
                            .read()
                            .as_ref()
                            .map(|settings| view! { <Dashboard settings=settings.clone()/> })
                    }}
                </Suspense>
            </Router>
        </ToastContainer>
    }
}

/// Dashboard shell: navigation, routes and the background status sync.
#[component]
fn Dashboard(settings: DashboardSettings) -> impl IntoView {
    let backend = HttpBackend::new(&settings.api_base);

    let sync = StatusSync::new(&settings, backend.clone());
    let hook = sync.start();
    provide_context(sync.clone());
    on_cleanup(move || sync.stop(hook));

    provide_context(Arc::new(ControlService::new(backend)));
    provide_context(settings.clone());

    let nav = match settings.nav.strategy {
        NavStrategy::CreateOwnDom => view! { <NavPanel links=settings.links/> }.into_any(),
        NavStrategy::AttachToExisting => {
            // Owned by this component; listeners go away when it unmounts.
            let _attached = StoredValue::new_local(attach_to_existing(&settings.nav));
            ().into_any()
        }
    };

    view! {
        {nav}
        <main>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=path!("/") view=Home/>
                <Route path=path!("events") view=Events/>
                <Route path=path!("ipx") view=Relays/>
            </Routes>
        </main>
    }
}
