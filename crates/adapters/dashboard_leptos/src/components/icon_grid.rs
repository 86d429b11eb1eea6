use std::sync::Arc;

use homehub_app::services::control_service::{ControlService, error_text};
use homehub_domain::settings::{IconAction, IconSpec};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::api::HttpBackend;
use crate::components::use_toasts;
use crate::status_sync::{StatusSync, notify_icons_rendered};

/// Grid of status icons.
///
/// Shows the configured icons straight away, then re-renders them with the
/// values resolved by `/status-icons/preview`. Every render is announced
/// through [`notify_icons_rendered`] so the icons are painted as soon as
/// they exist.
#[component]
pub fn IconGrid(icons: Vec<IconSpec>) -> impl IntoView {
    let service = expect_context::<Arc<ControlService<HttpBackend>>>();
    let configured = icons.clone();
    let resolved = LocalResource::new(move || {
        let service = Arc::clone(&service);
        let icons = configured.clone();
        async move { service.resolve_icons(&icons).await }
    });

    Effect::new(move |_| {
        resolved.track();
        notify_icons_rendered();
    });

    view! {
        <div class="icon-grid">
            {move || {
                resolved
                    .read()
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| icons.clone())
                    .into_iter()
                    .map(|spec| view! { <IconButton spec/> })
                    .collect_view()
            }}
        </div>
    }
}

/// One status icon; its `on`/`unknown` classes are owned by the reconciler.
#[component]
fn IconButton(spec: IconSpec) -> impl IntoView {
    let service = expect_context::<Arc<ControlService<HttpBackend>>>();
    let sync = expect_context::<StatusSync>();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let action = spec.action.clone();
    let slot = spec.ipx_index;
    let on_click = move |_| match &action {
        IconAction::None => {}
        IconAction::Navigate { url } => navigate(url.as_str(), NavigateOptions::default()),
        IconAction::IpxToggle => {
            let Some(slot) = slot else {
                toasts.push("This icon is not bound to a relay".to_string());
                return;
            };
            let service = Arc::clone(&service);
            let sync = sync.clone();
            spawn_local(async move {
                match service.toggle_slot(slot).await {
                    Ok(toggle) if toggle.ok => {
                        let state = match toggle.after {
                            Some(true) => "on",
                            Some(false) => "off",
                            None => "toggled",
                        };
                        toasts.info(format!("Relay {}: {state}", slot + 1));
                    }
                    Ok(_) => toasts.push(format!("Relay {} did not toggle", slot + 1)),
                    Err(err) => toasts.push(error_text(&err)),
                }
                sync.request();
            });
        }
    };

    view! {
        <button
            class="icon-btn"
            id=format!("icon-{}", spec.id)
            data-source=spec.source.to_string()
            data-ipx-index=spec.ipx_index.map(|index| index.to_string())
            title=spec.label.clone()
            on:click=on_click
        >
            <span class="icon-glyph">{spec.icon}</span>
            <span class="icon-label">{spec.label}</span>
            <span class="icon-state">{spec.text}</span>
        </button>
    }
}
