use homehub_app::ports::StatusSource;
use homehub_app::services::control_service::error_text;
use homehub_domain::relay::RelayStatus;
use homehub_domain::settings::DashboardSettings;
use leptos::prelude::*;

use crate::api::HttpBackend;

/// Table of every relay reported by the board.
#[component]
pub fn Relays() -> impl IntoView {
    let settings = expect_context::<DashboardSettings>();
    let backend = HttpBackend::new(&settings.api_base);
    let max_relays = settings.max_relays;
    let (reload_trigger, set_reload_trigger) = signal(0);

    let status = LocalResource::new(move || {
        reload_trigger.track();
        let backend = backend.clone();
        async move {
            backend
                .fetch_status(max_relays)
                .await
                .map_err(|err| error_text(&err))
        }
    });

    view! {
        <div>
            <h1>"Relays"</h1>
            <button class="btn" on:click=move |_| set_reload_trigger.update(|v| *v += 1)>
                "Refresh"
            </button>
            <Suspense fallback=move || view! { <p>"Loading relays\u{2026}"</p> }>
                {move || {
                    status.read().as_ref().map(|result| match result {
                        Ok(status) => view! { <RelayTable status=status.clone()/> }.into_any(),
                        Err(err) => view! {
                            <p class="error">{"Failed to load relays: "} {err.clone()}</p>
                        }.into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn RelayTable(status: RelayStatus) -> impl IntoView {
    let rows = status
        .relays
        .into_iter()
        .filter_map(|entry| {
            let slot = entry.slot()?;
            let on = entry.is_on();
            Some(view! {
                <tr>
                    <td>{slot + 1}</td>
                    <td>{entry.name.unwrap_or_default()}</td>
                    <td>
                        <span class=if on { "badge badge-on" } else { "badge badge-off" }>
                            {if on { "ON" } else { "OFF" }}
                        </span>
                    </td>
                </tr>
            })
        })
        .collect_view();

    view! {
        <table class="relay-table">
            <thead>
                <tr>
                    <th>"Relay"</th>
                    <th>"Name"</th>
                    <th>"State"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
