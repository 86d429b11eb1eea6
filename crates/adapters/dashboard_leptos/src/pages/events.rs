use std::sync::Arc;

use homehub_app::services::control_service::{ControlService, error_text};
use homehub_domain::backend::CalendarEvent;
use homehub_domain::settings::DashboardSettings;
use leptos::prelude::*;

use crate::api::HttpBackend;

/// Upcoming calendar events.
#[component]
pub fn Events() -> impl IntoView {
    let service = expect_context::<Arc<ControlService<HttpBackend>>>();
    let limit = expect_context::<DashboardSettings>().upcoming_limit;

    let events = LocalResource::new(move || {
        let service = Arc::clone(&service);
        async move { service.upcoming_events(limit).await.map_err(|err| error_text(&err)) }
    });

    view! {
        <div>
            <h1>"Events"</h1>
            <Suspense fallback=move || view! { <p>"Loading events\u{2026}"</p> }>
                {move || {
                    events.read().as_ref().map(|result| match result {
                        Ok(list) if list.is_empty() => view! {
                            <p class="muted">"No upcoming events."</p>
                        }.into_any(),
                        Ok(list) => view! { <EventList events=list.clone()/> }.into_any(),
                        Err(err) => view! {
                            <p class="error">{"Failed to load events: "} {err.clone()}</p>
                        }.into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn EventList(events: Vec<CalendarEvent>) -> impl IntoView {
    view! {
        <ul class="event-list">
            {events
                .into_iter()
                .map(|event| {
                    let start = event.start_label().unwrap_or_default();
                    view! {
                        <li>
                            <strong>{event.title().to_string()}</strong>
                            <span class="event-start">{start}</span>
                            {event.location.map(|location| view! {
                                <span class="event-location">{location}</span>
                            })}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
