//! Lights, heating, voice and calendar widgets of the home page.

use std::sync::Arc;

use homehub_app::services::control_service::ControlService;
use homehub_domain::backend::{SwitchDevice, SwitchState};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpBackend;

type Service = Arc<ControlService<HttpBackend>>;

/// On/off buttons for one device, with the last response underneath.
#[component]
pub fn SwitchCard(
    /// Device driven by the buttons.
    device: SwitchDevice,
    /// Card heading.
    #[prop(into)]
    title: String,
) -> impl IntoView {
    let service = expect_context::<Service>();
    let (status, set_status) = signal(String::new());

    let send = move |state: SwitchState| {
        let service = Arc::clone(&service);
        spawn_local(async move {
            set_status.set(service.switch(device, state).await);
        });
    };
    let send_on = send.clone();

    view! {
        <section class="card switch-card">
            <h2>{title}</h2>
            <div class="actions">
                <button
                    id=format!("{device}-on")
                    class="btn primary"
                    on:click=move |_| send_on(SwitchState::On)
                >
                    "On"
                </button>
                <button
                    id=format!("{device}-off")
                    class="btn"
                    on:click=move |_| send(SwitchState::Off)
                >
                    "Off"
                </button>
            </div>
            <pre class="status" id=format!("{device}-status")>{status}</pre>
        </section>
    }
}

/// Free-text voice command form.
#[component]
pub fn VoiceCard() -> impl IntoView {
    let service = expect_context::<Service>();
    let (text, set_text) = signal(String::new());
    let (status, set_status) = signal(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let command = text.get_untracked();
        let service = Arc::clone(&service);
        spawn_local(async move {
            if let Some(reply) = service.voice_command(&command).await {
                set_status.set(reply);
                set_text.set(String::new());
            }
        });
    };

    view! {
        <section class="card voice-card">
            <h2>"Voice"</h2>
            <form on:submit=on_submit>
                <input
                    id="voice-text"
                    type="text"
                    placeholder="Say something\u{2026}"
                    prop:value=text
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                />
                <button type="submit" class="btn primary">"Send"</button>
            </form>
            <pre class="status" id="voice-status">{status}</pre>
        </section>
    }
}

/// The next calendar event, fetched once per mount.
#[component]
pub fn NextEventCard() -> impl IntoView {
    let service = expect_context::<Service>();
    let next = LocalResource::new(move || {
        let service = Arc::clone(&service);
        async move { service.next_event().await }
    });

    view! {
        <section class="card calendar-card">
            <h2>"Next event"</h2>
            <Suspense fallback=move || view! { <p class="muted">"Loading\u{2026}"</p> }>
                <p id="next-event">{move || next.read().as_ref().cloned()}</p>
            </Suspense>
        </section>
    }
}
