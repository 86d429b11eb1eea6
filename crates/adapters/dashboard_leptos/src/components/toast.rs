//! Transient notifications for control actions that have no status line of
//! their own (icon taps).

use leptos::prelude::*;
use leptos::task::spawn_local;

const TOAST_LIFETIME_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "toast toast-info",
            Self::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    id: u32,
    level: ToastLevel,
    text: String,
}

/// Handle for pushing toasts, provided through context by [`ToastContainer`].
#[derive(Clone, Copy)]
pub struct ToastProvider {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u32>,
}

impl ToastProvider {
    /// Show an error toast.
    pub fn push(&self, text: String) {
        self.show(ToastLevel::Error, text);
    }

    pub fn info(&self, text: String) {
        self.show(ToastLevel::Info, text);
    }

    fn show(&self, level: ToastLevel, text: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id.wrapping_add(1));
        self.toasts.update(|list| list.push(Toast { id, level, text }));

        let provider = *self;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            provider.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.toasts.update(|list| list.retain(|toast| toast.id != id));
    }
}

/// Access the toast provider from context.
///
/// Must be called below a [`ToastContainer`].
pub fn use_toasts() -> ToastProvider {
    expect_context::<ToastProvider>()
}

/// Provides [`ToastProvider`] to `children` and renders the active toasts.
#[component]
pub fn ToastContainer(children: Children) -> impl IntoView {
    let provider = ToastProvider {
        toasts: RwSignal::new(Vec::new()),
        next_id: RwSignal::new(0),
    };
    provide_context(provider);

    view! {
        {children()}
        <div class="toast-container" role="status">
            {move || {
                provider
                    .toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast.level.class()>
                                <button
                                    class="toast-dismiss"
                                    aria-label="Dismiss"
                                    on:click=move |_| provider.dismiss(id)
                                >
                                    "\u{00D7}"
                                </button>
                                {toast.text}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
