//! Keeps the status icons in sync with the relay board.
//!
//! A reconcile cycle runs once when the dashboard starts, after every render
//! of the icons (see [`notify_icons_rendered`]) and, if configured, on a fixed
//! interval. Cycles are serialized by the reconciler itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gloo_timers::future::TimeoutFuture;
use homehub_app::hooks::{HookId, PostRenderHooks};
use homehub_app::services::status_reconciler::StatusReconciler;
use homehub_domain::settings::DashboardSettings;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use crate::api::HttpBackend;
use crate::dom::DomControlSurface;

thread_local! {
    static RENDER_HOOKS: PostRenderHooks = PostRenderHooks::new();
}

/// Announce that the status icons have just been (re)rendered.
///
/// Exported so a host page that renders its own icons can trigger a
/// reconcile the same way the dashboard's icon grid does.
#[wasm_bindgen]
pub fn notify_icons_rendered() {
    RENDER_HOOKS.with(|hooks| {
        hooks.notify_rendered();
    });
}

/// Background reconciliation handle; cheap to clone.
#[derive(Clone)]
pub struct StatusSync {
    reconciler: Arc<StatusReconciler<HttpBackend>>,
    active: Arc<AtomicBool>,
    poll_interval_secs: u32,
}

impl StatusSync {
    pub fn new(settings: &DashboardSettings, backend: HttpBackend) -> Self {
        Self {
            reconciler: Arc::new(StatusReconciler::new(
                backend,
                settings.max_relays,
                settings.fallback,
            )),
            active: Arc::new(AtomicBool::new(true)),
            poll_interval_secs: settings.poll_interval_secs,
        }
    }

    /// Queue one reconcile cycle over the icons currently in the document.
    pub fn request(&self) {
        if !self.active.load(Ordering::Relaxed) {
            return;
        }
        let reconciler = Arc::clone(&self.reconciler);
        spawn_local(async move {
            run_cycle(&reconciler).await;
        });
    }

    /// Register the post-render hook, run the initial cycle and start
    /// polling. Returns the hook id to hand back to [`stop`](Self::stop).
    pub fn start(&self) -> HookId {
        let sync = self.clone();
        let hook = RENDER_HOOKS.with(|hooks| hooks.register(move || sync.request()));
        self.request();

        if self.poll_interval_secs > 0 {
            let period_ms = self.poll_interval_secs.saturating_mul(1000);
            let reconciler = Arc::clone(&self.reconciler);
            let active = Arc::clone(&self.active);
            spawn_local(async move {
                loop {
                    TimeoutFuture::new(period_ms).await;
                    if !active.load(Ordering::Relaxed) {
                        break;
                    }
                    run_cycle(&reconciler).await;
                }
            });
        }
        hook
    }

    /// Stop polling and drop the post-render hook.
    pub fn stop(&self, hook: HookId) {
        self.active.store(false, Ordering::Relaxed);
        RENDER_HOOKS.with(|hooks| hooks.unregister(hook));
    }
}

async fn run_cycle(reconciler: &StatusReconciler<HttpBackend>) {
    let report = reconciler.reconcile(&DomControlSurface::new()).await;
    if !report.fetched {
        leptos::logging::warn!(
            "relay status unavailable, painted {} icon(s) with {:?} fallback",
            report.painted,
            reconciler.fallback()
        );
    }
}
