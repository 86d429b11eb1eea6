//! Status reconciler: fetch relay status and paint every rendered control.

use homehub_domain::control::{ControlPaint, FallbackPolicy};
use homehub_domain::relay::{RELAY_CAPACITY, RelayStatusSnapshot};
use tokio::sync::Mutex;

use crate::ports::{ControlSurface, StatusSource};

/// Outcome of one [`StatusReconciler::reconcile`] cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    /// Whether the status fetch succeeded.
    pub fetched: bool,
    /// Number of controls painted.
    pub painted: usize,
    /// Number of controls painted on.
    pub on: usize,
    /// Number of controls painted unknown.
    pub unknown: usize,
}

/// Paints relay-driven and text-driven controls from the latest status.
///
/// Cycles never overlap: a second [`reconcile`](Self::reconcile) waits until
/// the first one has finished painting before it fetches.
pub struct StatusReconciler<S> {
    source: S,
    max_relays: usize,
    fallback: FallbackPolicy,
    /// Last successful snapshot; the lock also serializes cycles.
    last_known: Mutex<Option<RelayStatusSnapshot>>,
}

impl<S: StatusSource> StatusReconciler<S> {
    /// Create a reconciler querying `source` for `max_relays` relays.
    ///
    /// `max_relays` is clamped to `1..=RELAY_CAPACITY`.
    pub fn new(source: S, max_relays: usize, fallback: FallbackPolicy) -> Self {
        Self {
            source,
            max_relays: max_relays.clamp(1, RELAY_CAPACITY),
            fallback,
            last_known: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Fetch a fresh snapshot.
    ///
    /// Any failure (network, non-2xx, malformed body) yields `None`; it is
    /// logged and never returned as an error.
    pub async fn fetch_snapshot(&self) -> Option<RelayStatusSnapshot> {
        match self.source.fetch_status(self.max_relays).await {
            Ok(status) => {
                let (snapshot, skipped) = RelayStatusSnapshot::from_status(&status);
                if skipped > 0 {
                    tracing::debug!(skipped, "ignored relay entries outside 1..=32");
                }
                tracing::trace!(on = snapshot.on_count(), "relay status fetched");
                Some(snapshot)
            }
            Err(err) => {
                tracing::warn!(error = %err, "relay status fetch failed");
                None
            }
        }
    }

    /// Run one fetch-then-paint cycle over every control of `surface`.
    ///
    /// Controls are read after the fetch resolves so icons rendered while the
    /// request was in flight are painted too.
    #[tracing::instrument(skip_all, fields(fallback = ?self.fallback))]
    pub async fn reconcile<C: ControlSurface>(&self, surface: &C) -> ReconcileReport {
        let mut last_known = self.last_known.lock().await;

        let fetched = self.fetch_snapshot().await;
        if let Some(snapshot) = fetched {
            *last_known = Some(snapshot);
        }
        let effective = match (fetched, self.fallback) {
            (Some(snapshot), _) => Some(snapshot),
            (None, FallbackPolicy::LastKnown) => *last_known,
            (None, FallbackPolicy::Off | FallbackPolicy::Unknown) => None,
        };

        let mut report = ReconcileReport {
            fetched: fetched.is_some(),
            ..ReconcileReport::default()
        };
        for (position, control) in surface.controls().iter().enumerate() {
            let paint = control.paint(effective.as_ref(), self.fallback);
            surface.paint(position, paint);
            report.painted += 1;
            match paint {
                ControlPaint::On => report.on += 1,
                ControlPaint::Unknown => report.unknown += 1,
                ControlPaint::Off => {}
            }
        }
        tracing::debug!(
            fetched = report.fetched,
            painted = report.painted,
            on = report.on,
            "reconciled controls"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homehub_domain::control::ControlButton;
    use homehub_domain::error::{BackendError, HomeHubError};
    use homehub_domain::relay::RelayStatus;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;
    use tokio::sync::Notify;

    /// Replays queued responses; an empty queue behaves like a network error.
    #[derive(Default)]
    struct ScriptedSource {
        responses: RefCell<VecDeque<Result<RelayStatus, HomeHubError>>>,
        calls: Cell<usize>,
        last_max_relays: Cell<usize>,
    }

    impl ScriptedSource {
        fn push_ok(&self, value: serde_json::Value) {
            let status = serde_json::from_value(value).unwrap();
            self.responses.borrow_mut().push_back(Ok(status));
        }

        fn push_err(&self) {
            self.responses
                .borrow_mut()
                .push_back(Err(BackendError::new("network error").into()));
        }
    }

    impl StatusSource for ScriptedSource {
        async fn fetch_status(&self, max_relays: usize) -> Result<RelayStatus, HomeHubError> {
            self.calls.set(self.calls.get() + 1);
            self.last_max_relays.set(max_relays);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::new("network error").into()))
        }
    }

    #[derive(Default)]
    struct FakeSurface {
        controls: Vec<ControlButton>,
        painted: RefCell<Vec<(usize, ControlPaint)>>,
    }

    impl FakeSurface {
        fn with(controls: Vec<ControlButton>) -> Self {
            Self {
                controls,
                painted: RefCell::default(),
            }
        }

        fn paint_of(&self, position: usize) -> Option<ControlPaint> {
            self.painted
                .borrow()
                .iter()
                .rev()
                .find(|(p, _)| *p == position)
                .map(|(_, paint)| *paint)
        }
    }

    impl ControlSurface for FakeSurface {
        fn controls(&self) -> Vec<ControlButton> {
            self.controls.clone()
        }

        fn paint(&self, position: usize, paint: ControlPaint) {
            self.painted.borrow_mut().push((position, paint));
        }
    }

    #[tokio::test]
    async fn should_paint_ipx_off_and_text_on_when_fetch_fails() {
        let source = ScriptedSource::default();
        source.push_err();
        let reconciler = StatusReconciler::new(source, 32, FallbackPolicy::Off);
        let surface = FakeSurface::with(vec![
            ControlButton::from_attributes("ipx", Some("2"), ""),
            ControlButton::from_attributes("other", None, "ON"),
        ]);

        let report = reconciler.reconcile(&surface).await;

        assert!(!report.fetched);
        assert_eq!(surface.paint_of(0), Some(ControlPaint::Off));
        assert_eq!(surface.paint_of(1), Some(ControlPaint::On));
        assert_eq!(report.painted, 2);
        assert_eq!(report.on, 1);
    }

    #[tokio::test]
    async fn should_ignore_out_of_range_relay_and_paint_first_slot() {
        let source = ScriptedSource::default();
        source.push_ok(json!({"relays": [{"relay": 1, "on": true}, {"relay": 33, "on": true}]}));
        let reconciler = StatusReconciler::new(source, 32, FallbackPolicy::Off);
        let surface = FakeSurface::with(vec![
            ControlButton::from_attributes("ipx", Some("0"), ""),
            ControlButton::from_attributes("ipx", Some("31"), ""),
        ]);

        let report = reconciler.reconcile(&surface).await;

        assert!(report.fetched);
        assert_eq!(surface.paint_of(0), Some(ControlPaint::On));
        assert_eq!(surface.paint_of(1), Some(ControlPaint::Off));
    }

    #[tokio::test]
    async fn should_fetch_exactly_once_per_cycle() {
        let source = Rc::new(ScriptedSource::default());
        source.push_ok(json!({"relays": []}));
        source.push_ok(json!({"relays": []}));
        let reconciler = StatusReconciler::new(Rc::clone(&source), 32, FallbackPolicy::Off);
        let surface = FakeSurface::with(vec![
            ControlButton::from_attributes("ipx", Some("0"), ""),
            ControlButton::from_attributes("ipx", Some("1"), ""),
            ControlButton::from_attributes("text", None, "yes"),
        ]);

        reconciler.reconcile(&surface).await;
        reconciler.reconcile(&surface).await;

        assert_eq!(source.calls.get(), 2);
    }

    #[tokio::test]
    async fn should_request_bounded_relay_count() {
        let source = Rc::new(ScriptedSource::default());
        let reconciler = StatusReconciler::new(Rc::clone(&source), 100, FallbackPolicy::Off);

        assert!(reconciler.fetch_snapshot().await.is_none());
        assert_eq!(source.last_max_relays.get(), 32);
    }

    #[tokio::test]
    async fn should_keep_last_known_state_under_last_known_policy() {
        let source = ScriptedSource::default();
        source.push_ok(json!({"relays": [{"relay": 3, "on": true}]}));
        source.push_err();
        let reconciler = StatusReconciler::new(source, 32, FallbackPolicy::LastKnown);
        let surface = FakeSurface::with(vec![ControlButton::from_attributes("ipx", Some("2"), "")]);

        reconciler.reconcile(&surface).await;
        let report = reconciler.reconcile(&surface).await;

        assert!(!report.fetched);
        assert_eq!(surface.paint_of(0), Some(ControlPaint::On));
    }

    #[tokio::test]
    async fn should_paint_off_under_last_known_policy_without_history() {
        let source = ScriptedSource::default();
        source.push_err();
        let reconciler = StatusReconciler::new(source, 32, FallbackPolicy::LastKnown);
        let surface = FakeSurface::with(vec![ControlButton::from_attributes("ipx", Some("2"), "")]);

        reconciler.reconcile(&surface).await;

        assert_eq!(surface.paint_of(0), Some(ControlPaint::Off));
    }

    #[tokio::test]
    async fn should_not_reuse_stale_state_under_off_policy() {
        let source = ScriptedSource::default();
        source.push_ok(json!({"relays": [{"relay": 3, "on": true}]}));
        source.push_err();
        let reconciler = StatusReconciler::new(source, 32, FallbackPolicy::Off);
        let surface = FakeSurface::with(vec![ControlButton::from_attributes("ipx", Some("2"), "")]);

        reconciler.reconcile(&surface).await;
        assert_eq!(surface.paint_of(0), Some(ControlPaint::On));
        reconciler.reconcile(&surface).await;
        assert_eq!(surface.paint_of(0), Some(ControlPaint::Off));
    }

    #[tokio::test]
    async fn should_mark_ipx_controls_unknown_under_unknown_policy() {
        let source = ScriptedSource::default();
        source.push_err();
        let reconciler = StatusReconciler::new(source, 32, FallbackPolicy::Unknown);
        let surface = FakeSurface::with(vec![
            ControlButton::from_attributes("ipx", Some("0"), ""),
            ControlButton::from_attributes("other", None, "off"),
        ]);

        let report = reconciler.reconcile(&surface).await;

        assert_eq!(surface.paint_of(0), Some(ControlPaint::Unknown));
        assert_eq!(surface.paint_of(1), Some(ControlPaint::Off));
        assert_eq!(report.unknown, 1);
    }

    type EventLog = Rc<RefCell<Vec<&'static str>>>;

    /// Holds its first fetch open until `gate` is notified.
    struct GatedSource {
        log: EventLog,
        gate: Notify,
        calls: Cell<usize>,
    }

    impl StatusSource for GatedSource {
        async fn fetch_status(&self, _max_relays: usize) -> Result<RelayStatus, HomeHubError> {
            self.calls.set(self.calls.get() + 1);
            self.log.borrow_mut().push("fetch");
            if self.calls.get() == 1 {
                self.gate.notified().await;
            }
            Ok(serde_json::from_value(json!({"relays": [{"relay": 1, "on": true}]})).unwrap())
        }
    }

    struct LoggingSurface {
        log: EventLog,
    }

    impl ControlSurface for LoggingSurface {
        fn controls(&self) -> Vec<ControlButton> {
            vec![ControlButton::from_attributes("ipx", Some("0"), "")]
        }

        fn paint(&self, _position: usize, _paint: ControlPaint) {
            self.log.borrow_mut().push("paint");
        }
    }

    #[tokio::test]
    async fn should_not_start_second_fetch_before_first_cycle_paints() {
        let log = EventLog::default();
        let reconciler = StatusReconciler::new(
            GatedSource {
                log: Rc::clone(&log),
                gate: Notify::new(),
                calls: Cell::new(0),
            },
            32,
            FallbackPolicy::Off,
        );
        let surface = LoggingSurface {
            log: Rc::clone(&log),
        };
        let release = async {
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            assert_eq!(*log.borrow(), vec!["fetch"]);
            reconciler.source.gate.notify_one();
        };

        let (first, second, ()) = tokio::join!(
            reconciler.reconcile(&surface),
            reconciler.reconcile(&surface),
            release
        );

        assert!(first.fetched && second.fetched);
        assert_eq!(*log.borrow(), vec!["fetch", "paint", "fetch", "paint"]);
    }

    #[tokio::test]
    async fn should_report_nothing_painted_without_controls() {
        let source = ScriptedSource::default();
        source.push_ok(json!({}));
        let reconciler = StatusReconciler::new(source, 32, FallbackPolicy::Off);

        let report = reconciler.reconcile(&FakeSurface::default()).await;

        assert!(report.fetched);
        assert_eq!(report.painted, 0);
    }
}
