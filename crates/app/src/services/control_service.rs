//! Control service: button-triggered backend calls and the status text they
//! produce.
//!
//! Calls are made once; nothing is retried. Failures become user-visible text.

use homehub_domain::backend::{CalendarEvent, RelayToggle, SwitchDevice, SwitchState};
use homehub_domain::settings::IconSpec;
use homehub_domain::error::{HomeHubError, ValidationError};
use homehub_domain::relay::RELAY_CAPACITY;

use crate::ports::ControlGateway;

/// Application service behind the dashboard's control widgets.
pub struct ControlService<G> {
    gateway: G,
}

impl<G: ControlGateway> ControlService<G> {
    /// Create a new service backed by the given gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Switch a device and describe the outcome.
    ///
    /// On success the response body is shown as compact JSON.
    #[tracing::instrument(skip(self))]
    pub async fn switch(&self, device: SwitchDevice, state: SwitchState) -> String {
        match self.gateway.switch(device, state).await {
            Ok(body) => body.to_string(),
            Err(err) => {
                tracing::warn!(%device, error = %err, "control call failed");
                error_text(&err)
            }
        }
    }

    /// Send a voice command and describe the reply.
    ///
    /// Returns `None` without calling the backend when `text` is blank.
    #[tracing::instrument(skip(self))]
    pub async fn voice_command(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let status = match self.gateway.voice_command(text).await {
            Ok(reply) => reply.display_text(),
            Err(err) => {
                tracing::warn!(error = %err, "voice command failed");
                error_text(&err)
            }
        };
        Some(status)
    }

    /// Describe the next calendar event.
    pub async fn next_event(&self) -> String {
        match self.gateway.next_event().await {
            Ok(event) => event.next_event_text(),
            Err(err) => {
                tracing::warn!(error = %err, "calendar lookup failed");
                error_text(&err)
            }
        }
    }

    /// List upcoming calendar events.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged so the page can render it.
    pub async fn upcoming_events(&self, limit: usize) -> Result<Vec<CalendarEvent>, HomeHubError> {
        self.gateway.upcoming_events(limit).await
    }

    /// Toggle the relay behind a 0-based icon slot.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RelayOutOfRange`] when the slot is beyond
    /// capacity, or the backend error.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_slot(&self, slot: usize) -> Result<RelayToggle, HomeHubError> {
        let relay = slot
            .checked_add(1)
            .filter(|relay| *relay <= RELAY_CAPACITY)
            .ok_or(ValidationError::RelayOutOfRange {
                value: slot.saturating_add(1),
                max: RELAY_CAPACITY,
            })?;
        self.gateway.toggle_relay(relay).await
    }

    /// The configured icons with the backend's resolved display values.
    ///
    /// Falls back to `icons` unchanged when the preview is unavailable.
    pub async fn resolve_icons(&self, icons: &[IconSpec]) -> Vec<IconSpec> {
        match self.gateway.icon_preview().await {
            Ok(preview) => preview.apply(icons),
            Err(err) => {
                tracing::warn!(error = %err, "icon preview failed");
                icons.to_vec()
            }
        }
    }
}

/// User-facing text for a failed call.
#[must_use]
pub fn error_text(err: &HomeHubError) -> String {
    match err {
        HomeHubError::Validation(inner) => format!("Error: {inner}"),
        HomeHubError::Backend(inner) => format!("Error: {inner}"),
    }
}
