//! Control gateway port: the backend endpoints behind dashboard buttons.

use std::future::Future;

use homehub_domain::backend::{
    CalendarEvent, IconPreview, RelayToggle, SwitchDevice, SwitchState, VoiceReply,
};
use homehub_domain::error::HomeHubError;

/// Calls the backend control, voice and calendar endpoints.
pub trait ControlGateway {
    /// `POST /control/{device}/{state}`; returns the raw JSON body.
    fn switch(
        &self,
        device: SwitchDevice,
        state: SwitchState,
    ) -> impl Future<Output = Result<serde_json::Value, HomeHubError>>;

    /// `POST /voice/command`.
    fn voice_command(&self, text: &str) -> impl Future<Output = Result<VoiceReply, HomeHubError>>;

    /// `GET /status/calendar/next`.
    fn next_event(&self) -> impl Future<Output = Result<CalendarEvent, HomeHubError>>;

    /// `GET /status/calendar/upcoming?limit={limit}`.
    fn upcoming_events(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CalendarEvent>, HomeHubError>>;

    /// `POST /ipx/relays/{relay}/toggle`; `relay` is 1-based.
    fn toggle_relay(&self, relay: usize) -> impl Future<Output = Result<RelayToggle, HomeHubError>>;

    /// `GET /status-icons/preview`.
    fn icon_preview(&self) -> impl Future<Output = Result<IconPreview, HomeHubError>>;
}
