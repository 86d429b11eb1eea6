//! Request and response shapes of the external homehub backend.
//!
//! Only the fields the dashboard reads are modelled; unknown fields are
//! ignored.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::settings::IconSpec;

/// Device with a dedicated on/off control endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchDevice {
    Lights,
    Heating,
}

impl SwitchDevice {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lights => "lights",
            Self::Heating => "heating",
        }
    }
}

impl fmt::Display for SwitchDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested switch position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

/// Path of the control endpoint, e.g. `/control/lights/on`.
#[must_use]
pub fn control_path(device: SwitchDevice, state: SwitchState) -> String {
    format!("/control/{}/{}", device.as_str(), state.as_str())
}

/// Body of `POST /voice/command`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCommand {
    pub text: String,
}

/// Response of `POST /voice/command`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoiceReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl VoiceReply {
    /// Text shown to the user: the message if present, else `OK`/`Failed`.
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None if self.ok => "OK".to_string(),
            None => "Failed".to_string(),
        }
    }
}

/// A calendar event as returned by `/status/calendar/next` and
/// `/status/calendar/upcoming`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: Option<String>,
    /// RFC 3339 date-time or plain `YYYY-MM-DD` date.
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl CalendarEvent {
    /// Human-readable start, e.g. `Sat 18 Oct 14:00` or `Sat 18 Oct`.
    ///
    /// Values that parse as neither form are returned unchanged.
    #[must_use]
    pub fn start_label(&self) -> Option<String> {
        let raw = self.start.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.format("%a %d %b %H:%M").to_string());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.format("%a %d %b").to_string());
        }
        Some(raw.to_string())
    }

    /// Summary line for the "next event" widget.
    #[must_use]
    pub fn next_event_text(&self) -> String {
        match (&self.summary, self.start_label()) {
            (Some(summary), Some(start)) => format!("{summary} \u{2014} {start}"),
            (Some(summary), None) => summary.clone(),
            (None, _) => "No upcoming event".to_string(),
        }
    }

    /// Title for list rows.
    #[must_use]
    pub fn title(&self) -> &str {
        self.summary.as_deref().unwrap_or("(no title)")
    }
}

/// Response of `POST /ipx/relays/{relay}/toggle`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelayToggle {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub relay: Option<usize>,
    #[serde(default)]
    pub prev: Option<bool>,
    #[serde(default)]
    pub after: Option<bool>,
    #[serde(default)]
    pub verified: bool,
}

/// Response of `GET /status-icons/preview`: resolved values for the
/// backend's enabled icons.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IconPreview {
    #[serde(default)]
    pub items: Vec<IconPreviewItem>,
}

/// One resolved icon, e.g. `display: "ON"` or `display: "21.5 °C"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPreviewItem {
    pub id: String,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl IconPreview {
    /// Overlay the resolved values onto the configured icons.
    ///
    /// Icons the preview marks as disabled are dropped. Icons it does not
    /// mention, or mentions without a `display`, keep their configured text.
    #[must_use]
    pub fn apply(&self, icons: &[IconSpec]) -> Vec<IconSpec> {
        icons
            .iter()
            .filter_map(|icon| {
                let Some(item) = self.items.iter().find(|item| item.id == icon.id) else {
                    return Some(icon.clone());
                };
                if !item.enabled {
                    return None;
                }
                let mut icon = icon.clone();
                if let Some(display) = &item.display {
                    icon.text.clone_from(display);
                }
                Some(icon)
            })
            .collect()
    }
}
