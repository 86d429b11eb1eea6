//! Dashboard settings: served by the host at `/dashboard/settings` and
//! consumed by the browser client.
//!
//! Every field has a default so a partial (or missing) `[dashboard]` section
//! is valid.

use serde::{Deserialize, Serialize};

use crate::control::{ControlSource, FallbackPolicy};
use crate::error::ValidationError;
use crate::nav::{NavLink, default_links};
use crate::relay::RELAY_CAPACITY;

/// Settings for the browser dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Prefix for backend URLs; empty means same origin.
    pub api_base: String,
    /// Value of the `max_relays` query parameter sent to `/ipx/status`.
    pub max_relays: usize,
    /// What relay-driven icons show when the status fetch failed.
    pub fallback: FallbackPolicy,
    /// Seconds between background reconciliations; `0` disables polling.
    pub poll_interval_secs: u32,
    /// Number of events listed on the events page.
    pub upcoming_limit: usize,
    pub nav: NavSettings,
    pub links: Vec<NavLink>,
    pub icons: Vec<IconSpec>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            max_relays: RELAY_CAPACITY,
            fallback: FallbackPolicy::Off,
            poll_interval_secs: 10,
            upcoming_limit: 10,
            nav: NavSettings::default(),
            links: default_links(),
            icons: default_icons(),
        }
    }
}

impl DashboardSettings {
    /// Check cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=RELAY_CAPACITY).contains(&self.max_relays) {
            return Err(ValidationError::MaxRelaysOutOfRange {
                value: self.max_relays,
                max: RELAY_CAPACITY,
            });
        }
        self.nav.validate()?;
        for link in &self.links {
            link.validate()?;
        }
        for icon in &self.icons {
            icon.validate()?;
        }
        Ok(())
    }

    /// Join a backend path onto [`api_base`](Self::api_base).
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base.trim_end_matches('/'))
    }

    /// URL of the relay status endpoint.
    #[must_use]
    pub fn status_url(&self) -> String {
        self.api_url(&format!("/ipx/status?max_relays={}", self.max_relays))
    }
}

/// How the navigation panel gets its DOM nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavStrategy {
    /// The dashboard renders its own trigger, panel and backdrop.
    #[default]
    CreateOwnDom,
    /// Wire up anchors already present in the host page.
    AttachToExisting,
}

/// Navigation panel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSettings {
    pub strategy: NavStrategy,
    /// Element ids used by [`NavStrategy::AttachToExisting`].
    pub trigger_id: String,
    pub panel_id: String,
    pub backdrop_id: String,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            strategy: NavStrategy::CreateOwnDom,
            trigger_id: "menu-trigger".to_string(),
            panel_id: "menu-panel".to_string(),
            backdrop_id: "menu-backdrop".to_string(),
        }
    }
}

impl NavSettings {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.strategy != NavStrategy::AttachToExisting {
            return Ok(());
        }
        for (anchor, id) in [
            ("trigger", &self.trigger_id),
            ("panel", &self.panel_id),
            ("backdrop", &self.backdrop_id),
        ] {
            if id.trim().is_empty() {
                return Err(ValidationError::EmptyAnchorId { anchor });
            }
        }
        Ok(())
    }
}

/// Declarative description of one status icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSpec {
    pub id: String,
    pub label: String,
    /// Glyph shown in the icon (usually an emoji).
    pub icon: String,
    #[serde(default)]
    pub source: ControlSource,
    /// 0-based relay slot for [`ControlSource::Ipx`] icons.
    #[serde(default)]
    pub ipx_index: Option<usize>,
    /// Initial displayed text; drives the paint of non-ipx icons.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub action: IconAction,
}

impl IconSpec {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.ipx_index {
            Some(value) if value >= RELAY_CAPACITY => Err(ValidationError::IconSlotOutOfRange {
                id: self.id.clone(),
                value,
                max: RELAY_CAPACITY,
            }),
            None if self.action == IconAction::IpxToggle => {
                Err(ValidationError::IconToggleWithoutSlot { id: self.id.clone() })
            }
            _ => Ok(()),
        }
    }
}

/// What clicking an icon does.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IconAction {
    #[default]
    None,
    /// Toggle the icon's relay through `/ipx/relays/{n}/toggle`.
    IpxToggle,
    Navigate { url: String },
}

/// Heating and lights, as configured out of the box on the backend.
#[must_use]
pub fn default_icons() -> Vec<IconSpec> {
    vec![
        IconSpec {
            id: "heating".to_string(),
            label: "Heating".to_string(),
            icon: "\u{1F525}".to_string(),
            source: ControlSource::Ipx,
            ipx_index: Some(0),
            text: String::new(),
            action: IconAction::Navigate {
                url: "/ipx".to_string(),
            },
        },
        IconSpec {
            id: "lights".to_string(),
            label: "Lights".to_string(),
            icon: "\u{1F4A1}".to_string(),
            source: ControlSource::Ipx,
            ipx_index: Some(1),
            text: String::new(),
            action: IconAction::IpxToggle,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_produce_sensible_defaults() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.max_relays, 32);
        assert_eq!(settings.fallback, FallbackPolicy::Off);
        assert_eq!(settings.nav.strategy, NavStrategy::CreateOwnDom);
        assert_eq!(settings.icons.len(), 2);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let settings: DashboardSettings =
            serde_json::from_value(json!({"fallback": "unknown"})).unwrap();
        assert_eq!(settings.fallback, FallbackPolicy::Unknown);
        assert_eq!(settings.max_relays, 32);
        assert_eq!(settings.links.len(), 3);
    }

    #[test]
    fn should_reject_out_of_range_max_relays() {
        let mut settings = DashboardSettings::default();
        settings.max_relays = 0;
        assert!(settings.validate().is_err());
        settings.max_relays = 33;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn should_reject_empty_anchor_in_attach_mode() {
        let mut settings = DashboardSettings::default();
        settings.nav.trigger_id = String::new();
        assert!(settings.validate().is_ok());
        settings.nav.strategy = NavStrategy::AttachToExisting;
        assert_eq!(
            settings.validate(),
            Err(ValidationError::EmptyAnchorId { anchor: "trigger" })
        );
    }

    #[test]
    fn should_reject_icon_slot_beyond_capacity() {
        let mut settings = DashboardSettings::default();
        settings.icons[0].ipx_index = Some(32);
        assert_eq!(
            settings.validate(),
            Err(ValidationError::IconSlotOutOfRange {
                id: "heating".into(),
                value: 32,
                max: 32,
            })
        );
        settings.icons[0].ipx_index = Some(31);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn should_reject_toggle_icon_without_slot() {
        let mut settings = DashboardSettings::default();
        settings.icons[1].ipx_index = None;
        assert_eq!(
            settings.validate(),
            Err(ValidationError::IconToggleWithoutSlot { id: "lights".into() })
        );
        settings.icons[1].action = IconAction::None;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn should_build_status_url() {
        let mut settings = DashboardSettings::default();
        assert_eq!(settings.status_url(), "/ipx/status?max_relays=32");
        settings.api_base = "http://hub.local:8000/".to_string();
        assert_eq!(
            settings.status_url(),
            "http://hub.local:8000/ipx/status?max_relays=32"
        );
    }

    #[test]
    fn should_parse_icon_actions() {
        let icon: IconSpec = serde_json::from_value(json!({
            "id": "door",
            "label": "Door",
            "icon": "D",
            "source": "ipx",
            "ipx_index": 4,
            "action": {"type": "ipx_toggle"}
        }))
        .unwrap();
        assert_eq!(icon.source, ControlSource::Ipx);
        assert_eq!(icon.action, IconAction::IpxToggle);

        let nav: IconAction =
            serde_json::from_value(json!({"type": "navigate", "url": "/events"})).unwrap();
        assert_eq!(nav, IconAction::Navigate { url: "/events".into() });
    }
}
