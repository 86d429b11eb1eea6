//! Control buttons: the status icons painted by the reconciler.
//!
//! A control is either driven by a relay slot (`source = "ipx"` with a valid
//! index) or by the text it currently displays. [`ControlButton::paint`] is the
//! single rule that turns the latest snapshot into a visual state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::relay::RelayStatusSnapshot;
use crate::truthy::text_is_truthy;

/// Value of the `source` attribute that selects relay-driven painting.
pub const IPX_SOURCE: &str = "ipx";

/// Where a control takes its on/off state from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ControlSource {
    /// Relay state from `/ipx/status`.
    Ipx,
    /// Any other source; the control is painted from its displayed text.
    #[default]
    Text,
    /// Unrecognized source name, kept for display. Painted like [`Text`](Self::Text).
    Other(String),
}

impl ControlSource {
    /// Parse the raw attribute value. Matching is exact, as on the wire.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            IPX_SOURCE => Self::Ipx,
            "" | "text" => Self::Text,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn is_ipx(&self) -> bool {
        matches!(self, Self::Ipx)
    }
}

impl From<String> for ControlSource {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ControlSource> for String {
    fn from(source: ControlSource) -> Self {
        source.to_string()
    }
}

impl fmt::Display for ControlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipx => f.write_str(IPX_SOURCE),
            Self::Text => f.write_str("text"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// What ipx-driven controls show when the status fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Paint them off.
    #[default]
    Off,
    /// Keep the state from the last successful fetch (off if there was none).
    LastKnown,
    /// Mark them as unknown.
    Unknown,
}

/// Visual state of a control after reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPaint {
    On,
    Off,
    Unknown,
}

impl ControlPaint {
    #[must_use]
    pub fn from_bool(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Parse a relay index attribute.
///
/// Accepts any finite, non-negative, integral number (`"2"`, `"2.0"`).
/// Blank, negative, fractional or non-numeric values yield `None`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_ipx_index(raw: Option<&str>) -> Option<usize> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let number: f64 = raw.parse().ok()?;
    if !number.is_finite() || number < 0.0 || number.fract() != 0.0 {
        return None;
    }
    Some(number as usize)
}

/// A rendered control as read back from the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlButton {
    pub source: ControlSource,
    /// Declared 0-based relay slot, if it parsed as a valid index.
    pub ipx_index: Option<usize>,
    /// Text currently displayed inside the control.
    pub text: String,
}

impl ControlButton {
    /// Build a control from raw attribute values.
    #[must_use]
    pub fn from_attributes(source: &str, ipx_index: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            source: ControlSource::parse(source),
            ipx_index: parse_ipx_index(ipx_index),
            text: text.into(),
        }
    }

    /// Relay slot driving this control, if any.
    #[must_use]
    pub fn relay_slot(&self) -> Option<usize> {
        if self.source.is_ipx() {
            self.ipx_index
        } else {
            None
        }
    }

    /// Decide the visual state from the latest snapshot.
    ///
    /// `snapshot` is `None` when the fetch failed; `fallback` then decides what
    /// relay-driven controls show. Text-driven controls never depend on the
    /// fetch outcome.
    #[must_use]
    pub fn paint(
        &self,
        snapshot: Option<&RelayStatusSnapshot>,
        fallback: FallbackPolicy,
    ) -> ControlPaint {
        let Some(slot) = self.relay_slot() else {
            return ControlPaint::from_bool(text_is_truthy(&self.text));
        };
        match (snapshot, fallback) {
            (Some(snapshot), _) => ControlPaint::from_bool(snapshot.is_on(slot)),
            (None, FallbackPolicy::Unknown) => ControlPaint::Unknown,
            (None, FallbackPolicy::Off | FallbackPolicy::LastKnown) => ControlPaint::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::RelayStatus;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> RelayStatusSnapshot {
        let status: RelayStatus = serde_json::from_value(value).unwrap();
        RelayStatusSnapshot::from(&status)
    }

    #[test]
    fn should_parse_valid_indexes() {
        assert_eq!(parse_ipx_index(Some("0")), Some(0));
        assert_eq!(parse_ipx_index(Some(" 2 ")), Some(2));
        assert_eq!(parse_ipx_index(Some("2.0")), Some(2));
    }

    #[test]
    fn should_reject_invalid_indexes() {
        for raw in ["", "  ", "-1", "1.5", "abc", "NaN", "inf"] {
            assert_eq!(parse_ipx_index(Some(raw)), None, "{raw:?}");
        }
        assert_eq!(parse_ipx_index(None), None);
    }

    #[test]
    fn should_parse_source_exactly() {
        assert_eq!(ControlSource::parse("ipx"), ControlSource::Ipx);
        assert_eq!(ControlSource::parse("IPX"), ControlSource::Other("IPX".into()));
        assert_eq!(ControlSource::parse(""), ControlSource::Text);
    }

    #[test]
    fn should_paint_ipx_control_from_snapshot() {
        let snap = snapshot(json!({"relays": [{"relay": 1, "on": true}, {"relay": 33, "on": true}]}));
        let first = ControlButton::from_attributes("ipx", Some("0"), "");
        let second = ControlButton::from_attributes("ipx", Some("1"), "ON");
        assert_eq!(first.paint(Some(&snap), FallbackPolicy::Off), ControlPaint::On);
        assert_eq!(second.paint(Some(&snap), FallbackPolicy::Off), ControlPaint::Off);
    }

    #[test]
    fn should_paint_index_beyond_capacity_off() {
        let snap = snapshot(json!({"relays": [{"relay": 32, "on": true}]}));
        let button = ControlButton::from_attributes("ipx", Some("32"), "on");
        assert_eq!(button.paint(Some(&snap), FallbackPolicy::Off), ControlPaint::Off);
    }

    #[test]
    fn should_paint_ipx_control_off_when_fetch_failed() {
        let button = ControlButton::from_attributes("ipx", Some("2"), "ON");
        assert_eq!(button.paint(None, FallbackPolicy::Off), ControlPaint::Off);
    }

    #[test]
    fn should_paint_ipx_control_unknown_under_unknown_policy() {
        let button = ControlButton::from_attributes("ipx", Some("2"), "ON");
        assert_eq!(button.paint(None, FallbackPolicy::Unknown), ControlPaint::Unknown);
    }

    #[test]
    fn should_paint_text_control_from_displayed_text() {
        let on = ControlButton::from_attributes("other", None, " ON ");
        let off = ControlButton::from_attributes("other", Some("1"), "off");
        assert_eq!(on.paint(None, FallbackPolicy::Off), ControlPaint::On);
        assert_eq!(off.paint(None, FallbackPolicy::Unknown), ControlPaint::Off);
    }

    #[test]
    fn should_fall_back_to_text_when_ipx_index_is_invalid() {
        let button = ControlButton::from_attributes("ipx", Some("-3"), "yes");
        assert_eq!(button.relay_slot(), None);
        assert_eq!(button.paint(None, FallbackPolicy::Off), ControlPaint::On);
    }

    #[test]
    fn should_roundtrip_source_through_serde_json() {
        let json = serde_json::to_string(&ControlSource::Ipx).unwrap();
        assert_eq!(json, "\"ipx\"");
        let parsed: ControlSource = serde_json::from_str("\"analog\"").unwrap();
        assert_eq!(parsed, ControlSource::Other("analog".into()));
    }

    #[test]
    fn should_default_fallback_to_off() {
        assert_eq!(FallbackPolicy::default(), FallbackPolicy::Off);
        let parsed: FallbackPolicy = serde_json::from_str("\"last_known\"").unwrap();
        assert_eq!(parsed, FallbackPolicy::LastKnown);
    }
}
