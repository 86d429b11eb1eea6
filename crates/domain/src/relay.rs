//! Relay status: the wire shape of `/ipx/status` and the 0-based snapshot
//! rebuilt from it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::truthy::value_is_truthy;

/// Number of relay slots tracked by a [`RelayStatusSnapshot`].
pub const RELAY_CAPACITY: usize = 32;

/// Body returned by `GET /ipx/status`.
///
/// A missing or `null` `relays` field is treated as an empty list, and
/// entries that are not objects are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayStatus {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub relays: Vec<RelayEntry>,
}

fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<RelayEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// One relay reported by the backend.
///
/// Fields are kept loosely typed so a single malformed entry never fails the
/// whole payload; [`RelayEntry::slot`] decides whether the entry is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayEntry {
    /// 1-based relay number.
    #[serde(default)]
    pub relay: Value,
    #[serde(default)]
    pub on: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RelayEntry {
    /// 0-based snapshot slot for this entry, if its relay number is an
    /// integer in `1..=RELAY_CAPACITY`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn slot(&self) -> Option<usize> {
        let number = match &self.relay {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })?,
            _ => return None,
        };
        let number = usize::try_from(number).ok()?;
        number.checked_sub(1).filter(|slot| *slot < RELAY_CAPACITY)
    }

    /// Whether the backend reports this relay as energized.
    #[must_use]
    pub fn is_on(&self) -> bool {
        value_is_truthy(Some(&self.on))
    }
}

/// Full-replace copy of the relay states.
///
/// Slot `i` means "relay `i + 1` is energized". A snapshot is always rebuilt
/// from a complete [`RelayStatus`]; it is never patched in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelayStatusSnapshot {
    states: [bool; RELAY_CAPACITY],
}

impl RelayStatusSnapshot {
    /// Build a snapshot from a status payload.
    ///
    /// Entries whose relay number is outside `1..=RELAY_CAPACITY` (or not an
    /// integer) are skipped. Returns the snapshot and the number of skipped
    /// entries.
    #[must_use]
    pub fn from_status(status: &RelayStatus) -> (Self, usize) {
        let mut states = [false; RELAY_CAPACITY];
        let mut skipped = 0;
        for entry in &status.relays {
            match entry.slot() {
                Some(slot) => states[slot] = entry.is_on(),
                None => skipped += 1,
            }
        }
        (Self { states }, skipped)
    }

    /// State of the 0-based slot; `false` beyond capacity.
    #[must_use]
    pub fn is_on(&self, index: usize) -> bool {
        self.states.get(index).copied().unwrap_or(false)
    }

    /// Number of energized relays.
    #[must_use]
    pub fn on_count(&self) -> usize {
        self.states.iter().filter(|on| **on).count()
    }
}

impl From<&RelayStatus> for RelayStatusSnapshot {
    fn from(status: &RelayStatus) -> Self {
        Self::from_status(status).0
    }
}
