//! Navigation: the slide-out menu state and route-based link highlighting.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single entry of the navigation panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

impl NavLink {
    #[must_use]
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }

    /// Check that the link points at an absolute path on this origin.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RelativeLinkHref`] when `href` does not
    /// start with `/`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.href.starts_with('/') {
            Ok(())
        } else {
            Err(ValidationError::RelativeLinkHref {
                href: self.href.clone(),
            })
        }
    }
}

/// Links shown when no configuration overrides them.
#[must_use]
pub fn default_links() -> Vec<NavLink> {
    vec![
        NavLink::new("/", "Home"),
        NavLink::new("/events", "Events"),
        NavLink::new("/ipx", "Relays"),
    ]
}

/// Strip trailing slashes; an empty result becomes the root `/`.
///
/// Query strings and fragments are dropped first so `/events/?x=1` matches
/// `/events`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Index of the link matching `current_path`, if any.
///
/// Both sides are normalized with [`normalize_path`]. When several links
/// normalize to the same path only the first one is reported, so at most one
/// link is ever active.
#[must_use]
pub fn active_link_index(links: &[NavLink], current_path: &str) -> Option<usize> {
    let current = normalize_path(current_path);
    links
        .iter()
        .position(|link| normalize_path(&link.href) == current)
}

/// Open/closed state of the slide-out panel.
///
/// Always starts closed; there is no persistence across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub is_open: bool,
}

impl MenuState {
    /// Rebuild the state from the trigger's `aria-expanded` attribute.
    ///
    /// Only the exact value `"true"` counts as open.
    #[must_use]
    pub fn from_expanded_attr(value: Option<&str>) -> Self {
        Self {
            is_open: value == Some("true"),
        }
    }

    /// Value to write back into `aria-expanded`.
    #[must_use]
    pub fn expanded_attr(self) -> &'static str {
        if self.is_open { "true" } else { "false" }
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Flip between open and closed; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }
}
