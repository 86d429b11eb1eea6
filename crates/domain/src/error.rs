//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomeHubError`] via `#[from]`.

/// Top-level error for domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum HomeHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("backend error")]
    Backend(#[from] BackendError),
}

/// A value violated a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("max_relays must be between 1 and {max}, got {value}")]
    MaxRelaysOutOfRange { value: usize, max: usize },

    #[error("relay number must be between 1 and {max}, got {value}")]
    RelayOutOfRange { value: usize, max: usize },

    #[error("navigation anchor id for {anchor} must not be empty")]
    EmptyAnchorId { anchor: &'static str },

    #[error("navigation link href must start with '/', got {href:?}")]
    RelativeLinkHref { href: String },

    #[error("icon {id:?} relay index must be below {max}, got {value}")]
    IconSlotOutOfRange { id: String, value: usize, max: usize },

    #[error("icon {id:?} toggles a relay but has no ipx_index")]
    IconToggleWithoutSlot { id: String },
}

/// The remote backend could not be reached or answered with an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    /// Build an error from any displayable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
