//! Status source port: where relay status comes from.

use std::future::Future;

use homehub_domain::error::HomeHubError;
use homehub_domain::relay::RelayStatus;

/// Fetches the current relay status from the backend.
pub trait StatusSource {
    /// Fetch `/ipx/status` for at most `max_relays` relays, bypassing any
    /// HTTP cache.
    fn fetch_status(
        &self,
        max_relays: usize,
    ) -> impl Future<Output = Result<RelayStatus, HomeHubError>>;
}

impl<T: StatusSource> StatusSource for std::rc::Rc<T> {
    fn fetch_status(
        &self,
        max_relays: usize,
    ) -> impl Future<Output = Result<RelayStatus, HomeHubError>> {
        (**self).fetch_status(max_relays)
    }
}
