//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! Their futures are not required to be `Send`: the browser client drives them
//! on a single thread.

pub mod control_gateway;
pub mod control_surface;
pub mod status_source;

pub use control_gateway::ControlGateway;
pub use control_surface::ControlSurface;
pub use status_source::StatusSource;
