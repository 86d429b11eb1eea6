mod events;
mod home;
mod not_found;
mod relays;

pub use events::Events;
pub use home::Home;
pub use not_found::NotFound;
pub use relays::Relays;
