mod control_panel;
mod icon_grid;
mod loading;
mod nav_panel;
mod toast;

pub use control_panel::{NextEventCard, SwitchCard, VoiceCard};
pub use icon_grid::IconGrid;
pub use loading::Loading;
pub use nav_panel::{NavPanel, attach_to_existing};
pub use toast::{ToastContainer, use_toasts};
