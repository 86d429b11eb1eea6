//! # homehub-domain
//!
//! Pure domain model for the homehub dashboard.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, boolean coercion
//! - Define the **relay snapshot** rebuilt from every `/ipx/status` response
//! - Define **control buttons** and the rule that decides how each is painted
//! - Define **navigation links** and the slide-out **menu state**
//! - Define the request/response shapes of the external backend
//! - Define the **dashboard settings** shared by the host and the browser client
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod truthy;

pub mod backend;
pub mod control;
pub mod nav;
pub mod relay;
pub mod settings;
