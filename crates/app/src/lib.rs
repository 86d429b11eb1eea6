//! # homehub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StatusSource`: fetch the relay status payload
//!   - `ControlSurface`: read and paint the rendered controls
//!   - `ControlGateway`: call the backend control, voice and calendar endpoints
//! - Define **driving/inbound** use-case structs:
//!   - `StatusReconciler`: fetch a snapshot and paint every control
//!   - `ControlService`: turn control calls into status-line text
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (the post-render hook registry)
//!
//! ## Dependency rule
//! Depends on `homehub-domain` only (plus `tokio::sync` for the reconcile
//! guard). Never imports adapter crates. Adapters depend on *this* crate, not
//! the reverse.

pub mod hooks;
pub mod ports;
pub mod services;
