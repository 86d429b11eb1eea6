//! # homehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the compiled Leptos dashboard (WASM bundle, `index.html`, styles)
//! - Fall back to `index.html` for client-side routes such as `/events`
//! - Expose the dashboard settings as JSON at `/dashboard/settings`
//! - Answer `/health` for liveness checks
//!
//! The backend API (`/ipx/*`, `/control/*`, `/voice/*`, `/status/*`) is an
//! external service; this adapter never proxies or implements it.
//!
//! ## Dependency rule
//! Depends on `homehub-domain` for the settings type. Never leaks axum types
//! into the domain.

pub mod router;
pub mod state;
