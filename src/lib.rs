//! opsdeck — management console for a data-platform backend.
//!
//! Drives the backend's REST API from the terminal: service lifecycle
//! (start/stop/analyse/status), topic browsing, paginated user listing,
//! and per-user connection lookup. All business logic lives on the
//! backend; this crate is transport, view state, and rendering.

pub mod cli;
pub mod client;
pub mod config;
pub mod console;
pub mod history;
pub mod model;
pub mod services;
