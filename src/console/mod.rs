//! Console controllers: the state the view renders.
//!
//! Each controller owns its own view state and mutates it only from
//! explicit operations; there is no shared mutable state across
//! controllers. Collaborators (the API client, sibling services) are
//! injected at construction so tests can point them at a stub backend.
//!
//! On failure an operation leaves its controller's state unchanged and
//! returns the error to the caller — stale data stays visible, but the
//! failure is never silent.

mod connections;
mod service;
mod users;

pub use connections::ConnectionController;
pub use service::{LifecycleCommand, ServiceController};
pub use users::{SelectedUser, UserController};
