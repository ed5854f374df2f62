//! Typed service wrappers over the backend API.
//!
//! Each service owns an [`ApiClient`](crate::client::ApiClient) and maps
//! one slice of the REST surface to typed results. Failures propagate to
//! the caller unchanged.

mod connections;
mod queries;
mod users;

pub use connections::ConnectionService;
pub use queries::QueryService;
pub use users::UserService;
