//! Per-user connection lookup.

use anyhow::Result;

use crate::client::{ApiClient, encode_component};
use crate::model::Connection;

/// Client for the `api/users/{id}/connections` endpoint.
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the connections (topic memberships) of one user.
    pub fn get_connections(&self, user_id: &str) -> Result<Vec<Connection>> {
        self.client.get_as(
            &format!("api/users/{}/connections", encode_component(user_id)),
            &[],
        )
    }
}
