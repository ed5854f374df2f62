//! Topic listing and per-topic user lookup.

use anyhow::Result;

use crate::client::{ApiClient, encode_component};
use crate::model::{Topic, User};

/// Client for the `api/connections` endpoints.
#[derive(Debug, Clone)]
pub struct ConnectionService {
    client: ApiClient,
}

impl ConnectionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch all topics known to the backend.
    pub fn get_all_topics(&self) -> Result<Vec<Topic>> {
        self.client.get_as("api/connections/topics", &[])
    }

    /// Fetch the users subscribed to a topic.
    ///
    /// Returns the parsed payload, symmetric with [`get_all_topics`]
    /// (the resolved body is never discarded).
    ///
    /// [`get_all_topics`]: ConnectionService::get_all_topics
    pub fn find_users_by_topic(&self, topic: &str) -> Result<Vec<User>> {
        self.client.get_as(
            &format!("api/connections/topics/{}/users", encode_component(topic)),
            &[],
        )
    }
}
