//! Analytical queries over the ingested data.
//!
//! The backend exposes a read-only `api/queries` surface next to the
//! bookkeeping endpoints: influence ranking, interest search, and ad
//! suggestions. All computation happens server-side; this client only
//! shapes the requests and passes the payloads through.

use anyhow::Result;

use crate::client::ApiClient;
use crate::model::{Ad, User};

/// Client for the `api/queries` endpoints.
#[derive(Debug, Clone)]
pub struct QueryService {
    client: ApiClient,
}

impl QueryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the most influential users in the data set.
    pub fn most_influential_users(&self) -> Result<Vec<User>> {
        self.client.get_as("api/queries/inflUser", &[])
    }

    /// Find users interested in the given topics.
    ///
    /// Each topic becomes its own repeated `topics` query parameter.
    pub fn users_with_interests(&self, topics: &[String]) -> Result<Vec<User>> {
        let query: Vec<(&str, String)> = topics
            .iter()
            .map(|topic| ("topics", topic.clone()))
            .collect();
        self.client.get_as("api/queries/usersWithInterests", &query)
    }

    /// Suggest ads for a user.
    ///
    /// With `potential_interests` set, suggestions are based on topics the
    /// user's connections mention rather than the user's own activity.
    pub fn suggest_ads_for_user(&self, user_id: &str, potential_interests: bool) -> Result<Vec<Ad>> {
        self.client.get_as(
            "api/queries/suggestAdsForUser",
            &[
                ("userId", user_id.to_string()),
                ("potentialInterests", potential_interests.to_string()),
            ],
        )
    }
}
