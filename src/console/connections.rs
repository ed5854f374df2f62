//! Topic browsing: the topic list and the current selection.

use anyhow::{Context, Result};

use crate::model::{Topic, User};
use crate::services::ConnectionService;

/// Holds the topic list loaded at construction and the view's current
/// topic selection.
#[derive(Debug)]
pub struct ConnectionController {
    service: ConnectionService,
    topics: Vec<Topic>,
    selected_topic: Option<Topic>,
}

impl ConnectionController {
    /// Build the controller and load all topics.
    ///
    /// A failed topic load propagates; there is no half-initialized
    /// controller with an empty list masking the error.
    pub fn new(service: ConnectionService) -> Result<Self> {
        let topics = service.get_all_topics()?;
        Ok(Self {
            service,
            topics,
            selected_topic: None,
        })
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Record the view's topic selection.
    pub fn select_topic(&mut self, topic: Topic) {
        self.selected_topic = Some(topic);
    }

    pub fn selected_topic(&self) -> Option<&Topic> {
        self.selected_topic.as_ref()
    }

    /// Fetch the users subscribed to the selected topic.
    pub fn users_for_selected(&self) -> Result<Vec<User>> {
        let topic = self
            .selected_topic
            .as_ref()
            .context("no topic selected")?;
        self.service.find_users_by_topic(&topic.0)
    }
}
