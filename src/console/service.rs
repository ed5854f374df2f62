//! Lifecycle control of the singleton backend service.

use anyhow::Result;
use serde_json::Value;

use crate::client::ApiClient;

/// Commands accepted by the `api/service` endpoint.
///
/// No client-side ordering is enforced (nothing stops `stop` before
/// `start`); validity is entirely the backend's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCommand {
    Start,
    Stop,
    Analyse,
}

impl LifecycleCommand {
    /// The value sent as the `command` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Analyse => "analyse",
        }
    }
}

/// Drives the backend service and holds the latest command/status
/// response for the view.
#[derive(Debug)]
pub struct ServiceController {
    client: ApiClient,
    result: Option<Value>,
}

impl ServiceController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            result: None,
        }
    }

    /// Start the backend service.
    pub fn start_service(&mut self) -> Result<&Value> {
        self.send_command(LifecycleCommand::Start)
    }

    /// Stop the backend service.
    pub fn stop_service(&mut self) -> Result<&Value> {
        self.send_command(LifecycleCommand::Stop)
    }

    /// Trigger the analysis job.
    pub fn start_analyse(&mut self) -> Result<&Value> {
        self.send_command(LifecycleCommand::Analyse)
    }

    /// Issue a lifecycle command and overwrite `result` with the response.
    ///
    /// On failure `result` keeps its previous value.
    pub fn send_command(&mut self, command: LifecycleCommand) -> Result<&Value> {
        let body = self.client.get(
            "api/service",
            &[("command", command.as_query_value().to_string())],
        )?;
        Ok(self.result.insert(body))
    }

    /// Fetch the current service status (no query parameters).
    pub fn get_status(&mut self) -> Result<&Value> {
        let body = self.client.get("api/service/status", &[])?;
        Ok(self.result.insert(body))
    }

    /// The latest successful response, if any.
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }
}
