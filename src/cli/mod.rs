//! CLI command implementations for opsdeck.
//!
//! Provides subcommand handlers for:
//! - `opsdeck service start|stop|analyse|status` — backend lifecycle
//! - `opsdeck topics list` / `opsdeck topics users <topic>` — topic browsing
//! - `opsdeck users list` / `opsdeck users connections <id>` — user browsing
//! - `opsdeck queries influential|interests|ads` — analytical queries
//! - `opsdeck health` — backend reachability check
//! - `opsdeck history` — recent backend requests
//! - `opsdeck config show|init` — configuration management
//!
//! Handlers are the "view": they construct controllers with a
//! config-built client and render the controller state.

use anyhow::Result;
use colored::Colorize;

use crate::client::ApiClient;
use crate::config;
use crate::console::{ConnectionController, LifecycleCommand, ServiceController, UserController};
use crate::history;
use crate::model::{Ad, Connection, Topic, User};
use crate::services::{ConnectionService, QueryService, UserService};

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Build the API client from the resolved config.
fn build_client() -> ApiClient {
    ApiClient::from_config(&config::load())
}

// ---------------------------------------------------------------------------
// opsdeck service
// ---------------------------------------------------------------------------

/// Send a lifecycle command and print the backend's response.
pub fn run_service_command(command: LifecycleCommand, format: OutputFormat) -> Result<()> {
    let mut controller = ServiceController::new(build_client());
    let result = controller.send_command(command)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Table => {
            println!(
                "{} {}",
                "Command accepted:".bold().green(),
                command.as_query_value()
            );
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }
    Ok(())
}

/// Fetch and print the current service status.
pub fn run_service_status(format: OutputFormat) -> Result<()> {
    let mut controller = ServiceController::new(build_client());
    let result = controller.get_status()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Table => {
            println!("{}", "Service status".bold().cyan());
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// opsdeck topics
// ---------------------------------------------------------------------------

/// List all topics.
pub fn run_topics(format: OutputFormat) -> Result<()> {
    let controller = ConnectionController::new(ConnectionService::new(build_client()))?;
    let topics = controller.topics();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(topics)?),
        OutputFormat::Table => print_topics_table(topics),
    }
    Ok(())
}

/// List the users subscribed to a topic.
pub fn run_topic_users(topic: &str, format: OutputFormat) -> Result<()> {
    let mut controller = ConnectionController::new(ConnectionService::new(build_client()))?;
    controller.select_topic(Topic::from(topic));
    let users = controller.users_for_selected()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
        OutputFormat::Table => {
            println!("{} {}", "Users on topic".bold().cyan(), topic.bold());
            print_users_table(&users);
        }
    }
    Ok(())
}

fn print_topics_table(topics: &[Topic]) {
    if topics.is_empty() {
        println!("{}", "No topics on the backend yet.".yellow());
        return;
    }
    println!("{}", "Topics".bold().cyan());
    for topic in topics {
        println!("  {topic}");
    }
    println!();
    println!("{} topic(s)", topics.len());
}

// ---------------------------------------------------------------------------
// opsdeck users
// ---------------------------------------------------------------------------

/// Page through the user listing.
///
/// `--size` overrides the configured page size for this invocation;
/// `--page` moves the cursor off page 0 and refetches, mirroring the
/// console's update flow.
pub fn run_users(size: Option<u32>, page: Option<u32>, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let client = ApiClient::from_config(&cfg);
    let service = UserService::new(client.clone());

    let page_size = size.unwrap_or(cfg.users.page_size);
    let mut controller = UserController::new(client, service, page_size)?;

    if let Some(page) = page
        && page != controller.page_number()
    {
        controller.set_page_number(page);
        controller.update_users()?;
    }

    let users = controller.users();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(users)?),
        OutputFormat::Table => {
            println!(
                "{} (size {}, page {})",
                "Users".bold().cyan(),
                controller.page_size(),
                controller.page_number()
            );
            print_users_table(users);
        }
    }
    Ok(())
}

/// List the connections of a single user.
pub fn run_user_connections(user_id: &str, format: OutputFormat) -> Result<()> {
    let service = UserService::new(build_client());
    let connections = service.get_connections(user_id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&connections)?),
        OutputFormat::Table => {
            println!("{} {}", "Connections for user".bold().cyan(), user_id.bold());
            print_connections_table(&connections);
        }
    }
    Ok(())
}

fn print_users_table(users: &[User]) {
    if users.is_empty() {
        println!("{}", "No users in this page.".yellow());
        return;
    }
    println!("  {:<22} {}", "ID".bold(), "NAME".bold());
    for user in users {
        println!("  {:<22} {}", user.id, user.display_name());
    }
    println!();
    println!("{} user(s)", users.len());
}

fn print_connections_table(connections: &[Connection]) {
    if connections.is_empty() {
        println!("{}", "No connections for this user.".yellow());
        return;
    }
    for conn in connections {
        match &conn.topic {
            Some(topic) => println!("  {topic}"),
            None => println!(
                "  {}",
                serde_json::to_string(conn).unwrap_or_else(|_| "<unrenderable>".to_string())
            ),
        }
    }
    println!();
    println!("{} connection(s)", connections.len());
}

// ---------------------------------------------------------------------------
// opsdeck queries
// ---------------------------------------------------------------------------

/// List the most influential users in the data set.
pub fn run_query_influential(format: OutputFormat) -> Result<()> {
    let service = QueryService::new(build_client());
    let users = service.most_influential_users()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
        OutputFormat::Table => {
            println!("{}", "Most influential users".bold().cyan());
            print_users_table(&users);
        }
    }
    Ok(())
}

/// Find users interested in the given topics.
pub fn run_query_interests(topics: &[String], format: OutputFormat) -> Result<()> {
    let service = QueryService::new(build_client());
    let users = service.users_with_interests(topics)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
        OutputFormat::Table => {
            println!(
                "{} {}",
                "Users interested in".bold().cyan(),
                topics.join(", ").bold()
            );
            print_users_table(&users);
        }
    }
    Ok(())
}

/// Suggest ads for a user, based on active or potential interests.
pub fn run_query_ads(user_id: &str, potential: bool, format: OutputFormat) -> Result<()> {
    let service = QueryService::new(build_client());
    let ads = service.suggest_ads_for_user(user_id, potential)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ads)?),
        OutputFormat::Table => {
            let basis = if potential { "potential" } else { "active" };
            println!(
                "{} {} ({basis} interests)",
                "Ad suggestions for user".bold().cyan(),
                user_id.bold()
            );
            print_ads_table(&ads);
        }
    }
    Ok(())
}

fn print_ads_table(ads: &[Ad]) {
    if ads.is_empty() {
        println!("{}", "No ad suggestions for this user.".yellow());
        return;
    }
    for ad in ads {
        match &ad.name {
            Some(name) => println!("  {name}"),
            None => println!(
                "  {}",
                serde_json::to_string(ad).unwrap_or_else(|_| "<unrenderable>".to_string())
            ),
        }
    }
    println!();
    println!("{} suggestion(s)", ads.len());
}

// ---------------------------------------------------------------------------
// opsdeck health
// ---------------------------------------------------------------------------

/// Check backend reachability and local setup.
pub fn run_health() -> Result<()> {
    let cfg = config::load();
    let client = ApiClient::from_config(&cfg);

    println!("{}", "opsdeck health check".bold().cyan());
    println!("{}", "=".repeat(40));
    println!("  Backend URL: {}", client.base_url());

    let mut controller = ServiceController::new(client);
    match controller.get_status() {
        Ok(status) => {
            println!("  Backend:     {}", "reachable".green());
            println!("  Status:      {}", serde_json::to_string(status)?);
        }
        Err(e) => {
            println!("  Backend:     {}", "unreachable".red());
            println!("  Error:       {e:#}");
        }
    }

    match history::request_log_path() {
        Some(path) if cfg.history.enabled => {
            println!("  Request log: {}", path.display());
        }
        Some(_) => println!("  Request log: {}", "disabled".yellow()),
        None => println!("  Request log: {}", "no home directory".yellow()),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// opsdeck history
// ---------------------------------------------------------------------------

/// Show the most recent backend requests.
pub fn run_history(limit: usize) -> Result<()> {
    let entries = history::read_recent(limit);

    if entries.is_empty() {
        println!(
            "{}",
            "No requests logged yet. Run a command against the backend first.".yellow()
        );
        return Ok(());
    }

    println!("{}", "Recent backend requests".bold().cyan());
    for entry in &entries {
        let status = entry
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "---".to_string());
        let outcome = if entry.ok {
            status.as_str().green()
        } else {
            status.as_str().red()
        };
        println!(
            "  {}  {:>4}  {:>5}ms  {}",
            entry.timestamp, outcome, entry.duration_ms, entry.endpoint
        );
        if let Some(error) = &entry.error {
            println!("      {}", error.red());
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// opsdeck config
// ---------------------------------------------------------------------------

/// Print the effective (fully resolved) configuration.
pub fn run_config_show() -> Result<()> {
    println!("{}", config::show_effective_config()?);
    if let Some(path) = config::global_config_file() {
        let exists = if path.exists() { "" } else { " (not created yet)" };
        println!("# global config: {}{exists}", path.display());
    }
    Ok(())
}

/// Write the default annotated config file.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses_known_values() {
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str_opt(Some("table")),
            OutputFormat::Table
        );
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(
            OutputFormat::from_str_opt(Some("bogus")),
            OutputFormat::Table
        );
    }
}
