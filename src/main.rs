use anyhow::Result;
use clap::{Parser, Subcommand};

use opsdeck::cli::{self, OutputFormat};
use opsdeck::console::LifecycleCommand;

#[derive(Debug, Parser)]
#[command(name = "opsdeck")]
#[command(about = "Management console for the data-platform backend")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Control the backend service lifecycle
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },
    /// Browse topics and the users subscribed to them
    Topics {
        #[command(subcommand)]
        action: TopicsAction,
    },
    /// Page through users and look up their connections
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Run analytical queries over the ingested data
    Queries {
        #[command(subcommand)]
        action: QueriesAction,
    },
    /// Check backend reachability and local setup
    Health,
    /// Show recent backend requests from the history log
    History {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Manage opsdeck configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ServiceAction {
    /// Start the backend service
    Start {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Stop the backend service
    Stop {
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Trigger the analysis job
    Analyse {
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Fetch the current service status
    Status {
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Debug, Subcommand)]
enum TopicsAction {
    /// List all topics
    List {
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List the users subscribed to a topic
    Users {
        /// Topic identifier
        topic: String,
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Debug, Subcommand)]
enum UsersAction {
    /// Page through the user listing
    List {
        /// Page size (default from config, 100)
        #[arg(long)]
        size: Option<u32>,
        /// Page number (default 0)
        #[arg(long)]
        page: Option<u32>,
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List the connections of a user
    Connections {
        /// User identifier
        user_id: String,
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Debug, Subcommand)]
enum QueriesAction {
    /// List the most influential users in the data set
    Influential {
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Find users interested in the given topics
    Interests {
        /// Topic to include (repeatable)
        #[arg(long = "topic", required = true)]
        topics: Vec<String>,
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Suggest ads for a user
    Ads {
        /// User identifier
        user_id: String,
        /// Base suggestions on potential interests (the user's
        /// connections) instead of the user's own activity
        #[arg(long)]
        potential: bool,
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default annotated config to ~/.opsdeck/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Service { action } => match action {
            ServiceAction::Start { format } => cli::run_service_command(
                LifecycleCommand::Start,
                OutputFormat::from_str_opt(Some(&format)),
            ),
            ServiceAction::Stop { format } => cli::run_service_command(
                LifecycleCommand::Stop,
                OutputFormat::from_str_opt(Some(&format)),
            ),
            ServiceAction::Analyse { format } => cli::run_service_command(
                LifecycleCommand::Analyse,
                OutputFormat::from_str_opt(Some(&format)),
            ),
            ServiceAction::Status { format } => {
                cli::run_service_status(OutputFormat::from_str_opt(Some(&format)))
            }
        },
        Commands::Topics { action } => match action {
            TopicsAction::List { format } => {
                cli::run_topics(OutputFormat::from_str_opt(Some(&format)))
            }
            TopicsAction::Users { topic, format } => {
                cli::run_topic_users(&topic, OutputFormat::from_str_opt(Some(&format)))
            }
        },
        Commands::Users { action } => match action {
            UsersAction::List { size, page, format } => {
                cli::run_users(size, page, OutputFormat::from_str_opt(Some(&format)))
            }
            UsersAction::Connections { user_id, format } => {
                cli::run_user_connections(&user_id, OutputFormat::from_str_opt(Some(&format)))
            }
        },
        Commands::Queries { action } => match action {
            QueriesAction::Influential { format } => {
                cli::run_query_influential(OutputFormat::from_str_opt(Some(&format)))
            }
            QueriesAction::Interests { topics, format } => {
                cli::run_query_interests(&topics, OutputFormat::from_str_opt(Some(&format)))
            }
            QueriesAction::Ads {
                user_id,
                potential,
                format,
            } => cli::run_query_ads(
                &user_id,
                potential,
                OutputFormat::from_str_opt(Some(&format)),
            ),
        },
        Commands::Health => cli::run_health(),
        Commands::History { limit } => cli::run_history(limit),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
        },
    }
}
