//! CLI definitions and entry point

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};

use crate::commands;
use habityzer::adapters::HttpTransport;
use habityzer::config::{Config, ConfigError};
use habityzer::core::services::TaskService;
use habityzer::output::OutputMode;

/// habityzer - manage Habityzer tasks from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "habityzer",
    version,
    about = "Manage Habityzer tasks from the terminal",
    long_about = "Manage Habityzer tasks from the terminal.\n\n\
                  Listings are filtered to the configured project and, unless a\n\
                  filter is given, to active tasks (Todo and In Progress).\n\n\
                  Configuration: HABITYZER_API_TOKEN (required), HABITYZER_API_BASE_URL,\n\
                  HABITYZER_PROJECT_ID, or the [api] section of ~/.habityzer/config.toml."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tasks (default: active only)
    #[command(alias = "tasks")]
    List {
        /// todo, progress, done, ideas or all; anything else shows active tasks
        filter: Option<String>,
    },

    /// Show available task statuses
    Statuses,

    /// Show available projects
    Projects,

    /// Show detailed task info with description
    Show {
        /// Task ID
        id: String,
    },

    /// Create a new task in the configured project
    Create {
        /// Task title
        title: String,

        /// Task description
        description: Option<String>,

        /// Initial status ID (default: Todo)
        #[arg(short, long)]
        status: Option<String>,

        /// Priority (default: 2)
        #[arg(short, long)]
        priority: Option<u32>,
    },

    /// Update a single task field
    Update {
        /// Task ID
        id: String,

        /// Field name as the API spells it (e.g. title, description, priority)
        field: String,

        /// New value; sent as an integer for priority, as text otherwise
        value: String,
    },

    /// Move a task to another status
    Move {
        /// Task ID
        id: String,

        /// Target status ID
        status: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

/// Run the CLI
pub async fn run() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            err.print()?;
            return Ok(());
        },
        Err(err) => {
            err.print()?;
            std::process::exit(1);
        },
    };

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::load().map_err(|err| match err {
        err @ ConfigError::MissingToken => anyhow::anyhow!(
            "{err}\nAdd your token to the environment, for example:\n  export HABITYZER_API_TOKEN=your_token_here"
        ),
        other => anyhow::Error::new(other),
    })?;
    let transport = HttpTransport::new(&config).context("failed to set up HTTP client")?;
    let service = TaskService::new(transport, &config);
    log::debug!(
        "using API at {} (project {})",
        service.transport().base_url(),
        service.project_id()
    );

    if output_mode == OutputMode::Human {
        println!("Habityzer CLI - Project ID: {}", service.project_id());
    }

    match command {
        Command::List { filter } => commands::list(&service, filter.as_deref(), output_mode).await,
        Command::Statuses => commands::statuses(&service, output_mode).await,
        Command::Projects => commands::projects(&service, output_mode).await,
        Command::Show { id } => commands::show(&service, &id, output_mode).await,
        Command::Create {
            title,
            description,
            status,
            priority,
        } => {
            commands::create(
                &service,
                &title,
                description.as_deref(),
                status.as_deref(),
                priority,
                output_mode,
            )
            .await
        },
        Command::Update { id, field, value } => {
            commands::update(&service, &id, &field, &value, output_mode).await
        },
        Command::Move { id, status } => commands::move_task(&service, &id, &status, output_mode).await,
        Command::Delete { id } => commands::delete(&service, &id, output_mode).await,
    }
}
