//! `tf`: terminal client for the TaskForge API.

pub mod api_client;
mod commands;
pub mod error;
mod utils;

#[cfg(test)]
mod utils_test;

use clap::{Parser, Subcommand};
use miette::Result;

use commands::task::TaskFilter;
use error::CliResult;

#[derive(Parser)]
#[command(name = "tf")]
#[command(author, version, about = "TaskForge task CLI", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: TASKFORGE_API_URL env or http://localhost:3000/api)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks, newest first
    List {
        /// Which tasks to show
        #[arg(long, value_enum, default_value_t = TaskFilter::All)]
        filter: TaskFilter,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create a task
    Add {
        /// Task title
        title: String,
        /// Optional details
        #[arg(short, long)]
        description: Option<String>,
        /// low, medium or high
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Mark a task as completed
    Done {
        id: i64,
    },
    /// Mark a task as pending again
    Undo {
        id: i64,
    },
    /// Change a task's title or description
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a task
    Rm {
        id: i64,
    },
    /// Check server health and storage mode
    Health,
    /// Create an account
    Register {
        email: String,
        password: String,
        name: String,
    },
    /// Log in and print the session token
    Login {
        email: String,
        password: String,
    },
}

pub async fn run() -> Result<()> {
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    let api_client = api_client::ApiClient::new(cli.api_url);

    let Some(command) = cli.command else {
        let _ = Cli::parse_from(["tf", "--help"]);
        return Ok(());
    };

    let output = dispatch(&api_client, command).await?;
    println!("{}", output);
    Ok(())
}

async fn dispatch(api_client: &api_client::ApiClient, command: Commands) -> CliResult<String> {
    use commands::{auth, system, task};

    match command {
        Commands::List { filter, format } => task::list_tasks(api_client, filter, &format).await,
        Commands::Add {
            title,
            description,
            priority,
        } => {
            task::create_task(
                api_client,
                &title,
                description.as_deref(),
                priority.as_deref(),
            )
            .await
        }
        Commands::Done { id } => task::set_completed(api_client, id, true).await,
        Commands::Undo { id } => task::set_completed(api_client, id, false).await,
        Commands::Edit {
            id,
            title,
            description,
        } => task::edit_task(api_client, id, title.as_deref(), description.as_deref()).await,
        Commands::Rm { id } => task::delete_task(api_client, id).await,
        Commands::Health => system::health(api_client).await,
        Commands::Register {
            email,
            password,
            name,
        } => auth::register(api_client, &email, &password, &name).await,
        Commands::Login { email, password } => auth::login(api_client, &email, &password).await,
    }
}
