pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;

#[derive(Parser)]
#[command(name = "bhv")]
#[command(about = "BHV3 CLI - command-line client for the BHV3 behavior scoring API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, env = "BHV_URL", default_value = "http://localhost:8000", help = "API base URL")]
    pub url: String,

    #[arg(long, global = true, env = "BHV_TOKEN", hide_env_values = true, help = "Bearer token from `bhv auth login`")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Server status and information")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Registration, login and current user")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Subjects owned by the current user")]
    Subject {
        #[command(subcommand)]
        cmd: commands::subject::SubjectCommands,
    },

    #[command(about = "Behavior definitions of a subject")]
    Definition {
        #[command(subcommand)]
        cmd: commands::definition::DefinitionCommands,
    },

    #[command(about = "Record scores and view averages")]
    Score {
        #[command(subcommand)]
        cmd: commands::score::ScoreCommands,
    },

    #[command(about = "Database administration (connects directly, not through the API)")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let client = || ApiClient::new(&cli.url, cli.token.clone());

    match cli.command {
        Commands::Server { cmd } => commands::server::handle(cmd, &client()?, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, &client()?, output_format).await,
        Commands::Subject { cmd } => commands::subject::handle(cmd, &client()?, output_format).await,
        Commands::Definition { cmd } => commands::definition::handle(cmd, &client()?, output_format).await,
        Commands::Score { cmd } => commands::score::handle(cmd, &client()?, output_format).await,
        Commands::Db { cmd } => commands::db::handle(cmd, output_format).await,
    }
}
