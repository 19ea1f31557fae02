use anyhow::bail;
use clap::Subcommand;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output, str_field};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Check server health status from API /health endpoint")]
    Health,

    #[command(about = "Show server information from API root endpoint")]
    Info,
}

pub async fn handle(cmd: ServerCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Health => {
            let (status, body) = client.get_public("/health").await?;
            output(output_format, &body, |b| {
                println!("{} (database: {})", str_field(b, "status"), str_field(b, "database"));
            })?;
            if !status.is_success() {
                bail!("server reported {}", status);
            }
            Ok(())
        }
        ServerCommands::Info => {
            let (_, body) = client.get_public("/").await?;
            output(output_format, &body, |b| {
                println!("{} (version {})", str_field(b, "message"), str_field(b, "version"));
            })
        }
    }
}
