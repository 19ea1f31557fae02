use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Apply pending schema migrations")]
    Migrate {
        #[arg(long, env = "DATABASE_URL", hide_env_values = true, help = "PostgreSQL connection URL")]
        database_url: String,
    },

    #[command(about = "Check that the database is reachable")]
    Ping {
        #[arg(long, env = "DATABASE_URL", hide_env_values = true, help = "PostgreSQL connection URL")]
        database_url: String,
    },
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DbCommands::Migrate { database_url } => {
            let config = AppConfig::for_database(database_url);
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            DatabaseManager::migrate(&pool).await.context("failed to apply migrations")?;
            pool.close().await;

            output(output_format, &json!({ "success": true, "message": "migrations applied" }), |_| {
                println!("✓ Migrations applied");
            })
        }
        DbCommands::Ping { database_url } => {
            let config = AppConfig::for_database(database_url);
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            DatabaseManager::health_check(&pool).await?;
            pool.close().await;

            output(output_format, &json!({ "success": true, "database": "ok" }), |_| {
                println!("✓ Database reachable");
            })
        }
    }
}
