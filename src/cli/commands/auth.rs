use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::{int_field, items, output, str_field};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Create a new account")]
    Register {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, env = "BHV_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
    },

    #[command(about = "Exchange email and password for a bearer token")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, env = "BHV_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
    },

    #[command(about = "Show current user information")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Register { email, password } => {
            let body = client
                .post_json_public("/users/", &json!({ "email": email, "password": password }))
                .await?;
            output(output_format, &body, |b| {
                println!("✓ Registered {} (id {})", str_field(b, "email"), int_field(b, "id"));
            })
        }
        AuthCommands::Login { email, password } => {
            let body = client
                .post_form("/token", &[("username", email.as_str()), ("password", password.as_str())])
                .await?;
            output(output_format, &body, |b| {
                println!("export BHV_TOKEN={}", str_field(b, "access_token"));
            })
        }
        AuthCommands::Whoami => {
            let body = client.get("/users/me").await?;
            output(output_format, &body, |b| {
                println!("{} (id {})", str_field(b, "email"), int_field(b, "id"));
                for subject in items(&b["subjects"]) {
                    println!("  subject {}: {}", int_field(subject, "id"), str_field(subject, "name"));
                }
            })
        }
    }
}
