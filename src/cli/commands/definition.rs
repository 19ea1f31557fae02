use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::{int_field, items, output, output_empty_collection, page_query, str_field};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum DefinitionCommands {
    #[command(about = "List behavior definitions of a subject")]
    List {
        #[arg(long, help = "Subject id")]
        subject: i64,
        #[arg(long)]
        skip: Option<i64>,
        #[arg(long)]
        limit: Option<i64>,
    },

    #[command(about = "Create a behavior definition under a subject")]
    Create {
        #[arg(long, help = "Subject id")]
        subject: i64,
        #[arg(help = "Definition name (unique within the subject)")]
        name: String,
        #[arg(long, help = "Optional description")]
        description: Option<String>,
    },
}

pub async fn handle(cmd: DefinitionCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DefinitionCommands::List { subject, skip, limit } => {
            let path = format!("/subjects/{}/definitions/", subject);
            let body = client.get_query(&path, &page_query(skip, limit)).await?;
            if items(&body).is_empty() {
                return output_empty_collection(output_format, "definitions");
            }
            output(output_format, &body, |b| {
                for definition in items(b) {
                    println!(
                        "{:>6}  {}  {}",
                        int_field(definition, "id"),
                        str_field(definition, "name"),
                        str_field(definition, "description")
                    );
                }
            })
        }
        DefinitionCommands::Create { subject, name, description } => {
            let body = client
                .post_json(
                    &format!("/subjects/{}/definitions/", subject),
                    &json!({ "name": name, "description": description }),
                )
                .await?;
            output(output_format, &body, |b| {
                println!("✓ Created definition {} ({})", int_field(b, "id"), str_field(b, "name"));
            })
        }
    }
}
