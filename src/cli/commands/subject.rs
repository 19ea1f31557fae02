use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::{int_field, items, output, output_empty_collection, page_query, str_field};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum SubjectCommands {
    #[command(about = "List your subjects")]
    List {
        #[arg(long, help = "Number of subjects to skip")]
        skip: Option<i64>,
        #[arg(long, help = "Maximum number of subjects to return")]
        limit: Option<i64>,
    },

    #[command(about = "Create a subject")]
    Create {
        #[arg(help = "Subject name (unique among your subjects)")]
        name: String,
        #[arg(long, help = "Optional description")]
        description: Option<String>,
    },
}

pub async fn handle(cmd: SubjectCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        SubjectCommands::List { skip, limit } => {
            let body = client.get_query("/subjects/", &page_query(skip, limit)).await?;
            if items(&body).is_empty() {
                return output_empty_collection(output_format, "subjects");
            }
            output(output_format, &body, |b| {
                for subject in items(b) {
                    println!(
                        "{:>6}  {}  ({} definitions)",
                        int_field(subject, "id"),
                        str_field(subject, "name"),
                        items(&subject["definitions"]).len()
                    );
                }
            })
        }
        SubjectCommands::Create { name, description } => {
            let body = client
                .post_json("/subjects/", &json!({ "name": name, "description": description }))
                .await?;
            output(output_format, &body, |b| {
                println!("✓ Created subject {} ({})", int_field(b, "id"), str_field(b, "name"));
            })
        }
    }
}
