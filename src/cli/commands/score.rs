use chrono::NaiveDate;
use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::{format_average, int_field, items, output, output_empty_collection, str_field};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ScoreCommands {
    #[command(about = "Record a score")]
    Add {
        #[arg(long, help = "Subject id")]
        subject: i64,
        #[arg(long, help = "Behavior definition id")]
        definition: i64,
        #[arg(long, allow_hyphen_values = true, help = "Score value")]
        score: i32,
        #[arg(long, help = "Event date (YYYY-MM-DD), defaults to today")]
        date: Option<NaiveDate>,
    },

    #[command(about = "List the scores recorded for a subject")]
    List {
        #[arg(long, help = "Subject id")]
        subject: i64,
    },

    #[command(about = "Average score per behavior definition of a subject")]
    Averages {
        #[arg(long, help = "Subject id")]
        subject: i64,
    },
}

pub async fn handle(cmd: ScoreCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ScoreCommands::Add { subject, definition, score, date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let body = client
                .post_json(
                    "/scores/",
                    &json!({
                        "score": score,
                        "date": date,
                        "subject_id": subject,
                        "behavior_definition_id": definition,
                    }),
                )
                .await?;
            output(output_format, &body, |b| {
                println!(
                    "✓ Recorded score {} for {} on {}",
                    int_field(b, "score"),
                    str_field(&b["definition"], "name"),
                    str_field(b, "date")
                );
            })
        }
        ScoreCommands::List { subject } => {
            let body = client.get(&format!("/subjects/{}/scores/", subject)).await?;
            if items(&body).is_empty() {
                return output_empty_collection(output_format, "scores");
            }
            output(output_format, &body, |b| {
                for score in items(b) {
                    println!(
                        "{}  {:<24} {:>4}",
                        str_field(score, "date"),
                        str_field(&score["definition"], "name"),
                        int_field(score, "score")
                    );
                }
            })
        }
        ScoreCommands::Averages { subject } => {
            let body = client.get(&format!("/subjects/{}/scores/averages/", subject)).await?;
            if items(&body).is_empty() {
                return output_empty_collection(output_format, "definitions");
            }
            output(output_format, &body, |b| {
                for row in items(b) {
                    println!(
                        "{:<24} avg {:>6}  ({} scores)",
                        str_field(&row["definition"], "name"),
                        format_average(&row["average_score"]),
                        int_field(row, "score_count")
                    );
                }
            })
        }
    }
}
